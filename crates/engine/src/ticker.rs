use crate::state::{RunControl, RunState, StoppedGuard, Wake};
use std::time::Duration;
use ticker_config::TickerConfig;
use ticker_core::{
    DisplaySink, HistoryBuffer, RedrawMode, RedrawScheduler, RenderError, Result, Sample,
    SampleSource,
};
use ticker_renderer::{Layout, Renderer};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Value every history slot holds before the first fetch.
const HISTORY_FILL: Sample = 0.0;

/// Result of one [`Ticker::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cycle {
    /// Sample recorded, frame drawn and flushed in `mode`.
    Rendered { value: Sample, mode: RedrawMode },
    /// Source failed; nothing changed.  The next step retries.
    FetchFailed,
}

/// Polls a [`SampleSource`] and renders the rolling history to a [`DisplaySink`].
///
/// Owns all domain state (history, redraw counter, sink). Run it cycle by
/// cycle with [`step`](Self::step), or hand it to a background task with
/// [`start`](Self::start).
#[derive(Debug)]
pub struct Ticker<S, D> {
    source:    S,
    renderer:  Renderer<D>,
    history:   HistoryBuffer,
    scheduler: RedrawScheduler,
    interval:  Duration,
    control:   RunControl,
}

impl<S, D> Ticker<S, D>
where
    S: SampleSource + 'static,
    D: DisplaySink + 'static,
{
    /// Validate `config` and build an idle ticker.
    pub fn new(config: &TickerConfig, source: S, sink: D) -> Result<Self> {
        config.validate()?;
        let layout = Layout::from_config(config);
        let history = HistoryBuffer::new(layout.history_capacity(), HISTORY_FILL)?;

        Ok(Self {
            source,
            renderer: Renderer::new(sink, layout, config),
            history,
            scheduler: RedrawScheduler::new(config.chart.max_partial_redraws),
            interval: config.poll.interval(),
            control: RunControl::new(),
        })
    }

    /// Run one cycle without sleeping.
    ///
    /// Fetch failures are logged and reported as [`Cycle::FetchFailed`];
    /// only display failures are returned as errors.
    pub async fn step(&mut self) -> Result<Cycle, RenderError> {
        let value = match self.source.fetch().await {
            Ok(value) if value.is_finite() => value,
            Ok(value) => {
                warn!("Source returned non-finite price {value}; retrying in {:?}", self.interval);
                return Ok(Cycle::FetchFailed);
            }
            Err(e) => {
                warn!("Fetch failed: {e}; retrying in {:?}", self.interval);
                return Ok(Cycle::FetchFailed);
            }
        };

        let mode = self.apply(value)?;
        Ok(Cycle::Rendered { value, mode })
    }

    /// Record `value` and push a new frame to the sink.
    fn apply(&mut self, value: Sample) -> Result<RedrawMode, RenderError> {
        self.history.push(value);
        info!("{}", self.renderer.label_for(value).text);
        self.renderer.draw(&self.history)?;

        let mode = self.scheduler.decide();
        if let Err(e) = self.renderer.flush(mode) {
            warn!("Flush failed: {e}; retrying once");
            self.renderer.flush(mode)?;
        }
        self.scheduler.record(mode);
        debug!(?mode, partial_count = self.scheduler.partial_count(), "frame flushed");
        Ok(mode)
    }

    /// Spawn the polling loop on the current Tokio runtime.
    pub fn start(self) -> TickerHandle<D> {
        let control = self.control.clone();
        control.start();
        let task = tokio::spawn(self.run());
        TickerHandle { control, task }
    }

    async fn run(mut self) -> Result<D> {
        let _guard = StoppedGuard(self.control.clone());
        info!(
            interval = ?self.interval,
            capacity = self.history.capacity(),
            "Ticker started"
        );

        let mut cycles: u64 = 0;
        while self.control.is_running() {
            match self.step().await {
                Ok(Cycle::Rendered { .. }) => cycles += 1,
                Ok(Cycle::FetchFailed) => {}
                Err(e) => {
                    error!("Display failed, stopping ticker: {e}");
                    return Err(e.into());
                }
            }

            if self.control.sleep(self.interval).await == Wake::StopRequested {
                break;
            }
        }

        info!(cycles, "Ticker stopped");
        Ok(self.renderer.into_sink())
    }

    pub fn state(&self) -> RunState {
        self.control.get()
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    pub fn renderer(&self) -> &Renderer<D> {
        &self.renderer
    }
}

/// Controller side of a running [`Ticker`].
#[derive(Debug)]
pub struct TickerHandle<D> {
    control: RunControl,
    task:    JoinHandle<Result<D>>,
}

impl<D> TickerHandle<D> {
    pub fn state(&self) -> RunState {
        self.control.get()
    }

    /// Resolve once the worker has exited, without asking it to.
    pub async fn stopped(&self) {
        self.control.stopped().await;
    }

    /// Ask the worker to stop and wait for it to exit.
    ///
    /// A sleeping worker wakes immediately; a worker mid-cycle finishes that
    /// cycle first. Hands the sink back after a clean exit, or returns the
    /// worker's terminal error.
    pub async fn stop(self) -> Result<D> {
        if self.control.request_stop() {
            info!("Stop requested");
        }
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(std::io::Error::other(e).into()),
        }
    }
}
