use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Lifecycle of a ticker.  Moves forward only:
/// `Idle → Running → StopRequested → Stopped` (a worker that fails skips
/// straight from `Running` to `Stopped`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    StopRequested,
    Stopped,
}

/// Shared run state.  The controller and the worker hold clones; only this
/// channel crosses threads, all domain state stays with the worker.
#[derive(Debug, Clone)]
pub(crate) struct RunControl {
    tx: Arc<watch::Sender<RunState>>,
}

/// Why a cancellable sleep returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wake {
    Elapsed,
    StopRequested,
}

impl RunControl {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(RunState::Idle);
        Self { tx: Arc::new(tx) }
    }

    pub(crate) fn get(&self) -> RunState {
        *self.tx.borrow()
    }

    pub(crate) fn start(&self) {
        self.tx.send_if_modified(|state| advance(state, RunState::Idle, RunState::Running));
    }

    /// Returns `false` if the ticker was not running.
    pub(crate) fn request_stop(&self) -> bool {
        self.tx
            .send_if_modified(|state| advance(state, RunState::Running, RunState::StopRequested))
    }

    pub(crate) fn mark_stopped(&self) {
        self.tx.send_replace(RunState::Stopped);
    }

    pub(crate) fn is_running(&self) -> bool {
        self.get() == RunState::Running
    }

    /// Sleep for `duration`, waking early once the state leaves `Running`.
    pub(crate) async fn sleep(&self, duration: Duration) -> Wake {
        let mut rx = self.tx.subscribe();
        tokio::select! {
            _ = tokio::time::sleep(duration) => Wake::Elapsed,
            _ = wait_while(&mut rx, RunState::Running) => Wake::StopRequested,
        }
    }

    /// Resolve once the worker has reached `Stopped`.
    pub(crate) async fn stopped(&self) {
        let mut rx = self.tx.subscribe();
        loop {
            let state = *rx.borrow_and_update();
            if state == RunState::Stopped {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

fn advance(state: &mut RunState, from: RunState, to: RunState) -> bool {
    if *state == from {
        *state = to;
        true
    } else {
        false
    }
}

async fn wait_while(rx: &mut watch::Receiver<RunState>, current: RunState) {
    loop {
        let state = *rx.borrow_and_update();
        if state != current {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

/// Marks the ticker `Stopped` when the worker exits, even by panic.
pub(crate) struct StoppedGuard(pub(crate) RunControl);

impl Drop for StoppedGuard {
    fn drop(&mut self) {
        self.0.mark_stopped();
    }
}
