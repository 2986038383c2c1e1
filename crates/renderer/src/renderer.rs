use crate::{label::format_price, Layout};
use ticker_config::TickerConfig;
use ticker_core::{
    DisplaySink, Fill, HistoryBuffer, Label, Point, Primitive, RedrawMode, RenderError,
    RenderWindow,
};
use tracing::debug;

/// Draws the price label and bar chart onto a [`DisplaySink`].
#[derive(Debug)]
pub struct Renderer<D> {
    sink:     D,
    layout:   Layout,
    /// Total value span of the chart window.
    span:     f64,
    currency: String,
    decimals: usize,
}

impl<D: DisplaySink> Renderer<D> {
    pub fn new(sink: D, layout: Layout, config: &TickerConfig) -> Self {
        Self {
            sink,
            layout,
            span:     config.chart.range,
            currency: config.label.currency.clone(),
            decimals: config.label.decimals,
        }
    }

    /// Describe the next frame: label for the latest sample plus the chart.
    ///
    /// Nothing becomes visible until [`flush`](Self::flush).
    pub fn draw(&mut self, history: &HistoryBuffer) -> Result<(), RenderError> {
        let label = self.label_for(history.latest());
        self.sink.draw_label(&label)?;

        let primitives = self.chart_primitives(history);
        debug!(bars = primitives.len() - 1, "drawing chart");
        self.sink.draw_region(&primitives)
    }

    pub fn flush(&mut self, mode: RedrawMode) -> Result<(), RenderError> {
        self.sink.flush(mode)
    }

    pub fn label_for(&self, value: f64) -> Label {
        Label {
            text:   format_price(value, self.decimals, &self.currency),
            origin: self.layout.label_origin,
            size:   self.layout.label_size,
        }
    }

    /// Clear the chart, then one black column per sample, oldest leftmost.
    ///
    /// Bars grow up from the bottom row of the chart; a zero-height bar is a
    /// single baseline pixel and a full-height bar reaches the top row.
    pub fn chart_primitives(&self, history: &HistoryBuffer) -> Vec<Primitive> {
        let chart = self.layout.chart;
        let window = RenderWindow::around(history.latest(), self.span);
        let baseline = chart.bottom() - 1;
        let max_height = chart.size.height.saturating_sub(1) as f64;

        let mut primitives = Vec::with_capacity(history.len() + 1);
        primitives.push(Primitive::Rect { rect: chart, fill: Fill::White });

        for (i, value) in history.iter().take(chart.size.width as usize) {
            let height = window.height_of(value, max_height).round() as i32;
            let x = chart.origin.x + i as i32;
            primitives.push(Primitive::Line {
                from: Point::new(x, baseline - height),
                to:   Point::new(x, baseline),
                fill: Fill::Black,
            });
        }

        primitives
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn into_sink(self) -> D {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        labels:  Vec<Label>,
        regions: Vec<Vec<Primitive>>,
        flushes: Vec<RedrawMode>,
    }

    impl DisplaySink for Recorder {
        fn draw_label(&mut self, label: &Label) -> Result<(), RenderError> {
            self.labels.push(label.clone());
            Ok(())
        }

        fn draw_region(&mut self, primitives: &[Primitive]) -> Result<(), RenderError> {
            self.regions.push(primitives.to_vec());
            Ok(())
        }

        fn flush(&mut self, mode: RedrawMode) -> Result<(), RenderError> {
            self.flushes.push(mode);
            Ok(())
        }
    }

    /// 4-wide chart with 41 rows, so bar heights map onto `[0, 40]`.
    fn small_config() -> TickerConfig {
        let mut config = TickerConfig::default();
        config.layout.width = 24;
        config.layout.height = 82;
        config.layout.padding_x = 0;
        config.layout.padding_y = 31;
        config.chart.height_ratio = 0.5;
        config
    }

    fn renderer() -> Renderer<Recorder> {
        let config = small_config();
        let layout = Layout::from_config(&config);
        assert_eq!(layout.chart, ticker_core::Rect::new(20, 41, 4, 41));
        Renderer::new(Recorder::default(), layout, &config)
    }

    fn bar_heights(primitives: &[Primitive]) -> Vec<i32> {
        primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Line { from, to, .. } => Some(to.y - from.y),
                Primitive::Rect { .. } => None,
            })
            .collect()
    }

    #[test]
    fn scenario_bars_follow_window() {
        let mut history = HistoryBuffer::new(4, 0.0).unwrap();
        for v in [100.0, 120.0, 80.0, 150.0, 90.0] {
            history.push(v);
        }
        let r = renderer();
        let primitives = r.chart_primitives(&history);

        assert_eq!(
            primitives[0],
            Primitive::Rect { rect: r.layout().chart, fill: Fill::White }
        );
        // window [65, 115] onto 40 px: 120 → 40 (clamped), 80 → 12, 150 → 40, 90 → 20
        assert_eq!(bar_heights(&primitives), vec![40, 12, 40, 20]);
    }

    #[test]
    fn bars_are_columns_left_to_right_on_baseline() {
        let history = HistoryBuffer::new(4, 0.0).unwrap();
        let r = renderer();
        let primitives = r.chart_primitives(&history);
        for (i, p) in primitives[1..].iter().enumerate() {
            let Primitive::Line { from, to, fill } = p else {
                panic!("expected a line");
            };
            assert_eq!(from.x, 20 + i as i32);
            assert_eq!(to.x, from.x);
            assert_eq!(to.y, 81);
            assert_eq!(*fill, Fill::Black);
        }
    }

    #[test]
    fn identical_samples_give_identical_bars() {
        let mut history = HistoryBuffer::new(4, 0.0).unwrap();
        for _ in 0..4 {
            history.push(42.0);
        }
        let heights = bar_heights(&renderer().chart_primitives(&history));
        assert_eq!(heights, vec![20, 20, 20, 20]);
    }

    #[test]
    fn draw_sends_label_then_region() {
        let mut history = HistoryBuffer::new(4, 0.0).unwrap();
        history.push(90.0);
        let mut r = renderer();
        r.draw(&history).unwrap();
        r.flush(RedrawMode::Full).unwrap();

        let sink = r.into_sink();
        assert_eq!(sink.labels.len(), 1);
        assert_eq!(sink.labels[0].text, "90.00 €");
        assert_eq!(sink.labels[0].origin.x, 20);
        assert_eq!(sink.regions.len(), 1);
        assert_eq!(sink.regions[0].len(), 5);
        assert_eq!(sink.flushes, vec![RedrawMode::Full]);
    }

    #[test]
    fn zero_span_draws_midline() {
        let mut config = small_config();
        config.chart.range = 0.0;
        let layout = Layout::from_config(&config);
        let r = Renderer::new(Recorder::default(), layout, &config);

        let mut history = HistoryBuffer::new(4, 0.0).unwrap();
        history.push(10.0);
        assert_eq!(bar_heights(&r.chart_primitives(&history)), vec![20, 20, 20, 20]);
    }
}
