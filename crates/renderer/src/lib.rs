//! Layout and drawing for the ticker panel.
//!
//! Turns the rolling price history into absolute draw primitives: a cleared
//! chart region with one vertical bar per sample, plus the price label.

pub mod label;
pub mod renderer;

pub use label::format_price;
pub use renderer::Renderer;

use ticker_config::TickerConfig;
use ticker_core::{Point, Rect, Size};

/// Pixel placement of every element on the panel.
///
/// ```text
/// +--------------------------------+
/// |        |  label                |
/// |  logo  |-----------------------|
/// |        |  chart (bars)         |
/// +--------------------------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub panel:        Size,
    pub logo:         Rect,
    pub chart:        Rect,
    /// Top-left of the label, left-aligned with the chart.
    pub label_origin: Point,
    pub label_size:   u32,
}

impl Layout {
    /// Build a [`Layout`] from the loaded configuration.
    ///
    /// Assumes the configuration passed [`TickerConfig::validate`], which keeps
    /// every side within [`ticker_config::MAX_PANEL_SIDE`] so the `i32` coordinates cannot wrap.
    pub fn from_config(config: &TickerConfig) -> Self {
        let layout = &config.layout;
        let logo_side = layout.logo_side();
        let chart_x = layout.chart_x();
        let chart_y = layout.chart_y(config.chart.height_ratio);

        let chart = Rect::new(
            chart_x as i32,
            chart_y as i32,
            layout.width.saturating_sub(chart_x),
            layout.height.saturating_sub(chart_y),
        );

        // Centred in the upper part.
        let label_y = chart_y as i32 / 2 - config.label.size as i32 / 2;

        Self {
            panel:        Size::new(layout.width, layout.height),
            logo:         Rect::new(
                layout.padding_x as i32,
                layout.padding_y as i32,
                logo_side,
                logo_side,
            ),
            chart,
            label_origin: Point::new(chart.origin.x, label_y),
            label_size:   config.label.size,
        }
    }

    /// One sample per chart column.
    pub fn history_capacity(&self) -> usize {
        self.chart.size.width as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let layout = Layout::from_config(&TickerConfig::default());
        assert_eq!(layout.panel, Size::new(200, 96));
        assert_eq!(layout.logo, Rect::new(10, 20, 56, 56));
        assert_eq!(layout.chart, Rect::new(76, 48, 124, 48));
        assert_eq!(layout.label_origin, Point::new(76, 14));
        assert_eq!(layout.history_capacity(), 124);
    }

    #[test]
    fn chart_fills_to_panel_edges() {
        let mut config = TickerConfig::default();
        config.chart.height_ratio = 0.25;
        let layout = Layout::from_config(&config);
        assert_eq!(layout.chart.right(), 200);
        assert_eq!(layout.chart.bottom(), 96);
        assert_eq!(layout.chart.size.height, 24);
    }

    #[test]
    fn largest_panel_keeps_coordinates_positive() {
        let mut config = TickerConfig::default();
        config.layout.width = ticker_config::MAX_PANEL_SIDE;
        config.layout.height = ticker_config::MAX_PANEL_SIDE;
        config.validate().unwrap();

        let layout = Layout::from_config(&config);
        assert_eq!(layout.chart.right(), ticker_config::MAX_PANEL_SIDE as i32);
        assert_eq!(layout.chart.bottom(), ticker_config::MAX_PANEL_SIDE as i32);
        assert!(layout.label_origin.y >= 0);
    }
}
