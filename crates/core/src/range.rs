use crate::history::Sample;

/// Spans narrower than this are treated as empty.
pub const SPAN_EPSILON: f64 = 1e-9;

/// Value range mapped onto the chart height, recomputed every cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderWindow {
    pub low:  Sample,
    pub high: Sample,
}

impl RenderWindow {
    /// Window of total width `span` centred on `latest`.
    #[must_use]
    pub fn around(latest: Sample, span: f64) -> Self {
        let half = span / 2.0;
        Self {
            low:  latest - half,
            high: latest + half,
        }
    }

    /// Bar height for `value` in this window.  See [`map_to_height`].
    #[must_use]
    pub fn height_of(&self, value: Sample, max_height: f64) -> f64 {
        map_to_height(value, self.low, self.high, max_height)
    }
}

/// Map `value` linearly from `[low, high]` onto `[0, max_height]`, clamped.
///
/// An empty window (`high - low` within [`SPAN_EPSILON`]) yields the midline
/// `max_height / 2`, and so does a NaN sample. The result is always finite
/// for finite `max_height`.
#[must_use]
pub fn map_to_height(value: Sample, low: Sample, high: Sample, max_height: f64) -> f64 {
    let span = high - low;
    if span.is_nan() || span.abs() <= SPAN_EPSILON {
        return max_height / 2.0;
    }
    let height = (value - low) / span * max_height;
    if height.is_nan() {
        return max_height / 2.0;
    }
    height.clamp(0.0, max_height)
}
