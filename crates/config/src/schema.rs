use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use ticker_core::{Result, TickerError};

/// Root configuration structure parsed from `ticker.toml`.
///
/// Loaded once at startup; nothing here changes while the ticker runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    pub poll:    PollConfig,
    pub chart:   ChartConfig,
    pub layout:  LayoutConfig,
    pub label:   LabelConfig,
    pub source:  SourceConfig,
    pub display: DisplayConfig,
}

impl TickerConfig {
    /// Reject settings the ticker cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.poll.interval_secs == 0 {
            return Err(invalid("poll.interval_secs must be positive"));
        }
        if !self.chart.range.is_finite() || self.chart.range < 0.0 {
            return Err(invalid("chart.range must be a finite, non-negative number"));
        }
        let ratio = self.chart.height_ratio;
        if ratio.is_nan() || ratio <= 0.0 || ratio > 1.0 {
            return Err(invalid("chart.height_ratio must be in (0, 1]"));
        }
        if self.layout.width == 0 || self.layout.height == 0 {
            return Err(invalid("layout.width and layout.height must be positive"));
        }
        if self.layout.width > MAX_PANEL_SIDE || self.layout.height > MAX_PANEL_SIDE {
            return Err(TickerError::Config(format!(
                "layout.width and layout.height must not exceed {MAX_PANEL_SIDE}"
            )));
        }
        if self.layout.padding_y.saturating_mul(2) >= self.layout.height {
            return Err(invalid("layout.padding_y leaves no room for the logo"));
        }
        if self.layout.chart_x() >= self.layout.width {
            return Err(invalid("layout leaves no horizontal room for the chart"));
        }
        if self.layout.chart_y(ratio) >= self.layout.height {
            return Err(invalid("chart.height_ratio leaves no vertical room for the chart"));
        }
        if self.label.size == 0 || self.label.size > self.layout.height {
            return Err(invalid("label.size must be between 1 and layout.height"));
        }
        if self.source.kind == SourceKind::Http && self.source.url.trim().is_empty() {
            return Err(invalid("source.url must be set for the http source"));
        }
        if self.source.kind == SourceKind::RandomWalk {
            let step = self.source.step;
            if !(0.0..=MAX_WALK_STEP).contains(&step) {
                return Err(invalid("source.step must be a finite, non-negative number"));
            }
            if !self.source.start_price.is_finite() {
                return Err(invalid("source.start_price must be finite"));
            }
        }
        Ok(())
    }
}

/// Largest panel side accepted, in pixels.
pub const MAX_PANEL_SIDE: u32 = 16_384;

/// Largest random-walk step; `-step..=step` must stay a finite range.
pub const MAX_WALK_STEP: f64 = f64::MAX / 4.0;

fn invalid(msg: &str) -> TickerError {
    TickerError::Config(msg.to_string())
}

/// Polling cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between cycles, also used as the retry delay after a failed fetch.
    pub interval_secs: u64,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

/// Sparkline chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Total value span shown by the chart, centred on the latest price.
    pub range: f64,
    /// Consecutive partial refreshes allowed before a full refresh is forced.
    pub max_partial_redraws: u32,
    /// Fraction of the panel height taken by the chart (lower part).
    pub height_ratio: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            range:               50.0,
            max_partial_redraws: 5,
            height_ratio:        0.5,
        }
    }
}

/// Panel geometry in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width:     u32,
    pub height:    u32,
    pub padding_x: u32,
    pub padding_y: u32,
}

impl LayoutConfig {
    /// Side of the square logo, vertically padded.
    pub fn logo_side(&self) -> u32 {
        self.height.saturating_sub(self.padding_y.saturating_mul(2))
    }

    /// Left edge of the chart, right of the logo.  Saturates, so an oversized
    /// padding pushes the chart past any panel width.
    pub fn chart_x(&self) -> u32 {
        self.logo_side().saturating_add(self.padding_x.saturating_mul(2))
    }

    /// Top edge of the chart for a given height ratio.
    pub fn chart_y(&self, height_ratio: f64) -> u32 {
        ((1.0 - height_ratio) * self.height as f64) as u32
    }
}

impl Default for LayoutConfig {
    /// PaPiRus 2.0" panel.
    fn default() -> Self {
        Self {
            width:     200,
            height:    96,
            padding_x: 10,
            padding_y: 20,
        }
    }
}

/// Price label text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Glyph height in pixels.
    pub size: u32,
    /// Suffix appended after the value.
    pub currency: String,
    pub decimals: usize,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            size:     20,
            currency: "€".to_string(),
            decimals: 2,
        }
    }
}

/// Which price source feeds the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Http,
    /// Offline demo feed.
    RandomWalk,
}

/// Price source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// JSON endpoint returning an object with the price field.
    pub url: String,
    /// Top-level JSON field holding the price.
    pub field: String,
    /// Decimal separator used by localised price strings.
    pub decimal_separator: char,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Random walk: first price.
    pub start_price: f64,
    /// Random walk: maximum move per fetch.
    pub step: f64,
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind:              SourceKind::Http,
            url:               "https://bitcoinapi.de/widget/current-btc-price/rate.json?culture=de"
                .to_string(),
            field:             "price_eur".to_string(),
            decimal_separator: ',',
            timeout_secs:      10,
            start_price:       30_000.0,
            step:              15.0,
        }
    }
}

/// Output panel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// PNG file the panel frame is written to on every visible refresh.
    pub output: PathBuf,
    /// Optional logo image drawn left of the chart.
    pub logo: Option<PathBuf>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("ticker.png"),
            logo:   None,
        }
    }
}
