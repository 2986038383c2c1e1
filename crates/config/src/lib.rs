pub mod schema;

pub use schema::{
    ChartConfig, DisplayConfig, LabelConfig, LayoutConfig, PollConfig, SourceConfig, SourceKind,
    TickerConfig, MAX_PANEL_SIDE, MAX_WALK_STEP,
};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use ticker_core::{Result, TickerError};

/// Read the ticker settings at `path`.
///
/// A missing file is not an error: the ticker starts on the built-in panel
/// and feed defaults, with a warning. An unreadable or malformed file is a
/// [`TickerError::Config`]. Geometry and source bounds are checked separately
/// by [`TickerConfig::validate`], which the engine runs before the first cycle.
pub fn load(path: impl AsRef<Path>) -> Result<TickerConfig> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(raw) => parse(&raw),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "no ticker config; running on defaults");
            Ok(TickerConfig::default())
        }
        Err(e) => Err(TickerError::Config(format!("cannot read '{}': {e}", path.display()))),
    }
}

/// Decode a `ticker.toml` document. Absent sections and keys take their
/// defaults, so `""` yields [`TickerConfig::default`].
pub fn parse(raw: &str) -> Result<TickerConfig> {
    toml::from_str(raw).map_err(|e| TickerError::Config(format!("TOML parse error: {e}")))
}

/// `ticker/ticker.toml` under `$XDG_CONFIG_HOME`, falling back to `~/.config`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("ticker").join("ticker.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load("/nonexistent/ticker/ticker.toml").unwrap();
        assert_eq!(cfg.poll.interval_secs, 60);
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.layout.width, 200);
        assert_eq!(cfg.source.kind, SourceKind::Http);
    }

    #[test]
    fn directory_path_is_config_error() {
        let err = load(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, TickerError::Config(_)));
    }

    #[test]
    fn parse_error_is_config_error() {
        let err = parse("[poll\ninterval_secs = ").unwrap_err();
        assert!(matches!(err, TickerError::Config(_)));
    }

    #[test]
    fn default_path_ends_with_ticker_toml() {
        assert!(default_path().ends_with("ticker/ticker.toml"));
    }
}
