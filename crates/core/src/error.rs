use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum TickerError {
    /// Invalid settings detected at startup.  Never raised once the loop runs.
    #[error("config error: {0}")]
    Config(String),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Failure reported by a [`SampleSource`](crate::SampleSource).
///
/// The ticker loop treats every variant the same way: log, sleep, retry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("cannot parse price from {0:?}")]
    Parse(String),
}

/// Failure reported by a [`DisplaySink`](crate::DisplaySink).  Terminal for the loop.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("draw failed: {0}")]
    Draw(String),

    #[error("flush failed: {0}")]
    Flush(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = TickerError> = std::result::Result<T, E>;
