//! Price sources for the ticker.
//!
//! Every source returns an already-normalised `f64`; locale handling and
//! payload formats stay in this crate.

pub mod http;
pub mod price;
pub mod random_walk;

pub use http::HttpSource;
pub use price::{extract_price, parse_localized_price};
pub use random_walk::RandomWalk;

use ticker_config::{SourceConfig, SourceKind};
use ticker_core::{FetchError, Result, Sample, SampleSource};
use tracing::info;

/// The source selected by `[source] kind`.
#[derive(Debug)]
pub enum Feed {
    Http(HttpSource),
    RandomWalk(RandomWalk),
}

impl Feed {
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        match config.kind {
            SourceKind::Http => {
                let source = HttpSource::new(config)?;
                info!("Polling price from {}", source.url());
                Ok(Self::Http(source))
            }
            SourceKind::RandomWalk => {
                info!("Using random-walk demo feed starting at {}", config.start_price);
                Ok(Self::RandomWalk(RandomWalk::new(config.start_price, config.step)))
            }
        }
    }
}

impl SampleSource for Feed {
    async fn fetch(&mut self) -> Result<Sample, FetchError> {
        match self {
            Self::Http(source)       => source.fetch().await,
            Self::RandomWalk(source) => source.fetch().await,
        }
    }
}
