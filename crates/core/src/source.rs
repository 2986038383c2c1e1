use crate::{error::FetchError, history::Sample};
use std::future::Future;

/// Produces one normalised price sample per call.
///
/// Implementations own every detail of obtaining the value (transport,
/// payload format, locale-specific number parsing). The ticker loop only sees
/// a finite `f64` or an opaque [`FetchError`], and is never cancelled mid-fetch.
pub trait SampleSource: Send {
    fn fetch(&mut self) -> impl Future<Output = Result<Sample, FetchError>> + Send;
}
