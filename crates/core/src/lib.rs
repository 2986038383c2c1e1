pub mod error;
pub mod geometry;
pub mod history;
pub mod range;
pub mod redraw;
pub mod sink;
pub mod source;

pub use error::{FetchError, RenderError, Result, TickerError};
pub use geometry::{Point, Rect, Size};
pub use history::{HistoryBuffer, Sample};
pub use range::{map_to_height, RenderWindow};
pub use redraw::{RedrawMode, RedrawScheduler};
pub use sink::{DisplaySink, Fill, Label, Primitive};
pub use source::SampleSource;
