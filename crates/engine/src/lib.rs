//! The ticker control loop.
//!
//! One background task runs cycles strictly in sequence:
//! fetch → record → draw → flush → cancellable sleep. Fetch failures are
//! retried after the poll interval; display failures end the loop.

pub mod state;
pub mod ticker;

pub use state::RunState;
pub use ticker::{Cycle, Ticker, TickerHandle};
