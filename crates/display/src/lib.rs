//! Panel output for the ticker.
//!
//! [`Panel`] stands in for a small e-paper display: a 1-bit frame drawn with
//! `embedded-graphics`, flushed to a PNG file on every visible refresh.

pub mod framebuffer;
pub mod logo;
pub mod panel;

pub use framebuffer::Framebuffer;
pub use panel::{Panel, RefreshStats};
