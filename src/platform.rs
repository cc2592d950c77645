//! Functions and structs that wrap platform functionality used by the demo
//! host.
mod fileio;
mod time;

pub use fileio::*;
pub use time::*;
