//! Core type definitions using newtype patterns for type safety.
//!
//! These types reject invalid ports and malformed ranges at parse time, so
//! everything downstream of them can assume well-formed input.

mod port;
mod target;

pub use port::{Port, PortSpec};
pub use target::{build_targets, next_address, AddressIter, AddressRange, ScanTarget, Targets};
