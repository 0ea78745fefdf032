//! Scheduler layer
//!
//! Owns the poll cycle: fetch, decode, interpret, de-duplicate, notify.
//! The checkpoint lives here and is only advanced by validated iterations.

pub mod poller;

pub use poller::StatusPoller;
