//! Reviewwatch Core
//!
//! Core types for the homework review watcher.
//!
//! This crate contains:
//! - Domain types: review statuses, verdict messages, and the poller checkpoint
//! - DTOs: decoding of the raw review-API payload into typed feed pages

pub mod domain;
pub mod dto;
