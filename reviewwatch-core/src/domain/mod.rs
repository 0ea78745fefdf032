//! Core domain types
//!
//! This module contains the domain structures shared between the client and
//! the bot: the homework record with its review status, and the checkpoint
//! cursor the poller carries between iterations.

pub mod checkpoint;
pub mod homework;
