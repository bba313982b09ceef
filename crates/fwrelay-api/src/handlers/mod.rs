//! HTTP request handlers for the relay API
//!
//! These handlers only see the DeviceLookup trait.

pub mod query;
