//! Data models for extracted policy fields and parse results.

pub mod config;
pub mod field;
pub mod result;
