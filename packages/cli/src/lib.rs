//! Bayline console server library: router construction and configuration,
//! separated from the binary so the HTTP surface can be tested in-process.

pub mod api;
pub mod config;
