//! routefinder CLI library.
//!
//! Shared pieces of the `routefinder` and `routefinder-report` binaries:
//! method-name parsing, logging setup, result rendering and the batch
//! comparison report.

pub mod logging;
pub mod method;
pub mod output;
pub mod report;
