// src/output/mod.rs
//! Output handling with planning separated from execution.
//!
//! The binary builds an [`OutputPlan`] from its configuration and hands it
//! to [`deliver`], the only place that touches files or stdout.

mod types;
mod writer;

pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::deliver;
