// src/output/types.rs
//! Plans, targets and reports for output delivery.

use std::path::PathBuf;

/// Ordered list of deliveries to perform.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    /// Stdout when no file is given, otherwise the file.
    pub fn for_destination(output_file: Option<PathBuf>, content: String) -> Self {
        let target = match output_file {
            Some(path) => DeliveryTarget::WriteFile { path, content },
            None => DeliveryTarget::PrintToStdout { content },
        };
        Self::new().with_operation(target)
    }
}

/// A single delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Write content to a file, creating parent directories.
    WriteFile { path: PathBuf, content: String },
    PrintToStdout { content: String },
}

impl DeliveryTarget {
    pub fn content(&self) -> &str {
        match self {
            DeliveryTarget::WriteFile { content, .. } | DeliveryTarget::PrintToStdout { content } => {
                content
            }
        }
    }
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<CompletedOperation>,
    pub failed: Vec<FailedOperation>,
    pub stats: ExecutionStats,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.stats.operations_completed += 1;
        self.stats.bytes_written += operation.bytes_written;
        self.completed.push(operation);
        self
    }

    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.stats.operations_failed += 1;
        self.failed.push(operation);
        self
    }

    /// True when no operation failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Error messages of the failed operations.
    pub fn failures(&self) -> Vec<String> {
        self.failed.iter().map(|f| f.error.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct CompletedOperation {
    pub operation: DeliveryTarget,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: DeliveryTarget,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub operations_completed: usize,
    pub operations_failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_destination_picks_stdout_without_file() {
        let plan = OutputPlan::for_destination(None, "# Doc\n".to_string());
        assert_eq!(
            plan.operations,
            vec![DeliveryTarget::PrintToStdout {
                content: "# Doc\n".to_string()
            }]
        );

        let plan = OutputPlan::for_destination(Some(PathBuf::from("out.md")), "x".to_string());
        assert!(matches!(
            &plan.operations[0],
            DeliveryTarget::WriteFile { path, .. } if path == &PathBuf::from("out.md")
        ));
        assert_eq!(plan.operations[0].content(), "x");
    }

    #[test]
    fn test_report_tracks_stats() {
        let target = DeliveryTarget::PrintToStdout {
            content: "abc".to_string(),
        };
        let report = OutputReport::new()
            .with_completed(CompletedOperation {
                operation: target.clone(),
                bytes_written: 3,
                duration_ms: 0,
            })
            .with_failed(FailedOperation {
                operation: target,
                error: "closed".to_string(),
            });

        assert!(!report.is_success());
        assert_eq!(report.stats.bytes_written, 3);
        assert_eq!(report.stats.operations_failed, 1);
        assert_eq!(report.failures(), vec!["closed".to_string()]);
    }
}
