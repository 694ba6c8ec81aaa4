// src/main.rs
use clap::Parser;
use feishu2md::{
    compose_view, deliver, parse_json, AppError, CommandLineInput, ContentSource,
    DeliveryTarget, DocumentComposer, InputSource, OutputDelivery, OutputPlan, OutputReport,
    PipelineConfig,
};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use serde_json::Value;
use std::fs;
use std::io::Read;

/// Sets up logging configuration.
///
/// Console logs go to stderr so rendered output on stdout stays pipeable.
/// `--trace` raises the level to info so normalization decisions show.
fn setup_logging(verbose: bool, trace: bool) -> Result<(), AppError> {
    let log_level = match (verbose, trace) {
        (true, _) => LevelFilter::Debug,
        (false, true) => LevelFilter::Info,
        (false, false) => LevelFilter::Warn,
    };

    let log_file_path = std::env::temp_dir().join("feishu2md.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)
        .map_err(|e| AppError::Logging(e.to_string()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )
        .map_err(|e| AppError::Logging(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| AppError::Logging(e.to_string()))?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the three-stage pipeline: load → compose → deliver.
fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let pipeline = FeishuToMarkdown::new(config);

    let payload = pipeline.load()?;
    let rendered = pipeline.compose(payload)?;
    let report = pipeline.deliver(rendered)?;
    pipeline.report_completion(&report);

    Ok(())
}

/// Orchestrates loading, rendering and delivery of a saved Feishu response.
struct FeishuToMarkdown<'a> {
    config: &'a PipelineConfig,
}

impl<'a> FeishuToMarkdown<'a> {
    fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    fn read_input(&self) -> Result<String, AppError> {
        match &self.config.input {
            InputSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
            InputSource::File(path) => Ok(fs::read_to_string(path)?),
        }
    }

    /// Confirms file writes on stderr; stdout output speaks for itself.
    fn report_completion(&self, report: &OutputReport) {
        for completed in &report.completed {
            if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
                eprintln!(
                    "✓ Wrote {} bytes to {}",
                    completed.bytes_written,
                    path.display()
                );
            }
        }
    }
}

impl ContentSource for FeishuToMarkdown<'_> {
    fn load(&self) -> Result<Value, AppError> {
        let text = self.read_input()?;
        log::info!(
            "Read {} bytes from {}",
            text.len(),
            self.config.input.describe()
        );

        parse_json(&text).map_err(|source| AppError::JsonParseError {
            path: self.config.input.describe().into(),
            source,
        })
    }
}

impl DocumentComposer for FeishuToMarkdown<'_> {
    fn compose(&self, payload: Value) -> Result<String, AppError> {
        compose_view(payload, self.config)
    }
}

impl OutputDelivery for FeishuToMarkdown<'_> {
    fn deliver(&self, rendered: String) -> Result<OutputReport, AppError> {
        let plan = OutputPlan::for_destination(self.config.output_file.clone(), rendered);
        let report = deliver(plan)?;

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failures(),
            });
        }

        Ok(report)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose, cli.trace)?;

    let config = PipelineConfig::resolve(cli)?;

    execute_pipeline(&config)?;

    Ok(())
}
