// src/config.rs
use crate::constants::BLOCK_MAX_WALK_DEPTH;
use crate::error::AppError;
use crate::formatting::MergePolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Rendering knobs shared by the library views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Deepest level the walker descends to; roots are level 0.
    pub max_depth: usize,
    /// Render table blocks as Markdown tables and hide their cell blocks.
    pub extract_tables: bool,
    /// Label whiteboards with their board token.
    pub extract_whiteboards: bool,
    /// Group consecutive list items into runs.
    pub merge_lists: bool,
    pub merge_policy: MergePolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: BLOCK_MAX_WALK_DEPTH,
            extract_tables: true,
            extract_whiteboards: false,
            merge_lists: true,
            merge_policy: MergePolicy::default(),
        }
    }
}

/// What the binary prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Markdown rendering of the document
    #[default]
    Markdown,
    /// Plain text of every block
    Text,
    /// Heading outline
    Outline,
    /// Block statistics as JSON
    Summary,
    /// The normalized block array as JSON
    Normalized,
    /// Which wire format the payload arrived in
    Format,
    /// Parse the input as a document-info response
    Info,
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Saved Feishu tool response (JSON file), or "-" for stdin
    pub input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Maximum nesting depth to render
    #[arg(long, default_value_t = BLOCK_MAX_WALK_DEPTH)]
    pub max_depth: usize,

    /// Render tables as their raw cell blocks instead of Markdown tables
    #[arg(long, default_value_t = false)]
    pub no_tables: bool,

    /// Label whiteboards with their board token
    #[arg(long, default_value_t = false)]
    pub whiteboards: bool,

    /// Emit every list item on its own instead of grouping runs
    #[arg(long, default_value_t = false)]
    pub no_merge_lists: bool,

    /// Put a blank line between adjacent lists of different kinds
    #[arg(long, default_value_t = false)]
    pub separate_lists: bool,

    /// Log every normalization decision
    #[arg(long, default_value_t = false)]
    pub trace: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where the payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Human-readable name for messages.
    pub fn describe(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// Resolved pipeline configuration, ready to drive load, compose and deliver.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: InputSource,
    pub format: OutputFormat,
    pub render: RenderConfig,
    pub trace: bool,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let input = match cli.input.trim() {
            "" => {
                return Err(AppError::MissingConfiguration(
                    "an input file or \"-\" for stdin is required".to_string(),
                ))
            }
            "-" => InputSource::Stdin,
            path => InputSource::File(PathBuf::from(path)),
        };

        if let Some(output) = &cli.output_file {
            if output.trim().is_empty() {
                return Err(AppError::InvalidInput(
                    "output file path is empty".to_string(),
                ));
            }
        }

        let render = RenderConfig {
            max_depth: cli.max_depth,
            extract_tables: !cli.no_tables,
            extract_whiteboards: cli.whiteboards,
            merge_lists: !cli.no_merge_lists,
            merge_policy: MergePolicy {
                separate_adjacent_lists: cli.separate_lists,
            },
        };

        Ok(PipelineConfig {
            input,
            format: cli.format,
            render,
            trace: cli.trace,
            output_file: cli.output_file.map(PathBuf::from),
            verbose: cli.verbose,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: InputSource::Stdin,
            format: OutputFormat::default(),
            render: RenderConfig::default(),
            trace: false,
            output_file: None,
            verbose: false,
        }
    }
}
