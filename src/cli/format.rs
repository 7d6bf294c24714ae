use crate::config::OutputStyle;
use clap::ValueEnum;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputStyle> for OutputFormat {
    fn from(style: OutputStyle) -> Self {
        match style {
            OutputStyle::Text => OutputFormat::Text,
            OutputStyle::Json => OutputFormat::Json,
        }
    }
}
