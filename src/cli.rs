use clap::{Parser, ValueEnum};

use crate::style::DEFAULT_TEMPLATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented screenplay page
    Text,
    /// Element list as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "screenplay-import")]
#[command(version)]
#[command(about = "Import Fade In and plain-text screenplays", long_about = None)]
#[command(after_help = "Examples:\n  \
  screenplay-import script.fadein            print the screenplay as formatted text\n  \
  screenplay-import -f json draft.txt        dump classified elements as JSON\n  \
  screenplay-import -l script.fadein         list the archive's entries\n  \
  screenplay-import --probe notes.txt        check whether a text file looks like a screenplay")]
pub struct Cli {
    /// Screenplay file path or HTTP URL
    #[arg(value_name = "FILE")]
    pub file: String,

    /// List archive entries instead of importing
    #[arg(short = 'l')]
    pub list: bool,

    /// Read this archive entry instead of the detected document
    #[arg(short = 'e', long = "entry", value_name = "NAME")]
    pub entry: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only report whether the text looks like a screenplay
    #[arg(long = "probe")]
    pub probe: bool,

    /// Style template passed to the style lookup
    #[arg(long = "template", value_name = "NAME", default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Page width in columns for text output
    #[arg(long = "width", value_name = "COLUMNS", default_value_t = 60)]
    pub width: usize,

    /// More log output (-vv for trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode, errors only
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long = "log-json")]
    pub log_json: bool,
}

impl Cli {
    /// Log filter used when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
