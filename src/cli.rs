use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "askviz", about = "Ask a natural-language question, see the generated SQL and a chart or table", version)]
#[command(group(ArgGroup::new("color_switch").args(["color", "no_color"]).multiple(false)))]
pub struct Cli {
    /// The question to submit to the backend.
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,

    /// Start the interactive interface instead of a one-shot query.
    #[arg(short = 't', long)]
    pub tui: bool,

    /// Backend base URL (overrides config).
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides config).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Force colored output.
    #[arg(long)]
    pub color: bool,
    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
