use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "riskscope", version, about = "Check URLs against a reputation service and track abuse submissions")]
pub struct Cli {
    /// Defaults to the interactive shell
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML configuration file (default: ./riskscope.yaml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Reputation service base URL (or RISKSCOPE_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// SQLite database holding submission history (or RISKSCOPE_DB)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Keep submission history in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan one or more URLs
    Scan(ScanArgs),
    /// File an abuse submission for a URL
    Submit(SubmitArgs),
    /// List tracked submissions
    Submissions(ListArgs),
    /// Refresh one submission by id prefix, or every pending one
    Refresh(RefreshArgs),
    /// Erase submission history
    Clear(ClearArgs),
    /// Start the interactive shell
    Shell,
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// URLs to check; a missing scheme defaults to https://
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct SubmitArgs {
    /// URL to report
    #[arg(short, long)]
    pub url: String,

    /// What was observed at the URL
    #[arg(short, long)]
    pub evidence: String,

    /// MALWARE, SOCIAL_ENGINEERING or UNWANTED_SOFTWARE
    #[arg(short, long)]
    pub abuse_type: String,

    /// ANDROID, IOS, MACOS, WINDOWS or UNSPECIFIED
    #[arg(short, long)]
    pub platform: Option<String>,

    /// Two-letter region code (repeatable or comma-separated)
    #[arg(short, long = "region", value_delimiter = ',')]
    pub regions: Vec<String>,
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct RefreshArgs {
    /// Submission id or unique id prefix (omit to refresh all pending)
    pub id: Option<String>,
}

#[derive(Args, Clone)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub path: String,
}
