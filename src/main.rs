use clap::Parser;
use tracing_subscriber::EnvFilter;

use riskscope::cli::{self, Cli, Commands};
use riskscope::config;
use riskscope::errors::RiskError;
use riskscope::repl::ReplSession;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    match run(cli).await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.classify().exit_code);
        }
    }
}

async fn run(cli: Cli) -> Result<i32, RiskError> {
    if let Some(Commands::Validate(args)) = &cli.command {
        let path = std::path::PathBuf::from(&args.path);
        config::parse_config(&path).await?;
        println!("Configuration is valid: {}", args.path);
        return Ok(0);
    }

    let settings = cli::load_settings(&cli).await?;
    let app = cli::build_app(&settings)?;
    let quiet = cli.quiet;

    match cli.command {
        Some(Commands::Scan(args)) => cli::scan::handle_scan(args, app, quiet).await,
        Some(Commands::Submit(args)) => cli::submit::handle_submit(args, app, &settings, quiet).await,
        Some(Commands::Submissions(args)) => cli::submissions::handle_list(args, &app),
        Some(Commands::Refresh(args)) => cli::submissions::handle_refresh(args, app, quiet).await,
        Some(Commands::Clear(args)) => cli::submissions::handle_clear(args, app).await,
        Some(Commands::Shell) | None => {
            ReplSession::new(app, settings, quiet).run().await?;
            Ok(0)
        }
        Some(Commands::Validate(_)) => Ok(0),
    }
}
