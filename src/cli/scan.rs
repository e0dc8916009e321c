use crate::app::{App, AppEvent, Command};
use crate::cli::commands::ScanArgs;
use crate::errors::RiskError;
use crate::repl::progress::CallProgress;
use crate::repl::renderer;

/// Scan every URL concurrently. Exits non-zero when any scan errored.
pub async fn handle_scan(args: ScanArgs, mut app: App, quiet: bool) -> Result<i32, RiskError> {
    let progress = if quiet || args.json {
        CallProgress::hidden()
    } else {
        CallProgress::start(&format!("Scanning {} URL(s)", args.urls.len()))
    };
    let events = app.dispatch(Command::ScanMany { urls: args.urls }).await;
    progress.finish();

    let results: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            AppEvent::ScanCompleted { result, .. } => Some(result),
            _ => None,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for event in &events {
            println!("{}", renderer::render_event(event));
        }
    }

    Ok(if results.iter().any(|r| r.is_error()) { 1 } else { 0 })
}
