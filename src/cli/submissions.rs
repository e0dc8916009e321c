use chrono::Utc;

use crate::app::{App, Command};
use crate::cli::commands::{ClearArgs, ListArgs, RefreshArgs};
use crate::errors::RiskError;
use crate::repl::confirm::{clear_history, confirm};
use crate::repl::progress::CallProgress;
use crate::repl::renderer;

pub fn handle_list(args: ListArgs, app: &App) -> Result<i32, RiskError> {
    let records = app.submissions().records();
    if args.json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        println!("{}", renderer::render_submissions(records, Utc::now()));
    }
    Ok(0)
}

pub async fn handle_refresh(args: RefreshArgs, mut app: App, quiet: bool) -> Result<i32, RiskError> {
    let (message, cmd) = match args.id {
        Some(id) => ("Refreshing submission".to_string(), Command::Refresh { id }),
        None => (
            format!("Refreshing {} pending submissions", app.submissions().pending_count()),
            Command::RefreshAll,
        ),
    };

    let progress = if quiet {
        CallProgress::hidden()
    } else {
        CallProgress::start(&message)
    };
    let events = app.dispatch(cmd).await;
    progress.finish();

    for event in &events {
        println!("{}", renderer::render_event(event));
    }
    Ok(events.iter().find_map(|e| e.failure_code()).unwrap_or(0))
}

pub async fn handle_clear(args: ClearArgs, mut app: App) -> Result<i32, RiskError> {
    let events = clear_history(&mut app, args.yes, confirm).await;
    for event in &events {
        println!("{}", renderer::render_event(event));
    }
    Ok(0)
}
