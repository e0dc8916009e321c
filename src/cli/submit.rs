use crate::app::{App, Command};
use crate::cli::commands::SubmitArgs;
use crate::config::Settings;
use crate::errors::RiskError;
use crate::repl::commands::SubmitArgs as FormArgs;
use crate::repl::progress::CallProgress;
use crate::repl::renderer;

pub async fn handle_submit(
    args: SubmitArgs,
    mut app: App,
    settings: &Settings,
    quiet: bool,
) -> Result<i32, RiskError> {
    let form = FormArgs {
        url: Some(args.url),
        evidence: Some(args.evidence),
        abuse_type: Some(args.abuse_type),
        platform: args.platform,
        regions: args.regions,
    }
    .into_form(None, settings)?;

    let progress = if quiet {
        CallProgress::hidden()
    } else {
        CallProgress::start(&format!("Submitting {}", form.url))
    };
    let events = app.dispatch(Command::Submit { form }).await;
    progress.finish();

    for event in &events {
        println!("{}", renderer::render_event(event));
    }
    Ok(events.iter().find_map(|e| e.failure_code()).unwrap_or(0))
}
