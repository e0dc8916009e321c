use chrono::{DateTime, Utc};
use console::style;

use crate::app::AppEvent;
use crate::models::{
    ConfidenceLevel, ScanResult, ScanStatus, ScoreEntry, SubmissionForm, SubmissionRecord,
    SubmissionStatus,
};
use crate::repl::commands::{CommandHelp, COMMAND_HELP};
use crate::utils::formatting::{format_age, format_timestamp};
use crate::utils::truncation::truncate_detail;

/// Render an app event as styled terminal output, returning the formatted line.
pub fn render_event(event: &AppEvent) -> String {
    match event {
        AppEvent::ScanCompleted { result, submittable, recommended } => {
            let mut out = render_scan_result(result);
            if *submittable {
                let hint = match recommended {
                    Some(t) => format!("Reportable risk found. /prefill to draft a {} submission.", t),
                    None => "Reportable risk found. /prefill to draft a submission.".to_string(),
                };
                out.push_str(&format!("  {} {}\n", style("⚑").yellow().bold(), style(hint).yellow()));
            }
            out
        }
        AppEvent::DraftPrepared { form } => render_draft(form),
        AppEvent::DraftUnavailable { reason, .. } => render_error(reason),
        AppEvent::SubmissionCreated { record, warnings } => {
            let mut out = String::new();
            for warning in warnings {
                out.push_str(&format!("{}\n", render_warning(warning)));
            }
            out.push_str(&render_success(&format!(
                "Submitted {} as {}",
                style(&record.url).white().bold(),
                style(record.operation_id.as_str()).cyan(),
            )));
            out.push_str(&format!("\n  {} {}", style("Tracking id:").dim(), record.id));
            out
        }
        AppEvent::SubmissionRejected { error, .. } => {
            format!(
                "{}\n{}",
                render_error(error),
                render_info("  The draft was kept; fix it and /submit again."),
            )
        }
        AppEvent::SubmissionRefreshed { record } => {
            format!(
                "  {} {} {}",
                render_status_badge(&record.status),
                style(&record.url).white(),
                style(record.status_detail.as_deref().map(truncate_detail).unwrap_or_default()).dim(),
            )
        }
        AppEvent::RefreshFailed { id, error, .. } => {
            render_error(&format!("Refresh of {} failed: {}", id, error))
        }
        AppEvent::SubmissionsRefreshed { records, refreshed, failures, persisted } => {
            let mut out = render_submissions(records, Utc::now());
            out.push_str(&render_success(&format!(
                "Refreshed {} pending submission{}",
                refreshed,
                if *refreshed == 1 { "" } else { "s" },
            )));
            for (id, error) in failures {
                out.push_str(&format!("\n{}", render_error(&format!("{}: {}", id, error))));
            }
            if !persisted {
                out.push_str(&format!("\n{}", render_warning("History could not be saved; changes last for this session only")));
            }
            out
        }
        AppEvent::SubmissionsCleared { count } => {
            render_success(&format!("Cleared {} tracked submission{}", count, if *count == 1 { "" } else { "s" }))
        }
        AppEvent::ClearCancelled => render_info("Clear cancelled. Nothing was removed."),
    }
}

/// Render a confidence badge with appropriate colors.
pub fn render_confidence_badge(level: &ConfidenceLevel) -> String {
    let label = format!(" {} ", level.as_str());
    match level {
        ConfidenceLevel::ExtremelyHigh => style(label).on_red().white().bold().to_string(),
        ConfidenceLevel::Higher | ConfidenceLevel::High => style(label).red().bold().to_string(),
        ConfidenceLevel::Medium => style(label).yellow().bold().to_string(),
        ConfidenceLevel::Low => style(label).blue().to_string(),
        ConfidenceLevel::Safe => style(label).green().to_string(),
    }
}

pub fn render_status_badge(status: &SubmissionStatus) -> String {
    let label = format!("{:<9}", status.as_str());
    match status {
        SubmissionStatus::Pending => style(label).yellow().to_string(),
        SubmissionStatus::Succeeded => style(label).green().bold().to_string(),
        SubmissionStatus::Closed => style(label).dim().to_string(),
    }
}

fn render_scores(out: &mut String, scores: &[ScoreEntry]) {
    for entry in scores {
        out.push_str(&format!(
            "    {} {}\n",
            render_confidence_badge(&entry.confidence_level),
            entry.threat_type,
        ));
    }
}

/// Render one scan result with its scores.
pub fn render_scan_result(result: &ScanResult) -> String {
    let verdict = match result.status {
        ScanStatus::Safe => style("✓ SAFE").green().bold().to_string(),
        ScanStatus::Threat => style("⚠ THREAT").red().bold().to_string(),
        ScanStatus::Error => style("✗ ERROR").red().to_string(),
    };

    let mut out = format!("\n{} {}\n", verdict, style(&result.url).white().bold());
    if let Some(detail) = &result.error_detail {
        out.push_str(&format!("    {}\n", style(truncate_detail(detail)).red().dim()));
    }
    render_scores(&mut out, result.scores());
    if let Some(resolved) = &result.resolved_uri_score {
        out.push_str(&format!("  {} {}\n", style("Resolved to").dim(), resolved.resolved_uri));
        render_scores(&mut out, &resolved.scores);
    }
    out
}

/// Render the session's scan results, numbered for `/prefill`.
pub fn render_results(results: &[ScanResult]) -> String {
    if results.is_empty() {
        return format!("\n  {}\n", style("No scans yet. Try /scan <url>.").dim());
    }

    let mut out = format!(
        "\n{}\n\n",
        style(format!("Scan results ({}):", results.len())).white().bold(),
    );
    for (i, result) in results.iter().enumerate() {
        let status = match result.status {
            ScanStatus::Safe => style(result.status.as_str()).green().to_string(),
            ScanStatus::Threat => style(result.status.as_str()).red().bold().to_string(),
            ScanStatus::Error => style(result.status.as_str()).red().dim().to_string(),
        };
        out.push_str(&format!(
            "  {:>3}. {:<16} {} {}\n",
            i + 1,
            status,
            result.url,
            style(format_timestamp(result.timestamp)).dim(),
        ));
    }
    out
}

/// Render the draft form shown after `/prefill`.
pub fn render_draft(form: &SubmissionForm) -> String {
    let evidence = if form.evidence.trim().is_empty() {
        style("(required)".to_string()).yellow().to_string()
    } else {
        form.evidence.clone()
    };
    format!(
        "\n{}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n\n  {}\n",
        style("Submission draft:").white().bold(),
        style("URL:       ").dim(),
        form.url,
        style("Abuse type:").dim(),
        form.abuse_type,
        style("Platform:  ").dim(),
        form.platform,
        style("Regions:   ").dim(),
        form.region_codes.join(","),
        style("Evidence:  ").dim(),
        evidence,
        style("/submit --evidence \"<what you observed>\" to file it").dim(),
    )
}

/// Render tracked submissions, newest first.
pub fn render_submissions(records: &[SubmissionRecord], now: DateTime<Utc>) -> String {
    if records.is_empty() {
        return format!("\n  {}\n", style("No submissions tracked.").dim());
    }

    let mut out = format!(
        "\n{}\n\n",
        style(format!("Submissions ({}):", records.len())).white().bold(),
    );
    for record in records {
        out.push_str(&format!(
            "  {} {} {}\n      {} {} | {} {} | {}\n",
            render_status_badge(&record.status),
            style(&record.url).white(),
            style(format!("[{}]", record.abuse_type)).dim(),
            style("id").dim(),
            record.id,
            style("updated").dim(),
            format_age(record.last_updated, now),
            style(record.operation_id.as_str()).dim(),
        ));
        if let Some(detail) = &record.status_detail {
            out.push_str(&format!("      {}\n", style(truncate_detail(detail)).dim()));
        }
    }
    out
}

/// Render the help listing for all commands.
pub fn render_help(specific_command: Option<&str>) -> String {
    if let Some(cmd_name) = specific_command {
        return match COMMAND_HELP.iter().find(|c| c.name == cmd_name) {
            Some(cmd) => format_command_detail(cmd),
            None => format!("{} Unknown command: /{}", style("✗").red(), cmd_name),
        };
    }

    let mut out = format!("\n{}\n\n", style("Available commands:").white().bold());
    for cmd in COMMAND_HELP {
        out.push_str(&format!(
            "  {:<16} {}\n",
            style(format!("/{}", cmd.name)).cyan().bold(),
            style(cmd.description).dim(),
        ));
    }
    out
}

fn format_command_detail(cmd: &CommandHelp) -> String {
    format!(
        "\n{}\n  {}\n\n  {}\n",
        style(format!("/{}", cmd.name)).cyan().bold(),
        style(cmd.description).dim(),
        style(cmd.usage).white(),
    )
}

/// Render the version info.
pub fn render_version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("RISKSCOPE_GIT_HASH").unwrap_or("dev");
    let build_ts = option_env!("RISKSCOPE_BUILD_TIMESTAMP").unwrap_or("unknown");

    format!(
        "\n  {} {}\n  {} {}\n  {} {}\n",
        style("Version:").dim(),
        style(version).white().bold(),
        style("Commit:").dim(),
        style(git_hash).white(),
        style("Built:").dim(),
        style(build_ts).white(),
    )
}

pub fn render_error(msg: &str) -> String {
    format!("{} {}", style("✗").red(), style(msg).red())
}

pub fn render_warning(msg: &str) -> String {
    format!("{} {}", style("⚠").yellow(), style(msg).yellow())
}

pub fn render_success(msg: &str) -> String {
    format!("{} {}", style("✓").green(), msg)
}

pub fn render_info(msg: &str) -> String {
    format!("{}", style(msg).dim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OperationId, ThreatType, Verdict};

    fn plain(s: String) -> String {
        console::strip_ansi_codes(&s).to_string()
    }

    #[test]
    fn test_threat_result_offers_prefill() {
        let result = ScanResult::scored(
            "https://bad.example",
            Verdict::Risky,
            vec![ScoreEntry::new(ThreatType::SocialEngineering, ConfidenceLevel::High)],
            None,
        );
        let out = plain(render_event(&AppEvent::ScanCompleted {
            result,
            submittable: true,
            recommended: Some(ThreatType::SocialEngineering),
        }));
        assert!(out.contains("THREAT"));
        assert!(out.contains("SOCIAL_ENGINEERING"));
        assert!(out.contains("/prefill"));
    }

    #[test]
    fn test_safe_result_has_no_prefill_hint() {
        let result = ScanResult::scored(
            "https://ok.example",
            Verdict::Safe,
            vec![ScoreEntry::new(ThreatType::Malware, ConfidenceLevel::Low)],
            None,
        );
        let out = plain(render_event(&AppEvent::ScanCompleted {
            result,
            submittable: false,
            recommended: None,
        }));
        assert!(out.contains("SAFE"));
        assert!(!out.contains("/prefill"));
    }

    #[test]
    fn test_submissions_listing_shows_detail() {
        let form = SubmissionForm::new("https://bad.example", "fake login page", ThreatType::Malware);
        let mut record = SubmissionRecord::from_form(
            form,
            OperationId::parse("submissions/123").unwrap(),
            Utc::now(),
        );
        record.status = SubmissionStatus::Closed;
        record.status_detail = Some("duplicate report".into());
        let out = plain(render_submissions(&[record], Utc::now()));
        assert!(out.contains("CLOSED"));
        assert!(out.contains("duplicate report"));
        assert!(out.contains("submissions/123"));
    }

    #[test]
    fn test_empty_listings() {
        assert!(plain(render_results(&[])).contains("No scans yet"));
        assert!(plain(render_submissions(&[], Utc::now())).contains("No submissions tracked"));
    }

    #[test]
    fn test_help_for_unknown_command() {
        assert!(plain(render_help(Some("nope"))).contains("Unknown command"));
        assert!(plain(render_help(Some("submit"))).contains("--evidence"));
    }
}
