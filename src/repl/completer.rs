use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::models::{Platform, ThreatType};
use crate::repl::commands::COMMAND_NAMES;

const PLATFORMS: &[Platform] = &[
    Platform::Unspecified,
    Platform::Android,
    Platform::Ios,
    Platform::Macos,
    Platform::Windows,
];

#[derive(Default)]
pub struct ReplHelper;

impl Helper for ReplHelper {}
impl Validator for ReplHelper {}
impl Highlighter for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let trimmed = line.trim();
        if !trimmed.starts_with('/') || trimmed.contains(' ') {
            return None;
        }
        COMMAND_NAMES
            .iter()
            .find(|name| name.starts_with(trimmed) && **name != trimmed)
            .map(|name| name[trimmed.len()..].to_string())
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let trimmed = prefix.trim_start();

        if !trimmed.starts_with('/') {
            return Ok((0, vec![]));
        }

        if let Some(space_idx) = trimmed.find(' ') {
            let cmd = &trimmed[..space_idx];
            let rest = &trimmed[space_idx..];
            let word = rest.rsplit(' ').next().unwrap_or("");
            let word_start = pos - word.len();
            let previous = rest.trim_end_matches(word).split_whitespace().last();

            let candidates: Vec<String> = match (cmd, previous) {
                ("/submit", Some("--abuse-type") | Some("--type")) => ThreatType::KNOWN
                    .iter()
                    .map(|t| t.as_str().to_string())
                    .collect(),
                ("/submit", Some("--platform")) => {
                    PLATFORMS.iter().map(|p| p.as_str().to_string()).collect()
                }
                ("/submit", _) => ["--url", "--evidence", "--abuse-type", "--platform", "--region"]
                    .iter()
                    .map(|f| f.to_string())
                    .collect(),
                ("/clear", _) => vec!["--yes".to_string()],
                _ => vec![],
            };

            let matches: Vec<Pair> = candidates
                .into_iter()
                .filter(|c| c.starts_with(word))
                .map(|c| Pair {
                    display: c.clone(),
                    replacement: c,
                })
                .collect();

            return Ok((word_start, matches));
        }

        let start = pos - trimmed.len();
        let matches: Vec<Pair> = COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(trimmed))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();

        Ok((start, matches))
    }
}
