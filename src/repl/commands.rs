use crate::config::Settings;
use crate::errors::RiskError;
use crate::models::{Platform, SubmissionForm, ThreatType, DEFAULT_REGION_CODE};

/// All slash commands supported by the REPL.
#[derive(Debug, Clone, PartialEq)]
pub enum SlashCommand {
    Scan {
        url: Option<String>,
    },
    Results,
    Prefill {
        /// 1-based position in `/results`, newest first
        index: usize,
    },
    Submit(SubmitArgs),
    Submissions,
    Refresh {
        id: Option<String>,
    },
    Clear {
        yes: bool,
    },
    Version,
    Help {
        command: Option<String>,
    },
    Exit,
}

/// Flags of `/submit`. Anything left unset falls back to the current draft,
/// then to the configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitArgs {
    pub url: Option<String>,
    pub evidence: Option<String>,
    pub abuse_type: Option<String>,
    pub platform: Option<String>,
    pub regions: Vec<String>,
}

impl SubmitArgs {
    /// Build the form to file. The draft supplies whatever the flags leave out;
    /// platform and regions still at their built-in defaults yield to `defaults`.
    pub fn into_form(
        self,
        draft: Option<&SubmissionForm>,
        defaults: &Settings,
    ) -> Result<SubmissionForm, RiskError> {
        let url = self
            .url
            .or_else(|| draft.map(|d| d.url.clone()))
            .ok_or_else(|| RiskError::Validation("URL is required (pass --url or /prefill a draft)".into()))?;
        let abuse_type = self
            .abuse_type
            .map(ThreatType::from)
            .or_else(|| draft.map(|d| d.abuse_type.clone()))
            .ok_or_else(|| RiskError::Validation("Abuse type is required (--abuse-type)".into()))?;
        let evidence = self
            .evidence
            .or_else(|| draft.map(|d| d.evidence.clone()))
            .unwrap_or_default();

        let mut form = SubmissionForm::new(&url, &evidence, abuse_type);

        form.platform = match self.platform {
            Some(raw) => raw.parse::<Platform>()?,
            None => draft
                .map(|d| d.platform)
                .filter(|p| *p != Platform::default())
                .unwrap_or(defaults.default_platform),
        };

        form.region_codes = if !self.regions.is_empty() {
            self.regions.into_iter().map(|r| r.to_ascii_uppercase()).collect()
        } else {
            draft
                .map(|d| d.region_codes.clone())
                .filter(|codes| *codes != [DEFAULT_REGION_CODE])
                .unwrap_or_else(|| defaults.default_region_codes.clone())
        };

        Ok(form)
    }
}

/// Description of a command for help display.
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "scan",
        usage: "/scan <url>",
        description: "Check a URL against the reputation service",
    },
    CommandHelp {
        name: "results",
        usage: "/results",
        description: "List scan results from this session, newest first",
    },
    CommandHelp {
        name: "prefill",
        usage: "/prefill [n]",
        description: "Start a submission draft from result n (default 1, the latest)",
    },
    CommandHelp {
        name: "submit",
        usage: "/submit [--url <url>] --evidence \"<text>\" [--abuse-type <type>] [--platform <platform>] [--region <CC>]...",
        description: "File an abuse submission. Unset flags come from the current draft. Quote evidence containing spaces.",
    },
    CommandHelp {
        name: "submissions",
        usage: "/submissions",
        description: "List tracked submissions with status and age",
    },
    CommandHelp {
        name: "refresh",
        usage: "/refresh [id]",
        description: "Refresh one submission by id prefix, or every pending one",
    },
    CommandHelp {
        name: "clear",
        usage: "/clear [--yes]",
        description: "Erase submission history after confirmation",
    },
    CommandHelp {
        name: "version",
        usage: "/version",
        description: "Show version and build info",
    },
    CommandHelp {
        name: "help",
        usage: "/help [command]",
        description: "Show help for all or a specific command",
    },
    CommandHelp {
        name: "exit",
        usage: "/exit",
        description: "Quit the REPL",
    },
];

/// All command names for tab completion.
pub static COMMAND_NAMES: &[&str] = &[
    "/scan",
    "/results",
    "/prefill",
    "/submit",
    "/submissions",
    "/refresh",
    "/clear",
    "/version",
    "/help",
    "/exit",
];

/// Parse a raw input line into a SlashCommand, or return an error message.
pub fn parse_command(input: &str) -> Result<SlashCommand, String> {
    let input = input.trim();
    if !input.starts_with('/') {
        return Err("Commands must start with /. Type /help for available commands.".into());
    }

    let parts = tokenize(input)?;
    if parts.is_empty() {
        return Err("Empty command".into());
    }

    let cmd = parts[0].as_str();
    let args: Vec<&str> = parts[1..].iter().map(String::as_str).collect();

    match cmd {
        "/scan" => Ok(SlashCommand::Scan {
            url: args.first().map(|s| s.to_string()),
        }),
        "/results" => Ok(SlashCommand::Results),
        "/prefill" => parse_prefill(&args),
        "/submit" => parse_submit(&args),
        "/submissions" => Ok(SlashCommand::Submissions),
        "/refresh" => Ok(SlashCommand::Refresh {
            id: args.first().map(|s| s.to_string()),
        }),
        "/clear" => parse_clear(&args),
        "/version" => Ok(SlashCommand::Version),
        "/help" => Ok(SlashCommand::Help {
            command: args.first().map(|s| s.trim_start_matches('/').to_string()),
        }),
        "/exit" | "/quit" | "/q" => Ok(SlashCommand::Exit),
        other => Err(format!("Unknown command: {}. Type /help for available commands.", other)),
    }
}

/// Split on whitespace, keeping double-quoted runs together.
fn tokenize(input: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err("Unterminated quote".into());
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_prefill(args: &[&str]) -> Result<SlashCommand, String> {
    let index = match args.first() {
        None => 1,
        Some(n) => n
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("Invalid result number: {}", n))?,
    };
    Ok(SlashCommand::Prefill { index })
}

fn parse_submit(args: &[&str]) -> Result<SlashCommand, String> {
    let mut submit = SubmitArgs::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i];
        i += 1;
        let value = args
            .get(i)
            .map(|s| s.to_string())
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag {
            "--url" | "-u" => submit.url = Some(value),
            "--evidence" | "-e" => submit.evidence = Some(value),
            "--abuse-type" | "--type" => submit.abuse_type = Some(value),
            "--platform" => submit.platform = Some(value),
            "--region" | "-r" => submit.regions.extend(
                value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            ),
            other => {
                return Err(format!("Unknown flag for /submit: {}", other));
            }
        }
        i += 1;
    }

    Ok(SlashCommand::Submit(submit))
}

fn parse_clear(args: &[&str]) -> Result<SlashCommand, String> {
    match args.first().copied() {
        None => Ok(SlashCommand::Clear { yes: false }),
        Some("--yes") | Some("-y") => Ok(SlashCommand::Clear { yes: true }),
        Some(other) => Err(format!("Unknown flag for /clear: {}", other)),
    }
}
