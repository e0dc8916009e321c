use chrono::Utc;
use console::style;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use tracing::debug;

use crate::app::{App, AppEvent, Command};
use crate::config::Settings;
use crate::errors::RiskError;
use crate::repl::commands::{self, SlashCommand};
use crate::repl::completer::ReplHelper;
use crate::repl::confirm::{clear_history, confirm};
use crate::repl::progress::CallProgress;
use crate::repl::renderer;

pub struct ReplSession {
    app: App,
    settings: Settings,
    quiet: bool,
}

impl ReplSession {
    pub fn new(app: App, settings: Settings, quiet: bool) -> Self {
        Self { app, settings, quiet }
    }

    pub async fn run(mut self) -> Result<(), RiskError> {
        if !self.quiet {
            println!(
                "\n{} {} {}\n{}\n",
                style("riskscope").cyan().bold(),
                style(env!("CARGO_PKG_VERSION")).dim(),
                style(format!("→ {}", self.settings.base_url)).dim(),
                renderer::render_info("Type /help for commands, /exit to quit."),
            );
            let pending = self.app.submissions().pending_count();
            if pending > 0 {
                println!(
                    "{}\n",
                    renderer::render_info(&format!(
                        "{} submission{} pending. /refresh to check.",
                        pending,
                        if pending == 1 { " is" } else { "s are" },
                    ))
                );
            }
        }

        let config = Config::builder()
            .auto_add_history(true)
            .build();
        let mut editor = Editor::with_config(config)
            .map_err(|e| RiskError::Internal(format!("Failed to initialize REPL: {}", e)))?;
        editor.set_helper(Some(ReplHelper));

        loop {
            let readline = {
                // rustyline is blocking, so use spawn_blocking
                let result = tokio::task::spawn_blocking(move || {
                    let prompt = format!("{} ", style("riskscope>").cyan().bold());
                    let result = editor.readline(&prompt);
                    (editor, result)
                })
                .await
                .map_err(|e| RiskError::Internal(format!("Readline task failed: {}", e)))?;

                editor = result.0;
                result.1
            };

            match readline {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match commands::parse_command(trimmed) {
                        Ok(cmd) => {
                            if self.handle_command(cmd).await {
                                break;
                            }
                        }
                        Err(msg) => println!("{}", renderer::render_error(&msg)),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{}", renderer::render_error(&format!("Input error: {}", err)));
                    break;
                }
            }
        }

        println!("{}", renderer::render_info("Goodbye."));
        Ok(())
    }

    /// Returns true when the session should end.
    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Exit => return true,

            SlashCommand::Help { command } => {
                println!("{}", renderer::render_help(command.as_deref()));
            }

            SlashCommand::Version => {
                println!("{}", renderer::render_version());
            }

            SlashCommand::Scan { url } => match url {
                Some(url) => {
                    self.run_remote(&format!("Scanning {}", url), Command::Scan { url: url.clone() })
                        .await;
                }
                None => println!("{}", renderer::render_error("Usage: /scan <url>")),
            },

            SlashCommand::Results => {
                println!("{}", renderer::render_results(&self.app.state().results));
            }

            SlashCommand::Prefill { index } => {
                let result_id = self
                    .app
                    .state()
                    .results
                    .get(index - 1)
                    .map(|r| r.id.clone());
                match result_id {
                    Some(result_id) => {
                        let events = self.app.dispatch(Command::PrepareSubmission { result_id }).await;
                        self.render(&events);
                    }
                    None => println!(
                        "{}",
                        renderer::render_error(&format!("No scan result #{}. See /results.", index))
                    ),
                }
            }

            SlashCommand::Submit(args) => {
                match args.into_form(self.app.state().draft.as_ref(), &self.settings) {
                    Ok(form) => {
                        let message = format!("Submitting {}", form.url);
                        self.run_remote(&message, Command::Submit { form }).await;
                    }
                    Err(e) => println!("{}", renderer::render_error(&e.to_string())),
                }
            }

            SlashCommand::Submissions => {
                println!(
                    "{}",
                    renderer::render_submissions(self.app.submissions().records(), Utc::now())
                );
            }

            SlashCommand::Refresh { id } => match id {
                Some(id) => {
                    self.run_remote("Refreshing submission", Command::Refresh { id }).await;
                }
                None => {
                    let pending = self.app.submissions().pending_count();
                    self.run_remote(
                        &format!("Refreshing {} pending submissions", pending),
                        Command::RefreshAll,
                    )
                    .await;
                }
            },

            SlashCommand::Clear { yes } => {
                let events = clear_history(&mut self.app, yes, confirm).await;
                self.render(&events);
            }
        }
        false
    }

    async fn run_remote(&mut self, message: &str, cmd: Command) {
        let progress = if self.quiet {
            CallProgress::hidden()
        } else {
            CallProgress::start(message)
        };
        let events = self.app.dispatch(cmd).await;
        debug!(elapsed = %progress.elapsed(), "Remote call finished");
        progress.finish();
        self.render(&events);
    }

    fn render(&self, events: &[AppEvent]) {
        for event in events {
            println!("{}", renderer::render_event(event));
        }
    }
}
