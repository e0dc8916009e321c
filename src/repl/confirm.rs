use console::{style, Term};

use crate::app::{App, AppEvent, Command};

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` declines.
pub fn confirm(question: &str) -> bool {
    let term = Term::stdout();
    if !term.is_term() {
        return false;
    }
    print!("{} {} ", style("?").yellow().bold(), question);
    let _ = std::io::Write::flush(&mut std::io::stdout());
    let answer = term.read_line().unwrap_or_default();
    is_affirmative(&answer)
}

/// Ask before erasing submission history, then clear it. The stored history is
/// cleared even when nothing readable was loaded from it.
pub async fn clear_history(app: &mut App, yes: bool, ask: impl FnOnce(&str) -> bool) -> Vec<AppEvent> {
    let count = app.submissions().records().len();
    let question = if count == 0 {
        "No submissions are tracked. Erase any stored history anyway? [y/N]".to_string()
    } else {
        format!(
            "Erase {} tracked submission{}? This cannot be undone. [y/N]",
            count,
            if count == 1 { "" } else { "s" },
        )
    };
    let confirmed = yes || ask(&question);
    app.dispatch(Command::ClearAll { confirmed }).await
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
