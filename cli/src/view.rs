//! Plain-text views over a `LogState` snapshot.

use fastlog_core::{ActionError, FastLog, LogState, Status};

pub const LOADING: &str = "Loading fasting logs...";
pub const EMPTY: &str = "No fasting logs yet. Start logging your fasting journey!";

/// The collection as the list screen shows it.
pub fn render(state: &LogState) -> String {
    if state.status() == Status::Loading {
        return format!("{LOADING}\n");
    }
    if state.entries.is_empty() {
        return format!("{EMPTY}\n");
    }

    let mut out = String::from("Fasting Logs\n");
    for log in &state.entries {
        out.push('\n');
        out.push_str(&render_entry(log));
    }
    out
}

/// One card: id, long date, type, status badge, then notes if any.
pub fn render_entry(log: &FastLog) -> String {
    let id = log.id.map(|id| format!("#{id}")).unwrap_or_else(|| "#-".to_string());
    let mut out = format!(
        "{id:<5} {:<30} {:<13} {}\n",
        long_date(log),
        log.fast_type,
        badge(log)
    );
    if !log.notes.is_empty() {
        for line in log.notes.lines() {
            out.push_str(&format!("      {line}\n"));
        }
    }
    out
}

pub fn banner(error: &ActionError) -> String {
    format!("! {error}\n")
}

/// e.g. "Monday, January 5, 2026"
pub fn long_date(log: &FastLog) -> String {
    log.date.format("%A, %B %-d, %Y").to_string()
}

fn badge(log: &FastLog) -> &'static str {
    if log.completed {
        "✓ Completed"
    } else {
        "○ Pending"
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fastlog_core::{Action, ApiError, FastType, Phase};

    use super::*;

    fn log(id: i64, day: u32, completed: bool, notes: &str) -> FastLog {
        FastLog {
            id: Some(id),
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            fast_type: FastType::Religious,
            completed,
            notes: notes.to_string(),
        }
    }

    fn ready(entries: Vec<FastLog>) -> LogState {
        LogState {
            phase: Phase::Ready,
            entries,
            ..LogState::default()
        }
    }

    #[test]
    fn loading_state() {
        assert_eq!(render(&LogState::default()), "Loading fasting logs...\n");
    }

    #[test]
    fn empty_state() {
        assert_eq!(
            render(&ready(Vec::new())),
            "No fasting logs yet. Start logging your fasting journey!\n"
        );
    }

    #[test]
    fn long_date_format() {
        assert_eq!(long_date(&log(1, 5, false, "")), "Monday, January 5, 2026");
    }

    #[test]
    fn list_shows_badges_and_notes() {
        let out = render(&ready(vec![log(2, 6, true, "broke fast at sunset"), log(1, 5, false, "")]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Fasting Logs");
        assert!(lines[2].starts_with("#2 "));
        assert!(lines[2].contains("Tuesday, January 6, 2026"));
        assert!(lines[2].contains("RELIGIOUS"));
        assert!(lines[2].ends_with("✓ Completed"));
        assert_eq!(lines[3].trim(), "broke fast at sunset");
        assert!(lines[5].starts_with("#1 "));
        assert!(lines[5].ends_with("○ Pending"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn banner_names_action_and_message() {
        let error = ActionError {
            action: Action::Delete,
            source: ApiError::from_status(500, "boom"),
        };
        assert_eq!(banner(&error), "! Failed to delete fasting log: boom\n");
    }
}
