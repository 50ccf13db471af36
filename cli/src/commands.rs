//! Runs one CLI command against a `LogController` and renders the result.

use std::io::{self, BufRead, Write};

use fastlog_core::{FastLog, FastLogForm, LogController, Transport};
use tracing::debug;

use crate::args::Commands;
use crate::view;

/// How a command ended. Anything but `Done` and `Declined` is a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Declined,
    /// The id is not in the loaded collection.
    Missing(i64),
    /// The controller recorded an error; it has been printed as a banner.
    Failed,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Done | Outcome::Declined)
    }
}

/// Load the collection, apply `command`, and write the resulting view to
/// `out` and any error banner to `err`.
///
/// `ask` is consulted before a delete is sent, unless `--yes` was given.
pub async fn dispatch<T, W, E, C>(
    controller: &LogController<T>,
    command: Commands,
    out: &mut W,
    err: &mut E,
    ask: C,
) -> io::Result<Outcome>
where
    T: Transport,
    W: Write,
    E: Write,
    C: FnOnce(&str) -> bool,
{
    if controller.load().await.is_err() {
        return report(controller, None, out, err);
    }

    let shown = match command {
        Commands::List => None,
        Commands::Show { id } => match controller.refresh_entry(id).await {
            Ok(log) => Some(log),
            Err(_) => return report(controller, None, out, err),
        },
        Commands::Add {
            date,
            fast_type,
            completed,
            notes,
        } => {
            let mut form = FastLogForm::today();
            if let Some(date) = date {
                form.date = date;
            }
            form.fast_type = fast_type;
            form.completed = completed;
            form.notes = notes;
            if controller.create(&form).await.is_err() {
                return report(controller, None, out, err);
            }
            None
        }
        Commands::Edit {
            id,
            date,
            fast_type,
            completed,
            notes,
        } => {
            let Some(selected) = controller.begin_edit(id) else {
                writeln!(err, "! Fasting log #{id} is not in the list")?;
                return Ok(Outcome::Missing(id));
            };
            let mut form = FastLogForm::from(&selected);
            if let Some(date) = date {
                form.date = date;
            }
            if let Some(fast_type) = fast_type {
                form.fast_type = fast_type;
            }
            if let Some(completed) = completed {
                form.completed = completed;
            }
            if let Some(notes) = notes {
                form.notes = notes;
            }
            if controller.update(&form).await.is_err() {
                return report(controller, None, out, err);
            }
            None
        }
        Commands::Complete { id } => {
            if controller.mark_complete(id).await.is_err() {
                return report(controller, None, out, err);
            }
            None
        }
        Commands::Delete { id, yes } => {
            let prompt = match controller.snapshot().get(id) {
                Some(log) => format!("Delete fasting log #{id} ({})?", view::long_date(log)),
                None => format!("Delete fasting log #{id}?"),
            };
            match controller.delete(id, || yes || ask(&prompt)).await {
                Ok(true) => None,
                Ok(false) => {
                    debug!(id, "delete cancelled by user");
                    writeln!(out, "Nothing deleted.")?;
                    return Ok(Outcome::Declined);
                }
                Err(_) => return report(controller, None, out, err),
            }
        }
    };

    report(controller, shown.as_ref(), out, err)
}

/// Ask `prompt` on `output` and read a yes/no answer; anything but y/yes is no.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> bool {
    if write!(output, "{prompt} [y/N] ").and_then(|_| output.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn report<T, W, E>(
    controller: &LogController<T>,
    shown: Option<&FastLog>,
    out: &mut W,
    err: &mut E,
) -> io::Result<Outcome>
where
    T: Transport,
    W: Write,
    E: Write,
{
    let state = controller.snapshot();
    if let Some(error) = &state.error {
        err.write_all(view::banner(error).as_bytes())?;
    }

    match shown {
        Some(log) => out.write_all(view::render_entry(log).as_bytes())?,
        None => out.write_all(view::render(&state).as_bytes())?,
    }

    Ok(if state.error.is_some() {
        Outcome::Failed
    } else {
        Outcome::Done
    })
}
