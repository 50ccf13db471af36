//! In-memory collection of fasting logs kept in step with the backend.
//!
//! # Design
//! `LogController` owns the collection, the optional edit selection and the
//! error banner. Every action takes `&self`, so several may be in flight at
//! once on a single-threaded executor. The state mutex is only locked between
//! `.await` points, and each settled response is reconciled by id: the last
//! response to land for an id wins. A failed call never touches the
//! collection; it only records an `ActionError` for the banner.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, error};

use crate::client::FastLogClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{FastLog, FastLogForm};

/// Which controller action failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Update,
    Delete,
    Complete,
    Refresh,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::Load => "load fasting logs",
            Action::Create => "create fasting log",
            Action::Update => "update fasting log",
            Action::Delete => "delete fasting log",
            Action::Complete => "mark fasting log as complete",
            Action::Refresh => "refresh fasting log",
        };
        f.write_str(text)
    }
}

/// The single failure kind surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to {action}: {source}")]
pub struct ActionError {
    pub action: Action,
    pub source: ApiError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The initial fetch has not settled yet.
    #[default]
    Loading,
    Ready,
}

/// What a view should show, derived from `LogState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    Error,
}

/// Snapshot of everything a view needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogState {
    pub phase: Phase,
    pub entries: Vec<FastLog>,
    pub editing: Option<FastLog>,
    pub error: Option<ActionError>,
}

impl LogState {
    pub fn status(&self) -> Status {
        match (self.phase, &self.error) {
            (Phase::Loading, _) => Status::Loading,
            (Phase::Ready, Some(_)) => Status::Error,
            (Phase::Ready, None) => Status::Ready,
        }
    }

    pub fn get(&self, id: i64) -> Option<&FastLog> {
        self.entries.iter().find(|log| log.id == Some(id))
    }
}

pub struct LogController<T> {
    client: FastLogClient,
    transport: T,
    state: Mutex<LogState>,
}

impl<T: Transport> LogController<T> {
    pub fn new(client: FastLogClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: Mutex::new(LogState::default()),
        }
    }

    pub fn snapshot(&self) -> LogState {
        self.state().clone()
    }

    pub fn entries(&self) -> Vec<FastLog> {
        self.state().entries.clone()
    }

    pub fn error(&self) -> Option<ActionError> {
        self.state().error.clone()
    }

    pub fn dismiss_error(&self) {
        self.state().error = None;
    }

    /// Select the entry with `id` for editing. Returns the selection, or
    /// `None` (leaving any previous selection alone) if it is not loaded.
    pub fn begin_edit(&self, id: i64) -> Option<FastLog> {
        let mut state = self.state();
        let log = state.get(id).cloned()?;
        state.editing = Some(log.clone());
        Some(log)
    }

    pub fn cancel_edit(&self) {
        self.state().editing = None;
    }

    pub fn editing(&self) -> Option<FastLog> {
        self.state().editing.clone()
    }

    /// Fetch the whole collection. On failure the previous collection is kept.
    pub async fn load(&self) -> Result<(), ActionError> {
        {
            let mut state = self.state();
            state.phase = Phase::Loading;
            state.error = None;
        }

        let result = async {
            let response = self.transport.execute(self.client.build_list()).await?;
            self.client.parse_list(response)
        }
        .await;

        self.state().phase = Phase::Ready;
        match result {
            Ok(entries) => {
                debug!(count = entries.len(), "fasting logs loaded");
                self.state().entries = entries;
                Ok(())
            }
            Err(source) => Err(self.fail(Action::Load, None, source)),
        }
    }

    /// Create an entry and put it at the head of the collection.
    pub async fn create(&self, form: &FastLogForm) -> Result<FastLog, ActionError> {
        self.clear_error();

        let result = async {
            let request = self.client.build_create(form)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_create(response)
        }
        .await;

        match result {
            Ok(log) => {
                debug!(id = ?log.id, "fasting log created");
                let mut state = self.state();
                state.entries.retain(|existing| existing.id != log.id);
                state.entries.insert(0, log.clone());
                Ok(log)
            }
            Err(source) => Err(self.fail(Action::Create, None, source)),
        }
    }

    /// Save `form` over the entry selected with `begin_edit`.
    ///
    /// Without a selection this is a no-op returning `Ok(None)`. The
    /// selection is cleared on success and kept on failure.
    pub async fn update(&self, form: &FastLogForm) -> Result<Option<FastLog>, ActionError> {
        let selected = self.state().editing.as_ref().and_then(|log| log.id);
        let Some(id) = selected else {
            debug!("update requested with nothing selected");
            return Ok(None);
        };
        self.clear_error();

        let result = async {
            let request = self.client.build_update(id, form)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_update(response)
        }
        .await;

        match result {
            Ok(log) => {
                debug!(id, "fasting log updated");
                let mut state = self.state();
                replace_by_id(&mut state.entries, &log);
                if state.editing.as_ref().and_then(|e| e.id) == Some(id) {
                    state.editing = None;
                }
                Ok(Some(log))
            }
            Err(source) => Err(self.fail(Action::Update, Some(id), source)),
        }
    }

    /// Delete the entry with `id` once `confirm` agrees.
    ///
    /// Returns `Ok(false)` without any request when the user declines.
    pub async fn delete<F>(&self, id: i64, confirm: F) -> Result<bool, ActionError>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            debug!(id, "delete declined");
            return Ok(false);
        }
        self.clear_error();

        let result = async {
            let response = self.transport.execute(self.client.build_delete(id)).await?;
            self.client.parse_delete(response)
        }
        .await;

        match result {
            Ok(()) => {
                debug!(id, "fasting log deleted");
                let mut state = self.state();
                state.entries.retain(|log| log.id != Some(id));
                if state.editing.as_ref().and_then(|e| e.id) == Some(id) {
                    state.editing = None;
                }
                Ok(true)
            }
            Err(source) => Err(self.fail(Action::Delete, Some(id), source)),
        }
    }

    pub async fn mark_complete(&self, id: i64) -> Result<FastLog, ActionError> {
        self.clear_error();

        let result = async {
            let response = self
                .transport
                .execute(self.client.build_mark_complete(id))
                .await?;
            self.client.parse_mark_complete(response)
        }
        .await;

        match result {
            Ok(log) => {
                debug!(id, "fasting log completed");
                replace_by_id(&mut self.state().entries, &log);
                Ok(log)
            }
            Err(source) => Err(self.fail(Action::Complete, Some(id), source)),
        }
    }

    /// Re-fetch a single entry and swap it into the collection.
    pub async fn refresh_entry(&self, id: i64) -> Result<FastLog, ActionError> {
        self.clear_error();

        let result = async {
            let response = self.transport.execute(self.client.build_get(id)).await?;
            self.client.parse_get(response)
        }
        .await;

        match result {
            Ok(log) => {
                replace_by_id(&mut self.state().entries, &log);
                Ok(log)
            }
            Err(source) => Err(self.fail(Action::Refresh, Some(id), source)),
        }
    }

    fn clear_error(&self) {
        self.state().error = None;
    }

    fn fail(&self, action: Action, id: Option<i64>, source: ApiError) -> ActionError {
        error!(%action, ?id, status = ?source.status(), error = %source, "fasting log action failed");
        let err = ActionError { action, source };
        self.state().error = Some(err.clone());
        err
    }

    fn state(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Swap in `log` where the ids match. An id no longer held is left absent.
fn replace_by_id(entries: &mut [FastLog], log: &FastLog) -> bool {
    if log.id.is_none() {
        return false;
    }
    match entries.iter_mut().find(|existing| existing.id == log.id) {
        Some(slot) => {
            *slot = log.clone();
            true
        }
        None => false,
    }
}
