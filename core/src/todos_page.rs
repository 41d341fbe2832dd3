//! Controller for the todos page.
//!
//! # Design
//! The page never performs I/O. Every operation that needs the backend
//! returns an [`Outgoing`] request tagged with a [`Ticket`]; the host executes
//! it and hands the response back through [`TodosPage::complete`], which may
//! in turn return the follow-up refetch.
//!
//! Reconciliation policy:
//! - every settled mutation (successful or not) is followed by a full list
//!   refetch, and the refetched snapshot replaces the rows;
//! - only the most recently issued list fetch is applied, so a slow older
//!   response can never overwrite a newer one;
//! - a row with an update still in flight, or one being edited, keeps its
//!   local copy across a snapshot so the table does not flicker back to the
//!   stale backend value.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::fetch::{Loadable, MutationState};
use crate::http::{HttpRequest, HttpResponse};
use crate::todo_row::{RowEffect, RowEvent, TodoRow};
use crate::types::{NewTodo, Todo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    FetchTodos,
    CreateTodo,
    UpdateTodo(u64),
    DeleteTodo(u64),
}

impl Operation {
    fn row_id(&self) -> Option<u64> {
        match self {
            Operation::UpdateTodo(id) | Operation::DeleteTodo(id) => Some(*id),
            _ => None,
        }
    }
}

/// A request the host must execute and report back.
#[derive(Debug, Clone)]
pub struct Outgoing {
    pub ticket: Ticket,
    pub op: Operation,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationFailure {
    pub op: Operation,
    pub message: String,
}

#[derive(Debug)]
pub struct TodosPage {
    client: ApiClient,
    list: Loadable<Vec<TodoRow>>,
    refresh_error: Option<String>,
    draft: String,
    show_completed: bool,
    next_ticket: u64,
    latest_fetch: Option<Ticket>,
    in_flight: BTreeMap<Ticket, Operation>,
    failures: Vec<MutationFailure>,
}

impl TodosPage {
    /// A page whose list has not been fetched yet.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            list: Loadable::Loading,
            refresh_error: None,
            draft: String::new(),
            show_completed: false,
            next_ticket: 0,
            latest_fetch: None,
            in_flight: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    /// A page seeded by the data-fetch phase.
    pub fn with_todos(client: ApiClient, todos: Vec<Todo>) -> Self {
        let mut page = Self::new(client);
        page.list = Loadable::Ready(todos.into_iter().map(TodoRow::new).collect());
        page
    }

    // ---------------------------------------------------------------------
    // Read side
    // ---------------------------------------------------------------------

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    /// Error of the initial load, or of the latest refresh if the list had
    /// already been loaded once.
    pub fn list_error(&self) -> Option<&str> {
        self.list.error().or(self.refresh_error.as_deref())
    }

    pub fn list_state(&self) -> &Loadable<Vec<TodoRow>> {
        &self.list
    }

    pub fn rows(&self) -> &[TodoRow] {
        self.list.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row(&self, id: u64) -> Option<&TodoRow> {
        self.rows().iter().find(|row| row.id() == id)
    }

    /// Rows that pass the completed filter. Filtering never touches data.
    pub fn visible_rows(&self) -> impl Iterator<Item = &TodoRow> {
        let show_completed = self.show_completed;
        self.rows()
            .iter()
            .filter(move |row| !row.todo().completed || show_completed)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn show_completed(&self) -> bool {
        self.show_completed
    }

    pub fn failures(&self) -> &[MutationFailure] {
        &self.failures
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Pending or failed mutation touching the given row, if any. A failure
    /// is dropped once a later mutation of the same row succeeds.
    pub fn mutation_state(&self, id: u64) -> Option<MutationState> {
        if self.in_flight.values().any(|op| op.row_id() == Some(id)) {
            return Some(MutationState::InFlight);
        }
        self.failures
            .iter()
            .find(|failure| failure.op.row_id() == Some(id))
            .map(|failure| MutationState::Failed(failure.message.clone()))
    }

    // ---------------------------------------------------------------------
    // Write side
    // ---------------------------------------------------------------------

    pub fn fetch_todos(&mut self) -> Outgoing {
        let request = self.client.build_list_todos();
        let outgoing = self.issue(Operation::FetchTodos, request);
        self.latest_fetch = Some(outgoing.ticket);
        outgoing
    }

    pub fn set_draft(&mut self, title: impl Into<String>) {
        self.draft = title.into();
    }

    /// Submit the add form. The draft is cleared as soon as the POST is
    /// issued.
    pub fn submit_draft(&mut self) -> Result<Outgoing, ApiError> {
        let request = self.client.build_create_todo(&NewTodo::from_draft(self.draft.as_str()))?;
        self.draft.clear();
        Ok(self.issue(Operation::CreateTodo, request))
    }

    pub fn toggle_show_completed(&mut self) {
        self.show_completed = !self.show_completed;
    }

    /// Route a UI event to its row. Deletion is issued immediately; every
    /// other event waits for the next [`settle`](Self::settle).
    pub fn row_event(&mut self, id: u64, event: RowEvent) -> Result<Option<Outgoing>, ApiError> {
        let Some(row) = self.row_mut(id) else {
            warn!(id, "event for unknown todo row");
            return Ok(None);
        };
        match row.apply(event) {
            Some(effect) => self.effect(effect).map(Some),
            None => Ok(None),
        }
    }

    /// Render pass over every row; returns the saves it triggered.
    pub fn settle(&mut self) -> Result<Vec<Outgoing>, ApiError> {
        let effects: Vec<RowEffect> = match &mut self.list {
            Loadable::Ready(rows) => rows.iter_mut().filter_map(TodoRow::settle).collect(),
            _ => Vec::new(),
        };
        effects.into_iter().map(|effect| self.effect(effect)).collect()
    }

    /// Report the outcome of an executed request.
    pub fn complete(&mut self, ticket: Ticket, result: Result<HttpResponse, ApiError>) -> Vec<Outgoing> {
        let Some(op) = self.in_flight.remove(&ticket) else {
            warn!(?ticket, "response for unknown request");
            return Vec::new();
        };
        debug!(?ticket, ?op, "request settled");

        let outcome = match &op {
            Operation::FetchTodos => {
                if self.latest_fetch != Some(ticket) {
                    debug!(?ticket, "discarding superseded list response");
                    return Vec::new();
                }
                let todos = result.and_then(|response| self.client.parse_list_todos(response));
                self.apply_snapshot(todos);
                return Vec::new();
            }
            Operation::CreateTodo => result
                .and_then(|response| self.client.parse_create_todo(response))
                .map(|_| ()),
            Operation::UpdateTodo(_) => result.and_then(|response| self.client.parse_update_todo(response)),
            Operation::DeleteTodo(_) => result.and_then(|response| self.client.parse_delete_todo(response)),
        };

        match outcome {
            Ok(()) => self.clear_failure(&op),
            Err(err) => {
                warn!(?op, error = %err, "mutation failed");
                self.record_failure(op, err.to_string());
            }
        }
        vec![self.fetch_todos()]
    }

    /// Failures are keyed by row (creates share one slot), so each row shows
    /// at most its latest error.
    fn record_failure(&mut self, op: Operation, message: String) {
        self.clear_failure(&op);
        self.failures.push(MutationFailure { op, message });
    }

    fn clear_failure(&mut self, op: &Operation) {
        let key = op.row_id();
        self.failures.retain(|failure| failure.op.row_id() != key);
    }

    fn issue(&mut self, op: Operation, request: HttpRequest) -> Outgoing {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        debug!(?ticket, ?op, method = %request.method, url = %request.url, "issuing request");
        self.in_flight.insert(ticket, op.clone());
        Outgoing { ticket, op, request }
    }

    fn effect(&mut self, effect: RowEffect) -> Result<Outgoing, ApiError> {
        match effect {
            RowEffect::Save(todo) => {
                let request = self.client.build_update_todo(&todo)?;
                Ok(self.issue(Operation::UpdateTodo(todo.id), request))
            }
            RowEffect::Delete(id) => {
                let request = self.client.build_delete_todo(id);
                Ok(self.issue(Operation::DeleteTodo(id), request))
            }
        }
    }

    fn row_mut(&mut self, id: u64) -> Option<&mut TodoRow> {
        match &mut self.list {
            Loadable::Ready(rows) => rows.iter_mut().find(|row| row.id() == id),
            _ => None,
        }
    }

    fn apply_snapshot(&mut self, result: Result<Vec<Todo>, ApiError>) {
        let todos = match result {
            Ok(todos) => todos,
            Err(err) => {
                warn!(error = %err, "todo list fetch failed");
                if matches!(self.list, Loadable::Ready(_)) {
                    self.refresh_error = Some(err.to_string());
                } else {
                    self.list = Loadable::Failed(err.to_string());
                }
                return;
            }
        };

        let mut previous: BTreeMap<u64, TodoRow> = match std::mem::take(&mut self.list) {
            Loadable::Ready(rows) => rows.into_iter().map(|row| (row.id(), row)).collect(),
            _ => BTreeMap::new(),
        };
        let saving: Vec<u64> = self
            .in_flight
            .values()
            .filter_map(|op| match op {
                Operation::UpdateTodo(id) => Some(*id),
                _ => None,
            })
            .collect();

        let rows = todos
            .into_iter()
            .map(|todo| match previous.remove(&todo.id) {
                Some(row) if row.is_editing() || saving.contains(&todo.id) => row,
                Some(mut row) => {
                    row.sync(todo);
                    row
                }
                None => TodoRow::new(todo),
            })
            .collect();

        self.list = Loadable::Ready(rows);
        self.refresh_error = None;
    }
}
