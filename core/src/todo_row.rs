//! Per-row state machine for the todos table.
//!
//! A row is either `Viewing` or `Editing`. Events mutate the local copy
//! immediately (optimistic); persistence is decided once per render pass by
//! [`TodoRow::settle`], which the host calls after it has applied a batch of
//! events. A pass yields a save when all of the following hold:
//!
//! - the row was written to since the previous pass,
//! - the row is `Viewing`,
//! - a previous pass has recorded a value (never true on the mount pass),
//! - the todo has a backend id.
//!
//! Any write counts as a change, even one that restores the prior value, so
//! two toggles inside one batch still produce exactly one save carrying the
//! original flag.

use crate::types::Todo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    ToggleCompleted,
    ClickTitle,
    EditTitle(String),
    Blur,
    Delete,
}

/// Persistence work requested by a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEffect {
    Save(Todo),
    Delete(u64),
}

#[derive(Debug, Clone)]
pub struct TodoRow {
    todo: Todo,
    mode: RowMode,
    previous: Option<Todo>,
    dirty: bool,
}

impl TodoRow {
    /// A freshly mounted row. Its first `settle` is the mount pass.
    pub fn new(todo: Todo) -> Self {
        Self {
            todo,
            mode: RowMode::Viewing,
            previous: None,
            dirty: true,
        }
    }

    pub fn todo(&self) -> &Todo {
        &self.todo
    }

    pub fn id(&self) -> u64 {
        self.todo.id
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == RowMode::Editing
    }

    pub fn apply(&mut self, event: RowEvent) -> Option<RowEffect> {
        match (event, self.mode) {
            (RowEvent::ToggleCompleted, _) => {
                self.todo.completed = !self.todo.completed;
                self.dirty = true;
            }
            (RowEvent::ClickTitle, RowMode::Viewing) => {
                self.mode = RowMode::Editing;
                self.dirty = true;
            }
            (RowEvent::EditTitle(title), RowMode::Editing) => {
                self.todo.title = title;
                self.dirty = true;
            }
            (RowEvent::Blur, RowMode::Editing) => {
                self.mode = RowMode::Viewing;
                self.dirty = true;
            }
            (RowEvent::Delete, _) => return Some(RowEffect::Delete(self.todo.id)),
            // Title clicks while editing, typing while viewing and stray
            // blurs have no handler on the rendered element.
            _ => {}
        }
        None
    }

    /// Render pass. Records the current value as the previous one.
    pub fn settle(&mut self) -> Option<RowEffect> {
        let save = self.dirty
            && self.mode == RowMode::Viewing
            && self.previous.is_some()
            && self.todo.has_valid_id();
        self.dirty = false;
        self.previous = Some(self.todo.clone());
        save.then(|| RowEffect::Save(self.todo.clone()))
    }

    /// Adopt a refetched snapshot. Counts as an already rendered value, so it
    /// never triggers a save by itself.
    pub fn sync(&mut self, todo: Todo) {
        self.previous = Some(todo.clone());
        self.todo = todo;
        self.dirty = false;
    }
}
