//! # Form controller
//!
//! [`FormState`] owns the candidate values typed by the user, the dynamic tech
//! list, and the errors of the last rejected submission.
//!
//! Every tech row gets a [`RowId`] when it is appended. Ids are unique for the
//! life of the process and never reused, so the UI keys rows by id and
//! [`FormState::row_error`] keeps showing each error next to the row it was
//! raised for, even after earlier rows are removed.
//!
//! Submitting walks `Idle → Validating → Accepted | Rejected → Idle`:
//!
//! - **Accepted**: errors are cleared and the record is handed to the
//!   [`OutputSink`] once.
//! - **Rejected**: the new error map replaces the old one and the sink is not
//!   called. Typed values are left as they are.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{FieldError, FieldErrors, FieldPath, TechField};
use crate::models::{CandidateInput, FileRef, Knowledge, TechInput};
use crate::schema::Schema;
use crate::sink::OutputSink;

static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a tech row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(u64);

impl RowId {
    fn next() -> Self {
        RowId(NEXT_ROW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tech-{}", self.0)
    }
}

/// One editable row of the tech list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TechRow {
    id: RowId,
    pub name: String,
    pub knowledge: String,
}

impl TechRow {
    fn empty() -> Self {
        Self {
            id: RowId::next(),
            name: String::new(),
            knowledge: Knowledge::default().as_str().to_string(),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    fn to_input(&self) -> TechInput {
        TechInput::new(self.name.clone(), self.knowledge.clone())
    }
}

/// Where a submission attempt is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Accepted,
    Rejected,
}

/// Result of [`FormState::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected,
}

/// Candidate values, tech rows, and error state of the signup form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub avatar: Vec<FileRef>,
    pub name: String,
    pub email: String,
    pub password: String,
    techs: Vec<TechRow>,
    errors: FieldErrors,
    /// Row ids in list order at the time `errors` was produced.
    error_rows: Vec<RowId>,
    phase: Phase,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn techs(&self) -> &[TechRow] {
        &self.techs
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Append an empty row with the default knowledge level.
    pub fn append_tech(&mut self) -> RowId {
        let row = TechRow::empty();
        let id = row.id;
        self.techs.push(row);
        tracing::debug!(row = %id, count = self.techs.len(), "tech row appended");
        id
    }

    /// Remove the row at `index`. Out of range is a no-op.
    pub fn remove_tech(&mut self, index: usize) -> Option<TechRow> {
        if index >= self.techs.len() {
            tracing::debug!(index, count = self.techs.len(), "remove ignored, no such row");
            return None;
        }
        let row = self.techs.remove(index);
        tracing::debug!(row = %row.id, index, "tech row removed");
        Some(row)
    }

    pub fn remove_tech_by_id(&mut self, id: RowId) -> Option<TechRow> {
        let index = self.position(id)?;
        self.remove_tech(index)
    }

    pub fn set_tech_name(&mut self, id: RowId, name: impl Into<String>) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn set_tech_knowledge(&mut self, id: RowId, knowledge: impl Into<String>) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.knowledge = knowledge.into();
                true
            }
            None => false,
        }
    }

    fn position(&self, id: RowId) -> Option<usize> {
        self.techs.iter().position(|row| row.id == id)
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut TechRow> {
        self.techs.iter_mut().find(|row| row.id == id)
    }

    /// Snapshot of the current values for validation.
    pub fn candidate(&self) -> CandidateInput {
        CandidateInput {
            avatar: self.avatar.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            techs: self.techs.iter().map(TechRow::to_input).collect(),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// First error of a scalar field or of the whole tech list.
    pub fn field_error(&self, path: FieldPath) -> Option<&FieldError> {
        self.errors.first(path)
    }

    /// First error raised for a row, looked up by identity.
    pub fn row_error(&self, id: RowId, field: TechField) -> Option<&FieldError> {
        let index = self.error_rows.iter().position(|row| *row == id)?;
        self.errors.first(FieldPath::Tech { index, field })
    }

    /// Validate the current values and route the result.
    pub fn submit<S>(&mut self, schema: &Schema, sink: &mut S) -> SubmitOutcome
    where
        S: OutputSink + ?Sized,
    {
        self.phase = Phase::Validating;
        tracing::debug!(phase = ?self.phase, "submitting signup form");

        let outcome = match schema.validate(&self.candidate()) {
            Ok(record) => {
                self.phase = Phase::Accepted;
                self.errors = FieldErrors::new();
                self.error_rows.clear();
                sink.accept(record);
                SubmitOutcome::Accepted
            }
            Err(errors) => {
                self.phase = Phase::Rejected;
                self.errors = errors;
                self.error_rows = self.techs.iter().map(TechRow::id).collect();
                SubmitOutcome::Rejected
            }
        };
        tracing::debug!(phase = ?self.phase, errors = self.errors.len(), "submission finished");

        self.phase = Phase::Idle;
        outcome
    }

    /// Re-check the current values while errors from a rejected submission
    /// are showing, so fixed fields lose their message as the user types.
    /// Does nothing when no errors are showing; never calls a sink.
    pub fn revalidate(&mut self, schema: &Schema) -> bool {
        if self.errors.is_empty() {
            return false;
        }
        self.errors = schema.validate(&self.candidate()).err().unwrap_or_default();
        self.error_rows = self.techs.iter().map(TechRow::id).collect();
        tracing::debug!(errors = self.errors.len(), "signup form revalidated");
        true
    }
}
