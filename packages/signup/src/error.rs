//! # Field-scoped validation errors
//!
//! A failed [`crate::Schema::validate`] returns [`FieldErrors`]: a map from a
//! [`FieldPath`] to every [`FieldError`] raised for that path. Paths address
//! scalar fields, the tech list as a whole, or one sub-field of one tech row
//! (`techs.2.name`), so row errors never mix with list-level errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Kind of rule that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Required,
    InvalidFormat,
    TooShort,
    SizeExceeded,
    DomainNotAllowed,
    MinCountNotMet,
    InvalidEnum,
    DuplicateEntries,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::TooShort => "too_short",
            ErrorKind::SizeExceeded => "size_exceeded",
            ErrorKind::DomainNotAllowed => "domain_not_allowed",
            ErrorKind::MinCountNotMet => "min_count_not_met",
            ErrorKind::InvalidEnum => "invalid_enum",
            ErrorKind::DuplicateEntries => "duplicate_entries",
        }
    }
}

/// Sub-field of a tech row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TechField {
    Name,
    Knowledge,
}

/// Where an error is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Avatar,
    Name,
    Email,
    Password,
    /// The tech list as a whole (count and duplicate errors).
    Techs,
    /// One sub-field of the row at `index`.
    Tech { index: usize, field: TechField },
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Avatar => f.write_str("avatar"),
            FieldPath::Name => f.write_str("name"),
            FieldPath::Email => f.write_str("email"),
            FieldPath::Password => f.write_str("password"),
            FieldPath::Techs => f.write_str("techs"),
            FieldPath::Tech { index, field } => {
                let field = match field {
                    TechField::Name => "name",
                    TechField::Knowledge => "knowledge",
                };
                write!(f, "techs.{index}.{field}")
            }
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One failed rule with its user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// All errors of one validation pass, grouped by path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FieldErrors {
    errors: BTreeMap<FieldPath, Vec<FieldError>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: FieldPath, error: FieldError) {
        self.errors.entry(path).or_default().push(error);
    }

    pub fn extend(&mut self, path: FieldPath, errors: impl IntoIterator<Item = FieldError>) {
        for error in errors {
            self.push(path, error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of paths with at least one error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, path: FieldPath) -> &[FieldError] {
        self.errors.get(&path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The error shown next to a field.
    pub fn first(&self, path: FieldPath) -> Option<&FieldError> {
        self.get(path).first()
    }

    pub fn has(&self, path: FieldPath, kind: ErrorKind) -> bool {
        self.get(path).iter().any(|e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &FieldError)> {
        self.errors
            .iter()
            .flat_map(|(path, errors)| errors.iter().map(move |e| (*path, e)))
    }
}
