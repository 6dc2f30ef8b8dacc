//! Signup form core: the declarative [`Schema`], the [`FormState`] controller
//! that owns the dynamic tech list, and the [`OutputSink`] that receives each
//! accepted [`ValidatedRecord`].
//!
//! Nothing in this crate touches the DOM, the network, or the filesystem; the
//! `ui` package wires these types into Dioxus signals.

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod schema;
pub mod sink;

pub use config::SchemaConfig;
pub use error::{ErrorKind, FieldError, FieldErrors, FieldPath, TechField};
pub use form::{FormState, Phase, RowId, SubmitOutcome, TechRow};
pub use models::{CandidateInput, FileRef, Knowledge, Tech, TechInput, ValidatedRecord};
pub use schema::{title_case, validate, FieldSchema, ListSchema, Rule, Schema};
pub use sink::{render_pretty, LogSink, OutputSink, PrettyJsonSink};
