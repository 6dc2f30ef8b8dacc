//! # Form data before and after validation
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`CandidateInput`] | Raw form state exactly as typed. Every field defaults to empty so a partially filled form still deserializes. |
//! | [`TechInput`] | One raw row of the tech list: free-text `name` and the selected `knowledge` value. |
//! | [`FileRef`] | Metadata of a picked file. The core reads only `size`; contents are never opened. |
//! | [`ValidatedRecord`] | The normalized output of a successful [`crate::Schema::validate`]. It has no public constructor. |
//! | [`Tech`] | A validated tech row with a typed [`Knowledge`] level. |
//!
//! [`Knowledge`] serializes to the option values of the form's select
//! (`basico`, `intermediário`, `avançado`) and also accepts the English
//! names on input.

use serde::{Deserialize, Serialize};

/// Metadata of a file chosen in a file input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// File name as reported by the picker: "me.png"
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Declared media type: "image/png"
    #[serde(default)]
    pub media_type: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
        }
    }
}

/// A raw tech row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub knowledge: String,
}

impl TechInput {
    pub fn new(name: impl Into<String>, knowledge: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            knowledge: knowledge.into(),
        }
    }
}

/// Unvalidated form state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInput {
    /// Files from the avatar input; only the first one is considered.
    #[serde(default)]
    pub avatar: Vec<FileRef>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub techs: Vec<TechInput>,
}

/// Self-assessed skill level for a tech.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Knowledge {
    #[default]
    #[serde(rename = "basico", alias = "basic")]
    Basic,
    #[serde(rename = "intermediário", alias = "intermediate")]
    Intermediate,
    #[serde(rename = "avançado", alias = "advanced")]
    Advanced,
}

impl Knowledge {
    pub const ALL: [Knowledge; 3] = [
        Knowledge::Basic,
        Knowledge::Intermediate,
        Knowledge::Advanced,
    ];

    /// Value submitted by the select and written to the output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Knowledge::Basic => "basico",
            Knowledge::Intermediate => "intermediário",
            Knowledge::Advanced => "avançado",
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            Knowledge::Basic => "Básico",
            Knowledge::Intermediate => "Intermediário",
            Knowledge::Advanced => "Avançado",
        }
    }

    /// Parse a select value. Accepts the canonical values and the English names.
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "basico" | "basic" => Some(Knowledge::Basic),
            "intermediário" | "intermediate" => Some(Knowledge::Intermediate),
            "avançado" | "advanced" => Some(Knowledge::Advanced),
            _ => None,
        }
    }
}

/// A validated tech row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tech {
    pub(crate) name: String,
    pub(crate) knowledge: Knowledge,
}

impl Tech {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn knowledge(&self) -> Knowledge {
        self.knowledge
    }
}

/// Normalized, schema-passing form data.
///
/// Only [`crate::Schema::validate`] builds one; there are no setters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidatedRecord {
    pub(crate) avatar: Option<FileRef>,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) techs: Vec<Tech>,
}

impl ValidatedRecord {
    pub fn avatar(&self) -> Option<&FileRef> {
        self.avatar.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn techs(&self) -> &[Tech] {
        &self.techs
    }
}
