//! Consumers of accepted signup records.

use crate::models::ValidatedRecord;

/// Receives one [`ValidatedRecord`] per accepted submission.
pub trait OutputSink {
    fn accept(&mut self, record: ValidatedRecord);
}

/// Both sinks receive the record.
impl<A: OutputSink, B: OutputSink> OutputSink for (A, B) {
    fn accept(&mut self, record: ValidatedRecord) {
        self.0.accept(record.clone());
        self.1.accept(record);
    }
}

/// Pretty-printed JSON, two-space indented.
pub fn render_pretty(record: &ValidatedRecord) -> String {
    serde_json::to_string_pretty(record).unwrap_or_else(|e| {
        tracing::warn!("Failed to serialize record: {}", e);
        format!("{record:#?}")
    })
}

/// Keeps the rendering of the last accepted record for display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrettyJsonSink {
    output: String,
}

impl PrettyJsonSink {
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl OutputSink for PrettyJsonSink {
    fn accept(&mut self, record: ValidatedRecord) {
        self.output = render_pretty(&record);
    }
}

/// Writes accepted records to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl OutputSink for LogSink {
    fn accept(&mut self, record: ValidatedRecord) {
        tracing::info!(
            name = record.name(),
            techs = record.techs().len(),
            "signup accepted\n{}",
            render_pretty(&record)
        );
    }
}
