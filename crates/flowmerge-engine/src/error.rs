use flowmerge_core::{FieldPath, PropertiesParseError, StructuredIssue};

/// Failures of the merge engine. None of them is retried here; the caller surfaces them
/// as a status condition and re-invokes the engine once inputs change.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed or contradictory user or platform input.
    #[error("invalid configuration at {field_path}: {message}")]
    Configuration {
        field_path: FieldPath,
        message: String,
        reference: &'static str,
    },
    /// A secret or service reference without a name. Existence is never checked here.
    #[error("{reference_kind} reference at {field_path} has no name")]
    MissingReference {
        field_path: FieldPath,
        reference_kind: &'static str,
    },
    #[error("properties document `{document}` is malformed: {source}")]
    DocumentParse {
        document: String,
        #[source]
        source: PropertiesParseError,
    },
}

impl EngineError {
    pub(crate) fn configuration(
        field_path: FieldPath,
        message: impl Into<String>,
        reference: &'static str,
    ) -> Self {
        EngineError::Configuration {
            field_path,
            message: message.into(),
            reference,
        }
    }

    pub fn to_issue(&self) -> StructuredIssue {
        match self {
            EngineError::Configuration {
                field_path,
                message,
                reference,
            } => StructuredIssue::error("configuration", field_path.clone(), message.clone(), *reference),
            EngineError::MissingReference {
                field_path,
                reference_kind,
            } => StructuredIssue::error(
                "missing_reference",
                field_path.clone(),
                self.to_string(),
                format!("reference.{reference_kind}_name"),
            ),
            EngineError::DocumentParse { document, .. } => StructuredIssue::error(
                "document_parse",
                FieldPath::root().key("data").key(document.clone()),
                self.to_string(),
                "properties.parse_error",
            ),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
