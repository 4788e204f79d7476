use thiserror::Error;

/// Severity of a non-fatal finding surfaced alongside a stage's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// A single accumulated validation finding. Unlike an error, this does not
/// unwind anything on its own — callers decide what to do with the list.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Accumulates validation findings across an entire document instead of
/// short-circuiting on the first problem. `is_valid()` is the single gate a
/// caller checks before treating a document as usable.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::error(field, message));
    }

    pub fn push_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::warning(field, message));
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.issues.extend(other.issues);
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// Error surface for a single pipeline stage, matching the error kinds named
/// in the component design: validation, schema, contract, distribution and
/// integrity failures all carry enough context for the orchestrator to
/// report "re-run stage N" without guessing.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("validation failed in stage {stage}: {detail}")]
    Validation { stage: &'static str, detail: String },

    #[error("could not parse persisted document for stage {stage}: {source}")]
    Schema {
        stage: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("contract violation between stages: {detail}")]
    Contract { detail: String },

    #[error("distribution validation failed: {detail}")]
    Distribution { detail: String },

    #[error("integrity check failed in stage {stage}: {detail}")]
    Integrity { stage: &'static str, detail: String },

    #[error("io error in stage {stage}: {source}")]
    Io {
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// A stage-error annotated with the stage that produced it, returned from
/// the orchestrator to callers that need to know exactly where a run
/// stopped.
#[derive(Debug, Error)]
#[error("pipeline stopped at stage '{stage}': {source}")]
pub struct PipelineError {
    pub stage: &'static str,
    #[source]
    pub source: StageError,
}

pub type StageResult<T> = Result<T, StageError>;
pub type PipelineResult<T> = Result<T, PipelineError>;
