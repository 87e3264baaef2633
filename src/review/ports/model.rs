//! Port for the text-completion model service.
//!
//! One interface serves both output modes. Callers describe the mode in a
//! [`CompletionRequest`]: either free text, or structured output that must
//! conform to a declared [`OutputShape`].

use async_trait::async_trait;
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;

/// Result type for model service operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Structured output shapes the workflow asks the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputShape {
    /// A [`crate::review::domain::ReviewData`] document.
    ReviewData,
    /// A [`crate::review::domain::NextTask`] document.
    NextTask,
}

impl OutputShape {
    /// Returns the schema name sent to the model.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReviewData => "review_data",
            Self::NextTask => "next_task",
        }
    }

    /// Returns the JSON schema the model output must satisfy.
    #[must_use]
    pub fn json_schema(self) -> Value {
        match self {
            Self::ReviewData => json!({
                "type": "object",
                "properties": {
                    "task_id": { "type": "string" },
                    "score": { "type": "integer", "minimum": 0, "maximum": 10 },
                    "done_well": { "type": "array", "items": { "type": "string" } },
                    "missing": { "type": "array", "items": { "type": "string" } },
                    "submission_summary": { "type": "string" }
                },
                "required": ["task_id", "score", "done_well", "missing", "submission_summary"],
                "additionalProperties": false
            }),
            Self::NextTask => json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "objectives": { "type": "array", "items": { "type": "string" } },
                    "deliverables": { "type": "string" }
                },
                "required": ["title", "objectives", "deliverables"],
                "additionalProperties": false
            }),
        }
    }
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionRequest {
    /// Output must be a JSON document matching `shape`.
    Structured {
        /// Rendered prompt.
        prompt: String,
        /// Declared output shape.
        shape: OutputShape,
    },
    /// Output is returned verbatim.
    Text {
        /// Rendered prompt.
        prompt: String,
    },
}

impl CompletionRequest {
    /// Creates a structured-output request.
    #[must_use]
    pub fn structured(prompt: impl Into<String>, shape: OutputShape) -> Self {
        Self::Structured {
            prompt: prompt.into(),
            shape,
        }
    }

    /// Creates a free-text request.
    #[must_use]
    pub fn text(prompt: impl Into<String>) -> Self {
        Self::Text {
            prompt: prompt.into(),
        }
    }

    /// Returns the rendered prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            Self::Structured { prompt, .. } | Self::Text { prompt } => prompt,
        }
    }

    /// Returns the declared shape for structured requests.
    #[must_use]
    pub const fn shape(&self) -> Option<OutputShape> {
        match self {
            Self::Structured { shape, .. } => Some(*shape),
            Self::Text { .. } => None,
        }
    }
}

/// Output of a completion, matching the request mode.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutput {
    /// Parsed JSON document for a structured request.
    Structured(Value),
    /// Verbatim text for a free-text request.
    Text(String),
}

impl CompletionOutput {
    /// Returns the JSON document of a structured completion.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] when the model answered in text mode.
    pub fn into_structured(self, shape: OutputShape) -> ModelResult<Value> {
        match self {
            Self::Structured(value) => Ok(value),
            Self::Text(_) => Err(ModelError::Parse {
                shape,
                reason: "model returned free text for a structured request".to_owned(),
            }),
        }
    }

    /// Returns the text of a free-text completion.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Invocation`] when the model answered with a
    /// structured document.
    pub fn into_text(self) -> ModelResult<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Structured(_) => Err(ModelError::Invocation(
                "model returned a structured document for a text request".to_owned(),
            )),
        }
    }
}

/// Failures of the model service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The model could not be invoked or returned an error.
    #[error("model invocation failed: {0}")]
    Invocation(String),

    /// The model output could not be coerced into the declared shape.
    #[error("model output does not match {shape}: {reason}")]
    Parse {
        /// Declared shape.
        shape: OutputShape,
        /// Coercion failure description.
        reason: String,
    },
}

impl ModelError {
    /// Builds a parse error for `shape`.
    pub fn parse(shape: OutputShape, reason: impl fmt::Display) -> Self {
        Self::Parse {
            shape,
            reason: reason.to_string(),
        }
    }
}

/// Text-completion model contract.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Completes a prompt in the requested output mode.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Invocation`] when the call fails and
    /// [`ModelError::Parse`] when structured output is not valid JSON.
    async fn complete(&self, request: &CompletionRequest) -> ModelResult<CompletionOutput>;
}
