//! Typed helpers over the model service's two output modes.

use crate::review::ports::{CompletionRequest, ModelError, ModelResult, ModelService, OutputShape};
use serde::de::DeserializeOwned;

/// Requests structured output and coerces it into `T`.
///
/// # Errors
///
/// Returns [`ModelError::Parse`] when the document does not deserialize
/// into `T` (including out-of-range values), and propagates model failures.
pub async fn complete_structured<M, T>(
    model: &M,
    prompt: String,
    shape: OutputShape,
) -> ModelResult<T>
where
    M: ModelService + ?Sized,
    T: DeserializeOwned,
{
    let output = model
        .complete(&CompletionRequest::structured(prompt, shape))
        .await?;
    let document = output.into_structured(shape)?;
    serde_json::from_value(document).map_err(|err| ModelError::parse(shape, err))
}

/// Requests free-text output.
///
/// # Errors
///
/// Propagates model failures.
pub async fn complete_text<M>(model: &M, prompt: String) -> ModelResult<String>
where
    M: ModelService + ?Sized,
{
    model
        .complete(&CompletionRequest::text(prompt))
        .await?
        .into_text()
}
