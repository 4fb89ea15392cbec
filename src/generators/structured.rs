// Schema-constrained generation
//
// The backend is asked for a bare JSON object. Models still sometimes
// wrap output in markdown fences or surround it with prose, so parsing
// strips fences and falls back to the outermost object slice. A payload
// that cannot be parsed into the target type is a fatal
// schema-validation failure; the stages never proceed on a degenerate
// value.

use serde::de::DeserializeOwned;

use crate::claude::Message;
use crate::error::PipelineError;

use super::Generator;

/// Issue one structured-output request and parse the reply into `T`.
pub async fn generate_structured<T: DeserializeOwned>(
    generator: &dyn Generator,
    stage: &'static str,
    system: &str,
    prompt: String,
) -> Result<T, PipelineError> {
    let response = generator
        .generate(Some(system), vec![Message::user(prompt)], None)
        .await
        .map_err(|source| PipelineError::Backend { stage, source })?;

    parse_structured(stage, &response.text)
}

/// Parse backend text into `T`, tolerating markdown fences and
/// surrounding prose.
pub fn parse_structured<T: DeserializeOwned>(
    stage: &'static str,
    text: &str,
) -> Result<T, PipelineError> {
    let stripped = strip_markdown_fences(text.trim());

    if stripped.is_empty() {
        return Err(PipelineError::SchemaValidation {
            stage,
            detail: "backend returned an empty response".to_string(),
        });
    }

    // Try direct parse first
    let direct_err = match serde_json::from_str::<T>(stripped) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    // Fall back to the outermost JSON object within the text
    if let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<T>(&stripped[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(PipelineError::SchemaValidation {
        stage,
        detail: direct_err.to_string(),
    })
}

/// Strip leading/trailing markdown code fences (```json ... ``` or ``` ... ```)
fn strip_markdown_fences(s: &str) -> &str {
    let s = s.trim();
    let s = if let Some(rest) = s.strip_prefix("```json") {
        rest
    } else if let Some(rest) = s.strip_prefix("```") {
        rest
    } else {
        s
    };
    if let Some(rest) = s.strip_suffix("```") {
        rest.trim()
    } else {
        s.trim()
    }
}
