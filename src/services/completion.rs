use serde_json::Value;
use tracing::debug;

use crate::{
    error::{PlannerError, Result},
    schemas::validation::{structured_response_tool_name, StructuredResponseArguments},
};

/// Pull the structured payload out of a chat-completion response.
///
/// The forced `structured_response` tool call wins. A plain JSON reply (fenced
/// or not) in `content` is accepted as a fallback.
pub(crate) fn extract_structured_payload(response: &Value) -> Result<Value> {
    let message = response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| {
            PlannerError::MalformedResponse("response has no choices[0].message".to_string())
        })?;

    if let Some(tool_calls) = message.get("tool_calls").and_then(Value::as_array) {
        if let Some(tool_call) = tool_calls
            .iter()
            .find(|call| extract_function_name(call) == Some(structured_response_tool_name()))
        {
            return payload_from_tool_call(tool_call);
        }

        if !tool_calls.is_empty() {
            let names: Vec<&str> = tool_calls.iter().filter_map(extract_function_name).collect();
            return Err(PlannerError::MalformedResponse(format!(
                "model called unexpected tool(s): {}",
                names.join(", ")
            )));
        }
    }

    match message.get("content").and_then(Value::as_str) {
        Some(content) if !content.trim().is_empty() => {
            debug!(
                target: "trip_planner::oracle",
                "no tool call in response, decoding message content"
            );
            parse_content_payload(content)
        }
        _ => Err(PlannerError::MalformedResponse(
            "response carried neither a tool call nor content".to_string(),
        )),
    }
}

fn extract_function_name(tool_call: &Value) -> Option<&str> {
    tool_call
        .get("function")
        .and_then(|function| function.get("name"))
        .and_then(Value::as_str)
}

fn extract_arguments_str(tool_call: &Value) -> &str {
    tool_call
        .get("function")
        .and_then(|function| function.get("arguments"))
        .and_then(Value::as_str)
        .unwrap_or("")
}

fn payload_from_tool_call(tool_call: &Value) -> Result<Value> {
    let arguments: Value = serde_json::from_str(extract_arguments_str(tool_call)).map_err(|err| {
        PlannerError::MalformedResponse(format!(
            "Failed to parse arguments for tool '{}': {}",
            structured_response_tool_name(),
            err
        ))
    })?;

    // Some models skip the `structured` wrapper and send the payload directly.
    if arguments.get("structured").is_none() {
        return Ok(arguments);
    }

    let arguments: StructuredResponseArguments = serde_json::from_value(arguments)?;
    Ok(arguments.structured)
}

fn parse_content_payload(content: &str) -> Result<Value> {
    serde_json::from_str(strip_code_fence(content)).map_err(|err| {
        PlannerError::MalformedResponse(format!("message content is not JSON: {err}"))
    })
}

/// Remove a surrounding markdown code fence (```json ... ```), if any.
pub(crate) fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
