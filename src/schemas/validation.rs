use crate::{error::PlannerError, schemas::SchemaHandle};
use jsonschema::{Draft, JSONSchema};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

const MAX_SCHEMA_ERRORS: usize = 3;
const STRUCTURED_RESPONSE_TOOL_NAME: &str = "structured_response";

/// Arguments for the structured_response tool
#[derive(Deserialize)]
pub(crate) struct StructuredResponseArguments {
    pub structured: Value,
}

/// Validate a structured payload against a schema
pub(crate) fn validate_structured_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> std::result::Result<(), PlannerError> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            PlannerError::Config(format!(
                "Failed to prepare `{}` schema for validation: {}",
                schema.schema_name(),
                err
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        debug!(
            target: "trip_planner::schema",
            schema = schema.schema_name(),
            error = %detail_str,
            payload = %payload
        );

        return Err(PlannerError::SchemaViolation(format!(
            "payload does not match `{}` schema: {}",
            schema.schema_name(),
            detail_str
        )));
    }

    Ok(())
}

/// The one tool offered to the model: it carries the payload schema verbatim.
pub(crate) fn structured_response_tool_definition(schema: &SchemaHandle) -> Value {
    let mut structured_param = serde_json::Map::new();
    structured_param.insert("type".to_string(), json!("object"));
    structured_param.insert(
        "description".to_string(),
        json!(format!(
            "The {} data structure. This must match the schema exactly.",
            schema.schema_name()
        )),
    );

    for key in ["properties", "required"] {
        if let Some(value) = schema.schema_json().get(key) {
            structured_param.insert(key.to_string(), value.clone());
        }
    }

    json!({
        "type": "function",
        "function": {
            "name": STRUCTURED_RESPONSE_TOOL_NAME,
            "description": format!(
                "Complete the task by providing a {} object with all required fields.",
                schema.schema_name()
            ),
            "parameters": {
                "type": "object",
                "properties": { "structured": structured_param },
                "required": ["structured"],
                "additionalProperties": false
            }
        }
    })
}

/// Forces the model to answer through `structured_response`.
pub(crate) fn structured_response_tool_choice() -> Value {
    json!({
        "type": "function",
        "function": { "name": STRUCTURED_RESPONSE_TOOL_NAME }
    })
}

/// Append the structured-response requirement to a system prompt, once.
pub(crate) fn inject_schema_instructions(system_prompt: &str, schema: &SchemaHandle) -> String {
    if system_prompt.contains("Structured response requirement:") {
        return system_prompt.to_string();
    }

    format!(
        "{}\n\nStructured response requirement: you MUST call the `{}` tool with a JSON payload that strictly conforms to the `{}` schema. This is the ONLY way to complete the task.",
        system_prompt,
        STRUCTURED_RESPONSE_TOOL_NAME,
        schema.schema_name()
    )
}

pub(crate) fn structured_response_tool_name() -> &'static str {
    STRUCTURED_RESPONSE_TOOL_NAME
}
