use std::any::{type_name, TypeId};

use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    schemas::{validation::validate_structured_payload, CompletionSchema, SchemaHandle},
};

/// Domain checks that a JSON schema cannot express (sign of money figures etc.).
pub trait PayloadCheck {
    fn check(&self) -> std::result::Result<(), String>;
}

/// Schema-validate, decode, then domain-check a raw oracle payload.
///
/// Any failure is a `SchemaViolation`: the payload is quarantined, never
/// partially applied.
pub fn decode_payload<T>(payload: &Value) -> Result<T>
where
    T: CompletionSchema + PayloadCheck,
{
    let schema = T::schema();
    validate_structured_payload(schema, payload)?;
    let value: T = deserialize_structured_response(payload, schema)?;
    value.check().map_err(|reason| {
        PlannerError::SchemaViolation(format!("`{}` {}", schema.schema_name(), reason))
    })?;
    Ok(value)
}

pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: CompletionSchema,
{
    ensure_schema_matches::<T>(schema)?;

    let raw = payload.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::SchemaViolation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })?;

    Ok(value)
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    let expected = TypeId::of::<T>();
    if schema.type_id() != expected {
        return Err(PlannerError::Config(format!(
            "schema `{}` does not match target type `{}`",
            schema.schema_name(),
            type_name::<T>(),
        )));
    }
    Ok(())
}
