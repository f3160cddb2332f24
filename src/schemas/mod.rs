//! JSON schemas for oracle payloads and the checks run against model replies.

pub mod schema;
pub(crate) mod validation;

pub use schema::{apply_doc_comments, schema_type_name, CompletionSchema, SchemaHandle};
