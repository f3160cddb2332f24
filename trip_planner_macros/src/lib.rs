//! Procedural macros for `trip-planner`.
//!
//! `#[completion_schema]` turns a payload struct into a schema-carrying type
//! that the oracle can hand to the model and validate replies against.

mod completion_schema;
mod schema_extraction;

use proc_macro::TokenStream;

/// Implements `trip_planner::schema::CompletionSchema` for a named struct.
///
/// The generated schema is built once (lazily) from the struct's
/// `schemars::JsonSchema` impl, titled with the struct name (or `name = "..."`),
/// and described by the struct doc comment (or `description = "..."`).
/// Field doc comments fill in missing property descriptions.
#[proc_macro_attribute]
pub fn completion_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    completion_schema::expand(attr, item)
}
