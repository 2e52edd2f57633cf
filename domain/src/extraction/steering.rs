//! Request-side steering toward schema-bound output.

use crate::schema::Schema;

/// Name of the single tool declared to tool-calling providers.
pub const STRUCTURED_OUTPUT_TOOL: &str = "structured_output";

/// Description attached to the `structured_output` tool declaration.
pub fn tool_description(schema: &Schema) -> String {
    format!(
        "Parses the output according to the provided schema: {}",
        schema.name()
    )
}

/// System prompt for providers steered by instruction instead of tools.
///
/// Embeds the rendered JSON Schema verbatim.
pub fn json_only_system_prompt(schema: &Schema) -> String {
    format!(
        "You are a helpful assistant that always responds in JSON format. \
Please provide a response that strictly adheres to the following JSON schema. \
Do not include any explanatory text or markdown formatting before or after the JSON object. \
The entire response must be a single valid JSON object.\n\
JSON Schema:\n{}",
        schema.to_json_schema()
    )
}
