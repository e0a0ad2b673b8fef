use serde_json::{json, Value};

/// The instruction sent alongside the ingredient photo.
///
/// Loaded from `prompt.txt` at compile time. Contains a `{{RESTRICTIONS}}`
/// placeholder that [`inject_restrictions`] fills in.
pub const RECIPE_PROMPT: &str = include_str!("prompt.txt");

/// Upper bound on suggestions requested from the model
pub const MAX_RECIPES: usize = 3;

/// Fill the dietary restrictions into the prompt, using "None" when blank
pub fn inject_restrictions(dietary_restrictions: &str) -> String {
    let restrictions = dietary_restrictions.trim();
    let restrictions = if restrictions.is_empty() {
        "None"
    } else {
        restrictions
    };
    RECIPE_PROMPT.replace("{{RESTRICTIONS}}", restrictions)
}

/// Response schema the service is asked to conform to.
///
/// Uses the OpenAPI subset understood by `generationConfig.responseSchema`.
pub fn recipe_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "The name of the recipe."
                },
                "prepTime": {
                    "type": "STRING",
                    "description": "Estimated preparation time, e.g., '30 minutes'."
                },
                "ingredients": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "List of all necessary ingredients with quantities."
                },
                "instructions": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Step-by-step cooking instructions."
                }
            },
            "required": ["name", "prepTime", "ingredients", "instructions"]
        }
    })
}
