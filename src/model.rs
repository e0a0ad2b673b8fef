use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recipe suggestion as returned by the generation service.
///
/// Field names on the wire follow the response schema (`prepTime`),
/// so the struct is (de)serialized in camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    /// Free-form duration, e.g. "30 minutes"
    pub prep_time: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Parse the structured response text into recipes.
    ///
    /// Blank text means the model found nothing usable and yields an empty
    /// list. Anything else must be a JSON array whose every element matches
    /// the recipe shape; a single bad element fails the whole response.
    pub fn parse_list(text: &str) -> Result<Vec<Recipe>, String> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let value: Value =
            serde_json::from_str(text).map_err(|e| format!("response is not valid JSON: {}", e))?;

        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(format!(
                    "expected a JSON array of recipes, got {}",
                    json_kind(&other)
                ))
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    return Err(format!(
                        "recipe {} is not an object (got {})",
                        index,
                        json_kind(&item)
                    ));
                }
                serde_json::from_value::<Recipe>(item)
                    .map_err(|e| format!("recipe {} does not match the schema: {}", index, e))
            })
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
