use super::prompt::{inject_restrictions, recipe_schema};
use super::RecipeGenerator;
use crate::config::Settings;
use crate::error::RecipeError;
use crate::image::ImagePayload;
use crate::model::Recipe;
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;

/// Recipe generation backed by the Gemini `generateContent` endpoint
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: Option<f32>,
}

impl GeminiProvider {
    /// Create a new Gemini provider from validated settings
    pub fn new(settings: &Settings) -> Result<Self, RecipeError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RecipeError::Builder(format!("Failed to create HTTP client: {}", e)))?;

        Ok(GeminiProvider {
            client,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
            temperature: settings.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body(&self, image: &ImagePayload, dietary_restrictions: &str) -> Value {
        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": recipe_schema()
        });
        if let Some(temperature) = self.temperature {
            generation_config["temperature"] = json!(temperature);
        }

        json!({
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": image.mime_type,
                            "data": image.data
                        }
                    },
                    {
                        "text": inject_restrictions(dietary_restrictions)
                    }
                ]
            }],
            "generationConfig": generation_config
        })
    }

    /// Send the request and return the raw response text.
    ///
    /// Errors are plain messages; the caller wraps them at the boundary.
    async fn fetch_text(
        &self,
        image: &ImagePayload,
        dietary_restrictions: &str,
    ) -> Result<String, String> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(image, dietary_restrictions))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;
        debug!(
            "Gemini responded with {} in {}ms: {}",
            status,
            start.elapsed().as_millis(),
            body
        );

        let response_body: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(format!("Gemini API error ({}): {}", status, body.trim()));
            }
            Err(e) => return Err(format!("Invalid response from Gemini: {}", e)),
        };

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_code = error["code"].as_i64().unwrap_or(i64::from(status.as_u16()));
            let error_message = error["message"].as_str().unwrap_or("Unknown error");
            return Err(format!(
                "Gemini API error ({}): {}",
                error_code, error_message
            ));
        }

        if !status.is_success() {
            return Err(format!("Gemini API error ({})", status));
        }

        extract_response_text(&response_body)
    }
}

/// Concatenate the text parts of the first candidate
pub(crate) fn extract_response_text(response_body: &Value) -> Result<String, String> {
    let candidate = match response_body["candidates"].get(0) {
        Some(candidate) => candidate,
        None => {
            return Err(match response_body["promptFeedback"]["blockReason"].as_str() {
                Some(reason) => format!("Request was blocked by Gemini: {}", reason),
                None => "Gemini response contained no candidates".to_string(),
            });
        }
    };

    let texts: Vec<&str> = candidate["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if texts.is_empty() {
        let reason = candidate["finishReason"].as_str().unwrap_or("unknown");
        return Err(format!(
            "Gemini response contained no text (finish reason: {})",
            reason
        ));
    }

    Ok(texts.concat())
}

#[async_trait]
impl RecipeGenerator for GeminiProvider {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn generate_recipes(
        &self,
        image: &ImagePayload,
        dietary_restrictions: &str,
    ) -> Result<Vec<Recipe>, RecipeError> {
        let text = self
            .fetch_text(image, dietary_restrictions)
            .await
            .map_err(|message| {
                error!("Error generating recipes: {}", message);
                RecipeError::generation(message)
            })?;

        let recipes = Recipe::parse_list(&text).map_err(|message| {
            error!("Error generating recipes: {}", message);
            RecipeError::generation(message)
        })?;

        info!(
            "Generated {} recipe(s) with {}",
            recipes.len(),
            self.model
        );
        Ok(recipes)
    }
}
