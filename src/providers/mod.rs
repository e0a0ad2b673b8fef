mod google;
mod prompt;

pub use google::GeminiProvider;
pub use prompt::{inject_restrictions, recipe_schema, MAX_RECIPES, RECIPE_PROMPT};

use crate::error::RecipeError;
use crate::image::ImagePayload;
use crate::model::Recipe;
use async_trait::async_trait;

/// A service that turns an ingredient photo into recipe suggestions
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Get the provider name (e.g., "gemini")
    fn provider_name(&self) -> &str;

    /// Generate recipes from an encoded image in a single attempt.
    ///
    /// An empty list means the model found no usable ingredients and is not
    /// an error. Every failure is reported as [`RecipeError::Generation`] or
    /// [`RecipeError::Unknown`].
    async fn generate_recipes(
        &self,
        image: &ImagePayload,
        dietary_restrictions: &str,
    ) -> Result<Vec<Recipe>, RecipeError>;
}
