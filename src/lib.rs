//! Turn a photo of food ingredients into recipe ideas.
//!
//! The library is split into an image encoder ([`image`]), a recipe
//! generation client ([`providers`]), an application state controller
//! ([`controller`]) and text views ([`views`]). [`RecipeRequest`] wraps the
//! encoder and client for callers that only want the recipes.

pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod image;
pub mod model;
pub mod providers;
pub mod views;

use std::path::Path;

pub use builder::{ImageInput, RecipeRequest, RecipeRequestBuilder};
pub use config::{AppConfig, Settings};
pub use controller::{AppController, CompletionOutcome, Phase, SubmissionTicket, UploadState};
pub use error::RecipeError;
pub use image::{ImagePayload, SelectedImage};
pub use model::Recipe;
pub use providers::{GeminiProvider, RecipeGenerator};

/// Generate recipes from an image file with configuration taken from
/// `culinary-vision.toml` and the environment
pub async fn generate_recipes_from_image(
    path: impl AsRef<Path>,
    dietary_restrictions: &str,
) -> Result<Vec<Recipe>, RecipeError> {
    RecipeRequest::builder()
        .image(path.as_ref())
        .dietary_restrictions(dietary_restrictions)
        .build()
        .await
}
