use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning an ingredient photo into recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The selected image could not be read from disk
    #[error("Failed to read image {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The selected file does not claim an image type
    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),

    /// The remote service call failed or returned something unusable
    #[error("Failed to generate recipes: {0}")]
    Generation(String),

    /// A failure that carried no usable description
    #[error("An unknown error occurred while generating recipes.")]
    Unknown,

    /// No API key was configured
    #[error("API key is not set. Provide CULINARY_VISION__API_KEY, GEMINI_API_KEY or API_KEY")]
    MissingApiKey,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RecipeError {
    /// Wrap a boundary failure message, falling back to [`RecipeError::Unknown`]
    /// when there is nothing to report.
    pub fn generation(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            RecipeError::Unknown
        } else {
            RecipeError::Generation(message)
        }
    }
}
