use std::path::PathBuf;
use std::time::Duration;

use crate::{
    config::{AppConfig, Settings},
    image::{ImagePayload, SelectedImage},
    providers::{GeminiProvider, RecipeGenerator},
    Recipe, RecipeError,
};

/// Represents where the ingredient photo comes from
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// Read the image from a file
    Path(PathBuf),
    /// Use a `data:<mime>;base64,...` URL
    DataUrl(String),
    /// Use raw bytes with a known MIME type
    Bytes { bytes: Vec<u8>, mime_type: String },
}

impl ImageInput {
    async fn into_payload(self) -> Result<ImagePayload, RecipeError> {
        match self {
            ImageInput::Path(path) => SelectedImage::new(path)?.encode().await,
            ImageInput::DataUrl(url) => ImagePayload::from_data_url(&url),
            ImageInput::Bytes { bytes, mime_type } => {
                Ok(ImagePayload::from_bytes(&bytes, mime_type))
            }
        }
    }
}

/// Builder for configuring and executing a recipe request
#[derive(Debug, Default)]
pub struct RecipeRequestBuilder {
    image: Option<ImageInput>,
    dietary_restrictions: String,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl RecipeRequestBuilder {
    /// Use an image file as the ingredient photo
    ///
    /// # Example
    /// ```
    /// use culinary_vision::RecipeRequest;
    ///
    /// let builder = RecipeRequest::builder()
    ///     .image("/path/to/fridge.jpg");
    /// ```
    pub fn image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(ImageInput::Path(path.into()));
        self
    }

    /// Use a base64 data URL as the ingredient photo
    ///
    /// # Example
    /// ```
    /// use culinary_vision::RecipeRequest;
    ///
    /// let builder = RecipeRequest::builder()
    ///     .data_url("data:image/png;base64,iVBORw0KGgo=");
    /// ```
    pub fn data_url(mut self, url: impl Into<String>) -> Self {
        self.image = Some(ImageInput::DataUrl(url.into()));
        self
    }

    /// Use raw image bytes as the ingredient photo
    pub fn bytes(mut self, bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        self.image = Some(ImageInput::Bytes {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        });
        self
    }

    /// Set free-text dietary restrictions, e.g. "vegan, nut-free"
    pub fn dietary_restrictions(mut self, restrictions: impl Into<String>) -> Self {
        self.dietary_restrictions = restrictions.into();
        self
    }

    /// Set the API key directly instead of relying on environment
    /// variables or config files
    ///
    /// # Example
    /// ```
    /// use culinary_vision::RecipeRequest;
    ///
    /// let builder = RecipeRequest::builder()
    ///     .image("/path/to/fridge.jpg")
    ///     .api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name, e.g. "gemini-2.5-pro"
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the request at a different endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for the HTTP request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Encode the image and request recipes
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - No image was specified
    /// - No API key is configured
    /// - The image cannot be read
    /// - The generation request fails
    ///
    /// # Example
    /// ```no_run
    /// # use culinary_vision::RecipeRequest;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipes = RecipeRequest::builder()
    ///     .image("fridge.jpg")
    ///     .dietary_restrictions("vegetarian")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Vec<Recipe>, RecipeError> {
        let image = self.image.ok_or_else(|| {
            RecipeError::Builder(
                "No image specified. Use .image(), .data_url() or .bytes()".to_string(),
            )
        })?;

        let mut config = if self.api_key.is_some() {
            AppConfig::default()
        } else {
            AppConfig::load(None)?
        };
        if let Some(api_key) = self.api_key {
            config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = Some(timeout.as_secs().max(1));
        }

        let settings = Settings::from_config(config)?;
        let payload = image.into_payload().await?;
        let provider = GeminiProvider::new(&settings)?;

        provider
            .generate_recipes(&payload, &self.dietary_restrictions)
            .await
    }
}

/// Main entry point for the builder API
pub struct RecipeRequest;

impl RecipeRequest {
    /// Creates a new builder for a recipe request
    ///
    /// # Example
    /// ```
    /// use culinary_vision::RecipeRequest;
    ///
    /// let builder = RecipeRequest::builder();
    /// ```
    pub fn builder() -> RecipeRequestBuilder {
        RecipeRequestBuilder::default()
    }
}
