//! Application state and the submit state machine.
//!
//! The controller owns a single [`UploadState`] and mutates it only through
//! `&mut self`. A submission is split into [`AppController::begin_submit`],
//! the asynchronous work in [`SubmissionTicket::run`], and
//! [`AppController::complete`]. Each ticket carries a request id; only the
//! most recently issued ticket may update the state, so a slow response to
//! a superseded submission can never overwrite a newer one.

use crate::error::RecipeError;
use crate::image::SelectedImage;
use crate::model::Recipe;
use crate::providers::RecipeGenerator;
use log::{debug, error, info, warn};
use std::path::PathBuf;

pub const NO_IMAGE_MESSAGE: &str = "Please upload an image first.";
pub const EMPTY_RESULT_MESSAGE: &str =
    "Could not generate any recipes. Try a different image or simpler restrictions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Everything the views render from
#[derive(Debug, Clone, Default)]
pub struct UploadState {
    pub image: Option<SelectedImage>,
    pub preview: Option<String>,
    pub dietary_restrictions: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub recipes: Vec<Recipe>,
    pub phase: Phase,
}

impl UploadState {
    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.is_loading
    }
}

/// A submission that has started and awaits its result
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub id: u64,
    pub image: SelectedImage,
    pub dietary_restrictions: String,
}

impl SubmissionTicket {
    /// Encode the image and ask the generator for recipes
    pub async fn run(&self, generator: &dyn RecipeGenerator) -> Result<Vec<Recipe>, RecipeError> {
        let payload = self.image.encode().await?;
        debug!(
            "Submitting request {} to {}",
            self.id,
            generator.provider_name()
        );
        generator
            .generate_recipes(&payload, &self.dietary_restrictions)
            .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The result was applied and the state moved to this phase
    Applied(Phase),
    /// A newer submission was started; the result was dropped
    Stale,
}

#[derive(Debug, Default)]
pub struct AppController {
    state: UploadState,
    latest_request: u64,
}

impl AppController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Select a new image. Clears any shown results or error but leaves an
    /// in-flight request running.
    pub fn select_image(&mut self, path: impl Into<PathBuf>) -> Result<(), RecipeError> {
        let image = SelectedImage::new(path)?;
        info!("Selected image {} ({})", image.path.display(), image.mime_type);

        self.state.preview = Some(image.preview());
        self.state.image = Some(image);
        self.state.recipes.clear();
        self.state.error = None;
        if self.state.phase != Phase::Submitting {
            self.state.phase = Phase::Idle;
        }
        Ok(())
    }

    pub fn set_dietary_restrictions(&mut self, restrictions: impl Into<String>) {
        self.state.dietary_restrictions = restrictions.into();
    }

    /// Start a submission.
    ///
    /// Returns `None` and sets the validation message when no image has been
    /// selected; nothing is sent in that case.
    pub fn begin_submit(&mut self) -> Option<SubmissionTicket> {
        let image = match &self.state.image {
            Some(image) => image.clone(),
            None => {
                self.state.error = Some(NO_IMAGE_MESSAGE.to_string());
                return None;
            }
        };

        self.latest_request += 1;
        self.state.is_loading = true;
        self.state.error = None;
        self.state.recipes.clear();
        self.state.phase = Phase::Submitting;

        Some(SubmissionTicket {
            id: self.latest_request,
            image,
            dietary_restrictions: self.state.dietary_restrictions.clone(),
        })
    }

    /// Apply the result of a submission
    pub fn complete(
        &mut self,
        request_id: u64,
        result: Result<Vec<Recipe>, RecipeError>,
    ) -> CompletionOutcome {
        if request_id != self.latest_request {
            warn!(
                "Discarding result of request {} superseded by request {}",
                request_id, self.latest_request
            );
            return CompletionOutcome::Stale;
        }

        self.state.is_loading = false;
        match result {
            Ok(recipes) if recipes.is_empty() => {
                self.state.error = Some(EMPTY_RESULT_MESSAGE.to_string());
                self.state.phase = Phase::Failed;
            }
            Ok(recipes) => {
                self.state.recipes = recipes;
                self.state.phase = Phase::Succeeded;
            }
            Err(e) => {
                error!("Request {} failed: {}", request_id, e);
                self.state.error = Some(format!("Error: {}", e));
                self.state.phase = Phase::Failed;
            }
        }

        CompletionOutcome::Applied(self.state.phase)
    }

    /// Run a whole submission against `generator` and return the final phase
    pub async fn submit(&mut self, generator: &dyn RecipeGenerator) -> Phase {
        let ticket = match self.begin_submit() {
            Some(ticket) => ticket,
            None => return self.state.phase,
        };

        let result = ticket.run(generator).await;
        self.complete(ticket.id, result);
        self.state.phase
    }
}
