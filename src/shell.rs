//! Client Shell operations and view dispatch.
//!
//! Each operation performs exactly one backend call and returns an explicit
//! `Result`; the renderer picks a display branch from it. Nothing here
//! panics or retries.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::backend::{Backend, BackendError, FoodAnalysis, ImageUpload, MealPlan, WorkoutDay};
use crate::profile::{Profile, ProfileError};
use crate::session::{ChatRole, Session};

/// File extensions the food scanner accepts.
pub const ACCEPTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// The five pages of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Coach,
    FoodScanner,
    MealPlanner,
    WorkoutPlanner,
}

impl View {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Coach,
        Self::FoodScanner,
        Self::MealPlanner,
        Self::WorkoutPlanner,
    ];

    /// URL path of the view.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Coach => "/coach",
            Self::FoodScanner => "/food-scanner",
            Self::MealPlanner => "/meal-planner",
            Self::WorkoutPlanner => "/workout-planner",
        }
    }

    /// Navigation label.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Coach => "AI Coach",
            Self::FoodScanner => "Food Scanner",
            Self::MealPlanner => "Meal Planner",
            Self::WorkoutPlanner => "Workout Planner",
        }
    }

    /// Resolve a single path segment (without the leading slash).
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim_matches('/');
        Self::ALL
            .into_iter()
            .find(|view| view.path().trim_start_matches('/') == slug)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Upload rejected before it reached the backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("No image was uploaded.")]
    Missing,

    #[error("'{0}' is not a supported image. Please upload a JPG or PNG file.")]
    UnsupportedType(String),

    #[error("Could not read the upload: {0}")]
    Multipart(String),
}

/// Anything that can go wrong with a single user action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Check an uploaded file and settle its content type.
///
/// Only JPG and PNG are accepted, judged by extension. A supplied content
/// type is kept only when it parses as an `image/*` MIME type; otherwise the
/// one guessed from the file name is used. Parameters are dropped.
pub fn validate_upload(
    file_name: &str,
    content_type: Option<&str>,
    bytes: Vec<u8>,
) -> Result<ImageUpload, UploadError> {
    if file_name.is_empty() && bytes.is_empty() {
        return Err(UploadError::Missing);
    }

    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ACCEPTED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedType(file_name.to_string()));
    }
    if bytes.is_empty() {
        return Err(UploadError::Missing);
    }

    let supplied = content_type
        .and_then(|ct| ct.trim().parse::<mime_guess::Mime>().ok())
        .filter(|mime| mime.type_().as_str() == "image");
    let content_type = supplied
        .unwrap_or_else(|| mime_guess::from_path(file_name).first_or_octet_stream())
        .essence_str()
        .to_string();

    Ok(ImageUpload {
        file_name: file_name.to_string(),
        content_type,
        bytes,
    })
}

/// The shell's operations, bound to a backend.
#[derive(Debug, Clone)]
pub struct ClientShell {
    backend: Arc<dyn Backend>,
}

impl ClientShell {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Best-effort liveness check for the status banner.
    pub async fn check_backend_online(&self) -> bool {
        let online = self.backend.is_online().await;
        tracing::debug!(name: "shell.backend_status", online, "Backend status checked");
        online
    }

    /// Send one chat message on behalf of `session`.
    ///
    /// The user message is recorded first; the reply is recorded only on
    /// success. No earlier history is sent.
    pub async fn send_chat_message(
        &self,
        session: &Session,
        text: &str,
    ) -> Result<String, BackendError> {
        session.push(ChatRole::User, text);

        match self.backend.coach(text).await {
            Ok(reply) => {
                session.push(ChatRole::Assistant, reply.clone());
                tracing::info!(
                    name: "shell.coach.reply",
                    session_id = %session.id(),
                    message_count = session.message_count(),
                    "Coach replied"
                );
                Ok(reply)
            }
            Err(e) => {
                tracing::warn!(
                    name: "shell.coach.failed",
                    session_id = %session.id(),
                    error = %e,
                    "Coach request failed"
                );
                Err(e)
            }
        }
    }

    pub async fn analyze_food_image(
        &self,
        upload: ImageUpload,
    ) -> Result<FoodAnalysis, BackendError> {
        let file_name = upload.file_name.clone();
        let result = self.backend.scan_food(upload).await;
        log_outcome("food-scanner", &result);
        if let Ok(analysis) = &result {
            tracing::info!(
                name: "shell.food.analyzed",
                file_name = %file_name,
                items = analysis.food_items.len(),
                "Food image analyzed"
            );
        }
        result
    }

    pub async fn generate_meal_plan(&self, profile: &Profile) -> Result<MealPlan, BackendError> {
        let result = self.backend.plan_meals(profile).await;
        log_outcome("meal-planner", &result);
        result
    }

    pub async fn generate_workout_plan(
        &self,
        profile: &Profile,
    ) -> Result<Vec<WorkoutDay>, BackendError> {
        let result = self.backend.plan_workout(profile).await;
        log_outcome("workout-planner", &result);
        result
    }
}

fn log_outcome<T>(feature: &str, result: &Result<T, BackendError>) {
    if let Err(e) = result {
        tracing::warn!(
            name: "shell.action.failed",
            feature = feature,
            kind = ?e.kind(),
            error = %e,
            "Backend action failed"
        );
    }
}
