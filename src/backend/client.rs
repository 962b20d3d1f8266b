//! HTTP client for the backend service.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use super::Backend;
use super::error::{BackendError, Result};
use super::types::{
    CoachReply, CoachRequest, FoodAnalysis, FoodScannerResponse, ImageUpload, MealPlan,
    MealPlannerResponse, WorkoutDay, WorkoutPlannerResponse,
};
use crate::config::BackendConfig;
use crate::profile::Profile;

/// `reqwest` implementation of [`Backend`].
///
/// # Example
///
/// ```rust,no_run
/// use vitaflex_shell::backend::{Backend, HttpBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:8000/api/v1", "http://localhost:8000/")?;
/// if backend.is_online().await {
///     let reply = backend.coach("How much protein do I need?").await?;
///     println!("{reply}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    health_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a client with default transport settings.
    pub fn new(base_url: impl AsRef<str>, health_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, health_url, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        health_url: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let health_url = Url::parse(health_url.as_ref())?;
        Ok(Self {
            base_url,
            health_url,
            http,
        })
    }

    /// Build a client from the `backend` config section.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        Self::with_client(&config.base_url, &config.health_url, http)
    }

    /// Base URL the feature endpoints hang off.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn handle_response<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                name: "backend.status",
                endpoint = endpoint,
                status = status.as_u16(),
                "Backend returned error status"
            );
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(
                name: "backend.decode",
                endpoint = endpoint,
                error = %e,
                "Backend response did not match schema"
            );
            BackendError::MalformedResponse(e.to_string())
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(name: "backend.request", endpoint = path, url = %url, "POST json");
        let response = self.http.post(url).json(body).send().await?;
        Self::handle_response(path, response).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn is_online(&self) -> bool {
        match self.http.get(self.health_url.clone()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(
                    name: "backend.offline",
                    url = %self.health_url,
                    error = %e,
                    "Liveness probe failed"
                );
                false
            }
        }
    }

    async fn coach(&self, message: &str) -> Result<String> {
        let request = CoachRequest {
            message: message.to_string(),
        };
        let reply: CoachReply = self.post_json("coach", &request).await?;
        Ok(reply.response)
    }

    async fn scan_food(&self, upload: ImageUpload) -> Result<FoodAnalysis> {
        let url = self.endpoint("food-scanner")?;
        tracing::debug!(
            name: "backend.request",
            endpoint = "food-scanner",
            url = %url,
            file_name = %upload.file_name,
            content_type = %upload.content_type,
            size = upload.bytes.len(),
            "POST multipart"
        );

        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(|e| {
                BackendError::InvalidRequest(format!(
                    "content type {:?} rejected: {e}",
                    upload.content_type
                ))
            })?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self.http.post(url).multipart(form).send().await?;
        let envelope: FoodScannerResponse =
            Self::handle_response("food-scanner", response).await?;
        envelope.into_result()
    }

    async fn plan_meals(&self, profile: &Profile) -> Result<MealPlan> {
        let envelope: MealPlannerResponse = self.post_json("meal-planner", profile).await?;
        envelope.into_result()
    }

    async fn plan_workout(&self, profile: &Profile) -> Result<Vec<WorkoutDay>> {
        let envelope: WorkoutPlannerResponse = self.post_json("workout-planner", profile).await?;
        envelope.into_result()
    }
}
