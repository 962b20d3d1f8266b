//! Backend service boundary.
//!
//! All AI, nutrition and planning work happens in a remote service. This
//! module is the only place that talks to it.
//!
//! # Endpoints
//!
//! | Call | HTTP |
//! |---|---|
//! | [`Backend::is_online`] | `GET {health_url}` |
//! | [`Backend::coach`] | `POST {base}/coach` |
//! | [`Backend::scan_food`] | `POST {base}/food-scanner` (multipart) |
//! | [`Backend::plan_meals`] | `POST {base}/meal-planner` |
//! | [`Backend::plan_workout`] | `POST {base}/workout-planner` |

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::HttpBackend;
pub use error::{BackendError, ErrorKind, Result};
pub use types::{
    Block, CoachReply, CoachRequest, Exercise, FoodAnalysis, FoodScannerResponse, ImageUpload,
    Meal, MealPlan, MealPlannerResponse, MealSlot, Nutrition, Scalar, WorkoutDay,
    WorkoutPlannerResponse,
};

use crate::profile::Profile;

/// Operations the shell needs from the backend.
///
/// Every call is a single request with no retry.
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Liveness probe. Never fails; unreachable means `false`.
    async fn is_online(&self) -> bool;

    /// Send one chat message and return the assistant reply.
    async fn coach(&self, message: &str) -> Result<String>;

    /// Forward a food photo for nutritional analysis.
    async fn scan_food(&self, upload: ImageUpload) -> Result<FoodAnalysis>;

    /// Request a daily meal plan for the profile.
    async fn plan_meals(&self, profile: &Profile) -> Result<MealPlan>;

    /// Request a workout plan for the profile.
    async fn plan_workout(&self, profile: &Profile) -> Result<Vec<WorkoutDay>>;
}
