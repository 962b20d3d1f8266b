//! Wire types exchanged with the backend.
//!
//! Response bodies are owned by the backend; these types only describe the
//! fields the shell displays. Display-only numbers ([`Scalar`]) accept either
//! JSON numbers or strings so that `"25g"` and `25` both render.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{BackendError, Result};

/// A display value that the backend may send as a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Coach
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for `POST /coach`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachRequest {
    pub message: String,
}

/// Response body of `POST /coach`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachReply {
    pub response: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Food scanner
// ─────────────────────────────────────────────────────────────────────────────

/// An image ready to be forwarded as multipart field `image`.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: Scalar,
    pub protein: Scalar,
    pub carbs: Scalar,
    pub fat: Scalar,
}

/// Analysis of a single food photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    pub nutrition: Nutrition,
    #[serde(default)]
    pub food_items: Vec<String>,
    #[serde(default)]
    pub health_benefits: Vec<String>,
    #[serde(default)]
    pub concerns: Option<Vec<String>>,
}

impl FoodAnalysis {
    /// Concerns, empty when the field was absent or null.
    #[must_use]
    pub fn concerns(&self) -> &[String] {
        self.concerns.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoodScannerResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub analysis: Option<FoodAnalysis>,
    #[serde(default)]
    pub error: Option<String>,
}

impl FoodScannerResponse {
    pub fn into_result(self) -> Result<FoodAnalysis> {
        unwrap_envelope(self.success, self.analysis, self.error, "analysis")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Meal planner
// ─────────────────────────────────────────────────────────────────────────────

/// The four fixed meal slots, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealSlot {
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Snack, Self::Dinner];

    /// JSON key of the slot in `meal_plan`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Snack => "Snack",
            Self::Dinner => "Dinner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub calories: Scalar,
    pub protein: Scalar,
    pub carbs: Scalar,
    pub fat: Scalar,
    #[serde(default)]
    pub preparation_steps: Vec<String>,
    #[serde(default)]
    pub rationale: String,
}

/// A complete daily plan. All four slots are required.
#[derive(Debug, Clone, PartialEq)]
pub struct MealPlan {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub snack: Meal,
    pub dinner: Meal,
}

impl MealPlan {
    /// Build a plan from the raw `meal_plan` object.
    ///
    /// A missing or malformed slot fails the whole plan.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            BackendError::MalformedResponse("meal_plan is not an object".to_string())
        })?;

        let slot = |slot: MealSlot| -> Result<Meal> {
            let raw = object.get(slot.key()).ok_or_else(|| {
                BackendError::MalformedResponse(format!(
                    "meal plan is missing the {} slot",
                    slot.key()
                ))
            })?;
            Meal::deserialize(raw).map_err(|e| {
                BackendError::MalformedResponse(format!("invalid {} slot: {e}", slot.key()))
            })
        };

        Ok(Self {
            breakfast: slot(MealSlot::Breakfast)?,
            lunch: slot(MealSlot::Lunch)?,
            snack: slot(MealSlot::Snack)?,
            dinner: slot(MealSlot::Dinner)?,
        })
    }

    #[must_use]
    pub fn meal(&self, slot: MealSlot) -> &Meal {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Snack => &self.snack,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Slots paired with their meals, in display order.
    pub fn slots(&self) -> impl Iterator<Item = (MealSlot, &Meal)> {
        MealSlot::ALL.into_iter().map(|slot| (slot, self.meal(slot)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealPlannerResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub meal_plan: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MealPlannerResponse {
    pub fn into_result(self) -> Result<MealPlan> {
        let raw = unwrap_envelope(self.success, self.meal_plan, self.error, "meal_plan")?;
        MealPlan::from_value(&raw)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Workout planner
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: Scalar,
    pub reps: Scalar,
    #[serde(default)]
    pub rest: Option<Scalar>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Warm-up, main or cool-down section of a day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub motto: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    pub day: Scalar,
    #[serde(default)]
    pub focus: String,
    pub warm_up: Block,
    pub main_routine: Block,
    pub cool_down: Block,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutPlannerResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub workout_plan: Option<Vec<WorkoutDay>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl WorkoutPlannerResponse {
    pub fn into_result(self) -> Result<Vec<WorkoutDay>> {
        unwrap_envelope(self.success, self.workout_plan, self.error, "workout_plan")
    }
}

/// Resolve a `{success, <payload>?, error?}` envelope.
fn unwrap_envelope<T>(
    success: bool,
    payload: Option<T>,
    error: Option<String>,
    field: &str,
) -> Result<T> {
    if !success {
        return Err(BackendError::Rejected { message: error });
    }
    payload.ok_or_else(|| BackendError::MalformedResponse(format!("missing `{field}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meal_json(name: &str) -> Value {
        json!({
            "name": name,
            "description": "d",
            "calories": 420,
            "protein": "30",
            "carbs": 40.5,
            "fat": 12,
            "preparation_steps": ["mix", "cook"],
            "rationale": "because"
        })
    }

    #[test]
    fn scalar_accepts_numbers_and_strings() {
        let values: Vec<Scalar> = serde_json::from_value(json!([3, 2.5, "8-12"])).unwrap();
        let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["3", "2.5", "8-12"]);
    }

    #[test]
    fn missing_concerns_is_empty() {
        let analysis: FoodAnalysis = serde_json::from_value(json!({
            "nutrition": {"calories": 500, "protein": 20, "carbs": 60, "fat": 15},
            "food_items": ["rice"],
            "health_benefits": ["energy"]
        }))
        .unwrap();
        assert!(analysis.concerns.is_none());
        assert!(analysis.concerns().is_empty());
    }

    #[test]
    fn rejected_envelope_keeps_message() {
        let resp: FoodScannerResponse =
            serde_json::from_value(json!({"success": false, "error": "x"})).unwrap();
        match resp.into_result() {
            Err(BackendError::Rejected { message }) => assert_eq!(message.as_deref(), Some("x")),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn success_without_payload_is_malformed() {
        let resp: WorkoutPlannerResponse =
            serde_json::from_value(json!({"success": true})).unwrap();
        assert!(matches!(
            resp.into_result(),
            Err(BackendError::MalformedResponse(_))
        ));
    }

    #[test]
    fn meal_plan_in_slot_order() {
        let raw = json!({
            "dinner": meal_json("Salmon"),
            "breakfast": meal_json("Oats"),
            "snack": meal_json("Apple"),
            "lunch": meal_json("Salad"),
        });
        let plan = MealPlan::from_value(&raw).unwrap();
        let names: Vec<&str> = plan.slots().map(|(_, m)| m.name.as_str()).collect();
        assert_eq!(names, ["Oats", "Salad", "Apple", "Salmon"]);
    }

    #[test]
    fn meal_plan_missing_slot_names_it() {
        let raw = json!({
            "breakfast": meal_json("Oats"),
            "lunch": meal_json("Salad"),
            "dinner": meal_json("Salmon"),
        });
        let err = MealPlan::from_value(&raw).unwrap_err();
        assert!(err.to_string().contains("snack"), "{err}");
    }
}
