//! In-process stand-in for the VitaFlex backend API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Canned reply for one endpoint.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn status(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

/// Replies served by the mock, one per endpoint.
#[derive(Debug, Clone)]
pub struct Replies {
    pub health: StatusCode,
    pub coach: Reply,
    pub food: Reply,
    pub meal: Reply,
    pub workout: Reply,
}

impl Default for Replies {
    fn default() -> Self {
        Self {
            health: StatusCode::OK,
            coach: Reply::ok(json!({ "response": "Drink water." })),
            food: Reply::ok(json!({
                "success": true,
                "analysis": {
                    "nutrition": { "calories": 250, "protein": 12, "carbs": 30, "fat": 9 },
                    "food_items": ["toast", "egg"],
                    "health_benefits": ["protein"],
                    "concerns": ["sodium"]
                }
            })),
            meal: Reply::ok(json!({ "success": true, "meal_plan": meal_plan() })),
            workout: Reply::ok(json!({ "success": true, "workout_plan": workout_plan() })),
        }
    }
}

pub fn meal(name: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "calories": 400,
        "protein": 25,
        "carbs": 45,
        "fat": 12,
        "preparation_steps": ["prepare", "serve"],
        "rationale": format!("{name} rationale")
    })
}

pub fn meal_plan() -> Value {
    json!({
        "breakfast": meal("Oats"),
        "lunch": meal("Chicken Bowl"),
        "snack": meal("Yogurt"),
        "dinner": meal("Salmon")
    })
}

pub fn workout_plan() -> Value {
    json!([{
        "day": 1,
        "focus": "Upper Body",
        "warm_up": { "motto": "Loosen up", "exercises": [
            { "name": "Arm Circles", "sets": 1, "reps": "30s", "instructions": "Slow circles" }
        ]},
        "main_routine": { "motto": "Push hard", "exercises": [
            { "name": "Push-ups", "sets": 3, "reps": "8-12", "rest": "60s",
              "instructions": "Keep a straight back", "video_url": "https://example.com/pushup.mp4" }
        ]},
        "cool_down": { "motto": "Breathe", "exercises": [
            { "name": "Chest Stretch", "sets": 1, "reps": "30s", "instructions": "Hold" }
        ]}
    }])
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Json {
        endpoint: &'static str,
        body: Value,
    },
    Upload {
        field: String,
        file_name: String,
        content_type: String,
        len: usize,
    },
}

#[derive(Debug, Clone)]
struct MockState {
    replies: Arc<Replies>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockState {
    fn record(&self, request: Recorded) {
        self.requests.lock().unwrap().push(request);
    }
}

/// Handle to a running mock.
#[derive(Debug, Clone)]
pub struct MockBackend {
    pub base_url: String,
    pub health_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    /// Serve `replies` on an ephemeral local port.
    pub async fn spawn(replies: Replies) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            replies: Arc::new(replies),
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/", get(health))
            .route("/api/v1/coach", post(coach))
            .route("/api/v1/food-scanner", post(food))
            .route("/api/v1/meal-planner", post(meal_planner))
            .route("/api/v1/workout-planner", post(workout_planner))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            health_url: format!("http://{addr}/"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn health(State(state): State<MockState>) -> (StatusCode, Json<Value>) {
    (state.replies.health, Json(json!({ "status": "ok" })))
}

fn respond(reply: &Reply) -> (StatusCode, Json<Value>) {
    (reply.status, Json(reply.body.clone()))
}

async fn coach(State(state): State<MockState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.record(Recorded::Json {
        endpoint: "coach",
        body,
    });
    respond(&state.replies.coach)
}

async fn food(State(state): State<MockState>, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let len = field.bytes().await.unwrap().len();
        state.record(Recorded::Upload {
            field: field_name,
            file_name,
            content_type,
            len,
        });
    }
    respond(&state.replies.food)
}

async fn meal_planner(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record(Recorded::Json {
        endpoint: "meal-planner",
        body,
    });
    respond(&state.replies.meal)
}

async fn workout_planner(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record(Recorded::Json {
        endpoint: "workout-planner",
        body,
    });
    respond(&state.replies.workout)
}
