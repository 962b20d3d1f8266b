mod common;

use axum::http::StatusCode;
use common::{MockBackend, Recorded, Replies, Reply};
use serde_json::json;
use vitaflex_shell::backend::{Backend, BackendError, ErrorKind, HttpBackend, ImageUpload, MealSlot};
use vitaflex_shell::profile::Profile;

fn client(mock: &MockBackend) -> HttpBackend {
    HttpBackend::new(&mock.base_url, &mock.health_url).expect("mock URLs are valid")
}

fn png() -> ImageUpload {
    ImageUpload {
        file_name: "lunch.png".into(),
        content_type: "image/png".into(),
        bytes: vec![0x89, b'P', b'N', b'G', 1, 2, 3],
    }
}

#[tokio::test]
async fn probe_reports_online_and_offline() {
    let mock = MockBackend::spawn(Replies::default()).await;
    assert!(client(&mock).is_online().await);

    let failing = MockBackend::spawn(Replies {
        health: StatusCode::SERVICE_UNAVAILABLE,
        ..Replies::default()
    })
    .await;
    assert!(!client(&failing).is_online().await);

    let nowhere = HttpBackend::new("http://127.0.0.1:9/api/v1", "http://127.0.0.1:9/").unwrap();
    assert!(!nowhere.is_online().await);
}

#[tokio::test]
async fn coach_posts_message_and_returns_reply() {
    let mock = MockBackend::spawn(Replies::default()).await;

    let reply = client(&mock).coach("How much protein?").await.unwrap();

    assert_eq!(reply, "Drink water.");
    assert_eq!(
        mock.requests(),
        vec![Recorded::Json {
            endpoint: "coach",
            body: json!({ "message": "How much protein?" }),
        }]
    );
}

#[tokio::test]
async fn coach_non_2xx_is_application_error_with_body() {
    let mock = MockBackend::spawn(Replies {
        coach: Reply::status(StatusCode::INTERNAL_SERVER_ERROR, json!({ "detail": "boom" })),
        ..Replies::default()
    })
    .await;

    let err = client(&mock).coach("hi").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Application);
    match err {
        BackendError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let backend = HttpBackend::new("http://127.0.0.1:9/api/v1", "http://127.0.0.1:9/").unwrap();
    let err = backend.coach("hi").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn scan_sends_image_part() {
    let mock = MockBackend::spawn(Replies::default()).await;

    let analysis = client(&mock).scan_food(png()).await.unwrap();

    assert_eq!(analysis.nutrition.calories.to_string(), "250");
    assert_eq!(analysis.food_items, ["toast", "egg"]);
    assert_eq!(analysis.concerns(), ["sodium"]);
    assert_eq!(
        mock.requests(),
        vec![Recorded::Upload {
            field: "image".into(),
            file_name: "lunch.png".into(),
            content_type: "image/png".into(),
            len: 7,
        }]
    );
}

#[tokio::test]
async fn scan_without_concerns_yields_empty_list() {
    let mock = MockBackend::spawn(Replies {
        food: Reply::ok(json!({
            "success": true,
            "analysis": {
                "nutrition": { "calories": "300", "protein": 10, "carbs": 20, "fat": 5 },
                "food_items": ["salad"],
                "health_benefits": []
            }
        })),
        ..Replies::default()
    })
    .await;

    let analysis = client(&mock).scan_food(png()).await.unwrap();
    assert!(analysis.concerns().is_empty());
}

#[tokio::test]
async fn meal_plan_request_carries_profile() {
    let mock = MockBackend::spawn(Replies::default()).await;

    let plan = client(&mock).plan_meals(&Profile::default()).await.unwrap();

    let names: Vec<_> = plan.slots().map(|(_, meal)| meal.name.clone()).collect();
    assert_eq!(names, ["Oats", "Chicken Bowl", "Yogurt", "Salmon"]);
    assert_eq!(plan.meal(MealSlot::Dinner).rationale, "Salmon rationale");

    let requests = mock.requests();
    let [Recorded::Json { endpoint, body }] = requests.as_slice() else {
        panic!("expected one JSON request");
    };
    assert_eq!(*endpoint, "meal-planner");
    assert_eq!(
        *body,
        json!({
            "primary_goal": "Build Muscle",
            "weight_kg": 70.0,
            "height_cm": 175.0,
            "is_meat_eater": true,
            "is_lactose_intolerant": false,
            "allergies": [],
            "eating_style": "None",
            "caffeine_consumption": "None",
            "sugar_consumption": "None",
            "workout_type": "Gym",
            "workout_frequency": 3,
            "date_of_birth": "1995/01/01"
        })
    );
}

#[tokio::test]
async fn rejected_meal_plan_keeps_server_message() {
    let mock = MockBackend::spawn(Replies {
        meal: Reply::ok(json!({ "success": false, "error": "x" })),
        ..Replies::default()
    })
    .await;

    let err = client(&mock).plan_meals(&Profile::default()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(err.to_string(), "x");
}

#[tokio::test]
async fn meal_plan_missing_slot_is_malformed() {
    let mut plan = common::meal_plan();
    plan.as_object_mut().unwrap().remove("snack");
    let mock = MockBackend::spawn(Replies {
        meal: Reply::ok(json!({ "success": true, "meal_plan": plan })),
        ..Replies::default()
    })
    .await;

    let err = client(&mock).plan_meals(&Profile::default()).await.unwrap_err();

    assert!(matches!(err, BackendError::MalformedResponse(ref m) if m.contains("snack")));
}

#[tokio::test]
async fn workout_plan_is_decoded_in_order() {
    let mock = MockBackend::spawn(Replies::default()).await;

    let days = client(&mock).plan_workout(&Profile::default()).await.unwrap();

    assert_eq!(days.len(), 1);
    let day = &days[0];
    assert_eq!(day.day.to_string(), "1");
    assert_eq!(day.focus, "Upper Body");
    let push_ups = &day.main_routine.exercises[0];
    assert_eq!(push_ups.reps.to_string(), "8-12");
    assert_eq!(push_ups.rest.as_ref().map(ToString::to_string).as_deref(), Some("60s"));
    assert!(day.warm_up.exercises[0].rest.is_none());
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let mock = MockBackend::spawn(Replies {
        workout: Reply::ok(json!("not an envelope")),
        ..Replies::default()
    })
    .await;

    let err = client(&mock).plan_workout(&Profile::default()).await.unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse(_)));
}
