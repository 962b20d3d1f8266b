use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::backend::{Backend, HttpBackend, ImageUpload};
use crate::config::AppConfig;
use crate::profile::ProfileForm;
use crate::session::{ChatMessage, Session, SessionStore};
use crate::shell::{ActionError, UploadError, View, validate_upload};
use crate::ui::{
    layout,
    pages::{coach, food, home, meal, workout},
};

/// Cookie carrying the session ID.
pub const SESSION_COOKIE: &str = "vitaflex_session";

/// How often idle sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Start the shell with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let backend = HttpBackend::from_config(&config.backend)?;
    info!(
        name: "backend.config.loaded",
        base_url = %backend.base_url(),
        health_url = %config.backend.health_url,
        timeout_secs = ?config.backend.request_timeout_secs,
        "Backend configuration loaded"
    );

    let backend: Arc<dyn Backend> = Arc::new(backend);
    let state = AppState::new(Arc::clone(&config), backend);

    spawn_session_sweeper(
        state.sessions.clone(),
        Duration::from_secs(config.ui.session_idle_secs),
    );

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the router for the given state.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.ui.static_dir);
    let body_limit = state.config.ui.max_upload_bytes;

    Router::new()
        .route("/", get(show_view))
        .route("/coach", get(show_view).post(coach_submit))
        .route("/food-scanner", get(show_view).post(food_submit))
        .route("/meal-planner", get(show_view).post(meal_submit))
        .route("/workout-planner", get(show_view).post(workout_submit))
        .nest_service("/static", static_dir)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn spawn_session_sweeper(sessions: SessionStore, idle: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = sessions.cleanup_expired_with_timeout(idle);
            if removed > 0 {
                info!(
                    name: "session.swept",
                    removed,
                    remaining = sessions.len(),
                    "Expired sessions removed"
                );
            }
        }
    });
}

/// Transcript of the caller's session; empty when the cookie names none.
fn stored_transcript(store: &SessionStore, jar: &CookieJar) -> Vec<ChatMessage> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| store.get(cookie.value()))
        .map(|session| session.transcript())
        .unwrap_or_default()
}

/// Look up the caller's session, issuing a cookie for a new one.
fn session_for(store: &SessionStore, jar: CookieJar) -> (CookieJar, Session) {
    let (session, created) = store.resolve(jar.get(SESSION_COOKIE).map(Cookie::value));
    if !created {
        return (jar, session);
    }

    tracing::debug!(name: "session.created", session_id = %session.id(), "Created new session");
    let cookie = Cookie::build((SESSION_COOKIE, session.id().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), session)
}

// ─────────────────────────────────────────────────────────────────────────────
// Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET for every view: dispatch on the request path. Never creates a session.
async fn show_view(State(state): State<AppState>, jar: CookieJar, uri: Uri) -> Response {
    let Some(view) = View::from_slug(uri.path()) else {
        return not_found().await.into_response();
    };

    match view {
        View::Home => {
            let online = state.shell.check_backend_online().await;
            Html(home::render(online)).into_response()
        }
        View::Coach => {
            // Sessions are only created by a first message.
            let transcript = stored_transcript(&state.sessions, &jar);
            Html(coach::render(&transcript, None)).into_response()
        }
        View::FoodScanner => Html(food::render(None, None)).into_response(),
        View::MealPlanner => Html(meal::render(&ProfileForm::initial(), None)).into_response(),
        View::WorkoutPlanner => {
            Html(workout::render(&ProfileForm::initial(), None)).into_response()
        }
    }
}

async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(layout::not_found()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Action Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Form body for the coach.
#[derive(Debug, Deserialize)]
struct ChatForm {
    #[serde(default)]
    message: String,
}

/// POST /coach - send one message and re-render the transcript.
async fn coach_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ChatForm>,
) -> (CookieJar, Html<String>) {
    let text = form.message.trim();
    if text.is_empty() {
        let transcript = stored_transcript(&state.sessions, &jar);
        return (jar, Html(coach::render(&transcript, None)));
    }

    let (jar, session) = session_for(&state.sessions, jar);
    let error = state
        .shell
        .send_chat_message(&session, text)
        .await
        .err()
        .map(ActionError::from);

    (jar, Html(coach::render(&session.transcript(), error.as_ref())))
}

/// POST /food-scanner - forward the uploaded image.
async fn food_submit(State(state): State<AppState>, mut multipart: Multipart) -> Html<String> {
    let upload = match read_image(&mut multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            tracing::info!(name: "shell.food.rejected", error = %e, "Upload rejected");
            return Html(food::render(None, Some(&Err(e.into()))));
        }
    };

    let outcome = state
        .shell
        .analyze_food_image(upload.clone())
        .await
        .map_err(ActionError::from);
    Html(food::render(Some(&upload), Some(&outcome)))
}

/// Read the `image` field; other fields are ignored.
async fn read_image(multipart: &mut Multipart) -> Result<ImageUpload, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;
        return validate_upload(&file_name, content_type.as_deref(), bytes.to_vec());
    }
    Err(UploadError::Missing)
}

/// POST /meal-planner
async fn meal_submit(State(state): State<AppState>, Form(form): Form<ProfileForm>) -> Html<String> {
    let outcome = match form.to_profile() {
        Ok(profile) => state
            .shell
            .generate_meal_plan(&profile)
            .await
            .map_err(ActionError::from),
        Err(e) => Err(e.into()),
    };
    Html(meal::render(&form, Some(&outcome)))
}

/// POST /workout-planner
async fn workout_submit(
    State(state): State<AppState>,
    Form(form): Form<ProfileForm>,
) -> Html<String> {
    let outcome = match form.to_profile() {
        Ok(profile) => state
            .shell
            .generate_workout_plan(&profile)
            .await
            .map_err(ActionError::from),
        Err(e) => Err(e.into()),
    };
    Html(workout::render(&form, Some(&outcome)))
}
