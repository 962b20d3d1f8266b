//! Landing page with the backend status banner.

use crate::shell::View;
use crate::ui::components::{Tone, alert};
use crate::ui::layout::{APP_NAME, page};

#[must_use]
pub fn render(backend_online: bool) -> String {
    let status = if backend_online {
        alert(Tone::Success, "Backend Server is Online")
    } else {
        alert(
            Tone::Error,
            "Backend Server is Offline. Please start the backend API service.",
        )
    };

    let content = format!(
        r#"<h2>Welcome to {APP_NAME}</h2>
<p>Your personal AI-powered health and fitness companion.</p>
<h3>Features:</h3>
<ul class="features">
    <li><a href="{coach}"><strong>AI Coach</strong></a>: Chat with your intelligent fitness guide.</li>
    <li><a href="{food}"><strong>Food Scanner</strong></a>: Snap a photo of your meal for instant nutritional analysis.</li>
    <li><a href="{meal}"><strong>Meal Planner</strong></a>: Get personalized daily meal plans based on your goals.</li>
    <li><a href="{workout}"><strong>Workout Planner</strong></a>: Generate custom workout routines tailored to you.</li>
</ul>
<hr>
{status}"#,
        coach = View::Coach.path(),
        food = View::FoodScanner.path(),
        meal = View::MealPlanner.path(),
        workout = View::WorkoutPlanner.path(),
    );
    page(Some(View::Home), &content)
}
