//! Workout Planner page.

use std::fmt::Write as _;

use crate::backend::{Block, Exercise, WorkoutDay};
use crate::profile::ProfileForm;
use crate::shell::{ActionError, View};
use crate::ui::components::{
    BUSY_ON_SUBMIT, ErrorWording, Tone, alert, error_alert, escape, submit_button,
};
use crate::ui::layout::page;
use crate::ui::profile_form;

pub const WORDING: ErrorWording = ErrorWording {
    rejected: "Failed",
    transport: "Connection Error",
    status: "Server Error",
    status_body: true,
};

#[must_use]
pub fn render(
    form: &ProfileForm,
    outcome: Option<&Result<Vec<WorkoutDay>, ActionError>>,
) -> String {
    let result = match outcome {
        Some(Ok(days)) if days.is_empty() => {
            alert(Tone::Warning, "The backend returned an empty workout plan.")
        }
        Some(Ok(days)) => days.iter().map(day_section).collect(),
        Some(Err(e)) => error_alert(WORDING, e),
        None => String::new(),
    };

    let content = format!(
        r#"<h2>Personalized Workout Planner</h2>
<p>Get a workout routine strictly tailored to your body type and environment.</p>
<form method="post" action="{action}" {BUSY_ON_SUBMIT}>
    {fields}
    {button}
</form>
{result}"#,
        action = View::WorkoutPlanner.path(),
        fields = profile_form::fields(form),
        button = submit_button("Generate Workout", "Coach AI is simulating your workout..."),
    );
    page(Some(View::WorkoutPlanner), &content)
}

/// Which part of the day a block is; only the main routine shows rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    WarmUp,
    Main,
    CoolDown,
}

impl Phase {
    fn title(self) -> &'static str {
        match self {
            Self::WarmUp => "Warm Up",
            Self::Main => "Main Routine",
            Self::CoolDown => "Cool Down",
        }
    }
}

fn day_section(day: &WorkoutDay) -> String {
    format!(
        r#"<details class="workout-day" open>
    <summary>{day} - {focus}</summary>
    {warm_up}
    <hr>
    {main}
    <hr>
    {cool_down}
</details>"#,
        day = escape(&day.day.to_string()),
        focus = escape(&day.focus),
        warm_up = block_section(Phase::WarmUp, &day.warm_up),
        main = block_section(Phase::Main, &day.main_routine),
        cool_down = block_section(Phase::CoolDown, &day.cool_down),
    )
}

fn block_section(phase: Phase, block: &Block) -> String {
    let mut html = format!(
        r#"<section class="block"><h3>{}</h3><p class="caption"><em>{}</em></p>"#,
        phase.title(),
        escape(&block.motto)
    );
    for exercise in &block.exercises {
        html.push_str(&exercise_item(phase, exercise));
    }
    html.push_str("</section>");
    html
}

fn exercise_item(phase: Phase, exercise: &Exercise) -> String {
    let mut html = format!(
        r#"<div class="exercise"><p><strong>{}</strong> | {} sets x {}</p>"#,
        escape(&exercise.name),
        escape(&exercise.sets.to_string()),
        escape(&exercise.reps.to_string())
    );

    let instructions = escape(&exercise.instructions);
    match (phase, &exercise.rest) {
        (Phase::Main, Some(rest)) => {
            let _ = write!(
                html,
                "<pre>Rest: {} | Instructions: {instructions}</pre>",
                escape(&rest.to_string())
            );
        }
        _ => {
            let _ = write!(html, "<pre>Instructions: {instructions}</pre>");
        }
    }

    if let Some(url) = exercise.video_url.as_deref().filter(|u| !u.is_empty()) {
        let url = escape(url);
        let _ = write!(
            html,
            r#"<video controls preload="none" src="{url}"><a href="{url}">Watch video</a></video>"#
        );
    }
    html.push_str("</div>");
    html
}
