//! Meal Planner page.

use std::fmt::Write as _;

use crate::backend::{Meal, MealPlan, MealSlot};
use crate::profile::ProfileForm;
use crate::shell::{ActionError, View};
use crate::ui::components::{BUSY_ON_SUBMIT, ErrorWording, error_alert, escape, submit_button};
use crate::ui::layout::page;
use crate::ui::profile_form;

pub const WORDING: ErrorWording = ErrorWording {
    rejected: "Failed to generate plan",
    transport: "Error",
    status: "Server Error",
    status_body: true,
};

#[must_use]
pub fn render(form: &ProfileForm, outcome: Option<&Result<MealPlan, ActionError>>) -> String {
    let result = match outcome {
        Some(Ok(plan)) => plan_tabs(plan),
        Some(Err(e)) => error_alert(WORDING, e),
        None => String::new(),
    };

    let content = format!(
        r#"<h2>Weekly Meal Planner</h2>
<p>Generate a customized meal plan based on your dietary preferences and goals.</p>
<form method="post" action="{action}" {BUSY_ON_SUBMIT}>
    {fields}
    {button}
</form>
{result}"#,
        action = View::MealPlanner.path(),
        fields = profile_form::fields(form),
        button = submit_button("Generate Meal Plan", "Chef AI is cooking up a plan..."),
    );
    page(Some(View::MealPlanner), &content)
}

/// One tab per slot. The first tab starts open.
fn plan_tabs(plan: &MealPlan) -> String {
    let mut html = String::from(r#"<section class="tabs meal-plan">"#);
    for (index, (slot, meal)) in plan.slots().enumerate() {
        let open = if index == 0 { " open" } else { "" };
        let _ = write!(
            html,
            r#"<details class="tab"{open}><summary>{}</summary>{}</details>"#,
            slot.label(),
            meal_card(slot, meal)
        );
    }
    html.push_str("</section>");
    html
}

fn meal_card(slot: MealSlot, meal: &Meal) -> String {
    let mut steps = String::from("<ul>");
    for step in &meal.preparation_steps {
        let _ = write!(steps, "<li>{}</li>", escape(step));
    }
    steps.push_str("</ul>");

    format!(
        r#"<article class="meal" data-slot="{slot}">
    <h3>{name}</h3>
    <div class="alert alert-info">{description}</div>
    <div class="columns">
        <div class="column">
            <h4>Macros</h4>
            <p><strong>Calories:</strong> {calories}</p>
            <p><strong>Protein:</strong> {protein}g</p>
            <p><strong>Carbs:</strong> {carbs}g</p>
            <p><strong>Fat:</strong> {fat}g</p>
        </div>
        <div class="column">
            <h4>Preparation</h4>
            {steps}
        </div>
    </div>
    <h4>Why this meal?</h4>
    <p class="caption">{rationale}</p>
</article>"#,
        slot = slot.key(),
        name = escape(&meal.name),
        description = escape(&meal.description),
        calories = escape(&meal.calories.to_string()),
        protein = escape(&meal.protein.to_string()),
        carbs = escape(&meal.carbs.to_string()),
        fat = escape(&meal.fat.to_string()),
        rationale = escape(&meal.rationale),
    )
}
