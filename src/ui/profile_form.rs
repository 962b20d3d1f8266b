//! Profile form shared by the meal and workout planners.

use std::fmt::Write as _;

use crate::profile::{
    CaffeineIntake, EatingStyle, HEIGHT_RANGE_CM, PrimaryGoal, ProfileForm, SugarIntake,
    WEIGHT_RANGE_KG, WORKOUT_FREQUENCY_RANGE, WorkoutType,
};
use crate::ui::components::escape;

/// Render the profile inputs prefilled from `form`.
///
/// The caller supplies the surrounding `<form>` element.
#[must_use]
pub fn fields(form: &ProfileForm) -> String {
    let goal = select("primary_goal", PrimaryGoal::FIELD, labels(PrimaryGoal::ALL), &form.primary_goal);
    let diet = select("eating_style", EatingStyle::FIELD, labels(EatingStyle::ALL), &form.eating_style);
    let location = select("workout_type", WorkoutType::FIELD, labels(WorkoutType::ALL), &form.workout_type);
    let caffeine = select(
        "caffeine_consumption",
        CaffeineIntake::FIELD,
        labels(CaffeineIntake::ALL),
        &form.caffeine_consumption,
    );
    let sugar = select(
        "sugar_consumption",
        SugarIntake::FIELD,
        labels(SugarIntake::ALL),
        &form.sugar_consumption,
    );

    format!(
        r#"<div class="columns">
    <div class="column">
        <label>Date of Birth <input type="date" name="date_of_birth" value="{dob}"></label>
        <label>Weight (kg) <input type="number" name="weight_kg" min="{w_min}" max="{w_max}" step="0.1" value="{weight}"></label>
        <label>Height (cm) <input type="number" name="height_cm" min="{h_min}" max="{h_max}" step="0.1" value="{height}"></label>
        {goal}
    </div>
    <div class="column">
        {diet}
        {location}
        <label>Workouts per Week <input type="range" name="workout_frequency" min="{f_min}" max="{f_max}" value="{frequency}" oninput="this.nextElementSibling.value = this.value"><output>{frequency}</output></label>
    </div>
</div>
<details class="expander">
    <summary>Detailed Preferences</summary>
    <div class="columns">
        <div class="column">
            <label><input type="checkbox" name="is_meat_eater"{meat}> Eat Meat?</label>
            <label><input type="checkbox" name="is_lactose_intolerant"{lactose}> Lactose Intolerant?</label>
            {caffeine}
        </div>
        <div class="column">
            {sugar}
            <label>Allergies (comma separated) <input type="text" name="allergies" value="{allergies}"></label>
        </div>
    </div>
</details>"#,
        dob = escape(&form.date_of_birth),
        weight = escape(&form.weight_kg),
        height = escape(&form.height_cm),
        frequency = escape(&form.workout_frequency),
        allergies = escape(&form.allergies),
        w_min = WEIGHT_RANGE_KG.start(),
        w_max = WEIGHT_RANGE_KG.end(),
        h_min = HEIGHT_RANGE_CM.start(),
        h_max = HEIGHT_RANGE_CM.end(),
        f_min = WORKOUT_FREQUENCY_RANGE.start(),
        f_max = WORKOUT_FREQUENCY_RANGE.end(),
        meat = checked(form.is_meat_eater.as_deref()),
        lactose = checked(form.is_lactose_intolerant.as_deref()),
    )
}

fn labels<T: Copy + ToString>(all: &[T]) -> Vec<String> {
    all.iter().map(ToString::to_string).collect()
}

fn select(name: &str, label: &str, options: Vec<String>, current: &str) -> String {
    let mut html = format!(r#"<label>{} <select name="{name}">"#, escape(label));
    for option in options {
        let selected = if option == current { " selected" } else { "" };
        let option = escape(&option);
        let _ = write!(html, r#"<option value="{option}"{selected}>{option}</option>"#);
    }
    html.push_str("</select></label>");
    html
}

fn checked(value: Option<&str>) -> &'static str {
    if value.is_some_and(|v| !v.is_empty()) {
        " checked"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_form_has_defaults() {
        let html = fields(&ProfileForm::initial());
        assert!(html.contains(r#"name="date_of_birth" value="1995-01-01""#));
        assert!(html.contains(r#"name="weight_kg" min="30" max="200" step="0.1" value="70""#));
        assert!(html.contains(r#"<option value="Build Muscle" selected>"#));
        assert!(html.contains(r#"name="is_meat_eater" checked"#));
        assert!(!html.contains(r#"name="is_lactose_intolerant" checked"#));
    }

    #[test]
    fn user_text_is_escaped() {
        let form = ProfileForm {
            allergies: r#""><script>"#.into(),
            ..ProfileForm::initial()
        };
        let html = fields(&form);
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
