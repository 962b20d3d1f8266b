//! Food Scanner page.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::backend::{FoodAnalysis, ImageUpload};
use crate::shell::{ACCEPTED_IMAGE_EXTENSIONS, ActionError, View};
use crate::ui::components::{
    BUSY_ON_SUBMIT, ErrorWording, bullet_list, error_alert, escape, metric, submit_button,
};
use crate::ui::layout::page;

pub const WORDING: ErrorWording = ErrorWording {
    rejected: "Analysis failed",
    transport: "Connection Error",
    status: "Server Error",
    status_body: false,
};

/// Shown in the concerns column when the backend reports none.
pub const NO_CONCERNS: &str = "No major concerns detected";

/// Render the upload form, the uploaded image and the analysis outcome.
#[must_use]
pub fn render(
    upload: Option<&ImageUpload>,
    outcome: Option<&Result<FoodAnalysis, ActionError>>,
) -> String {
    let accept = ACCEPTED_IMAGE_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    let preview = upload.map(preview).unwrap_or_default();
    let result = match outcome {
        Some(Ok(analysis)) => analysis_section(analysis),
        Some(Err(e)) => error_alert(WORDING, e),
        None => String::new(),
    };

    let content = format!(
        r#"<h2>AI Food Scanner</h2>
<p class="caption">Upload a photo of your meal to get nutritional details.</p>
<div class="columns">
    <div class="column narrow">
        <form method="post" action="{action}" enctype="multipart/form-data" {BUSY_ON_SUBMIT}>
            <label>Choose a food image... <input type="file" name="image" accept="{accept}" required></label>
            {button}
        </form>
        {preview}
    </div>
    <div class="column wide">
        {result}
    </div>
</div>"#,
        action = View::FoodScanner.path(),
        button = submit_button("Analyze Food", "Analyzing image..."),
    );
    page(Some(View::FoodScanner), &content)
}

fn preview(upload: &ImageUpload) -> String {
    format!(
        r#"<figure class="preview"><img src="data:{};base64,{}" alt="Uploaded Image"><figcaption>{}</figcaption></figure>"#,
        escape(&upload.content_type),
        BASE64.encode(&upload.bytes),
        escape(&upload.file_name)
    )
}

fn analysis_section(analysis: &FoodAnalysis) -> String {
    let nutrition = &analysis.nutrition;
    let concerns = if analysis.concerns().is_empty() {
        format!("<p>{NO_CONCERNS}</p>")
    } else {
        bullet_list(analysis.concerns())
    };

    format!(
        r#"<section class="analysis">
    <h3>Nutritional Info</h3>
    <div class="metrics">
        {calories}
        {protein}
        {carbs}
        {fat}
    </div>
    <hr>
    <h3>Analysis Summary</h3>
    <div class="columns">
        <div class="column"><h4>Detected Items</h4>{items}</div>
        <div class="column"><h4>Health Benefits</h4>{benefits}</div>
        <div class="column"><h4>Concerns</h4>{concerns}</div>
    </div>
</section>"#,
        calories = metric("Calories", &nutrition.calories.to_string()),
        protein = metric("Protein", &format!("{}g", nutrition.protein)),
        carbs = metric("Carbs", &format!("{}g", nutrition.carbs)),
        fat = metric("Fat", &format!("{}g", nutrition.fat)),
        items = bullet_list(&analysis.food_items),
        benefits = bullet_list(&analysis.health_benefits),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, Nutrition, Scalar};

    fn analysis(concerns: Option<Vec<String>>) -> FoodAnalysis {
        FoodAnalysis {
            nutrition: Nutrition {
                calories: Scalar::Int(540),
                protein: Scalar::Int(32),
                carbs: Scalar::Float(48.5),
                fat: Scalar::Text("21".into()),
            },
            food_items: vec!["grilled chicken".into(), "rice".into()],
            health_benefits: vec!["lean protein".into()],
            concerns,
        }
    }

    #[test]
    fn renders_metrics_and_placeholder() {
        let html = render(None, Some(&Ok(analysis(None))));
        assert!(html.contains("540"));
        assert!(html.contains("48.5g"));
        assert!(html.contains("<li>grilled chicken</li>"));
        assert!(html.contains(NO_CONCERNS));
    }

    #[test]
    fn empty_concerns_use_placeholder() {
        let html = render(None, Some(&Ok(analysis(Some(Vec::new())))));
        assert!(html.contains(NO_CONCERNS));
    }

    #[test]
    fn lists_concerns_when_present() {
        let html = render(None, Some(&Ok(analysis(Some(vec!["high sodium".into()])))));
        assert!(html.contains("<li>high sodium</li>"));
        assert!(!html.contains(NO_CONCERNS));
    }

    #[test]
    fn rejection_renders_no_analysis() {
        let err = ActionError::Backend(BackendError::Rejected {
            message: Some("not food".into()),
        });
        let html = render(None, Some(&Err(err)));
        assert!(html.contains("Analysis failed: not food"));
        assert!(!html.contains("Nutritional Info"));
    }

    #[test]
    fn shows_preview() {
        let upload = ImageUpload {
            file_name: "plate.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        };
        let html = render(Some(&upload), None);
        assert!(html.contains("data:image/png;base64,iVBORw=="));
    }
}
