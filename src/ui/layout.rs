//! Document shell and navigation.

use std::fmt::Write as _;

use crate::shell::View;

/// Product name shown in the title bar and sidebar.
pub const APP_NAME: &str = "VitaFlex AI";

/// Wrap page content in the full HTML document.
///
/// `content` must already be escaped.
#[must_use]
pub fn page(active: Option<View>, content: &str) -> String {
    let title = active.map_or("Not Found", View::title);
    let nav = navigation(active);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Personal AI-powered health and fitness companion">
    <title>{title} - {APP_NAME}</title>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body>
    <div class="app-shell">
        <aside class="sidebar">
            <h1 class="brand">{APP_NAME}</h1>
            <nav aria-label="Navigate">
                {nav}
            </nav>
            <div class="alert alert-info tip">
                <strong>Tip:</strong> Make sure the backend API is running.
            </div>
        </aside>
        <main id="app" class="content">
            {content}
        </main>
    </div>
</body>
</html>"#
    )
}

fn navigation(active: Option<View>) -> String {
    let mut html = String::from("<ul>");
    for view in View::ALL {
        let current = if Some(view) == active {
            r#" aria-current="page" class="active""#
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<li><a href="{}"{current}>{}</a></li>"#,
            view.path(),
            view.title()
        );
    }
    html.push_str("</ul>");
    html
}

/// Page rendered for unknown paths.
#[must_use]
pub fn not_found() -> String {
    page(
        None,
        r#"<section class="not-found">
    <h2>404</h2>
    <p>Page not found</p>
    <a href="/" class="btn-primary">Go Home</a>
</section>"#,
    )
}
