//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

/// Wraps page content with standard HTML structure
///
/// Provides DOCTYPE, html, head, and container structure for the review
/// page. The wrapper handles viewport configuration, charset, stylesheet
/// and script loading while the caller provides page-specific body content.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `stylesheets`: Array of CSS file paths to include
/// * `scripts`: Array of script file paths loaded at the end of the body
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(
    title: &str,
    stylesheets: &[&str],
    scripts: &[&str],
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Glosa" }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                div class="container" {
                    (body)
                }
                @for script in scripts {
                    script src=(script) {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wrapper_structure() {
        let page = page_wrapper(
            "notes.md",
            &["assets/review.css"],
            &["assets/review.js"],
            html! { p { "body" } },
        )
        .into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>notes.md - Glosa</title>"));
        assert!(page.contains(r#"<link rel="stylesheet" href="assets/review.css">"#));
        assert!(page.contains(r#"<script src="assets/review.js"></script>"#));
        assert!(page.contains(r#"<div class="container"><p>body</p></div>"#));
    }

    #[test]
    fn test_page_wrapper_escapes_title() {
        let page = page_wrapper("<b>", &[], &[], html! {}).into_string();

        assert!(page.contains("<title>&lt;b&gt; - Glosa</title>"));
    }
}
