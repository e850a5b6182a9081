//! Alert fragments for displaying error messages to users.

use maud::{Markup, html};

/// An alert message with a title and details, rendered as an HTML fragment
/// that HTMX swaps into the page's alert container.
pub struct Alert<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        html! {
            div class="p-4 mb-4 rounded-lg bg-red-50 text-red-800 \
                dark:bg-gray-800 dark:text-red-400" role="alert"
            {
                p class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    p class="text-sm" { (self.details) }
                }
            }
        }
    }
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_renders_message_and_details() {
        let markup = Alert::error("Could not find entry", "Try refreshing the page.").into_html();

        let fragment = Html::parse_fragment(&markup.into_string());
        let paragraphs = fragment
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(
            paragraphs,
            vec![
                "Could not find entry".to_string(),
                "Try refreshing the page.".to_string()
            ]
        );
    }

    #[test]
    fn alert_without_details_renders_single_paragraph() {
        let markup = Alert::error("Entry saved", "").into_html();

        let fragment = Html::parse_fragment(&markup.into_string());
        let paragraphs = fragment
            .select(&Selector::parse("p").unwrap())
            .collect::<Vec<_>>();

        assert_eq!(paragraphs.len(), 1, "want 1 p, got {}", paragraphs.len());
    }
}
