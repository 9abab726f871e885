//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element of the base page.

use maud::{Markup, html};

/// An alert message with a short summary and longer details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action the user requested failed.
    Error {
        /// A short summary of what failed.
        message: String,
        /// What happened and what the user can do about it.
        details: String,
    },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let Alert::Error { message, details } = self;

        html! {
            div
                class="p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                    dark:bg-gray-800 dark:text-red-400"
                role="alert"
                hx-on--click="this.remove()"
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }
            }
        }
    }
}
