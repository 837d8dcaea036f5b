//! HTML rendering for dialogs.
//!
//! Dialog fragments are swapped into [DIALOG_ROOT_ID] by htmx. The policy is
//! written onto the overlay as data attributes which `static/dialog.js` reads
//! to handle escape, overlay clicks, focus and scroll locking in the browser.

use maud::{Markup, html};

use super::config::{DialogConfig, DialogIcon, DismissTrigger};

/// The ID of the element that dialog fragments are swapped into.
pub const DIALOG_ROOT_ID: &str = "dialog-root";

/// The CSS selector for [DIALOG_ROOT_ID], for use in `hx-target`.
pub const DIALOG_ROOT_SELECTOR: &str = "#dialog-root";

const DIALOG_PANEL_STYLE: &str = "relative w-full max-h-[90vh] flex flex-col \
    overflow-hidden rounded-2xl bg-white dark:bg-gray-800 shadow-2xl \
    focus:outline-none text-gray-900 dark:text-white";

/// The empty container dialogs are rendered into.
pub fn dialog_root() -> Markup {
    html! {
        div id=(DIALOG_ROOT_ID) {}
    }
}

fn bool_attribute(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Render a dialog with `body` as its content and an optional `footer`.
pub fn dialog_view(config: &DialogConfig, body: Markup, footer: Option<Markup>) -> Markup {
    let policy = config.policy;
    let style = config.kind.style();
    let title_id = config.element_id("title");

    html! {
        div
            class="fixed inset-0 z-50 flex items-center justify-center p-4"
            data-dialog
            data-close-on-escape=(bool_attribute(policy.permits(DismissTrigger::Escape)))
            data-close-on-overlay=(bool_attribute(policy.permits(DismissTrigger::OverlayClick)))
            data-prevent-close=(bool_attribute(policy.prevent_close))
        {
            div
                class="absolute inset-0 bg-black/50 transition-opacity"
                data-dialog-overlay
                aria-hidden="true"
            {}

            div
                id=(config.element_id("panel"))
                class={ (DIALOG_PANEL_STYLE) " " (config.size.width_class()) }
                role="dialog"
                aria-modal="true"
                aria-labelledby=[config.title.as_ref().map(|_| &title_id)]
                tabindex="-1"
            {
                @if config.has_header() {
                    div class="flex items-center justify-between p-6 border-b border-gray-200 dark:border-gray-700"
                    {
                        div class="flex items-center space-x-3"
                        {
                            @if let Some(icon) = style.icon {
                                div class={ "p-2 rounded-full " (style.icon_background_class) }
                                {
                                    (icon_view(icon, style.icon_class))
                                }
                            }

                            @if let Some(title) = &config.title {
                                h2 id=(title_id) class={ "text-xl font-bold " (style.header_class) }
                                {
                                    (title)
                                }
                            }
                        }

                        @if policy.renders_close_button() {
                            (close_button())
                        }
                    }
                }

                div class="flex-1 overflow-y-auto"
                {
                    (body)
                }

                @if let Some(footer) = footer {
                    div class="px-6 py-4 border-t border-gray-200 dark:border-gray-700 bg-gray-50 dark:bg-gray-900/40"
                    {
                        (footer)
                    }
                }
            }
        }
    }
}

fn close_button() -> Markup {
    html! {
        button
            type="button"
            data-dialog-close
            aria-label="Close dialog"
            class="p-2 text-gray-400 hover:text-gray-600 hover:bg-gray-100
                dark:hover:text-gray-200 dark:hover:bg-gray-700 rounded-lg transition-colors"
        {
            svg class="w-5 h-5" fill="none" stroke="currentColor" stroke-width="2"
                viewBox="0 0 24 24" aria-hidden="true"
            {
                path stroke-linecap="round" stroke-linejoin="round" d="M6 18L18 6M6 6l12 12" {}
            }
        }
    }
}

fn icon_view(icon: DialogIcon, class: &str) -> Markup {
    // Icon paths adapted from https://lucide.dev
    html! {
        svg
            class={ "w-5 h-5 " (class) }
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            viewBox="0 0 24 24"
            aria-hidden="true"
            data-icon=(icon_name(icon))
        {
            @match icon {
                DialogIcon::CheckCircle => {
                    path d="M22 11.08V12a10 10 0 1 1-5.93-9.14" {}
                    path d="m9 11 3 3L22 4" {}
                }
                DialogIcon::AlertTriangle => {
                    path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3Z" {}
                    path d="M12 9v4" {}
                    path d="M12 17h.01" {}
                }
                DialogIcon::AlertCircle => {
                    circle cx="12" cy="12" r="10" {}
                    path d="M12 8v4" {}
                    path d="M12 16h.01" {}
                }
                DialogIcon::Info => {
                    circle cx="12" cy="12" r="10" {}
                    path d="M12 16v-4" {}
                    path d="M12 8h.01" {}
                }
            }
        }
    }
}

fn icon_name(icon: DialogIcon) -> &'static str {
    match icon {
        DialogIcon::CheckCircle => "check-circle",
        DialogIcon::AlertTriangle => "alert-triangle",
        DialogIcon::AlertCircle => "alert-circle",
        DialogIcon::Info => "info",
    }
}
