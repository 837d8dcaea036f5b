//! The help dialog: frequently asked questions and how to contact support.

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    dialog::{DIALOG_ROOT_SELECTOR, DialogConfig, DialogSize, dialog_view},
    endpoints,
    html::FORM_TEXT_INPUT_STYLE,
};

const FAQ_LIST_ID: &str = "faq-list";
const SUPPORT_EMAIL: &str = "support@pennywise.app";

struct Faq {
    question: &'static str,
    answer: &'static str,
}

const FAQS: [Faq; 6] = [
    Faq {
        question: "How do I create a new transaction?",
        answer: "Fill in the Add Transaction form on the dashboard. Choose income or \
            expense, enter a description, amount and date, optionally pick a category, \
            then press Add Transaction.",
    },
    Faq {
        question: "How can I view my spending summary?",
        answer: "The totals below the transaction list show your income, expenses and \
            net amount for the transactions that match the current search and filter.",
    },
    Faq {
        question: "How do I change my account settings?",
        answer: "Open the profile menu in the top right corner and select Settings. \
            You can change the language, currency, notifications and dark mode there.",
    },
    Faq {
        question: "Can I export my transaction data?",
        answer: "Exporting is not available yet. Contact support if you need a copy \
            of your transactions.",
    },
    Faq {
        question: "How do I set up budget categories?",
        answer: "Type a category when adding or editing a transaction. Suggestions \
            for common categories appear as you type, and transactions without one \
            are listed as Uncategorized.",
    },
    Faq {
        question: "What should I do if I forgot my password?",
        answer: "Open your profile and choose Change Password. If you cannot remember \
            your current password, contact support and we will help you reset it.",
    },
];

fn matching_faqs(search: &str) -> Vec<&'static Faq> {
    let needle = search.trim().to_lowercase();

    FAQS.iter()
        .filter(|faq| {
            needle.is_empty()
                || faq.question.to_lowercase().contains(&needle)
                || faq.answer.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The tabs of the help dialog.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelpTab {
    #[default]
    Faq,
    Contact,
}

impl HelpTab {
    const ALL: [HelpTab; 2] = [HelpTab::Faq, HelpTab::Contact];

    fn code(self) -> &'static str {
        match self {
            HelpTab::Faq => "faq",
            HelpTab::Contact => "contact",
        }
    }

    fn label(self) -> &'static str {
        match self {
            HelpTab::Faq => "FAQ",
            HelpTab::Contact => "Contact Support",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HelpQuery {
    #[serde(default)]
    pub tab: HelpTab,
}

#[derive(Debug, Default, Deserialize)]
pub struct FaqQuery {
    #[serde(default)]
    pub search: String,
}

fn faq_list(search: &str) -> Markup {
    let faqs = matching_faqs(search);

    html! {
        div id=(FAQ_LIST_ID) class="space-y-2"
        {
            @if faqs.is_empty() {
                p class="py-8 text-center text-gray-500 dark:text-gray-400" data-empty-state
                {
                    "No results found"
                }
            } @else {
                @for faq in faqs {
                    details
                        class="rounded-lg border border-gray-200 dark:border-gray-700 p-4"
                        data-faq
                    {
                        summary class="cursor-pointer font-medium" { (faq.question) }
                        p class="mt-2 text-sm text-gray-600 dark:text-gray-300" { (faq.answer) }
                    }
                }
            }
        }
    }
}

fn faq_tab() -> Markup {
    html! {
        div class="space-y-4"
        {
            label for="faq-search" class="sr-only" { "Search FAQs" }
            input
                id="faq-search"
                name="search"
                type="search"
                placeholder="Search FAQs..."
                autocomplete="off"
                hx-get=(endpoints::FAQ)
                hx-trigger="input changed delay:300ms, search"
                hx-target={ "#" (FAQ_LIST_ID) }
                hx-swap="outerHTML"
                class=(FORM_TEXT_INPUT_STYLE);

            (faq_list(""))
        }
    }
}

fn contact_tab() -> Markup {
    html! {
        div class="space-y-4"
        {
            div class="rounded-lg border border-gray-200 dark:border-gray-700 p-4"
            {
                h4 class="font-medium" { "Email Support" }
                p class="text-sm text-gray-600 dark:text-gray-300"
                {
                    "Send us a message at "
                    a href={ "mailto:" (SUPPORT_EMAIL) } class="text-blue-600 hover:underline"
                    {
                        (SUPPORT_EMAIL)
                    }
                }
            }

            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                "We typically respond to emails within 24 hours on business days."
            }
        }
    }
}

fn help_dialog(tab: HelpTab) -> Markup {
    let config = DialogConfig::new("Help & Support").size(DialogSize::Large);

    let body = html! {
        div class="p-6 space-y-6"
        {
            div role="tablist" class="flex space-x-2 border-b border-gray-200 dark:border-gray-700"
            {
                @for option in HelpTab::ALL {
                    @let is_current = option == tab;
                    @let class = if is_current {
                        "px-4 py-2 text-sm font-medium border-b-2 border-blue-600 text-blue-600"
                    } else {
                        "px-4 py-2 text-sm font-medium text-gray-500 hover:text-gray-700 \
                        dark:text-gray-400 dark:hover:text-gray-200"
                    };

                    button
                        type="button"
                        role="tab"
                        aria-selected=(if is_current { "true" } else { "false" })
                        data-tab=(option.code())
                        hx-get={ (endpoints::HELP_VIEW) "?tab=" (option.code()) }
                        hx-target=(DIALOG_ROOT_SELECTOR)
                        class=(class)
                    {
                        (option.label())
                    }
                }
            }

            div role="tabpanel"
            {
                @match tab {
                    HelpTab::Faq => (faq_tab()),
                    HelpTab::Contact => (contact_tab()),
                }
            }
        }
    };

    dialog_view(&config, body, None)
}

/// Renders the help dialog on the requested tab.
pub async fn get_help_dialog(Query(query): Query<HelpQuery>) -> Response {
    help_dialog(query.tab).into_response()
}

/// Renders the questions whose question or answer contains the search text.
pub async fn get_faq_list(Query(query): Query<FaqQuery>) -> Response {
    faq_list(&query.search).into_response()
}
