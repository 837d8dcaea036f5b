//! The settings dialog and the endpoint for saving settings.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dialog::{DialogConfig, DialogKind, DialogSize, dialog_view},
    endpoints,
    html::{BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

use super::{
    core::{Currency, Language, Settings, UserProfile},
    details::PRIMARY_ACTION_STYLE,
};

const SETTINGS_FORM_ID: &str = "settings-form";

/// The state needed to view and update the settings.
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub profile: Arc<Mutex<UserProfile>>,
}

impl FromRef<AppState> for SettingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            profile: state.profile.clone(),
        }
    }
}

/// The form data for the settings.
///
/// Unchecked checkboxes are not submitted, so every toggle defaults to off.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub notifications: bool,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub push_notifications: bool,
    #[serde(default)]
    pub auto_save: bool,
    #[serde(default)]
    pub two_factor_auth: bool,
    pub language: Language,
    pub currency: Currency,
}

impl From<SettingsForm> for Settings {
    fn from(form: SettingsForm) -> Self {
        Self {
            dark_mode: form.dark_mode,
            notifications: form.notifications,
            email_notifications: form.email_notifications,
            push_notifications: form.push_notifications,
            auto_save: form.auto_save,
            two_factor_auth: form.two_factor_auth,
            language: form.language,
            currency: form.currency,
        }
    }
}

fn toggle(name: &str, label: &str, description: &str, checked: bool) -> Markup {
    html! {
        div class="flex items-center justify-between gap-4"
        {
            div
            {
                label for={ "setting-" (name) } class="text-sm font-medium" { (label) }
                p class="text-xs text-gray-500 dark:text-gray-400" { (description) }
            }

            input
                id={ "setting-" (name) }
                name=(name)
                type="checkbox"
                role="switch"
                value="true"
                checked[checked]
                class="w-5 h-5 rounded accent-blue-600";
        }
    }
}

fn settings_dialog(settings: &Settings) -> Markup {
    let config = DialogConfig::new("Settings")
        .size(DialogSize::Medium)
        .kind(DialogKind::Default);

    let body = html! {
        form
            id=(SETTINGS_FORM_ID)
            hx-put=(endpoints::SETTINGS_API)
            class="p-6 space-y-6"
        {
            section class="space-y-4"
            {
                h3 class="text-lg font-medium" { "General" }

                div
                {
                    label for="setting-language" class=(FORM_LABEL_STYLE) { "Language" }
                    select id="setting-language" name="language" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for language in Language::ALL {
                            option value=(language.code()) selected[settings.language == language]
                            {
                                (language.label())
                            }
                        }
                    }
                }

                div
                {
                    label for="setting-currency" class=(FORM_LABEL_STYLE) { "Currency" }
                    select id="setting-currency" name="currency" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for currency in Currency::ALL {
                            option value=(currency.code()) selected[settings.currency == currency]
                            {
                                (currency.code()) " (" (currency.symbol()) ")"
                            }
                        }
                    }
                }

                (toggle("dark_mode", "Dark Mode", "Use a dark color scheme", settings.dark_mode))
            }

            section class="space-y-4"
            {
                h3 class="text-lg font-medium" { "Notifications" }

                (toggle("notifications", "Notifications", "Receive app notifications", settings.notifications))
                (toggle("email_notifications", "Email Notifications", "Receive updates via email", settings.email_notifications))
                (toggle("push_notifications", "Push Notifications", "Receive push notifications", settings.push_notifications))
            }

            section class="space-y-4"
            {
                h3 class="text-lg font-medium" { "Data & Privacy" }

                (toggle("auto_save", "Auto Save", "Save changes automatically", settings.auto_save))
                (toggle("two_factor_auth", "Two-Factor Authentication", "Add an extra layer of security", settings.two_factor_auth))
            }
        }
    };

    let footer = html! {
        div class="flex items-center justify-end space-x-3"
        {
            button type="button" data-dialog-close class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
            button type="submit" form=(SETTINGS_FORM_ID) class=(PRIMARY_ACTION_STYLE) { "Save Settings" }
        }
    };

    dialog_view(&config, body, Some(footer))
}

/// Renders the settings dialog.
pub async fn get_settings_dialog(State(state): State<SettingsState>) -> Response {
    let Ok(profile) = state
        .profile
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire profile lock: {error}"))
    else {
        return Error::StateLockError.into_alert_response();
    };

    settings_dialog(&profile.settings).into_response()
}

/// A route handler for saving the settings, reloads the dashboard on success
/// so the colour scheme and currency apply to the whole page.
pub async fn update_settings_endpoint(
    State(state): State<SettingsState>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let Ok(mut profile) = state
        .profile
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire profile lock: {error}"))
    else {
        return Error::StateLockError.into_alert_response();
    };

    profile.settings = Settings::from(form);
    tracing::info!("Updated settings: {:?}", profile.settings);

    (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER).into_response()
}
