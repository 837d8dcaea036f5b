//! Changing the password from the profile dialog.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    dialog::{AlertDialog, DIALOG_ROOT_SELECTOR},
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, field_error, loading_spinner},
};

use super::{
    core::{MIN_PASSWORD_LENGTH, PasswordErrors, validate_password_change},
    details::{PRIMARY_ACTION_STYLE, ProfileMode, ProfileState, profile_dialog},
};

/// The form data for changing the password.
#[derive(Debug, Default, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

fn password_input(id: &str, label: &str, error: Option<&str>) -> Markup {
    html! {
        div
        {
            label for={ "password-" (id) } class=(FORM_LABEL_STYLE) { (label) }
            input
                id={ "password-" (id) }
                name=(id)
                type="password"
                autocomplete=(if id == "current_password" { "current-password" } else { "new-password" })
                required
                class=(FORM_TEXT_INPUT_STYLE);
            (field_error(error))
        }
    }
}

/// The change password form. The inputs are always rendered empty.
pub(super) fn password_section(errors: &PasswordErrors) -> Markup {
    html! {
        section class="space-y-4 pt-6 border-t border-gray-200 dark:border-gray-700"
        {
            h4 class="text-lg font-semibold" { "Change Password" }

            form
                hx-post=(endpoints::PASSWORD_API)
                hx-target=(DIALOG_ROOT_SELECTOR)
                class="space-y-4"
            {
                (password_input("current_password", "Current Password", errors.current_password))
                (password_input("new_password", "New Password", errors.new_password))
                (password_input("confirm_password", "Confirm New Password", None))

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "At least " (MIN_PASSWORD_LENGTH) " characters."
                }

                button type="submit" class=(PRIMARY_ACTION_STYLE)
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Update Password"
                }
            }
        }
    }
}

/// A route handler for changing the password.
///
/// There are no stored credentials, so a change is accepted whenever the
/// form is valid. Responds with a success alert, or with the profile dialog
/// showing the field errors.
pub async fn change_password_endpoint(
    State(state): State<ProfileState>,
    Form(form): Form<PasswordForm>,
) -> Response {
    tokio::time::sleep(state.simulated_latency).await;

    match validate_password_change(
        &form.current_password,
        &form.new_password,
        &form.confirm_password,
    ) {
        Ok(()) => {
            tracing::info!("Password changed");
            AlertDialog::success("Success", "Password changed successfully")
                .into_html()
                .into_response()
        }
        Err(errors) => {
            let Ok(profile) = state
                .profile
                .lock()
                .inspect_err(|error| tracing::error!("could not acquire profile lock: {error}"))
            else {
                return Error::StateLockError.into_alert_response();
            };

            profile_dialog(&profile, ProfileMode::ChangePassword(errors)).into_response()
        }
    }
}
