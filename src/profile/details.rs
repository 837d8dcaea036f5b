//! The profile dialog and the endpoint for saving profile details.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    AppState, Error,
    dialog::{DIALOG_ROOT_SELECTOR, DialogConfig, DialogSize, LoadingDialog, dialog_view},
    endpoints,
    html::{BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, field_error},
};

use super::{
    core::{PasswordErrors, ProfileDetails, ProfileErrors, UserProfile},
    password::password_section,
};

const PROFILE_FORM_ID: &str = "profile-form";
const SAVING_INDICATOR_ID: &str = "profile-saving";

/// The ID of the user's name in the navigation bar, updated out of band
/// when the profile is saved.
pub const NAV_USER_NAME_ID: &str = "nav-user-name";

pub(super) const PRIMARY_ACTION_STYLE: &str = "px-4 py-2 text-sm font-medium text-white \
    bg-blue-600 rounded-lg hover:enabled:bg-blue-700 disabled:opacity-50 \
    disabled:cursor-not-allowed transition-colors";

/// The state needed to view and update the profile.
#[derive(Debug, Clone)]
pub struct ProfileState {
    pub profile: Arc<Mutex<UserProfile>>,
    /// How long saves wait before responding.
    pub simulated_latency: Duration,
}

impl FromRef<AppState> for ProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            profile: state.profile.clone(),
            simulated_latency: state.simulated_latency,
        }
    }
}

/// Which parts of the profile dialog to show.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    /// Show the profile as an editable form.
    pub edit: Option<bool>,
    /// Show the change password form.
    pub password: Option<bool>,
}

/// The form data for the profile details.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub date_of_birth: Option<Date>,
}

impl From<ProfileForm> for ProfileDetails {
    fn from(form: ProfileForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            date_of_birth: form.date_of_birth,
        }
    }
}

/// How the profile dialog is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ProfileMode<'a> {
    View,
    /// The details as entered and the fields that failed validation.
    Edit(&'a ProfileDetails, ProfileErrors),
    /// The view mode with the change password form open.
    ChangePassword(PasswordErrors),
}

/// Format `date` like "January 15, 2023".
pub(super) fn format_long_date(date: Date) -> String {
    date.format(format_description!(
        "[month repr:long] [day padding:none], [year]"
    ))
    .unwrap_or_else(|error| {
        tracing::error!("Could not format date {date}: {error}");
        date.to_string()
    })
}

/// The name in the navigation bar, swapped in out of band.
fn nav_user_name_oob(name: &str) -> Markup {
    html! {
        span id=(NAV_USER_NAME_ID) hx-swap-oob="true" { (name) }
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

pub(super) fn profile_dialog(profile: &UserProfile, mode: ProfileMode<'_>) -> Markup {
    let is_editing = matches!(mode, ProfileMode::Edit(..));
    let title = if is_editing {
        "Edit Profile"
    } else {
        "User Profile"
    };
    let config = DialogConfig::new(title).size(DialogSize::Large);
    let details = match &mode {
        ProfileMode::Edit(details, _) => *details,
        ProfileMode::View | ProfileMode::ChangePassword(_) => &profile.details,
    };

    let body = html! {
        div class="p-6 space-y-6"
        {
            div class="flex items-center space-x-6"
            {
                div
                    class="w-20 h-20 rounded-full flex items-center justify-center
                        bg-gradient-to-br from-blue-500 to-indigo-500 text-2xl font-bold text-white"
                    aria-hidden="true"
                {
                    (initials(&profile.details.name))
                }

                div
                {
                    h3 class="text-xl font-bold" { (profile.details.name) }
                    p class="text-gray-500 dark:text-gray-400" { (profile.details.email) }
                    p class="text-sm text-gray-400" data-join-date
                    {
                        "Member since " (format_long_date(profile.join_date))
                    }
                }
            }

            section class="space-y-4"
            {
                h4 class="text-lg font-semibold" { "Basic Information" }

                @match &mode {
                    ProfileMode::Edit(_, errors) => (profile_form(details, errors)),
                    ProfileMode::View | ProfileMode::ChangePassword(_) => (profile_details(details)),
                }
            }

            @if let ProfileMode::ChangePassword(errors) = &mode {
                (password_section(errors))
            }
        }
    };

    let footer = html! {
        div class="flex items-center justify-between"
        {
            div
            {
                @if !is_editing {
                    button
                        type="button"
                        hx-get={ (endpoints::PROFILE_VIEW) "?password=true" }
                        hx-target=(DIALOG_ROOT_SELECTOR)
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Change Password"
                    }
                }
            }

            div class="flex items-center space-x-3"
            {
                @if is_editing {
                    button
                        type="button"
                        hx-get=(endpoints::PROFILE_VIEW)
                        hx-target=(DIALOG_ROOT_SELECTOR)
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Cancel"
                    }

                    button type="submit" form=(PROFILE_FORM_ID) class=(PRIMARY_ACTION_STYLE)
                    {
                        "Save Changes"
                    }
                } @else {
                    button
                        type="button"
                        hx-get={ (endpoints::PROFILE_VIEW) "?edit=true" }
                        hx-target=(DIALOG_ROOT_SELECTOR)
                        class=(PRIMARY_ACTION_STYLE)
                    {
                        "Edit Profile"
                    }
                }
            }
        }
    };

    // Shown over the profile dialog while a save is in flight.
    let saving_indicator = LoadingDialog {
        message: "Saving...",
        ..Default::default()
    };

    html! {
        (dialog_view(&config, body, Some(footer)))

        @if is_editing {
            (saving_indicator.into_indicator_html(SAVING_INDICATOR_ID))
        }
    }
}

fn detail_row(label: &str, value: &str) -> Markup {
    html! {
        div
        {
            dt class=(FORM_LABEL_STYLE) { (label) }
            dd class="px-3 py-2 rounded-lg bg-gray-50 dark:bg-gray-700" { (value) }
        }
    }
}

fn profile_details(details: &ProfileDetails) -> Markup {
    let date_of_birth = details
        .date_of_birth
        .map(format_long_date)
        .unwrap_or_else(|| "Not set".to_owned());

    html! {
        dl class="grid grid-cols-1 md:grid-cols-2 gap-4"
        {
            (detail_row("Full Name", &details.name))
            (detail_row("Email Address", &details.email))
            (detail_row("Phone Number", &details.phone))
            (detail_row("Date of Birth", &date_of_birth))
            (detail_row("Address", &details.address))
        }
    }
}

fn profile_form(details: &ProfileDetails, errors: &ProfileErrors) -> Markup {
    html! {
        form
            id=(PROFILE_FORM_ID)
            hx-put=(endpoints::PROFILE_API)
            hx-target=(DIALOG_ROOT_SELECTOR)
            hx-indicator={ "#" (SAVING_INDICATOR_ID) }
            class="space-y-4"
        {
            div class="grid grid-cols-1 md:grid-cols-2 gap-4"
            {
                div
                {
                    label for="profile-name" class=(FORM_LABEL_STYLE) { "Full Name" }
                    input
                        id="profile-name"
                        name="name"
                        type="text"
                        placeholder="Enter your full name"
                        value=(details.name)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error(errors.name))
                }

                div
                {
                    label for="profile-email" class=(FORM_LABEL_STYLE) { "Email Address" }
                    input
                        id="profile-email"
                        name="email"
                        type="email"
                        placeholder="Enter your email"
                        value=(details.email)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error(errors.email))
                }

                div
                {
                    label for="profile-phone" class=(FORM_LABEL_STYLE) { "Phone Number" }
                    input
                        id="profile-phone"
                        name="phone"
                        type="tel"
                        placeholder="Enter your phone number"
                        value=(details.phone)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                    (field_error(errors.phone))
                }

                div
                {
                    label for="profile-date-of-birth" class=(FORM_LABEL_STYLE) { "Date of Birth" }
                    input
                        id="profile-date-of-birth"
                        name="date_of_birth"
                        type="date"
                        value=[details.date_of_birth]
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="profile-address" class=(FORM_LABEL_STYLE) { "Address" }
                textarea
                    id="profile-address"
                    name="address"
                    rows="3"
                    placeholder="Enter your address"
                    class={ (FORM_TEXT_INPUT_STYLE) " resize-none" }
                {
                    (details.address)
                }
            }
        }
    }
}

/// Renders the profile dialog.
pub async fn get_profile_dialog(
    State(state): State<ProfileState>,
    Query(query): Query<ProfileQuery>,
) -> Response {
    let Ok(profile) = state
        .profile
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire profile lock: {error}"))
    else {
        return Error::StateLockError.into_alert_response();
    };

    let mode = if query.edit.unwrap_or_default() {
        ProfileMode::Edit(&profile.details, ProfileErrors::default())
    } else if query.password.unwrap_or_default() {
        ProfileMode::ChangePassword(PasswordErrors::default())
    } else {
        ProfileMode::View
    };

    profile_dialog(&profile, mode).into_response()
}

/// A route handler for saving the profile details.
///
/// Responds with the profile dialog: in view mode with the saved details, or
/// in edit mode with the field errors.
pub async fn update_profile_endpoint(
    State(state): State<ProfileState>,
    Form(form): Form<ProfileForm>,
) -> Response {
    // Sleep before locking, the lock is never held across an await.
    tokio::time::sleep(state.simulated_latency).await;

    let Ok(mut profile) = state
        .profile
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire profile lock: {error}"))
    else {
        return Error::StateLockError.into_alert_response();
    };

    let details = ProfileDetails::from(form);

    match details.clone().validate() {
        Ok(details) => {
            profile.details = details;
            tracing::info!("Updated profile for {}", profile.details.name);

            html! {
                (profile_dialog(&profile, ProfileMode::View))
                (nav_user_name_oob(&profile.details.name))
            }
            .into_response()
        }
        Err(errors) => {
            profile_dialog(&profile, ProfileMode::Edit(&details, errors)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::extract::{Query, State};
    use axum_extra::extract::Form;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        endpoints,
        profile::UserProfile,
        test_utils::{
            assert_form_error_message, assert_form_input_with_value, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_dialog, must_get_form, must_get_text,
            parse_html_fragment,
        },
    };

    use super::{
        NAV_USER_NAME_ID, ProfileForm, ProfileQuery, ProfileState, format_long_date,
        get_profile_dialog, initials, update_profile_endpoint,
    };

    fn test_state() -> ProfileState {
        ProfileState {
            profile: Arc::new(Mutex::new(UserProfile::default())),
            simulated_latency: Duration::ZERO,
        }
    }

    fn valid_form() -> ProfileForm {
        ProfileForm {
            name: " Jane Doe ".to_owned(),
            email: "jane@example.com".to_owned(),
            phone: "+44 20 7946 0000".to_owned(),
            address: "1 High Street".to_owned(),
            date_of_birth: None,
        }
    }

    #[test]
    fn formats_long_dates() {
        assert_eq!(format_long_date(date!(2023 - 01 - 15)), "January 15, 2023");
        assert_eq!(format_long_date(date!(2024 - 11 - 03)), "November 3, 2024");
    }

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(initials("john doe"), "JD");
        assert_eq!(initials("Ada"), "A");
        assert_eq!(initials("Mary Ann Smith"), "MA");
    }

    #[tokio::test]
    async fn view_mode_shows_details() {
        let response =
            get_profile_dialog(State(test_state()), Query(ProfileQuery::default())).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        must_get_dialog(&html);
        assert_eq!(must_get_text(&html, "#dialog-title"), "User Profile");
        assert_eq!(
            must_get_text(&html, "[data-join-date]"),
            "Member since January 15, 2023"
        );
        assert!(
            html.select(&Selector::parse("form").unwrap()).next().is_none(),
            "view mode should not render a form"
        );
    }

    #[tokio::test]
    async fn edit_mode_renders_form() {
        let query = ProfileQuery {
            edit: Some(true),
            password: None,
        };

        let response = get_profile_dialog(State(test_state()), Query(query)).await;

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_eq!(must_get_text(&html, "#dialog-title"), "Edit Profile");
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::PROFILE_API, "hx-put");
        assert_form_input_with_value(&form, "name", "text", "John Doe");
        assert_form_input_with_value(&form, "email", "email", "john.doe@example.com");
        assert_form_input_with_value(&form, "phone", "tel", "+1 (555) 123-4567");
    }

    #[tokio::test]
    async fn password_mode_shows_password_form() {
        let query = ProfileQuery {
            edit: None,
            password: Some(true),
        };

        let response = get_profile_dialog(State(test_state()), Query(query)).await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::PASSWORD_API, "hx-post");
    }

    #[tokio::test]
    async fn saving_updates_profile_and_nav() {
        let state = test_state();

        let response = update_profile_endpoint(State(state.clone()), Form(valid_form())).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_eq!(must_get_text(&html, "#dialog-title"), "User Profile");
        assert_eq!(must_get_text(&html, &format!("#{NAV_USER_NAME_ID}")), "Jane Doe");
        let profile = state.profile.lock().unwrap();
        assert_eq!(profile.details.name, "Jane Doe");
        assert_eq!(profile.details.date_of_birth, None);
    }

    #[tokio::test]
    async fn invalid_profile_is_not_saved() {
        let state = test_state();
        let form = ProfileForm {
            email: "not-an-email".to_owned(),
            ..valid_form()
        };

        let response = update_profile_endpoint(State(state.clone()), Form(form)).await;

        let html = parse_html_fragment(response).await;
        assert_eq!(must_get_text(&html, "#dialog-title"), "Edit Profile");
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Please enter a valid email");
        assert_form_input_with_value(&form, "email", "email", "not-an-email");
        assert_eq!(state.profile.lock().unwrap().details.name, "John Doe");
    }
}
