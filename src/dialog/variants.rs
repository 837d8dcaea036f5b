//! Confirmation, alert and loading dialogs built on the generic dialog.
//!
//! Each variant comes in two halves: a content struct that renders the
//! variant's markup through [dialog_view], and a controller that layers the
//! variant's behaviour on top of [DialogController].

use maud::{Markup, html};

use crate::html::loading_spinner;

use super::{
    config::{ClosePolicy, DialogConfig, DialogKind, DialogSize, DismissTrigger},
    controller::{DialogController, DialogHost, DismissOutcome},
    view::{DIALOG_ROOT_SELECTOR, dialog_view},
};

const SECONDARY_BUTTON_STYLE: &str = "px-4 py-2 text-sm font-medium text-gray-700 \
    bg-white border border-gray-300 rounded-lg hover:enabled:bg-gray-50 \
    dark:bg-gray-700 dark:text-gray-200 dark:border-gray-600 \
    disabled:opacity-50 disabled:cursor-not-allowed transition-colors";

const PRIMARY_BUTTON_BASE_STYLE: &str = "px-4 py-2 text-sm font-medium text-white \
    rounded-lg focus:ring-2 focus:ring-offset-2 disabled:opacity-50 \
    disabled:cursor-not-allowed transition-colors";

/// The htmx request a confirmation dialog sends when confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmRequest<'a> {
    Post(&'a str),
    Put(&'a str),
    Delete(&'a str),
}

/// Asks the user to confirm an action before it is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDialog<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub confirm_label: &'a str,
    pub cancel_label: &'a str,
    pub kind: DialogKind,
    /// Whether the action is in flight. Blocks closing and shows a spinner.
    pub is_loading: bool,
    pub request: ConfirmRequest<'a>,
}

impl<'a> ConfirmationDialog<'a> {
    pub fn new(message: &'a str, request: ConfirmRequest<'a>) -> Self {
        Self {
            title: "Confirm Action",
            message,
            confirm_label: "Confirm",
            cancel_label: "Cancel",
            kind: DialogKind::Warning,
            is_loading: false,
            request,
        }
    }

    pub fn config(&self) -> DialogConfig {
        DialogConfig::new(self.title)
            .kind(self.kind)
            .size(DialogSize::Small)
            .policy(confirmation_policy(self.is_loading))
    }

    pub fn into_html(self) -> Markup {
        let config = self.config();
        let confirm_style = format!(
            "{PRIMARY_BUTTON_BASE_STYLE} {}",
            self.kind.action_button_class()
        );
        let confirm_content = html! {
            @if self.is_loading {
                span class="inline-flex items-center" { (loading_spinner()) "Loading..." }
            } @else {
                span class="htmx-indicator" { (loading_spinner()) }
                (self.confirm_label)
            }
        };

        let footer = html! {
            div class="flex items-center justify-end space-x-3"
            {
                button
                    type="button"
                    data-dialog-close
                    disabled[self.is_loading]
                    class=(SECONDARY_BUTTON_STYLE)
                {
                    (self.cancel_label)
                }

                @match self.request {
                    ConfirmRequest::Post(url) => {
                        button type="button" id="confirm-button" hx-post=(url)
                            hx-target-error=(DIALOG_ROOT_SELECTOR)
                            disabled[self.is_loading] class=(confirm_style)
                        { (confirm_content) }
                    }
                    ConfirmRequest::Put(url) => {
                        button type="button" id="confirm-button" hx-put=(url)
                            hx-target-error=(DIALOG_ROOT_SELECTOR)
                            disabled[self.is_loading] class=(confirm_style)
                        { (confirm_content) }
                    }
                    ConfirmRequest::Delete(url) => {
                        button type="button" id="confirm-button" hx-delete=(url)
                            hx-target-error=(DIALOG_ROOT_SELECTOR)
                            disabled[self.is_loading] class=(confirm_style)
                        { (confirm_content) }
                    }
                }
            }
        };

        let body = html! {
            div class="p-6" { p class="text-gray-700 dark:text-gray-300" { (self.message) } }
        };

        dialog_view(&config, body, Some(footer))
    }
}

fn confirmation_policy(is_loading: bool) -> ClosePolicy {
    ClosePolicy::DISMISSIBLE.preventing_close(is_loading)
}

/// Tells the user something and waits for them to acknowledge it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDialog<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub kind: DialogKind,
    pub button_label: &'a str,
}

impl<'a> AlertDialog<'a> {
    pub fn new(kind: DialogKind, title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            kind,
            button_label: "OK",
        }
    }

    pub fn success(title: &'a str, message: &'a str) -> Self {
        Self::new(DialogKind::Success, title, message)
    }

    pub fn error(title: &'a str, message: &'a str) -> Self {
        Self::new(DialogKind::Error, title, message)
    }

    pub fn config(&self) -> DialogConfig {
        DialogConfig::new(self.title)
            .kind(self.kind)
            .size(DialogSize::Small)
    }

    pub fn into_html(self) -> Markup {
        let footer = html! {
            div class="flex justify-end"
            {
                button
                    type="button"
                    data-dialog-close
                    autofocus
                    class={ (PRIMARY_BUTTON_BASE_STYLE) " " (self.kind.action_button_class()) }
                {
                    (self.button_label)
                }
            }
        };
        let body = html! {
            div class="p-6" { p class="text-gray-700 dark:text-gray-300" { (self.message) } }
        };

        dialog_view(&self.config(), body, Some(footer))
    }
}

/// A dialog shown while the app is busy. The user cannot close it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingDialog<'a> {
    pub title: &'a str,
    pub message: &'a str,
}

impl Default for LoadingDialog<'_> {
    fn default() -> Self {
        Self {
            title: "Please Wait",
            message: "Loading...",
        }
    }
}

impl LoadingDialog<'_> {
    pub fn config(&self) -> DialogConfig {
        DialogConfig::new(self.title)
            .size(DialogSize::Small)
            .policy(ClosePolicy::BLOCKING)
    }

    pub fn into_html(self) -> Markup {
        dialog_view(&self.config(), self.body(), None)
    }

    fn body(&self) -> Markup {
        html! {
            div class="p-6 text-center"
            {
                div class="flex items-center justify-center space-x-3"
                {
                    (loading_spinner())
                    p class="text-gray-700 dark:text-gray-300" { (self.message) }
                }
            }
        }
    }

    /// Render the dialog as an htmx request indicator.
    ///
    /// The dialog is hidden until a request that names `id` in its
    /// `hx-indicator` attribute is in flight. Its element IDs are prefixed
    /// with `id` so it can sit next to the dialog that triggers it.
    pub fn into_indicator_html(self, id: &str) -> Markup {
        let config = self.config().id(id);

        html! {
            div id=(id) class="dialog-indicator" { (dialog_view(&config, self.body(), None)) }
        }
    }
}

/// What a confirmed action left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Done,
    /// The action continues in the background, the owner finishes it later.
    Pending,
}

/// Drives a confirmation dialog.
pub struct ConfirmationController<H: DialogHost> {
    dialog: DialogController<H>,
    is_loading: bool,
}

impl<H: DialogHost> ConfirmationController<H> {
    pub fn new(host: H) -> Self {
        Self {
            dialog: DialogController::new(host, confirmation_policy(false)),
            is_loading: false,
        }
    }

    pub fn open(&mut self) {
        self.dialog.open();
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
        self.dialog.set_policy(confirmation_policy(is_loading));
    }

    /// Run `action` and close the dialog unless the action is still pending.
    ///
    /// A pending action puts the dialog into the loading state, leaving it to
    /// the owner to call [ConfirmationController::finish]. Confirming while
    /// loading does nothing, the confirm button is disabled in that state.
    pub fn confirm<F>(&mut self, action: F) -> DismissOutcome
    where
        F: FnOnce() -> ActionState,
    {
        if !self.is_open() || self.is_loading {
            return DismissOutcome::Ignored;
        }

        if action() == ActionState::Pending {
            self.set_loading(true);
            return DismissOutcome::Ignored;
        }

        self.dialog.close();
        DismissOutcome::Closed
    }

    /// Close via the cancel button, which is disabled while loading.
    pub fn cancel(&mut self) -> DismissOutcome {
        if !self.is_open() || self.is_loading {
            return DismissOutcome::Ignored;
        }

        self.dialog.close();
        DismissOutcome::Closed
    }

    pub fn dispatch(&mut self, trigger: DismissTrigger) -> DismissOutcome {
        self.dialog.dispatch(trigger)
    }

    /// Complete a pending action and close the dialog.
    ///
    /// Safe to call after the dialog has been closed already.
    pub fn finish(&mut self) {
        self.set_loading(false);
        self.dialog.close();
    }

    pub fn host(&self) -> &H {
        self.dialog.host()
    }
}

/// Drives an alert dialog.
pub struct AlertController<H: DialogHost> {
    dialog: DialogController<H>,
}

impl<H: DialogHost> AlertController<H> {
    pub fn new(host: H) -> Self {
        Self {
            dialog: DialogController::new(host, ClosePolicy::DISMISSIBLE),
        }
    }

    pub fn open(&mut self) {
        self.dialog.open();
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// Close via the acknowledgement button.
    pub fn acknowledge(&mut self) -> DismissOutcome {
        if !self.is_open() {
            return DismissOutcome::Ignored;
        }

        self.dialog.close();
        DismissOutcome::Closed
    }

    pub fn dispatch(&mut self, trigger: DismissTrigger) -> DismissOutcome {
        self.dialog.dispatch(trigger)
    }
}

/// Drives a loading dialog. Only the owner's open flag closes it.
pub struct LoadingController<H: DialogHost> {
    dialog: DialogController<H>,
}

impl<H: DialogHost> LoadingController<H> {
    pub fn new(host: H) -> Self {
        Self {
            dialog: DialogController::new(host, ClosePolicy::BLOCKING),
        }
    }

    pub fn set_open(&mut self, open: bool) {
        self.dialog.set_open(open);
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    pub fn dispatch(&mut self, trigger: DismissTrigger) -> DismissOutcome {
        self.dialog.dispatch(trigger)
    }
}

#[cfg(test)]
mod controller_tests {
    use crate::dialog::{
        config::DismissTrigger,
        controller::{
            DismissOutcome,
            fake_host::{FakeDocument, Focus},
        },
    };

    use super::{ActionState, AlertController, ConfirmationController, LoadingController};

    #[test]
    fn loading_dialog_ignores_escape_and_overlay_clicks() {
        let document = FakeDocument::focused_on("save-button");
        let mut loading = LoadingController::new(document.clone());
        loading.set_open(true);

        assert_eq!(loading.dispatch(DismissTrigger::Escape), DismissOutcome::Ignored);
        assert_eq!(
            loading.dispatch(DismissTrigger::OverlayClick),
            DismissOutcome::Ignored
        );
        assert_eq!(
            loading.dispatch(DismissTrigger::CloseButton),
            DismissOutcome::Ignored
        );
        assert!(loading.is_open());
        assert!(document.scroll_locked());

        loading.set_open(false);
        assert!(!loading.is_open());
        assert_eq!(document.focus(), Focus::Element("save-button"));
    }

    #[test]
    fn confirming_runs_action_and_restores_focus() {
        let document = FakeDocument::focused_on("delete-button");
        let mut confirmation = ConfirmationController::new(document.clone());
        confirmation.open();
        let mut ran = false;

        let outcome = confirmation.confirm(|| {
            ran = true;
            ActionState::Done
        });

        assert!(ran);
        assert_eq!(outcome, DismissOutcome::Closed);
        assert!(!confirmation.is_open());
        assert_eq!(document.focus(), Focus::Element("delete-button"));
        assert!(!document.scroll_locked());
    }

    #[test]
    fn cancelling_restores_focus() {
        let document = FakeDocument::focused_on("delete-button");
        let mut confirmation = ConfirmationController::new(document.clone());
        confirmation.open();

        assert_eq!(confirmation.cancel(), DismissOutcome::Closed);
        assert_eq!(document.focus(), Focus::Element("delete-button"));
    }

    #[test]
    fn pending_action_keeps_dialog_open_until_finished() {
        let document = FakeDocument::focused_on("delete-button");
        let mut confirmation = ConfirmationController::new(document.clone());
        confirmation.open();

        let outcome = confirmation.confirm(|| ActionState::Pending);

        assert_eq!(outcome, DismissOutcome::Ignored);
        assert!(confirmation.is_open());
        assert!(confirmation.is_loading());
        assert_eq!(
            confirmation.dispatch(DismissTrigger::Escape),
            DismissOutcome::Ignored
        );
        assert_eq!(confirmation.cancel(), DismissOutcome::Ignored);
        assert_eq!(
            confirmation.confirm(|| panic!("confirm must be disabled while loading")),
            DismissOutcome::Ignored
        );

        confirmation.finish();
        assert!(!confirmation.is_open());
        assert_eq!(document.focus(), Focus::Element("delete-button"));
    }

    #[test]
    fn late_completion_after_close_is_a_no_op() {
        let document = FakeDocument::focused_on("delete-button");
        let mut confirmation = ConfirmationController::new(document.clone());
        confirmation.open();
        confirmation.set_loading(true);
        confirmation.set_loading(false);
        confirmation.cancel();

        confirmation.finish();

        assert!(!confirmation.is_open());
        assert_eq!(document.focus(), Focus::Element("delete-button"));
        assert!(!document.scroll_locked());
    }

    #[test]
    fn alert_closes_on_acknowledge() {
        let document = FakeDocument::focused_on("submit");
        let mut alert = AlertController::new(document.clone());
        alert.open();

        assert_eq!(alert.acknowledge(), DismissOutcome::Closed);
        assert_eq!(alert.acknowledge(), DismissOutcome::Ignored);
        assert_eq!(document.focus(), Focus::Element("submit"));
    }

    #[test]
    fn alert_closes_on_escape() {
        let document = FakeDocument::focused_on("submit");
        let mut alert = AlertController::new(document);
        alert.open();

        assert_eq!(alert.dispatch(DismissTrigger::Escape), DismissOutcome::Closed);
    }
}

#[cfg(test)]
mod view_tests {
    use scraper::{Html, Selector};

    use crate::dialog::config::DialogKind;

    use super::{AlertDialog, ConfirmRequest, ConfirmationDialog, LoadingDialog};

    fn parse(markup: maud::Markup) -> Html {
        Html::parse_fragment(&markup.into_string())
    }

    fn count(html: &Html, selector: &str) -> usize {
        html.select(&Selector::parse(selector).unwrap()).count()
    }

    #[test]
    fn confirmation_sends_request_on_confirm() {
        let html = parse(
            ConfirmationDialog::new("Delete it?", ConfirmRequest::Delete("/api/transactions/3"))
                .into_html(),
        );

        let confirm = html
            .select(&Selector::parse("#confirm-button").unwrap())
            .next()
            .expect("no confirm button");
        assert_eq!(confirm.value().attr("hx-delete"), Some("/api/transactions/3"));
        assert_eq!(confirm.value().attr("hx-target-error"), Some("#dialog-root"));
        assert!(confirm.value().attr("disabled").is_none());
    }

    #[test]
    fn loading_confirmation_blocks_closing() {
        let dialog = ConfirmationDialog {
            is_loading: true,
            ..ConfirmationDialog::new("Delete it?", ConfirmRequest::Post("/api/thing"))
        };
        let html = parse(dialog.into_html());

        assert_eq!(count(&html, "[data-prevent-close=true]"), 1);
        assert_eq!(count(&html, "button[disabled]"), 2);
        assert!(html.root_element().text().any(|text| text.contains("Loading...")));
    }

    #[test]
    fn alert_uses_kind_icon() {
        let html = parse(AlertDialog::new(DialogKind::Info, "Heads up", "Hello").into_html());

        assert_eq!(count(&html, "svg[data-icon=info]"), 1);
        // The header close button and the OK button.
        assert_eq!(count(&html, "button[data-dialog-close]"), 2);
    }

    #[test]
    fn loading_dialog_has_no_close_button() {
        let html = parse(LoadingDialog::default().into_html());

        assert_eq!(count(&html, "[data-prevent-close=true]"), 1);
        assert_eq!(count(&html, "[data-close-on-escape=false]"), 1);
        assert_eq!(count(&html, "[data-close-on-overlay=false]"), 1);
        assert_eq!(count(&html, "button"), 0);
    }

    #[test]
    fn loading_indicator_ids_do_not_clash() {
        let html = parse(LoadingDialog::default().into_indicator_html("saving"));

        assert_eq!(count(&html, "div#saving.dialog-indicator"), 1);
        assert_eq!(count(&html, "#saving-panel[aria-labelledby=saving-title]"), 1);
        assert_eq!(count(&html, "#dialog-title"), 0);
    }
}
