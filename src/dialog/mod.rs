//! Modal dialogs.
//!
//! A dialog is configured with a [DialogConfig], rendered server-side with
//! [dialog_view] and swapped into the page's dialog root by htmx.
//!
//! In the browser the rules are enforced by `static/dialog.js`, not by
//! [DialogController]. [dialog_view] writes the result of
//! [ClosePolicy::permits] into the `data-close-on-*` and `data-prevent-close`
//! attributes, and the script only reads them. Keep the two in sync when
//! changing either: a new trigger needs a new attribute and a new case in the
//! script's `permits`. The one rule that exists only in the script is that a
//! dialog with an htmx request in flight cannot be dismissed, which
//! [ConfirmationController] models as its loading state.
//!
//! [DialogController] and the variant controllers describe the same focus and
//! dismissal behaviour against a [DialogHost], which lets the rules be tested
//! without a browser.

mod config;
mod controller;
mod variants;
mod view;

pub use config::{
    ClosePolicy, DialogConfig, DialogIcon, DialogKind, DialogSize, DismissTrigger, KindStyle,
};
pub use controller::{DialogController, DialogHost, DismissOutcome, FocusScope};
pub use variants::{
    ActionState, AlertController, AlertDialog, ConfirmRequest, ConfirmationController,
    ConfirmationDialog, LoadingController, LoadingDialog,
};
pub use view::{DIALOG_ROOT_ID, DIALOG_ROOT_SELECTOR, dialog_root, dialog_view};
