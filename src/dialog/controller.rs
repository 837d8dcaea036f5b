//! The headless dialog controller.
//!
//! The controller owns the dialog's open state and the resources it holds
//! while open. Opening acquires a [FocusScope] (focus moved into the dialog,
//! page scrolling locked) and every close path releases it, including the
//! controller being dropped while the dialog is still open.

use super::config::{ClosePolicy, DismissTrigger};

/// The environment a dialog is mounted in, e.g. a browser document.
pub trait DialogHost {
    /// A handle to a focusable element.
    type Element: Clone;

    /// The element that currently has input focus, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Move input focus to `element`.
    fn focus(&mut self, element: &Self::Element);

    /// Move input focus into the dialog panel.
    fn focus_dialog(&mut self);

    /// Stop or resume scrolling of the page behind the dialog.
    fn set_scroll_locked(&mut self, locked: bool);
}

/// The focus and scroll lock held by an open dialog.
#[must_use = "a focus scope must be released to restore focus and scrolling"]
#[derive(Debug)]
pub struct FocusScope<E> {
    previous_focus: Option<E>,
}

impl<E: Clone> FocusScope<E> {
    /// Capture the focused element, focus the dialog and lock scrolling.
    pub fn acquire<H>(host: &mut H) -> Self
    where
        H: DialogHost<Element = E>,
    {
        let previous_focus = host.active_element();
        host.focus_dialog();
        host.set_scroll_locked(true);

        Self { previous_focus }
    }

    /// Unlock scrolling and give focus back to the captured element.
    pub fn release<H>(self, host: &mut H)
    where
        H: DialogHost<Element = E>,
    {
        host.set_scroll_locked(false);

        if let Some(element) = &self.previous_focus {
            host.focus(element);
        }
    }
}

/// The result of a user asking to dismiss a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    /// The dialog was open and is now closed.
    Closed,
    /// The dialog was closed already or the policy does not allow the trigger.
    Ignored,
}

/// Manages one dialog: its open state, its dismissal policy and the focus
/// scope held while it is open.
pub struct DialogController<H: DialogHost> {
    host: H,
    policy: ClosePolicy,
    scope: Option<FocusScope<H::Element>>,
}

impl<H: DialogHost> DialogController<H> {
    /// Create a closed dialog mounted in `host`.
    pub fn new(host: H, policy: ClosePolicy) -> Self {
        Self {
            host,
            policy,
            scope: None,
        }
    }

    /// Whether the dialog currently holds a focus scope.
    pub fn is_open(&self) -> bool {
        self.scope.is_some()
    }

    /// The rules applied to user dismissal.
    pub fn policy(&self) -> ClosePolicy {
        self.policy
    }

    /// Replace the dismissal policy, e.g. to block closing while an action
    /// is in flight.
    pub fn set_policy(&mut self, policy: ClosePolicy) {
        self.policy = policy;
    }

    /// The environment the dialog is mounted in.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Open the dialog. Opening an open dialog does nothing.
    pub fn open(&mut self) {
        if self.scope.is_none() {
            self.scope = Some(FocusScope::acquire(&mut self.host));
        }
    }

    /// Close the dialog on behalf of its owner.
    ///
    /// The owner may always close its dialog, `prevent_close` only applies to
    /// user dismissal. Closing a closed dialog does nothing.
    pub fn close(&mut self) {
        if let Some(scope) = self.scope.take() {
            scope.release(&mut self.host);
        }
    }

    /// Drive the dialog from an owner's open flag.
    pub fn set_open(&mut self, open: bool) {
        if open {
            self.open();
        } else {
            self.close();
        }
    }

    /// Handle a user's request to dismiss the dialog.
    ///
    /// Requests the policy does not permit are dropped, they are not
    /// remembered for when the policy changes.
    pub fn dispatch(&mut self, trigger: DismissTrigger) -> DismissOutcome {
        if !self.is_open() {
            return DismissOutcome::Ignored;
        }

        if !self.policy.permits(trigger) {
            tracing::debug!("Ignoring {trigger:?} for dialog with policy {:?}", self.policy);
            return DismissOutcome::Ignored;
        }

        self.close();
        DismissOutcome::Closed
    }
}

impl<H: DialogHost> Drop for DialogController<H> {
    fn drop(&mut self) {
        self.close();
    }
}
