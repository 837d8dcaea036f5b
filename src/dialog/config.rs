//! Configuration for dialogs: size, semantic kind and the dismissal policy.

/// How wide a dialog panel may grow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DialogSize {
    /// Confirmations and alerts.
    Small,
    /// Forms with a handful of fields.
    #[default]
    Medium,
    /// Tabbed or longer content such as the help dialog.
    Large,
    /// `max-w-xl`
    ExtraLarge,
    /// `max-w-2xl`
    TwoExtraLarge,
    /// `max-w-3xl`
    ThreeExtraLarge,
    /// Spans the viewport width minus a small margin.
    Full,
}

impl DialogSize {
    /// The CSS classes that constrain the panel width.
    pub fn width_class(self) -> &'static str {
        match self {
            DialogSize::Small => "max-w-sm",
            DialogSize::Medium => "max-w-md",
            DialogSize::Large => "max-w-lg",
            DialogSize::ExtraLarge => "max-w-xl",
            DialogSize::TwoExtraLarge => "max-w-2xl",
            DialogSize::ThreeExtraLarge => "max-w-3xl",
            DialogSize::Full => "max-w-full mx-4",
        }
    }
}

/// The icons a dialog header can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogIcon {
    /// A tick in a circle.
    CheckCircle,
    /// An exclamation mark in a triangle.
    AlertTriangle,
    /// An exclamation mark in a circle.
    AlertCircle,
    /// An "i" in a circle.
    Info,
}

/// The icon and colours used for a dialog kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStyle {
    /// Shown before the title. `None` for [DialogKind::Default].
    pub icon: Option<DialogIcon>,
    /// Colour of the title text.
    pub header_class: &'static str,
    /// Colour of the circle behind the icon.
    pub icon_background_class: &'static str,
    /// Colour of the icon itself.
    pub icon_class: &'static str,
}

/// The semantic category of a dialog, which decides its icon and colours.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Neutral header without an icon.
    #[default]
    Default,
    /// A completed action.
    Success,
    /// An action that needs care, e.g. deleting.
    Warning,
    /// A failed action.
    Error,
    /// Neutral information with an icon.
    Info,
}

impl DialogKind {
    /// The icon and header colours for this kind.
    pub fn style(self) -> KindStyle {
        match self {
            DialogKind::Default => KindStyle {
                icon: None,
                header_class: "text-gray-900 dark:text-white",
                icon_background_class: "",
                icon_class: "",
            },
            DialogKind::Success => KindStyle {
                icon: Some(DialogIcon::CheckCircle),
                header_class: "text-green-600 dark:text-green-400",
                icon_background_class: "bg-green-100 dark:bg-green-900/40",
                icon_class: "text-green-600 dark:text-green-400",
            },
            DialogKind::Warning => KindStyle {
                icon: Some(DialogIcon::AlertTriangle),
                header_class: "text-amber-600 dark:text-amber-400",
                icon_background_class: "bg-amber-100 dark:bg-amber-900/40",
                icon_class: "text-amber-600 dark:text-amber-400",
            },
            DialogKind::Error => KindStyle {
                icon: Some(DialogIcon::AlertCircle),
                header_class: "text-red-600 dark:text-red-400",
                icon_background_class: "bg-red-100 dark:bg-red-900/40",
                icon_class: "text-red-600 dark:text-red-400",
            },
            DialogKind::Info => KindStyle {
                icon: Some(DialogIcon::Info),
                header_class: "text-blue-600 dark:text-blue-400",
                icon_background_class: "bg-blue-100 dark:bg-blue-900/40",
                icon_class: "text-blue-600 dark:text-blue-400",
            },
        }
    }

    /// The button colours for the primary action of a dialog of this kind.
    pub fn action_button_class(self) -> &'static str {
        match self {
            DialogKind::Error => "bg-red-600 hover:enabled:bg-red-700 focus:ring-red-500",
            DialogKind::Warning => "bg-amber-600 hover:enabled:bg-amber-700 focus:ring-amber-500",
            DialogKind::Default | DialogKind::Success | DialogKind::Info => {
                "bg-blue-600 hover:enabled:bg-blue-700 focus:ring-blue-500"
            }
        }
    }
}

/// A user action that asks for the dialog to be dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    /// The escape key.
    Escape,
    /// A click on the backdrop around the panel.
    OverlayClick,
    /// The close button in the header.
    CloseButton,
}

/// Which user actions may dismiss a dialog.
///
/// `prevent_close` overrides every other flag: while it is set no user
/// action closes the dialog and the close button is not rendered. Only the
/// owner of the dialog can close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosePolicy {
    /// Render the close button in the header.
    pub show_close_button: bool,
    /// Clicking the backdrop closes the dialog.
    pub close_on_overlay_click: bool,
    /// Pressing escape closes the dialog.
    pub close_on_escape: bool,
    /// Ignore every user dismissal.
    pub prevent_close: bool,
}

impl Default for ClosePolicy {
    fn default() -> Self {
        Self::DISMISSIBLE
    }
}

impl ClosePolicy {
    /// Every dismissal path is enabled.
    pub const DISMISSIBLE: ClosePolicy = ClosePolicy {
        show_close_button: true,
        close_on_overlay_click: true,
        close_on_escape: true,
        prevent_close: false,
    };

    /// No dismissal path is enabled.
    pub const BLOCKING: ClosePolicy = ClosePolicy {
        show_close_button: false,
        close_on_overlay_click: false,
        close_on_escape: false,
        prevent_close: true,
    };

    /// Returns a copy of the policy with `prevent_close` set to `prevent_close`.
    pub fn preventing_close(self, prevent_close: bool) -> Self {
        Self {
            prevent_close,
            ..self
        }
    }

    /// Whether `trigger` is allowed to close the dialog.
    pub fn permits(self, trigger: DismissTrigger) -> bool {
        if self.prevent_close {
            return false;
        }

        match trigger {
            DismissTrigger::Escape => self.close_on_escape,
            DismissTrigger::OverlayClick => self.close_on_overlay_click,
            DismissTrigger::CloseButton => self.show_close_button,
        }
    }

    /// Whether the close button should be part of the dialog header.
    pub fn renders_close_button(self) -> bool {
        self.permits(DismissTrigger::CloseButton)
    }
}

/// Everything about a dialog except its body and footer content.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    pub title: Option<String>,
    pub size: DialogSize,
    pub kind: DialogKind,
    pub policy: ClosePolicy,
    /// Prefixes the IDs of the elements in the dialog. Defaults to "dialog".
    pub id: Option<String>,
}

impl DialogConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_owned()),
            ..Default::default()
        }
    }

    pub fn size(mut self, size: DialogSize) -> Self {
        self.size = size;
        self
    }

    pub fn kind(mut self, kind: DialogKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn policy(mut self, policy: ClosePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// The ID of `part` of the dialog, e.g. "dialog-title".
    pub fn element_id(&self, part: &str) -> String {
        format!("{}-{part}", self.id.as_deref().unwrap_or("dialog"))
    }

    /// Whether the header row is rendered at all.
    pub fn has_header(&self) -> bool {
        self.title.is_some() || self.policy.renders_close_button()
    }
}
