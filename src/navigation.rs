//! The navigation bar with the profile menu.

use maud::{Markup, html};

use crate::{dialog::DIALOG_ROOT_SELECTOR, endpoints, profile::NAV_USER_NAME_ID};

/// An entry in the profile menu. Each entry opens a dialog.
struct MenuItem<'a> {
    url: &'a str,
    title: &'a str,
}

const MENU_ITEMS: [MenuItem<'static>; 3] = [
    MenuItem {
        url: endpoints::PROFILE_VIEW,
        title: "Profile",
    },
    MenuItem {
        url: endpoints::SETTINGS_VIEW,
        title: "Settings",
    },
    MenuItem {
        url: endpoints::HELP_VIEW,
        title: "Help & Support",
    },
];

impl MenuItem<'_> {
    fn into_html(self) -> Markup {
        html! {
            li
            {
                button
                    type="button"
                    role="menuitem"
                    hx-get=(self.url)
                    hx-target=(DIALOG_ROOT_SELECTOR)
                    class="block w-full text-left rounded-lg px-3 py-2 text-sm
                        text-gray-700 hover:bg-gray-100 hover:text-blue-700
                        dark:text-gray-200 dark:hover:bg-gray-800 dark:hover:text-blue-200"
                {
                    (self.title)
                }
            }
        }
    }
}

/// Renders the navigation bar. `user_name` is shown on the profile menu button.
pub fn nav_bar(user_name: &str) -> Markup {
    // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
    html!(
        nav class="bg-white border-gray-200 dark:bg-gray-900"
        {
            div
                class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
            {
                a
                    href=(endpoints::ROOT)
                    class="flex items-center space-x-3 rtl:space-x-reverse"
                {
                    span
                        class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Pennywise"
                    }
                }

                details class="relative" data-profile-menu
                {
                    summary
                        class="list-none [&::-webkit-details-marker]:hidden flex items-center
                            gap-2 cursor-pointer rounded-lg px-3 py-2 text-sm font-medium
                            text-gray-700 hover:bg-gray-100 dark:text-gray-200 dark:hover:bg-gray-800"
                        aria-haspopup="menu"
                    {
                        span id=(NAV_USER_NAME_ID) { (user_name) }
                    }

                    ul
                        role="menu"
                        class="absolute right-0 z-40 mt-2 w-48 flex flex-col gap-1 rounded-xl
                            border border-gray-200 bg-white p-2 shadow-xl
                            dark:border-gray-700 dark:bg-gray-900"
                    {
                        @for item in MENU_ITEMS {
                            (item.into_html())
                        }
                    }
                }
            }
        }
    )
}
