//! Bottom tab bar for the signed-in area.

use dioxus::prelude::*;

use crate::app::Route;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Tab {
    Home,
    Search,
    Bookings,
    Saved,
    Profile,
}

impl Tab {
    const ALL: [Tab; 5] = [Tab::Home, Tab::Search, Tab::Bookings, Tab::Saved, Tab::Profile];

    fn route(self) -> Route {
        match self {
            Tab::Home => Route::Home {},
            Tab::Search => Route::Search {},
            Tab::Bookings => Route::Bookings {},
            Tab::Saved => Route::Saved {},
            Tab::Profile => Route::Profile {},
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Search => "Search",
            Tab::Bookings => "Bookings",
            Tab::Saved => "Saved",
            Tab::Profile => "Profile",
        }
    }
}

/// Layout rendering the active tab above the tab bar.
#[component]
pub fn TabBar() -> Element {
    let current = use_route::<Route>();

    rsx! {
        div { class: "tab-screen",
            Outlet::<Route> {}
        }
        nav { class: "tab-bar",
            for tab in Tab::ALL {
                Link {
                    to: tab.route(),
                    class: if tab.route() == current { "tab-item active" } else { "tab-item" },
                    "{tab.label()}"
                }
            }
        }
    }
}
