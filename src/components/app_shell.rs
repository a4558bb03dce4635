//! Layout shell for protected views: header, section navigation, logout.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::require_session::redirect_options;
use crate::pages::dashboard::DASHBOARD_ROUTE;
use crate::pages::section::Section;
use crate::state::session::{sign_out, use_session};

/// Chrome around every protected page.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let context = use_session();
    let navigate = use_navigate();
    let pathname = use_location().pathname;

    let nav_class = move |route: &'static str| {
        if pathname.get() == route {
            "shell-nav__link shell-nav__link--active"
        } else {
            "shell-nav__link"
        }
    };

    let on_logout = move |_| {
        sign_out(context);
        navigate(session::ENTRY_ROUTE, redirect_options());
    };

    view! {
        <div class="shell">
            <header class="shell-header">
                <a href=DASHBOARD_ROUTE class="shell-header__brand">"Back Office"</a>
                <span class="shell-header__spacer"></span>
                <span class="shell-header__user">{move || context.display_name()}</span>
                <button class="btn shell-header__logout" on:click=on_logout>
                    "Log out"
                </button>
            </header>
            <div class="shell-body">
                <nav class="shell-nav">
                    <a href=DASHBOARD_ROUTE class=move || nav_class(DASHBOARD_ROUTE)>
                        "Dashboard"
                    </a>
                    {Section::ALL
                        .iter()
                        .map(|section| {
                            let route = section.route();
                            view! {
                                <a href=route class=move || nav_class(route)>
                                    {section.title()}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
                <main class="shell-main">{children()}</main>
            </div>
        </div>
    }
}
