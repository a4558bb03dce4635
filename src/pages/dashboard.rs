//! Dashboard landing page after sign-in.

use leptos::prelude::*;

use crate::pages::section::Section;
use crate::state::session::use_session;

/// Route the login page lands on after a successful sign-in.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[component]
pub fn DashboardPage() -> impl IntoView {
    let context = use_session();

    let greeting = move || {
        let name = context.display_name();
        if name.is_empty() {
            "Welcome back".to_owned()
        } else {
            format!("Welcome back, {name}")
        }
    };

    view! {
        <div class="dashboard-page">
            <h1 class="dashboard-page__greeting">{greeting}</h1>
            <div class="dashboard-grid">
                {Section::ALL
                    .iter()
                    .map(|section| {
                        view! {
                            <a href=section.route() class="dashboard-card">
                                <h2 class="dashboard-card__title">{section.title()}</h2>
                                <p class="dashboard-card__summary">{section.summary()}</p>
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
