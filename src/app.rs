//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::app_shell::AppShell;
use crate::components::require_session::RequireSession;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::section::{Section, SectionPage};
use crate::state::session::SessionContext;

/// Root application component.
///
/// Provides the session context and sets up client-side routing. Every route
/// except the login page goes through `RequireSession`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(SessionContext::new());

    view! {
        <Title text="Back Office"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=ProtectedDashboard/>
                <Route path=StaticSegment(Section::Invoices.segment()) view=|| view! { <ProtectedSection section=Section::Invoices/> }/>
                <Route path=StaticSegment(Section::Sales.segment()) view=|| view! { <ProtectedSection section=Section::Sales/> }/>
                <Route path=StaticSegment(Section::Receivables.segment()) view=|| view! { <ProtectedSection section=Section::Receivables/> }/>
                <Route path=StaticSegment(Section::Payables.segment()) view=|| view! { <ProtectedSection section=Section::Payables/> }/>
                <Route path=StaticSegment(Section::Inventory.segment()) view=|| view! { <ProtectedSection section=Section::Inventory/> }/>
            </Routes>
        </Router>
    }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! {
        <RequireSession>
            <AppShell>
                <DashboardPage/>
            </AppShell>
        </RequireSession>
    }
}

#[component]
fn ProtectedSection(section: Section) -> impl IntoView {
    view! {
        <RequireSession>
            <AppShell>
                <SectionPage section=section/>
            </AppShell>
        </RequireSession>
    }
}
