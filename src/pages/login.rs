//! Login page: email + password exchange for a session token.
//!
//! This is the entry route. Protected routes redirect here whenever their
//! guard cycle ends unauthenticated; if the backend refused the stored token,
//! the stale pair is discarded on arrival.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

use crate::state::session::{browser_session, discard_rejected_session, use_session};

/// Trims the email and requires both fields. The password is passed through
/// untouched unless it is entirely blank.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.trim().is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let context = use_session();
    discard_rejected_session(context, &browser_session());
    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let service = browser_session();
                match service.authenticate(&email_value, &password_value).await {
                    Ok(profile) => {
                        context.set_profile(profile);
                        password.set(String::new());
                        info.set(String::new());
                        busy.set(false);
                        navigate(
                            crate::pages::dashboard::DASHBOARD_ROUTE,
                            crate::components::require_session::redirect_options(),
                        );
                    }
                    Err(err) => {
                        log::warn!("login failed: {err}");
                        info.set(err.user_message());
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (email_value, password_value, context);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Back Office"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="username"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message" role="alert">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
