//! Business-area pages behind the session gate.

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

use leptos::prelude::*;

/// One business area of the back office.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Invoices,
    Sales,
    Receivables,
    Payables,
    Inventory,
}

impl Section {
    pub const ALL: [Self; 5] = [
        Self::Invoices,
        Self::Sales,
        Self::Receivables,
        Self::Payables,
        Self::Inventory,
    ];

    pub fn route(self) -> &'static str {
        match self {
            Self::Invoices => "/invoices",
            Self::Sales => "/sales",
            Self::Receivables => "/receivables",
            Self::Payables => "/payables",
            Self::Inventory => "/inventory",
        }
    }

    /// Path segment for the router, i.e. the route without its leading `/`.
    pub fn segment(self) -> &'static str {
        self.route().trim_start_matches('/')
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Invoices => "Invoices",
            Self::Sales => "Sales",
            Self::Receivables => "Accounts Receivable",
            Self::Payables => "Accounts Payable",
            Self::Inventory => "Inventory",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Invoices => "Issue, track, and reconcile customer invoices.",
            Self::Sales => "Orders and revenue by period.",
            Self::Receivables => "Outstanding balances owed by customers.",
            Self::Payables => "Bills due to suppliers.",
            Self::Inventory => "Stock levels and movements.",
        }
    }
}

#[component]
pub fn SectionPage(section: Section) -> impl IntoView {
    view! {
        <section class="section-page">
            <h1 class="section-page__title">{section.title()}</h1>
            <p class="section-page__summary">{section.summary()}</p>
        </section>
    }
}
