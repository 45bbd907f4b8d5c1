use contracts::shared::dashboard::DashboardSummary;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::super::api;
use crate::shared::format::{format_number, format_weight};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_auth;

#[derive(Debug, Clone, PartialEq)]
struct Card {
    label: &'static str,
    icon: &'static str,
    value: String,
}

/// Admins get record counts, users their assigned weight
fn summary_cards(summary: &DashboardSummary, is_admin: bool) -> Vec<Card> {
    if !is_admin {
        return vec![Card {
            label: "Assigned to you",
            icon: "stock",
            value: format_weight(summary.assigned_weight),
        }];
    }
    let count = |n: u64| format_number(n as f64, 0);
    vec![
        Card {
            label: "Catalog lots",
            icon: "catalog",
            value: count(summary.catalogs),
        },
        Card {
            label: "Stock",
            icon: "stock",
            value: count(summary.stock),
        },
        Card {
            label: "Out lots",
            icon: "out-lots",
            value: count(summary.out_lots),
        },
        Card {
            label: "Selling prices",
            icon: "prices",
            value: count(summary.selling_prices),
        },
        Card {
            label: "Shipments",
            icon: "shipments",
            value: count(summary.shipments),
        },
    ]
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let toasts = use_toasts();
    let summary = RwSignal::new(None::<DashboardSummary>);
    let user_id = Memo::new(move |_| auth_state.with(|s| s.user_info.as_ref().map(|u| u.id)));

    Effect::new(move |_| {
        if user_id.get().is_none() {
            log::debug!("dashboard: user not resolved, skipping fetch");
            return;
        }
        spawn_local(async move {
            match api::get_summary().await {
                Ok(data) => {
                    let _ = summary.try_set(Some(data));
                }
                Err(e) => toasts.api_error(&e),
            }
        });
    });

    view! {
        <PageFrame page_id="d100_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Dashboard"</h1>
                </div>
            </div>
            <div class="page__content">
                {move || match summary.get() {
                    None => view! { <div class="table__loading">"Loading…"</div> }.into_any(),
                    Some(data) => {
                        let is_admin = auth_state.with(|s| s.is_admin());
                        view! {
                            <div class="stat-grid">
                                {summary_cards(&data, is_admin)
                                    .into_iter()
                                    .map(|card| view! {
                                        <div class="stat-card">
                                            <div class="stat-card__icon">{icon(card.icon)}</div>
                                            <div class="stat-card__label">{card.label}</div>
                                            <div class="stat-card__value">{card.value}</div>
                                        </div>
                                    })
                                    .collect_view()}
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> DashboardSummary {
        DashboardSummary {
            catalogs: 1250,
            stock: 40,
            out_lots: 3,
            selling_prices: 0,
            shipments: 7,
            assigned_weight: 1520.5,
        }
    }

    #[test]
    fn admin_sees_a_card_per_entity() {
        let cards = summary_cards(&summary(), true);
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].value, "1 250");
        assert_eq!(cards[3].value, "0");
    }

    #[test]
    fn user_sees_only_assigned_weight() {
        let cards = summary_cards(&summary(), false);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].value, format_weight(1520.5));
    }
}
