//! Sidebar with collapsible menu groups

use crate::layout::global_context::{AppGlobalContext, Section};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<Section>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "overview",
            label: "Overview",
            icon: "dashboard",
            items: vec![Section::Dashboard],
        },
        MenuGroup {
            id: "auction",
            label: "Auction",
            icon: "catalog",
            items: vec![Section::Catalog, Section::OutLots, Section::SellingPrices],
        },
        MenuGroup {
            id: "warehouse",
            label: "Warehouse",
            icon: "stock",
            items: vec![Section::Stock, Section::Shipments],
        },
    ]
}

/// Groups with the sections `is_admin` may open; empty groups are dropped
fn visible_groups(is_admin: bool) -> Vec<MenuGroup> {
    get_menu_groups()
        .into_iter()
        .filter_map(|mut group| {
            group.items.retain(|s| is_admin || !s.admin_only());
            (!group.items.is_empty()).then_some(group)
        })
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let expanded_groups = RwSignal::new(vec!["overview", "auction", "warehouse"]);

    view! {
        <div class="app-sidebar__content">
            {move || {
                let is_admin = auth_state.with(|s| s.is_admin());
                visible_groups(is_admin)
                    .into_iter()
                    .map(|group| {
                        let MenuGroup { id: group_id, label, icon: group_icon, items } = group;
                        view! {
                            <div>
                                <div
                                    class="app-sidebar__item"
                                    style:padding-left="12px"
                                    on:click=move |_| {
                                        expanded_groups.update(|open| {
                                            if let Some(pos) = open.iter().position(|x| *x == group_id) {
                                                open.remove(pos);
                                            } else {
                                                open.push(group_id);
                                            }
                                        });
                                    }
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(group_icon)}
                                        <span>{label}</span>
                                    </div>
                                    <div
                                        class="app-sidebar__chevron"
                                        class:app-sidebar__chevron--expanded=move || {
                                            expanded_groups.with(|g| g.contains(&group_id))
                                        }
                                    >
                                        {icon("chevron-right")}
                                    </div>
                                </div>

                                <Show when=move || expanded_groups.with(|g| g.contains(&group_id))>
                                    <div class="app-sidebar__children">
                                        {items
                                            .iter()
                                            .map(|section| {
                                                let section = *section;
                                                view! {
                                                    <div
                                                        class="app-sidebar__item"
                                                        class:app-sidebar__item--active=move || ctx.active.get() == section
                                                        style:padding-left="10px"
                                                        on:click=move |_| ctx.open(section)
                                                    >
                                                        <div class="app-sidebar__item-content">
                                                            {icon(section.icon())}
                                                            <span>{section.label()}</span>
                                                        </div>
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </Show>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_is_in_the_admin_menu() {
        let listed: Vec<Section> = visible_groups(true)
            .into_iter()
            .flat_map(|g| g.items)
            .collect();
        for section in Section::ALL {
            assert!(listed.contains(section), "{:?} missing", section);
        }
    }

    #[test]
    fn user_menu_drops_admin_sections_and_empty_groups() {
        let groups = visible_groups(false);
        let ids: Vec<_> = groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["overview", "warehouse"]);
        assert_eq!(groups[1].items, vec![Section::Stock]);
    }
}
