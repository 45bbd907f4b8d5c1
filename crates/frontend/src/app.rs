use crate::dashboards::OverviewDashboard;
use crate::domain::a101_catalog::ui::list::CatalogList;
use crate::domain::a102_stock::ui::list::StockList;
use crate::domain::a103_out_lot::ui::list::OutLotList;
use crate::domain::a104_selling_price::ui::list::SellingPriceList;
use crate::domain::a105_shipment::ui::list::ShipmentList;
use crate::layout::global_context::{AppGlobalContext, Section};
use crate::layout::Shell;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthProvider;
use crate::system::auth::guard::{RequireAdmin, RequireAuth};
use leptos::prelude::*;

/// Main area for the active section
#[component]
fn SectionView() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    move || match ctx.active.get() {
        Section::Dashboard => view! { <OverviewDashboard /> }.into_any(),
        Section::Stock => view! { <StockList /> }.into_any(),
        Section::Catalog => view! { <RequireAdmin><CatalogList /></RequireAdmin> }.into_any(),
        Section::OutLots => view! { <RequireAdmin><OutLotList /></RequireAdmin> }.into_any(),
        Section::SellingPrices => {
            view! { <RequireAdmin><SellingPriceList /></RequireAdmin> }.into_any()
        }
        Section::Shipments => view! { <RequireAdmin><ShipmentList /></RequireAdmin> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(ToastService::new());

    view! {
        <AuthProvider>
            <Shell>
                <RequireAuth>
                    <SectionView />
                </RequireAuth>
            </Shell>
            <ToastHost />
        </AuthProvider>
    }
}
