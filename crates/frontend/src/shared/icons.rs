use leptos::prelude::*;

fn svg(size: u32, body: AnyView) -> AnyView {
    view! {
        <svg
            width=size.to_string()
            height=size.to_string()
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
        >
            {body}
        </svg>
    }
    .into_any()
}

pub fn icon(name: &str) -> AnyView {
    match name {
        "catalog" => svg(20, view! {
            <path d="M4 19.5A2.5 2.5 0 0 1 6.5 17H20"/>
            <path d="M6.5 2H20v20H6.5A2.5 2.5 0 0 1 4 19.5v-15A2.5 2.5 0 0 1 6.5 2z"/>
        }.into_any()),
        "stock" => svg(20, view! {
            <rect x="3" y="3" width="7" height="7" rx="1"/>
            <rect x="14" y="3" width="7" height="7" rx="1"/>
            <rect x="14" y="14" width="7" height="7" rx="1"/>
            <rect x="3" y="14" width="7" height="7" rx="1"/>
        }.into_any()),
        "out-lots" => svg(20, view! {
            <path d="M21 16V8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16z"/>
            <path d="M3.27 6.96 12 12l8.73-5.04"/>
        }.into_any()),
        "prices" => svg(20, view! {
            <path d="M20.59 13.41 13.42 20.58a2 2 0 0 1-2.83 0L2 12V2h10l8.59 8.59a2 2 0 0 1 0 2.82z"/>
            <circle cx="7" cy="7" r="1"/>
        }.into_any()),
        "shipments" => svg(20, view! {
            <path d="M3 7h13v10H3z"/>
            <path d="M16 7h3l2 3v7h-5z"/>
            <circle cx="7.5" cy="18" r="1.5"/>
            <circle cx="18.5" cy="18" r="1.5"/>
        }.into_any()),
        "dashboard" => svg(20, view! {
            <path d="M3 3v18h18"/>
            <path d="M18 17V9"/>
            <path d="M13 17V5"/>
            <path d="M8 17v-3"/>
        }.into_any()),
        "users" => svg(16, view! {
            <path d="M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2"/>
            <circle cx="12" cy="7" r="4"/>
        }.into_any()),
        "filter" => svg(16, view! {
            <polygon points="22 3 2 3 10 12.46 10 19 14 21 14 12.46 22 3"/>
        }.into_any()),
        "chevron-down" => svg(16, view! { <polyline points="6 9 12 15 18 9"/> }.into_any()),
        "chevron-left" => svg(16, view! { <polyline points="15 18 9 12 15 6"/> }.into_any()),
        "chevron-right" => svg(16, view! { <polyline points="9 18 15 12 9 6"/> }.into_any()),
        "chevrons-left" => svg(16, view! {
            <polyline points="11 17 6 12 11 7"/>
            <polyline points="18 17 13 12 18 7"/>
        }.into_any()),
        "chevrons-right" => svg(16, view! {
            <polyline points="13 17 18 12 13 7"/>
            <polyline points="6 17 11 12 6 7"/>
        }.into_any()),
        "download" => svg(16, view! {
            <path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"/>
            <polyline points="7 10 12 15 17 10"/>
            <line x1="12" y1="15" x2="12" y2="3"/>
        }.into_any()),
        "upload" => svg(16, view! {
            <path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"/>
            <polyline points="17 8 12 3 7 8"/>
            <line x1="12" y1="3" x2="12" y2="15"/>
        }.into_any()),
        "trash" => svg(16, view! {
            <polyline points="3 6 5 6 21 6"/>
            <path d="M19 6l-1 14a2 2 0 0 1-2 2H8a2 2 0 0 1-2-2L5 6"/>
            <path d="M10 11v6"/>
            <path d="M14 11v6"/>
        }.into_any()),
        "refresh" => svg(16, view! {
            <polyline points="23 4 23 10 17 10"/>
            <path d="M20.49 15a9 9 0 1 1-2.12-9.36L23 10"/>
        }.into_any()),
        "log-out" => svg(16, view! {
            <path d="M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4"/>
            <polyline points="16 17 21 12 16 7"/>
            <line x1="21" y1="12" x2="9" y2="12"/>
        }.into_any()),
        "x" => svg(16, view! {
            <line x1="18" y1="6" x2="6" y2="18"/>
            <line x1="6" y1="6" x2="18" y2="18"/>
        }.into_any()),
        _ => svg(16, view! { <circle cx="12" cy="12" r="3"/> }.into_any()),
    }
}
