use crate::components::hooks::use_busy_hold;
use crate::components::ui::Spinner;
use leptos::prelude::*;

/// Corner loading indicator. Stays up for at least `duration_ms` once shown.
#[component]
pub fn MonkeyLoader(#[prop(into)] show: Signal<bool>, duration_ms: i64) -> impl IntoView {
    let visible = use_busy_hold(show, duration_ms);

    view! {
        <Show when=move || visible.get() fallback=|| ().into_view()>
            <div
                class="fixed bottom-4 left-4 z-40 flex items-center gap-2 rounded-full border border-border bg-background px-3 py-2 text-xs text-muted-foreground shadow-md"
                aria-live="polite"
            >
                <span class="text-base" aria-hidden="true">"🐒"</span>
                <Spinner label="Loading notes" />
                "Loading…"
            </div>
        </Show>
    }
}
