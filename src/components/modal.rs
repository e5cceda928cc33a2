use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use icons::X;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

/// Centered overlay dialog. Closes on backdrop click, the close button, or
/// Escape.
#[component]
pub fn Modal(
    on_close: Callback<()>,
    #[prop(into, optional)] title: String,
    children: Children,
) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
            role="dialog"
            aria-modal="true"
            on:click=move |_| on_close.run(())
        >
            <div
                class="w-full max-w-md rounded-md border border-border bg-background p-4 shadow-lg"
                on:click=|ev| ev.stop_propagation()
            >
                <div class="mb-3 flex items-center justify-between gap-2">
                    <div class="text-sm font-medium">{title}</div>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:aria-label="Close"
                        on:click=move |_| on_close.run(())
                    >
                        <X />
                    </Button>
                </div>
                {children()}
            </div>
        </div>
    }
}
