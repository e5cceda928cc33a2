use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use crate::toast::{Toast, ToastKind};
use icons::X;
use leptos::prelude::*;

fn kind_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Blank => "border-border",
        ToastKind::Success => "border-success/40",
    }
}

/// Renders the app notifier's queue.
#[component]
pub fn Toaster() -> impl IntoView {
    let notifier = expect_context::<AppContext>().0.notifier;
    let toasts = move || notifier.queue.with(|q| q.items().to_vec());

    view! {
        <div
            class="pointer-events-none fixed right-4 top-4 z-50 flex flex-col gap-2"
            aria-live="polite"
        >
            <For each=toasts key=|t: &Toast| t.id let:toast>
                {let id = toast.id;
                view! {
                <div
                    class=format!(
                        "pointer-events-auto flex items-center gap-2 rounded-md border bg-background px-3 py-2 text-sm shadow-md {}",
                        kind_class(toast.kind),
                    )
                    role="status"
                >
                    {toast.icon.clone().map(|icon| view! { <span aria-hidden="true">{icon}</span> })}
                    <span>{toast.message.clone()}</span>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="size-6"
                        attr:aria-label="Dismiss"
                        on:click=move |_| notifier.dismiss(id)
                    >
                        <X class="size-3" />
                    </Button>
                </div>
                }}
            </For>
        </div>
    }
}
