use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use icons::{ChevronLeft, ChevronRight};
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Pages shown around the current one.
const PAGE_RANGE: u32 = 5;
/// Pages always shown at each end.
const MARGIN_PAGES: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageItem {
    Page(u32),
    Gap,
}

/// Page buttons for `current` of `total`, with gaps collapsed into
/// ellipses. A gap hiding a single page shows that page instead.
pub(crate) fn page_items(current: u32, total: u32, range: u32, margin: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let range = range.max(1);

    let mut pages = BTreeSet::new();
    pages.extend(1..=margin.min(total));
    pages.extend((total.saturating_sub(margin) + 1).max(1)..=total);

    let end = (current.saturating_sub(range / 2).max(1) + range - 1).min(total);
    let start = (end + 1).saturating_sub(range).max(1);
    pages.extend(start..=end);

    let mut out = Vec::with_capacity(pages.len() + 2);
    let mut prev: Option<u32> = None;
    for p in pages {
        match prev {
            Some(q) if p - q == 2 => out.push(PageItem::Page(q + 1)),
            Some(q) if p - q > 2 => out.push(PageItem::Gap),
            _ => {}
        }
        out.push(PageItem::Page(p));
        prev = Some(p);
    }
    out
}

#[component]
pub fn Pagination(
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] current_page: Signal<u32>,
    on_page_change: Callback<u32>,
) -> impl IntoView {
    let go = move |p: u32| {
        if p != current_page.get_untracked() {
            on_page_change.run(p);
        }
    };

    let items = move || {
        page_items(current_page.get(), total_pages.get(), PAGE_RANGE, MARGIN_PAGES)
    };

    view! {
        <nav aria-label="Pagination" class="flex items-center gap-1">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Previous page"
                attr:disabled=move || current_page.get() <= 1
                on:click=move |_| go(current_page.get_untracked().saturating_sub(1).max(1))
            >
                <ChevronLeft />
            </Button>

            {move || {
                items()
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Gap => {
                            view! { <span class="px-2 text-xs text-muted-foreground">"…"</span> }
                                .into_any()
                        }
                        PageItem::Page(p) => {
                            let active = current_page.get_untracked() == p;
                            view! {
                                <Button
                                    variant=if active { ButtonVariant::Default } else { ButtonVariant::Outline }
                                    size=ButtonSize::Sm
                                    attr:aria-current=if active { Some("page") } else { None }
                                    on:click=move |_| go(p)
                                >
                                    {p.to_string()}
                                </Button>
                            }
                                .into_any()
                        }
                    })
                    .collect_view()
            }}

            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Next page"
                attr:disabled=move || current_page.get() >= total_pages.get()
                on:click=move |_| go((current_page.get_untracked() + 1).min(total_pages.get_untracked()))
            >
                <ChevronRight />
            </Button>
        </nav>
    }
}
