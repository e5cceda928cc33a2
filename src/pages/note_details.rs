use crate::components::ui::{
    Card, CardContent, CardDescription, CardHeader, CardTitle, ErrorAlert, Spinner,
};
use crate::filter::filter_path;
use crate::query::{use_query, NoteKey};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct NoteRouteParams {
    pub id: Option<String>,
}

#[component]
pub fn NoteDetailsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<NoteRouteParams>();

    let key = Memo::new(move |_| {
        let id = params.get().ok().and_then(|p| p.id).unwrap_or_default();
        NoteKey { id }
    });
    let query = use_query(app_state.0.note_query.clone(), key.into());

    // Placeholder data belongs to another note; never show it here.
    let note = Memo::new(move |_| {
        query
            .data
            .get()
            .filter(|r| !r.is_placeholder)
            .map(|r| r.data)
    });

    view! {
        <div class="mx-auto flex w-full max-w-2xl flex-col gap-4 px-4 py-6">
            <a href=filter_path(None) class="text-xs text-muted-foreground hover:underline">
                "← Back to notes"
            </a>

            {move || {
                if let Some(n) = note.get() {
                    return view! {
                        <Card>
                            <CardHeader>
                                <CardTitle>{n.title}</CardTitle>
                                <CardDescription>
                                    {format!("{} · {}", n.tag, n.created_at)}
                                </CardDescription>
                            </CardHeader>
                            <CardContent>
                                <p class="whitespace-pre-wrap text-sm">{n.content}</p>
                            </CardContent>
                        </Card>
                    }
                    .into_any();
                }
                match query.error.get() {
                    Some(e) if e.is_not_found() => {
                        view! { <div class="text-sm text-muted-foreground">"Note not found."</div> }
                            .into_any()
                    }
                    Some(e) => {
                        view! { <ErrorAlert message=format!("Could not fetch note details. {e}") /> }
                            .into_any()
                    }
                    None => view! { <Spinner label="Loading note" /> }.into_any(),
                }
            }}
        </div>
    }
}
