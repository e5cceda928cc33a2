use super::input::FIELD_CLASS;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Plain `<select>` over string options.
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] name: String,
    options: Vec<String>,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!("h-9", FIELD_CLASS, class);

    let on_change = move |ev: web_sys::Event| {
        if let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        {
            bind_value.set(select.value());
        }
    };

    view! {
        <select
            data-name="NativeSelect"
            class=merged_class
            id=id
            name=name
            prop:value=move || bind_value.get()
            on:change=on_change
        >
            {options
                .into_iter()
                .map(|opt| {
                    let selected = {
                        let opt = opt.clone();
                        move || bind_value.get() == opt
                    };
                    view! { <option value=opt.clone() selected=selected>{opt.clone()}</option> }
                })
                .collect_view()}
        </select>
    }
}
