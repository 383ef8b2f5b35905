//! Toast Host Component

use leptos::prelude::*;

use crate::context::{AppContext, ToastKind};

/// Stack of transient notifications; each dismisses itself after a delay
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="toast-host" aria-live="polite">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class="toast"
                            class:destructive=toast.kind == ToastKind::Destructive
                            role="status"
                        >
                            <div class="toast-body">
                                <strong class="toast-title">{toast.title}</strong>
                                <p class="toast-description">{toast.description}</p>
                            </div>
                            <button class="toast-close" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
