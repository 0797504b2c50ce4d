mod auth;
mod note_form;
mod notes;
mod shared;

pub use auth::{LoginPage, SignupPage};
pub use note_form::NoteFormPage;
pub use notes::NotesPage;
pub use shared::SharedNotePage;

use crate::components::ui::{Alert, AlertDescription};
use leptos::prelude::*;

/// Inline error banner bound to an optional message.
#[component]
pub(crate) fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some() fallback=|| ().into_view()>
            {move || {
                message.get().map(|e| view! {
                    <Alert class="border-destructive/30">
                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                    </Alert>
                })
            }}
        </Show>
    }
}
