use crate::components::ui::{Badge, BadgeList, Card, CardContent, CardHeader, CardTitle, Spinner};
use crate::models::Note;
use crate::pages::ErrorAlert;
use crate::state::{use_request_scope, AppContext, LoadState};
use crate::util::format_date_time;
use leptos::logging::{debug_warn, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct SharedNoteParams {
    pub token: Option<String>,
}

/// Read-only view of a note reached through a share link. No session needed.
#[component]
pub fn SharedNotePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<SharedNoteParams>();
    let scope = use_request_scope();

    let state: RwSignal<LoadState<Note>> = RwSignal::new(LoadState::Loading);

    let token = move || params.get().ok().and_then(|p| p.token).unwrap_or_default();

    Effect::new(move |_| {
        let token = token();
        let ticket = scope.begin();
        state.set(LoadState::Loading);

        if token.trim().is_empty() {
            state.set(LoadState::Failed("Invalid share link".to_string()));
            return;
        }

        let api_client = app_state.0.api();
        spawn_local(async move {
            let result = api_client.get_shared_note(&token).await;
            if !ticket.is_current() {
                debug_warn!("[shared] dropping stale shared note");
                return;
            }
            match result {
                Ok(note) => state.set(LoadState::Ready(note)),
                Err(e) => {
                    warn!("[shared] load failed: {}", e);
                    state.set(LoadState::Failed(e.user_message("Failed to load shared note")));
                }
            }
        });
    });

    view! {
        <div class="mx-auto w-full max-w-3xl">
            {move || match state.get() {
                LoadState::Loading => view! {
                    <div class="flex items-center gap-2 text-sm text-muted-foreground">
                        <Spinner />
                        "Loading..."
                    </div>
                }
                .into_any(),
                LoadState::Failed(msg) => view! {
                    <ErrorAlert message=Signal::derive(move || Some(msg.clone())) />
                }
                .into_any(),
                LoadState::Ready(note) => view! { <SharedNoteView note=note /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn SharedNoteView(note: Note) -> impl IntoView {
    let updated = format_date_time(&note.updated_at);
    let tag_badges = (!note.tags.is_empty()).then(|| {
        let badges = note
            .tags
            .iter()
            .map(|t| view! { <Badge>{format!("#{}", t)}</Badge> })
            .collect_view();
        view! { <BadgeList>{badges}</BadgeList> }
    });

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-2xl">{note.title}</CardTitle>
                {tag_badges}
            </CardHeader>
            <CardContent class="space-y-4">
                <pre class="whitespace-pre-wrap font-sans text-sm">{note.content}</pre>
                <div class="text-xs text-muted-foreground">{format!("Last updated: {}", updated)}</div>
            </CardContent>
        </Card>
    }
}
