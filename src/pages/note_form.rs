use crate::components::ui::{
    Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, Input, Label, Spinner,
    Textarea,
};
use crate::filter::{join_tags, parse_tags};
use crate::models::NoteInput;
use crate::pages::ErrorAlert;
use crate::state::{use_request_scope, AppContext};
use leptos::logging::{debug_warn, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct NoteFormParams {
    pub id: Option<String>,
}

/// Assemble the request body from raw form fields.
///
/// Title and content must be non-empty, mirroring the inputs' `required`.
pub(crate) fn build_note_input(
    title: &str,
    content: &str,
    tags_raw: &str,
) -> Result<NoteInput, &'static str> {
    if title.is_empty() {
        return Err("Title is required");
    }
    if content.is_empty() {
        return Err("Content is required");
    }
    Ok(NoteInput {
        title: title.to_string(),
        content: content.to_string(),
        tags: parse_tags(tags_raw),
    })
}

/// Create form at `/notes/new`, edit form at `/notes/:id/edit`.
#[component]
pub fn NoteFormPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<NoteFormParams>();
    let navigate = StoredValue::new(use_navigate());
    let scope = use_request_scope();

    let note_id = move || {
        params
            .get()
            .ok()
            .and_then(|p| p.id)
            .filter(|id| !id.trim().is_empty())
    };
    let is_editing = move || note_id().is_some();

    let title: RwSignal<String> = RwSignal::new(String::new());
    let content: RwSignal<String> = RwSignal::new(String::new());
    let tags: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    // Edit mode: load the note whenever the route id changes.
    let load_scope = scope.clone();
    let load_state = app_state.clone();
    Effect::new(move |_| {
        let Some(id) = note_id() else {
            return;
        };

        let ticket = load_scope.begin();
        let api_client = load_state.0.api();
        error.set(None);

        spawn_local(async move {
            let result = api_client.get_note(&id).await;
            if !ticket.is_current() {
                debug_warn!("[note-form] dropping stale note load for {}", id);
                return;
            }
            match result {
                Ok(note) => {
                    title.set(note.title);
                    content.set(note.content);
                    tags.set(join_tags(&note.tags));
                }
                Err(e) => {
                    warn!("[note-form] fetch {} failed: {}", id, e);
                    error.set(Some("Failed to fetch note".to_string()));
                }
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let input = match build_note_input(
            &title.get_untracked(),
            &content.get_untracked(),
            &tags.get_untracked(),
        ) {
            Ok(input) => input,
            Err(msg) => {
                error.set(Some(msg.to_string()));
                return;
            }
        };

        let editing_id = params.get_untracked().ok().and_then(|p| p.id);
        let api_client = app_state.0.api();
        let scope = scope.clone();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = match editing_id.as_deref() {
                Some(id) => api_client.update_note(id, &input).await.map(|()| Some(id.to_string())),
                None => api_client.create_note(&input).await,
            };
            if !scope.is_open() {
                return;
            }
            match result {
                Ok(saved_id) => {
                    log!("[note-form] saved note {}", saved_id.as_deref().unwrap_or("(id not returned)"));
                    navigate.with_value(|nav| nav("/", Default::default()));
                }
                Err(e) => {
                    warn!("[note-form] save failed: {}", e);
                    error.set(Some(e.user_message("Failed to save note")));
                }
            }
            loading.set(false);
        });
    };

    let on_cancel = move |_| {
        navigate.with_value(|nav| nav("/", Default::default()));
    };

    view! {
        <div class="mx-auto w-full max-w-2xl">
            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">
                        {move || if is_editing() { "Edit Note" } else { "Create New Note" }}
                    </CardTitle>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <ErrorAlert message=error />

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="title">"Title"</Label>
                            <Input
                                id="title"
                                name="title"
                                placeholder="Enter note title"
                                bind_value=title
                                required=true
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="content">"Content"</Label>
                            <Textarea
                                id="content"
                                name="content"
                                placeholder="Enter note content"
                                bind_value=content
                                required=true
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="tags">"Tags (comma-separated)"</Label>
                            <Input id="tags" name="tags" placeholder="tag1, tag2, tag3" bind_value=tags />
                        </div>

                        <div class="flex justify-end gap-2">
                            <Button
                                variant=ButtonVariant::Outline
                                attr:r#type="button"
                                on:click=on_cancel
                            >
                                "Cancel"
                            </Button>
                            <Button attr:disabled=move || loading.get()>
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || {
                                        if loading.get() {
                                            "Saving..."
                                        } else if is_editing() {
                                            "Update Note"
                                        } else {
                                            "Create Note"
                                        }
                                    }}
                                </span>
                            </Button>
                        </div>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_note_input_splits_tags() {
        let input = build_note_input("Title", "Body", "x, y, y, ").expect("valid input");
        assert_eq!(input.tags, vec!["x", "y", "y"]);

        let body = serde_json::to_value(&input).expect("should serialize");
        assert_eq!(
            body,
            serde_json::json!({"title": "Title", "content": "Body", "tags": ["x", "y", "y"]})
        );
    }

    #[test]
    fn test_build_note_input_requires_title_and_content() {
        assert_eq!(build_note_input("", "Body", ""), Err("Title is required"));
        assert_eq!(build_note_input("Title", "", ""), Err("Content is required"));
    }

    #[test]
    fn test_build_note_input_allows_no_tags() {
        let input = build_note_input("Title", "Body", "").expect("valid input");
        assert!(input.tags.is_empty());
    }
}
