use crate::components::ui::{
    Badge, BadgeList, Button, ButtonSize, ButtonVariant, Card, CardContent, CardGrid, CardHeader,
    CardTitle, Input, Spinner,
};
use crate::filter::{apply_delete_result, collect_tags, filter_notes, search_is_active, toggle_tag};
use crate::models::Note;
use crate::pages::ErrorAlert;
use crate::state::{use_request_scope, AppContext, LoadState};
use crate::util::{copy_to_clipboard, format_date};
use leptos::logging::{debug_warn, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::set_timeout;
use std::collections::BTreeSet;
use std::time::Duration;

const NOTICE_DISMISS_MS: u64 = 3000;

/// Notice shown after a share link is minted; the URL itself when it could
/// not be put on the clipboard.
fn share_notice(url: &str, copied: bool) -> String {
    if copied {
        "Share link copied to clipboard!".to_string()
    } else {
        format!("Share link: {}", url)
    }
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let scope = use_request_scope();

    let notes_state: RwSignal<LoadState<Vec<Note>>> = RwSignal::new(LoadState::Loading);
    let search: RwSignal<String> = RwSignal::new(String::new());
    let selected: RwSignal<BTreeSet<String>> = RwSignal::new(BTreeSet::new());

    // Failures of delete/share; the list itself stays visible.
    let action_error: RwSignal<Option<String>> = RwSignal::new(None);

    let notice: RwSignal<Option<String>> = RwSignal::new(None);
    let notice_seq: RwSignal<u64> = RwSignal::new(0);

    let pending_delete: RwSignal<Option<Note>> = RwSignal::new(None);
    let deleting: RwSignal<bool> = RwSignal::new(false);
    let sharing_id: RwSignal<Option<String>> = RwSignal::new(None);

    let all_tags = Memo::new(move |_| {
        notes_state.with(|s| s.ready().map(|notes| collect_tags(notes)).unwrap_or_default())
    });

    let filtered = Memo::new(move |_| {
        notes_state.with(|s| match s.ready() {
            Some(notes) => search.with(|q| selected.with(|sel| filter_notes(notes, q, sel))),
            None => vec![],
        })
    });

    let total = move || notes_state.with(|s| s.ready().map(Vec::len).unwrap_or(0));
    let has_filters = move || search.with(|q| search_is_active(q)) || !selected.with(BTreeSet::is_empty);

    let load_scope = scope.clone();
    let load_state = app_state.clone();
    Effect::new(move |_| {
        let ticket = load_scope.begin();
        let api_client = load_state.0.api();
        notes_state.set(LoadState::Loading);

        spawn_local(async move {
            let result = api_client.list_notes().await;
            if !ticket.is_current() {
                debug_warn!("[notes] dropping stale note list");
                return;
            }
            match result {
                Ok(notes) => notes_state.set(LoadState::Ready(notes)),
                Err(e) => {
                    warn!("[notes] fetch failed: {}", e);
                    if e.is_unauthorized() {
                        // The protected guard redirects once the session is gone.
                        session.clear();
                        return;
                    }
                    notes_state.set(LoadState::Failed("Failed to fetch notes".to_string()));
                }
            }
        });
    });

    let show_notice = move |msg: String| {
        let seq = notice_seq.get_untracked().wrapping_add(1);
        notice_seq.set(seq);
        notice.set(Some(msg));

        set_timeout(
            move || {
                // A newer notice owns the slot; the view may also be gone.
                if notice_seq.try_get_untracked() == Some(seq) {
                    let _ = notice.try_set(None);
                }
            },
            Duration::from_millis(NOTICE_DISMISS_MS),
        );
    };

    let share_scope = scope.clone();
    let share_state = app_state.clone();
    let on_share = Callback::new(move |id: String| {
        if sharing_id.get_untracked().is_some() {
            return;
        }
        sharing_id.set(Some(id.clone()));
        action_error.set(None);

        let api_client = share_state.0.api();
        let scope = share_scope.clone();
        spawn_local(async move {
            let result = api_client.share_note(&id).await;
            if !scope.is_open() {
                return;
            }
            sharing_id.set(None);
            match result {
                Ok(link) => {
                    log!("[notes] share link minted for {}", id);
                    let copied = copy_to_clipboard(&link.share_url).await;
                    if !scope.is_open() {
                        return;
                    }
                    if let Err(e) = &copied {
                        warn!("[notes] {}", e);
                    }
                    show_notice(share_notice(&link.share_url, copied.is_ok()));
                }
                Err(e) => {
                    warn!("[notes] share {} failed: {}", id, e);
                    action_error.set(Some("Failed to share note".to_string()));
                }
            }
        });
    });

    let on_request_delete = Callback::new(move |note: Note| {
        action_error.set(None);
        pending_delete.set(Some(note));
    });

    let on_confirm_delete = Callback::new(move |_: ()| {
        if deleting.get_untracked() {
            return;
        }
        let Some(note) = pending_delete.get_untracked() else {
            return;
        };

        deleting.set(true);
        action_error.set(None);

        let api_client = app_state.0.api();
        let scope = scope.clone();
        spawn_local(async move {
            let result = api_client.delete_note(&note.id).await;
            if !scope.is_open() {
                return;
            }
            let mut list = notes_state.with_untracked(|s| s.ready().cloned()).unwrap_or_default();
            let mut sel = selected.get_untracked();
            match apply_delete_result(&mut list, &mut sel, &note.id, result) {
                Ok(()) => {
                    log!("[notes] deleted {}", note.id);
                    notes_state.set(LoadState::Ready(list));
                    selected.set(sel);
                }
                Err(e) => {
                    warn!("[notes] delete {} failed: {}", note.id, e);
                    action_error.set(Some("Failed to delete note".to_string()));
                }
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div class="space-y-1">
                    <h1 class="text-2xl font-semibold">"My Notes"</h1>
                    <p class="text-xs text-muted-foreground">
                        {move || {
                            if has_filters() {
                                format!("{} of {} notes", filtered.get().len(), total())
                            } else {
                                format!("{} notes", total())
                            }
                        }}
                    </p>
                </div>
                <a
                    href="/notes/new"
                    class="inline-flex h-9 items-center rounded-md bg-primary px-4 text-sm font-medium text-primary-foreground hover:bg-primary/90"
                >
                    "Add Note"
                </a>
            </div>

            <ErrorAlert message=action_error />

            <Show
                when=move || !notes_state.with(LoadState::is_loading)
                fallback=|| view! {
                    <div class="flex items-center gap-2 text-sm text-muted-foreground">
                        <Spinner />
                        "Loading..."
                    </div>
                }
            >
                <Show
                    when=move || notes_state.with(|s| s.error().is_none())
                    fallback=move || view! {
                        <ErrorAlert message=Signal::derive(move || {
                            notes_state.with(|s| s.error().map(str::to_string))
                        }) />
                    }
                >
                    <Show
                        when=move || { total() > 0 }
                        fallback=|| view! {
                            <div class="py-12 text-center">
                                <p class="text-muted-foreground">"You don't have any notes yet."</p>
                                <a class="mt-4 inline-block text-sm text-primary underline underline-offset-4" href="/notes/new">
                                    "Create your first note"
                                </a>
                            </div>
                        }
                    >
                        <FilterBar search=search selected=selected all_tags=all_tags />

                        <Show
                            when=move || !filtered.get().is_empty()
                            fallback=|| view! {
                                <div class="text-sm text-muted-foreground">"No notes match the current filters."</div>
                            }
                        >
                            <CardGrid>
                                {move || {
                                    filtered
                                        .get()
                                        .into_iter()
                                        .map(|note| {
                                            view! {
                                                <NoteCard
                                                    note=note
                                                    sharing_id=sharing_id
                                                    on_share=on_share
                                                    on_delete=on_request_delete
                                                />
                                            }
                                        })
                                        .collect_view()
                                }}
                            </CardGrid>
                        </Show>
                    </Show>
                </Show>
            </Show>

            <Show when=move || pending_delete.get().is_some() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium">"Delete note"</div>
                            <div class="text-xs text-muted-foreground">
                                {move || {
                                    let title = pending_delete.get().map(|n| n.title).unwrap_or_default();
                                    format!("Are you sure you want to delete '{}'?", title)
                                }}
                            </div>
                        </div>

                        <div class="flex items-center justify-end gap-2 pt-2">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                attr:disabled=move || deleting.get()
                                on:click=move |_| pending_delete.set(None)
                            >
                                "Cancel"
                            </Button>
                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                attr:disabled=move || deleting.get()
                                on:click=move |_| on_confirm_delete.run(())
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || deleting.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                                </span>
                            </Button>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || notice.get().is_some() fallback=|| ().into_view()>
                <div
                    role="status"
                    class="fixed bottom-4 right-4 z-50 max-w-sm rounded-md border border-border bg-background px-4 py-3 text-sm shadow-lg"
                >
                    {move || notice.get().unwrap_or_default()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn FilterBar(
    search: RwSignal<String>,
    selected: RwSignal<BTreeSet<String>>,
    all_tags: Memo<Vec<String>>,
) -> impl IntoView {
    let has_filters = move || search.with(|q| search_is_active(q)) || !selected.with(BTreeSet::is_empty);

    view! {
        <div class="space-y-3">
            <div class="flex items-center gap-2">
                <Input
                    id="search"
                    r#type="search"
                    placeholder="Search notes..."
                    bind_value=search
                    class="max-w-md"
                />
                <Show when=has_filters fallback=|| ().into_view()>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=move |_| {
                            search.set(String::new());
                            selected.set(BTreeSet::new());
                        }
                    >
                        "Clear filters"
                    </Button>
                </Show>
            </div>

            <Show when=move || !all_tags.get().is_empty() fallback=|| ().into_view()>
                <BadgeList>
                    {move || {
                        all_tags
                            .get()
                            .into_iter()
                            .map(|tag| {
                                let label = format!("#{}", tag);
                                let toggle_tag_name = tag.clone();
                                let is_on = move || selected.with(|s| s.contains(&tag));
                                view! {
                                    <button
                                        type="button"
                                        class=move || {
                                            if is_on() {
                                                "rounded-md bg-primary px-2 py-0.5 text-xs text-primary-foreground"
                                            } else {
                                                "rounded-md bg-muted px-2 py-0.5 text-xs text-muted-foreground hover:bg-accent"
                                            }
                                        }
                                        on:click=move |_| selected.update(|s| toggle_tag(s, &toggle_tag_name))
                                    >
                                        {label}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </BadgeList>
            </Show>
        </div>
    }
}

#[component]
fn NoteCard(
    note: Note,
    sharing_id: RwSignal<Option<String>>,
    on_share: Callback<String>,
    on_delete: Callback<Note>,
) -> impl IntoView {
    let edit_href = format!("/notes/{}/edit", urlencoding::encode(&note.id));
    let share_id = note.id.clone();
    let is_sharing = {
        let id = note.id.clone();
        move || sharing_id.with(|s| s.as_deref() == Some(id.as_str()))
    };
    let updated = format_date(&note.updated_at);
    let tag_badges = (!note.tags.is_empty()).then(|| {
        let badges = note
            .tags
            .iter()
            .map(|t| view! { <Badge>{format!("#{}", t)}</Badge> })
            .collect_view();
        view! { <BadgeList>{badges}</BadgeList> }
    });
    let title = note.title.clone();
    let content = note.content.clone();
    let is_sharing_attr = is_sharing.clone();

    view! {
        <Card class="gap-3 py-4">
            <CardHeader class="px-4">
                <CardTitle class="text-base">{title}</CardTitle>
            </CardHeader>
            <CardContent class="space-y-3 px-4">
                <p class="line-clamp-3 whitespace-pre-wrap text-sm text-muted-foreground">{content}</p>

                {tag_badges}

                <div class="flex items-center justify-between">
                    <div class="text-xs text-muted-foreground">{updated}</div>
                    <div class="flex items-center gap-1">
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Sm
                            attr:title="Share note"
                            attr:disabled=is_sharing_attr
                            on:click=move |_| on_share.run(share_id.clone())
                        >
                            {move || if is_sharing() { "Sharing..." } else { "Share" }}
                        </Button>
                        <a
                            href=edit_href
                            title="Edit note"
                            class="inline-flex h-8 items-center rounded-md px-3 text-sm font-medium hover:bg-accent"
                        >
                            "Edit"
                        </a>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Sm
                            class="text-destructive"
                            attr:title="Delete note"
                            on:click=move |_| on_delete.run(note.clone())
                        >
                            "Delete"
                        </Button>
                    </div>
                </div>
            </CardContent>
        </Card>
    }
}
