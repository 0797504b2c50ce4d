use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

const LINK_CLASS: &str = "text-sm text-muted-foreground transition-colors hover:text-foreground";

/// Top bar. Links depend only on whether a credential is stored.
#[component]
pub fn Navbar() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let navigate = StoredValue::new(use_navigate());

    // Logout is local only: drop the credential and go to the login page.
    let on_logout = move |_| {
        session.clear();
        navigate.with_value(|nav| nav("/login", Default::default()));
    };

    view! {
        <nav class="border-b border-border bg-background">
            <div class="mx-auto flex w-full max-w-[1080px] items-center justify-between px-4 py-3">
                <a href="/" class="text-base font-semibold text-foreground">"Notes App"</a>

                <Show
                    when=move || session.is_present()
                    fallback=|| view! {
                        <div class="flex items-center gap-4">
                            <a href="/login" class=LINK_CLASS>"Login"</a>
                            <a href="/signup" class=LINK_CLASS>"Signup"</a>
                        </div>
                    }
                >
                    <div class="flex items-center gap-4">
                        <a href="/" class=LINK_CLASS>"My Notes"</a>
                        <a href="/notes/new" class=LINK_CLASS>"Add Note"</a>
                        <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=on_logout>
                            "Logout"
                        </Button>
                    </div>
                </Show>
            </div>
        </nav>
    }
}
