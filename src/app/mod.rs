pub(crate) mod guards;

use crate::components::Navbar;
use crate::pages::{LoginPage, NoteFormPage, NotesPage, SharedNotePage, SignupPage};
use crate::state::{AppContext, AppState};
use guards::{ProtectedRoute, PublicRoute};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks (guards, navbar) require a <Router> context.
    view! {
        <Router>
            <div class="min-h-screen bg-muted/30">
                <Navbar />
                <main class="mx-auto w-full max-w-[1080px] px-4 py-8">
                    <Routes fallback=|| view! { <div class="text-xs text-muted-foreground">"Not found"</div> }>
                        <Route path=path!("login") view=move || view! {
                            <PublicRoute>
                                <LoginPage />
                            </PublicRoute>
                        } />
                        <Route path=path!("signup") view=move || view! {
                            <PublicRoute>
                                <SignupPage />
                            </PublicRoute>
                        } />
                        <Route path=path!("notes/new") view=move || view! {
                            <ProtectedRoute>
                                <NoteFormPage />
                            </ProtectedRoute>
                        } />
                        <Route path=path!("notes/:id/edit") view=move || view! {
                            <ProtectedRoute>
                                <NoteFormPage />
                            </ProtectedRoute>
                        } />
                        <Route path=path!("shared/:token") view=SharedNotePage />
                        <Route path=path!("") view=move || view! {
                            <ProtectedRoute>
                                <NotesPage />
                            </ProtectedRoute>
                        } />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
