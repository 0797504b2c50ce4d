use crate::components::ui::{
    Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::pages::ErrorAlert;
use crate::state::{use_request_scope, AppContext};
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[component]
pub fn LoginPage() -> impl IntoView {
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let scope = use_request_scope();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let api_client = app_state.0.api();
        let session = app_state.0.session;
        let scope = scope.clone();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = api_client.login(&email_val, &password_val).await;
            if !scope.is_open() {
                return;
            }
            match result {
                Ok(response) => {
                    log!("[auth] logged in");
                    session.set(response.access_token);
                    navigate.with_value(|nav| nav("/", Default::default()));
                }
                Err(e) => {
                    warn!("[auth] login failed: {}", e);
                    error.set(Some(e.user_message("Login failed")));
                    loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="mx-auto flex w-full max-w-sm flex-col justify-center py-10">
            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">"Log in"</CardTitle>
                    <CardDescription class="text-xs">"Use your email and password to continue."</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="email" class="text-xs">"Email"</Label>
                            <Input
                                id="email"
                                name="email"
                                r#type="email"
                                placeholder="you@example.com"
                                bind_value=email
                                required=true
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password" class="text-xs">"Password"</Label>
                            <Input
                                id="password"
                                name="password"
                                r#type="password"
                                placeholder="••••••••"
                                bind_value=password
                                required=true
                            />
                        </div>

                        <ErrorAlert message=error />

                        <Button class="w-full" attr:disabled=move || loading.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Signing in..." } else { "Login" }}
                            </span>
                        </Button>

                        <div class="pt-1 text-xs text-muted-foreground">
                            "No account? "
                            <a class="text-primary underline underline-offset-4" href="/signup">"Sign up"</a>
                        </div>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let name: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let scope = use_request_scope();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let name_val = name.get_untracked();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let api_client = app_state.0.api();
        let session = app_state.0.session;
        let scope = scope.clone();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = api_client.signup(&name_val, &email_val, &password_val).await;
            if !scope.is_open() {
                return;
            }
            match result {
                Ok(response) => {
                    log!("[auth] account created");
                    session.set(response.access_token);
                    navigate.with_value(|nav| nav("/", Default::default()));
                }
                Err(e) => {
                    warn!("[auth] signup failed: {}", e);
                    error.set(Some(e.user_message("Signup failed")));
                    loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="mx-auto flex w-full max-w-sm flex-col justify-center py-10">
            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">"Create account"</CardTitle>
                    <CardDescription class="text-xs">"Sign up to start writing notes."</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="name" class="text-xs">"Name"</Label>
                            <Input id="name" name="name" placeholder="Your name" bind_value=name required=true />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="email" class="text-xs">"Email"</Label>
                            <Input
                                id="email"
                                name="email"
                                r#type="email"
                                placeholder="you@example.com"
                                bind_value=email
                                required=true
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password" class="text-xs">"Password"</Label>
                            <Input
                                id="password"
                                name="password"
                                r#type="password"
                                placeholder="••••••••"
                                bind_value=password
                                required=true
                            />
                        </div>

                        <ErrorAlert message=error />

                        <Button class="w-full" attr:disabled=move || loading.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Creating..." } else { "Signup" }}
                            </span>
                        </Button>

                        <div class="pt-1 text-xs text-muted-foreground">
                            "Already have an account? "
                            <a class="text-primary underline underline-offset-4" href="/login">"Log in"</a>
                        </div>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}
