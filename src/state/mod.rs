pub(crate) mod request;

use crate::api::{ApiClient, EnvConfig};
use crate::storage::{clear_credential, load_credential, save_credential};
use leptos::logging::log;
use leptos::prelude::*;

pub(crate) use request::use_request_scope;

/// The stored bearer credential, exposed as an injected handle.
///
/// All reads go through here so guards and the navbar react to login/logout.
#[derive(Clone, Copy)]
pub(crate) struct Session {
    credential: RwSignal<Option<String>>,
}

impl Session {
    pub fn restore() -> Self {
        Self {
            credential: RwSignal::new(load_credential()),
        }
    }

    pub fn is_present(&self) -> bool {
        self.credential.with(Option::is_some)
    }

    pub fn credential_untracked(&self) -> Option<String> {
        self.credential.get_untracked()
    }

    pub fn set(&self, token: String) {
        save_credential(&token);
        self.credential.set(Some(token));
        log!("[session] credential stored");
    }

    pub fn clear(&self) {
        clear_credential();
        self.credential.set(None);
        log!("[session] credential cleared");
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub session: Session,
    pub config: EnvConfig,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: Session::restore(),
            config: EnvConfig::new(),
        }
    }

    /// Client carrying the current credential (read untracked).
    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.config.api_url.clone())
            .with_token(self.session.credential_untracked())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

/// Lifecycle of a single fetch owned by a view.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(e) => Some(e.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_is_exclusive() {
        let loading: LoadState<u8> = LoadState::Loading;
        assert!(loading.is_loading());
        assert!(loading.ready().is_none());
        assert!(loading.error().is_none());

        let ready = LoadState::Ready(7u8);
        assert!(!ready.is_loading());
        assert_eq!(ready.ready(), Some(&7));
        assert!(ready.error().is_none());

        let failed: LoadState<u8> = LoadState::Failed("Note not found".to_string());
        assert!(failed.ready().is_none());
        assert_eq!(failed.error(), Some("Note not found"));
    }
}
