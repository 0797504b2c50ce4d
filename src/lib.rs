mod api;
mod app;
mod components;
mod filter;
mod models;
mod pages;
mod state;
mod storage;
mod util;

use app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::state::{AppState, Session};
    use crate::storage::{clear_credential, load_credential, save_credential};
    use crate::util::{copy_to_clipboard, format_date};
    use leptos::prelude::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_credential_storage_roundtrip() {
        clear_credential();
        assert!(load_credential().is_none());

        save_credential("t1");
        assert_eq!(load_credential().as_deref(), Some("t1"));

        clear_credential();
        assert!(load_credential().is_none());
    }

    #[wasm_bindgen_test]
    fn test_blank_credential_counts_as_absent() {
        save_credential("   ");
        assert!(load_credential().is_none());
        clear_credential();
    }

    #[wasm_bindgen_test]
    fn test_session_set_and_clear_persist() {
        let owner = Owner::new();
        owner.with(|| {
            clear_credential();
            let session = Session::restore();
            assert!(!session.is_present());

            session.set("abc".to_string());
            assert!(session.is_present());
            assert_eq!(load_credential().as_deref(), Some("abc"));

            let state = AppState::new();
            assert!(state.session.is_present());

            session.clear();
            assert!(!session.is_present());
            assert!(load_credential().is_none());
        });
    }

    #[wasm_bindgen_test]
    fn test_format_date_falls_back_to_raw() {
        assert_eq!(format_date("not a date"), "not a date");
        assert_eq!(format_date(""), "");
        assert_ne!(format_date("2024-03-01T10:00:00Z"), "2024-03-01T10:00:00Z");
    }

    #[wasm_bindgen_test]
    async fn test_clipboard_write_settles() {
        // A headless runner may deny the write; either way the promise must
        // settle into a Result instead of being dropped.
        match copy_to_clipboard("http://localhost:3000/shared/t1").await {
            Ok(()) => {}
            Err(e) => assert!(e.contains("clipboard")),
        }
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
