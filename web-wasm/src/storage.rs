//! localStorage を使った履歴の永続化

use svg_genius_common::{Error, KeyValueStore, Result};
use wasm_bindgen::JsValue;

/// ブラウザの localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

fn local_storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| Error::Storage("localStorage is unavailable".into()))
}

fn storage_error(err: JsValue) -> Error {
    Error::Storage(format!("{:?}", err))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        local_storage()?.get_item(key).map_err(storage_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // 容量超過などはここでエラーになる
        local_storage()?.set_item(key, value).map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        local_storage()?.remove_item(key).map_err(storage_error)
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use svg_genius_common::{Controller, HISTORY_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_local_store_round_trip() {
        let mut store = LocalStore;
        store.set("svg_genius_test", "value").expect("set failed");
        assert_eq!(store.get("svg_genius_test").unwrap().as_deref(), Some("value"));
        store.remove("svg_genius_test").expect("remove failed");
        assert_eq!(store.get("svg_genius_test").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn wasm_history_survives_reload() {
        let mut store = LocalStore;
        store.remove(HISTORY_KEY).unwrap();

        let mut controller = Controller::new(LocalStore);
        controller.submit_prompt("sun").expect("should start");
        controller.finish_generation(Ok("<svg>sun</svg>".into()), 1);

        let reloaded = Controller::new(LocalStore);
        assert_eq!(reloaded.history().len(), 1);
        assert_eq!(reloaded.state().markup, "<svg>sun</svg>");

        store.remove(HISTORY_KEY).unwrap();
    }
}
