//! Key/value persistence
//!
//! LocalStorage in the browser. Natively a thread-local map stands in so the
//! same load/save paths run under tests and in the headless demo.
//! Failures are swallowed: a missing store reads as empty, a failed write is
//! logged and forgotten.

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read a stored string
#[cfg(target_arch = "wasm32")]
pub fn load_string(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

/// Store a string
#[cfg(target_arch = "wasm32")]
pub fn save_string(key: &str, value: &str) {
    match storage() {
        Some(storage) => {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to write {} to LocalStorage", key);
            }
        }
        None => log::warn!("LocalStorage unavailable, {} not saved", key),
    }
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static MEMORY: std::cell::RefCell<std::collections::HashMap<String, String>> =
        std::cell::RefCell::new(std::collections::HashMap::new());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_string(key: &str) -> Option<String> {
    MEMORY.with(|m| m.borrow().get(key).cloned())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_string(key: &str, value: &str) {
    MEMORY.with(|m| {
        m.borrow_mut().insert(key.to_string(), value.to_string());
    });
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        assert_eq!(load_string("persistence_test_missing"), None);
    }

    #[test]
    fn test_save_then_load() {
        save_string("persistence_test_key", "42");
        assert_eq!(load_string("persistence_test_key").as_deref(), Some("42"));
        save_string("persistence_test_key", "43");
        assert_eq!(load_string("persistence_test_key").as_deref(), Some("43"));
    }
}
