//! Browser `localStorage` as the session persistence medium.
//!
//! SYSTEM CONTEXT
//! ==============
//! Backs `session::SessionStore` in the browser so the token/profile pair
//! survives reloads, scoped to the page origin. Host builds have no storage:
//! reads are absent, writes are refused, removals succeed.

#[cfg(test)]
#[path = "local_storage_test.rs"]
mod local_storage_test;

use session::{Storage, StorageError};

/// Zero-sized handle; the window's storage is looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
    window
        .local_storage()
        .map_err(|err| StorageError::Unavailable(js_reason(&err)))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_owned()))
}

#[cfg(feature = "csr")]
fn js_reason(err: &wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl Storage for LocalStorage {
    fn get(&self, slot: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok()?;
            storage.get_item(slot).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = slot;
            None
        }
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(slot, value)
                .map_err(|err| StorageError::Write {
                    slot: slot.to_owned(),
                    reason: js_reason(&err),
                })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = value;
            Err(StorageError::Write {
                slot: slot.to_owned(),
                reason: "localStorage requires a browser".to_owned(),
            })
        }
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .remove_item(slot)
                .map_err(|err| StorageError::Remove {
                    slot: slot.to_owned(),
                    reason: js_reason(&err),
                })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = slot;
            Ok(())
        }
    }
}
