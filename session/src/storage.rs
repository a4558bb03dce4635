//! Key-value persistence medium behind the session store.
//!
//! The browser uses `localStorage`, the CLI a JSON file, tests the in-memory
//! [`MemoryStorage`]. Reads fail soft (`None`); writes report errors so the
//! store can roll back a half-written session.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StorageError;

/// Named-slot string storage.
pub trait Storage {
    /// Read a slot. Unavailable storage reads as absent.
    fn get(&self, slot: &str) -> Option<String>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the medium refuses the write.
    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Removing an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the medium refuses the removal.
    fn remove(&self, slot: &str) -> Result<(), StorageError>;

    /// Overwrite several slots as one unit.
    ///
    /// Readers must never see a mix of old and new values. The default
    /// removes every slot (last entry first) before writing them in order, so
    /// the last entry is absent until everything before it is in place.
    /// Media that can swap all slots in one step should override this.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`]; slots may then be left cleared but
    /// never holding a mix of old and new values.
    fn set_slots(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (slot, _) in entries.iter().rev() {
            self.remove(slot)?;
        }
        for (slot, value) in entries {
            self.set(slot, value)?;
        }
        Ok(())
    }
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, slot: &str) -> Option<String> {
        (**self).get(slot)
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(slot, value)
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        (**self).remove(slot)
    }

    fn set_slots(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).set_slots(entries)
    }
}

impl<T: Storage + ?Sized> Storage for Rc<T> {
    fn get(&self, slot: &str) -> Option<String> {
        (**self).get(slot)
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(slot, value)
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        (**self).remove(slot)
    }

    fn set_slots(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).set_slots(entries)
    }
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn get(&self, slot: &str) -> Option<String> {
        (**self).get(slot)
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(slot, value)
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        (**self).remove(slot)
    }

    fn set_slots(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).set_slots(entries)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    slots: HashMap<String, String>,
    failing_slot: Option<String>,
    mutations: usize,
}

/// In-memory [`Storage`], mainly for tests.
///
/// Can be told to refuse writes to one slot, and counts successful
/// mutations so callers can assert that nothing was written.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<MemoryInner>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with raw slot values.
    #[must_use]
    pub fn with_slots<'a>(slots: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        {
            let mut inner = storage.lock();
            for (slot, value) in slots {
                inner.slots.insert(slot.to_owned(), value.to_owned());
            }
        }
        storage
    }

    /// Make every subsequent write to `slot` fail.
    pub fn fail_writes_to(&self, slot: &str) {
        self.lock().failing_slot = Some(slot.to_owned());
    }

    /// Number of successful `set`/`remove` calls that changed something.
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.lock().mutations
    }

    /// Whether no slot holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().slots.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, slot: &str) -> Option<String> {
        self.lock().slots.get(slot).cloned()
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.failing_slot.as_deref() == Some(slot) {
            return Err(StorageError::Write {
                slot: slot.to_owned(),
                reason: "quota exceeded".to_owned(),
            });
        }
        inner.slots.insert(slot.to_owned(), value.to_owned());
        inner.mutations += 1;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.slots.remove(slot).is_some() {
            inner.mutations += 1;
        }
        Ok(())
    }

    /// All-or-nothing under one lock: a refused slot leaves every slot as it was.
    fn set_slots(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if let Some((slot, _)) = entries
            .iter()
            .find(|(slot, _)| inner.failing_slot.as_deref() == Some(*slot))
        {
            return Err(StorageError::Write {
                slot: (*slot).to_owned(),
                reason: "quota exceeded".to_owned(),
            });
        }
        for (slot, value) in entries {
            inner.slots.insert((*slot).to_owned(), (*value).to_owned());
            inner.mutations += 1;
        }
        Ok(())
    }
}
