//! Persisted session credential and profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two fixed slots hold the raw token and the JSON profile. Reads are public
//! so guards and views can look; writes are crate-private so that only
//! `SessionService` mutates the pair.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::error::{SessionError, StorageError};
use crate::profile::{Credential, UserProfile};
use crate::storage::Storage;

/// Slot holding the opaque token string.
pub const TOKEN_SLOT: &str = "token";
/// Slot holding the serialized user profile.
pub const PROFILE_SLOT: &str = "user";

/// Typed view over the two session slots of a [`Storage`].
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Underlying medium.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored token, if any. Blank values read as absent.
    pub fn get_token(&self) -> Option<Credential> {
        self.storage
            .get(TOKEN_SLOT)
            .map(Credential::new)
            .filter(|token| !token.is_blank())
    }

    /// Stored profile, if present and well-formed.
    pub fn get_profile(&self) -> Option<UserProfile> {
        match self.read_profile() {
            Ok(profile) => profile,
            Err(err) => {
                log::warn!("ignoring stored profile: {err}");
                None
            }
        }
    }

    /// Token and profile together, or nothing.
    pub fn snapshot(&self) -> Option<(Credential, UserProfile)> {
        let token = self.get_token()?;
        let profile = self.get_profile()?;
        Some((token, profile))
    }

    /// Stored profile, distinguishing absence from corruption.
    pub(crate) fn read_profile(&self) -> Result<Option<UserProfile>, SessionError> {
        let Some(raw) = self.storage.get(PROFILE_SLOT) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| SessionError::MalformedLocalState(err.to_string()))
    }

    #[cfg_attr(not(test), expect(dead_code, reason = "sessions are written through `commit`"))]
    pub(crate) fn set_token(&self, token: &Credential) -> Result<(), StorageError> {
        self.storage.set(TOKEN_SLOT, token.expose())
    }

    pub(crate) fn clear_token(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_SLOT)
    }

    #[cfg_attr(not(test), expect(dead_code, reason = "sessions are written through `commit`"))]
    pub(crate) fn set_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.storage.set(PROFILE_SLOT, &encode_profile(profile)?)
    }

    pub(crate) fn clear_profile(&self) -> Result<(), StorageError> {
        self.storage.remove(PROFILE_SLOT)
    }

    /// Write token and profile as one unit.
    ///
    /// Both slots go through a single [`Storage::set_slots`] call with the
    /// token last, so no reader sees the new profile next to the old token.
    /// If the batch fails both slots are cleared.
    pub(crate) fn commit(&self, token: &Credential, profile: &UserProfile) -> Result<(), StorageError> {
        let raw = encode_profile(profile)?;
        let written = self
            .storage
            .set_slots(&[(PROFILE_SLOT, raw.as_str()), (TOKEN_SLOT, token.expose())]);
        if let Err(err) = written {
            log::warn!("session commit failed, rolling back: {err}");
            if let Err(rollback) = self.clear() {
                log::error!("session rollback incomplete: {rollback}");
            }
            return Err(err);
        }
        Ok(())
    }

    /// Clear both slots. Both removals are attempted; the first error wins.
    pub(crate) fn clear(&self) -> Result<(), StorageError> {
        let token = self.clear_token();
        let profile = self.clear_profile();
        token.and(profile)
    }
}

fn encode_profile(profile: &UserProfile) -> Result<String, StorageError> {
    serde_json::to_string(profile).map_err(|err| StorageError::Write {
        slot: PROFILE_SLOT.to_owned(),
        reason: err.to_string(),
    })
}
