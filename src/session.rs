//! Session Gate
//!
//! Selects the active profile and holds the PIN unlock flag. Purely
//! local: the selection and flag persist as a small JSON file on the
//! device and never touch the remote store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::Profile;

const DEFAULT_PIN: &str = "1234";

/// Persisted session state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionState {
    #[serde(default)]
    selected_profile: Option<String>,
    #[serde(default)]
    unlocked: bool,
}

/// Local profile selection plus the PIN lock
pub struct SessionGate {
    path: PathBuf,
    pin: String,
    state: SessionState,
}

impl SessionGate {
    /// Load session state from `path`; a missing or corrupt file falls
    /// back to a locked, signed-out session
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!("corrupt session file {}: {}", path.display(), e);
                    SessionState::default()
                }
            },
            Err(_) => SessionState::default(),
        };
        Self {
            path,
            pin: DEFAULT_PIN.to_string(),
            state,
        }
    }

    /// Override the default PIN
    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = pin.into();
        self
    }

    /// Select a profile by id, validated against the known profile set
    pub fn sign_in(&mut self, profiles: &[Profile], id: &str) -> bool {
        if !profiles.iter().any(|p| p.id == id) {
            return false;
        }
        self.state.selected_profile = Some(id.to_string());
        self.persist();
        true
    }

    pub fn sign_out(&mut self) {
        self.state.selected_profile = None;
        self.persist();
    }

    pub fn current_profile(&self) -> Option<&str> {
        self.state.selected_profile.as_deref()
    }

    /// Try to unlock with a PIN; wrong PINs leave the gate locked
    pub fn unlock(&mut self, pin: &str) -> bool {
        if pin != self.pin {
            return false;
        }
        self.state.unlocked = true;
        self.persist();
        true
    }

    pub fn lock(&mut self) {
        self.state.unlocked = false;
        self.persist();
    }

    pub fn is_unlocked(&self) -> bool {
        self.state.unlocked
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.state) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(&self.path, raw) {
                    log::error!("failed to persist session to {}: {}", self.path.display(), e);
                }
            }
            Err(e) => log::error!("failed to encode session state: {}", e),
        }
    }
}
