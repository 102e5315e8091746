use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::auth::Prompter;
use crate::error::Result;

const SET_TITLE: &str = "Set PIN";
const CONFIRM_TITLE: &str = "Confirm PIN";
const CONFIRM_PROMPT: &str = "Re-enter PIN:";
const ENTER_TITLE: &str = "Enter PIN";
const ENTER_PROMPT: &str = "Enter your app launcher PIN:";

/// Hex-encoded SHA-256 of the PIN text.
pub fn hash_pin(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.as_bytes()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub max_attempts: u32,
}

impl Default for PinPolicy {
    fn default() -> Self {
        Self {
            min_length: 5,
            max_length: 10,
            max_attempts: 3,
        }
    }
}

impl PinPolicy {
    pub fn is_valid_pin(&self, pin: &str) -> bool {
        !pin.is_empty()
            && pin.chars().all(|c| c.is_ascii_digit())
            && (self.min_length..=self.max_length).contains(&pin.len())
    }

    fn length_hint(&self) -> String {
        format!("{}-{} digits", self.min_length, self.max_length)
    }
}

/// Owns the single `pin.dat` file holding the hashed PIN.
#[derive(Debug, Clone)]
pub struct PinStore {
    pin_file: PathBuf,
    policy: PinPolicy,
}

impl PinStore {
    pub fn new(pin_file: impl Into<PathBuf>, policy: PinPolicy) -> Self {
        Self {
            pin_file: pin_file.into(),
            policy,
        }
    }

    pub fn pin_file(&self) -> &Path {
        &self.pin_file
    }

    /// The stored digest, or `None` when no usable PIN has been set.
    pub async fn stored_hash(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.pin_file).await {
            Ok(content) => {
                let hash = content.trim();
                if hash.is_empty() {
                    warn!("PIN file {:?} is empty, treating as unset", self.pin_file);
                    Ok(None)
                } else {
                    Ok(Some(hash.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save_hash(&self, hash: &str) -> Result<()> {
        if let Some(parent) = self.pin_file.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.pin_file, hash).await?;
        debug!("PIN hash written to {:?}", self.pin_file);
        Ok(())
    }

    /// First-run setup. Returns `false` if the user cancels the first prompt.
    pub async fn set_pin(&self, prompter: &mut dyn Prompter) -> Result<bool> {
        let create_prompt = format!("Create a new PIN ({}):", self.policy.length_hint());

        loop {
            let Some(pin) = prompter.ask_secret(SET_TITLE, &create_prompt).await? else {
                info!("PIN setup cancelled");
                return Ok(false);
            };

            if !self.policy.is_valid_pin(&pin) {
                prompter
                    .show_error(
                        "Invalid PIN",
                        &format!("PIN must be {}.", self.policy.length_hint()),
                    )
                    .await?;
                continue;
            }

            let confirm = prompter.ask_secret(CONFIRM_TITLE, CONFIRM_PROMPT).await?;
            if confirm.as_deref() == Some(pin.as_str()) {
                self.save_hash(&hash_pin(&pin)).await?;
                info!("New PIN stored");
                return Ok(true);
            }

            prompter.show_error("Mismatch", "PINs do not match.").await?;
        }
    }

    /// Gate for the whole application. Runs setup when no PIN exists yet.
    pub async fn verify_pin(&self, prompter: &mut dyn Prompter) -> Result<bool> {
        let Some(stored) = self.stored_hash().await? else {
            info!("No PIN set, starting first-run setup");
            return self.set_pin(prompter).await;
        };

        for attempt in 1..=self.policy.max_attempts {
            let entered = prompter.ask_secret(ENTER_TITLE, ENTER_PROMPT).await?;
            if let Some(pin) = entered.filter(|pin| !pin.is_empty()) {
                if hash_pin(&pin) == stored {
                    info!(attempt, "PIN verified");
                    return Ok(true);
                }
            }

            warn!(attempt, "Incorrect PIN");
            prompter.show_warning("Invalid", "Incorrect PIN.").await?;
        }

        warn!("PIN attempts exhausted");
        Ok(false)
    }
}
