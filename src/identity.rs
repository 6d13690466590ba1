use std::path::PathBuf;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BuddyError, Result};

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/pixel-art/svg?seed=";
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Player record kept next to the config, standing in for browser storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestIdentity {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl GuestIdentity {
    pub fn guest<R: Rng + ?Sized>(rng: &mut R) -> Self {
        GuestIdentity {
            id: format!("guest_{}", random_suffix(rng)),
            username: format!("Player_{}", rng.gen_range(0..1000)),
            avatar: Some(format!("{}{}", AVATAR_BASE, rng.gen::<f64>())),
            email: None,
        }
    }

    fn named<R: Rng + ?Sized>(username: &str, email: Option<String>, rng: &mut R) -> Self {
        GuestIdentity {
            id: format!("user_{}", random_suffix(rng)),
            username: username.to_string(),
            avatar: Some(format!("{}{}", AVATAR_BASE, username)),
            email,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.id.starts_with("guest_")
    }
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        IdentityStore { path: path.into() }
    }

    pub fn load(&self) -> Result<Option<GuestIdentity>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    /// Stored identity, or a fresh guest. Storage problems are logged and
    /// the guest is used for this session only.
    pub fn load_or_create<R: Rng + ?Sized>(&self, rng: &mut R) -> GuestIdentity {
        match self.load() {
            Ok(Some(identity)) => return identity,
            Ok(None) => {}
            Err(e) => warn!(error = %e, "stored identity unreadable, using a new guest"),
        }

        let guest = GuestIdentity::guest(rng);
        match self.save(&guest) {
            Ok(()) => info!(id = %guest.id, "created guest identity"),
            Err(e) => warn!(error = %e, "could not persist guest identity"),
        }
        guest
    }

    pub fn login<R: Rng + ?Sized>(&self, username: &str, rng: &mut R) -> Result<GuestIdentity> {
        let identity = GuestIdentity::named(validate(username)?, None, rng);
        self.save(&identity)?;
        Ok(identity)
    }

    pub fn register<R: Rng + ?Sized>(
        &self,
        username: &str,
        email: &str,
        rng: &mut R,
    ) -> Result<GuestIdentity> {
        let identity = GuestIdentity::named(validate(username)?, Some(email.to_string()), rng);
        self.save(&identity)?;
        Ok(identity)
    }

    pub fn logout(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn save(&self, identity: &GuestIdentity) -> Result<()> {
        let json = serde_json::to_string_pretty(identity)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

fn validate(username: &str) -> Result<&str> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(BuddyError::Identity("username must not be empty".to_string()));
    }
    Ok(trimmed)
}
