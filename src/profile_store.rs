//! Per-user profiles: registration, login and session persistence.
//!
//! One JSON file per user under `~/.lucky-drop/profiles`. Passwords are
//! stored as SHA-256 digests - this is simulated auth for a local toy
//! machine, not a security boundary.

use crate::constants::PROFILE_VERSION;
use crate::session::SessionState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub version: u32,
    pub username: String,
    pub password_digest: String,
    pub created_at: i64,
    pub session: SessionState,
}

pub struct ProfileStore {
    profile_dir: PathBuf,
}

impl ProfileStore {
    pub fn new() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;

        let profile_dir = home_dir.join(".lucky-drop").join("profiles");
        fs::create_dir_all(&profile_dir)?;

        Ok(Self { profile_dir })
    }

    #[cfg(test)]
    fn at_dir(profile_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&profile_dir)?;
        Ok(Self { profile_dir })
    }

    fn profile_path(&self, username: &str) -> PathBuf {
        self.profile_dir
            .join(format!("{}.json", sanitize_name(username)))
    }

    pub fn profile_exists(&self, username: &str) -> bool {
        self.profile_path(username).exists()
    }

    /// Creates a fresh profile. Fails if the name is empty after
    /// sanitization or already taken.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        created_at: i64,
    ) -> io::Result<UserProfile> {
        if sanitize_name(username).is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Username must contain at least one letter or digit",
            ));
        }
        if self.profile_exists(username) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "Username already taken",
            ));
        }

        let profile = UserProfile {
            version: PROFILE_VERSION,
            username: username.trim().to_string(),
            password_digest: hash_password(password),
            created_at,
            session: SessionState::new(),
        };
        self.save_profile(&profile)?;
        Ok(profile)
    }

    /// Loads a profile after checking the password digest.
    pub fn login(&self, username: &str, password: &str) -> io::Result<UserProfile> {
        let json = fs::read_to_string(self.profile_path(username)).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                io::Error::new(io::ErrorKind::NotFound, "No such user")
            } else {
                e
            }
        })?;

        let profile: UserProfile = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if profile.password_digest != hash_password(password) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Wrong password",
            ));
        }
        Ok(profile)
    }

    /// Writes the profile back. Called after every draw cycle and on logout.
    pub fn save_profile(&self, profile: &UserProfile) -> io::Result<()> {
        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.profile_path(&profile.username), json)
    }
}

pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
