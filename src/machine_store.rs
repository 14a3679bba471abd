//! Persists the shared machine configuration (catalog + settings) with a
//! checksummed binary format.
//!
//! File format:
//! - Magic (8 bytes)
//! - Data length (4 bytes)
//! - Serialized config (variable length)
//! - SHA256 checksum (32 bytes)

use crate::constants::MACHINE_FILE_MAGIC;
use crate::prizes::{default_catalog, Prize};
use crate::settings::SystemSettings;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// The admin-owned, user-independent half of the machine: what can be won
/// and how the machine is tuned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub prizes: Vec<Prize>,
    pub settings: SystemSettings,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            prizes: default_catalog(),
            settings: SystemSettings::default(),
        }
    }
}

pub struct MachineStore {
    machine_path: PathBuf,
}

impl MachineStore {
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "lucky-drop").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            machine_path: config_dir.join("machine.dat"),
        })
    }

    #[cfg(test)]
    fn at_path(machine_path: PathBuf) -> Self {
        Self { machine_path }
    }

    pub fn machine_exists(&self) -> bool {
        self.machine_path.exists()
    }

    /// Saves the machine config with checksum verification.
    pub fn save(&self, config: &MachineConfig) -> io::Result<()> {
        let data = bincode::serialize(config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        // Compute checksum over magic + length + data
        let mut hasher = Sha256::new();
        hasher.update(MACHINE_FILE_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.machine_path)?;
        file.write_all(&MACHINE_FILE_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        Ok(())
    }

    /// Loads the machine config, verifying magic and checksum.
    pub fn load(&self) -> io::Result<MachineConfig> {
        let mut file = fs::File::open(&self.machine_path)?;

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != MACHINE_FILE_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid machine file magic: expected 0x{:016X}, got 0x{:016X}",
                    MACHINE_FILE_MAGIC, magic
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        let config: MachineConfig = bincode::deserialize(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(MachineConfig {
            prizes: config.prizes,
            settings: config.settings.sanitized(),
        })
    }

    /// Loads the config, falling back to the built-in catalog when the file
    /// is missing or unreadable.
    pub fn load_or_default(&self) -> MachineConfig {
        self.load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_store(name: &str) -> MachineStore {
        MachineStore::at_path(env::temp_dir().join(format!("lucky-drop-test-{}.dat", name)))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let store = temp_store("roundtrip");

        let mut config = MachineConfig::default();
        config.settings.pity_threshold = 25;
        config.prizes[0].weight = 3.5;

        store.save(&config).expect("Failed to save machine config");
        assert!(store.machine_exists());

        let loaded = store.load().expect("Failed to load machine config");
        assert_eq!(loaded, config);

        fs::remove_file(&store.machine_path).expect("Failed to remove machine file");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let store = temp_store("missing");
        if store.machine_exists() {
            fs::remove_file(&store.machine_path).unwrap();
        }

        let result = store.load();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
        assert_eq!(store.load_or_default(), MachineConfig::default());
    }

    #[test]
    fn test_corrupted_payload_rejected() {
        let store = temp_store("corrupt");
        store.save(&MachineConfig::default()).unwrap();

        // Flip one byte inside the payload region
        let mut bytes = fs::read(&store.machine_path).unwrap();
        bytes[14] ^= 0xFF;
        fs::write(&store.machine_path, &bytes).unwrap();

        let result = store.load();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);

        fs::remove_file(&store.machine_path).unwrap();
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let store = temp_store("magic");
        store.save(&MachineConfig::default()).unwrap();

        let mut bytes = fs::read(&store.machine_path).unwrap();
        bytes[0] ^= 0xFF;
        fs::write(&store.machine_path, &bytes).unwrap();

        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("magic"));

        fs::remove_file(&store.machine_path).unwrap();
    }

    #[test]
    fn test_loaded_settings_are_sanitized() {
        let store = temp_store("sanitize");

        let mut config = MachineConfig::default();
        config.settings.volume = 9.0;
        store.save(&config).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.settings.volume, 1.0);

        fs::remove_file(&store.machine_path).unwrap();
    }
}
