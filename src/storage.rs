use std::fs;
use std::path::{Path, PathBuf};

use crate::crypto;
use crate::models::AppData;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("crypto error: {0}")]
    Crypto(#[from] crypto::CryptoError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no platform data directory")]
    NoDataDir,
}

/// Location of the encrypted vault, creating the app directory on demand.
fn vault_path() -> Result<PathBuf, StorageError> {
    let dir = dirs::data_local_dir()
        .ok_or(StorageError::NoDataDir)?
        .join("luna");
    fs::create_dir_all(&dir)?;
    Ok(dir.join("vault.luna"))
}

/// Whether a vault already exists, i.e. setup has run before.
pub fn vault_exists() -> Result<bool, StorageError> {
    Ok(vault_path()?.exists())
}

/// Serialize and seal the full app state under the passphrase.
pub fn save(passphrase: &str, data: &AppData) -> Result<(), StorageError> {
    write_vault(&vault_path()?, passphrase, data)
}

/// Open and deserialize the vault with the passphrase.
pub fn load(passphrase: &str) -> Result<AppData, StorageError> {
    read_vault(&vault_path()?, passphrase)
}

/// Delete the vault permanently.
pub fn wipe() -> Result<(), StorageError> {
    let path = vault_path()?;
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

fn write_vault(path: &Path, passphrase: &str, data: &AppData) -> Result<(), StorageError> {
    let json = serde_json::to_vec(data)?;
    let blob = crypto::seal(passphrase, &json)?;

    // Write-then-rename so a crash mid-save cannot leave a truncated vault.
    let tmp = path.with_extension("luna.tmp");
    fs::write(&tmp, blob)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn read_vault(path: &Path, passphrase: &str) -> Result<AppData, StorageError> {
    let blob = fs::read(path)?;
    let json = crypto::open(passphrase, &blob)?;
    Ok(serde_json::from_slice(&json)?)
}
