use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use argon2::{Argon2, Params};
use rand::RngCore;
use zeroize::Zeroize;

/// Vault envelope: `LUNA || version || salt || nonce || ciphertext`.
/// The whole header is bound to the ciphertext as AEAD associated data, so
/// any tampering with it fails decryption.
const MAGIC: &[u8; 4] = b"LUNA";
const VERSION: u8 = 1;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const HEADER_LEN: usize = MAGIC.len() + 1 + SALT_LEN + NONCE_LEN;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("key derivation failed")]
    KeyDerivation,
    #[error("sealing failed")]
    Seal,
    #[error("wrong passphrase or corrupted vault")]
    WrongPassphrase,
    #[error("not a luna vault")]
    InvalidFormat,
    #[error("vault written by a newer version")]
    UnsupportedVersion,
}

/// Argon2id with the OWASP low-memory parameters (19 MiB, t=2, p=1).
fn derive_key(passphrase: &str, salt: &[u8]) -> Result<[u8; KEY_LEN], CryptoError> {
    let params =
        Params::new(19_456, 2, 1, Some(KEY_LEN)).map_err(|_| CryptoError::KeyDerivation)?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut key)
        .map_err(|_| CryptoError::KeyDerivation)?;
    Ok(key)
}

/// Seal plaintext under a passphrase into a self-describing vault blob.
pub fn seal(passphrase: &str, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    header.extend_from_slice(MAGIC);
    header.push(VERSION);

    let mut salt = [0u8; SALT_LEN];
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    header.extend_from_slice(&salt);
    header.extend_from_slice(&nonce_bytes);

    let mut key = derive_key(passphrase, &salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::Seal)?;
    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: plaintext,
                aad: &header,
            },
        )
        .map_err(|_| CryptoError::Seal);
    key.zeroize();

    let mut blob = header;
    blob.extend_from_slice(&ciphertext?);
    Ok(blob)
}

/// Open a vault blob produced by [`seal`].
pub fn open(passphrase: &str, blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if blob.len() < HEADER_LEN || &blob[..MAGIC.len()] != MAGIC {
        return Err(CryptoError::InvalidFormat);
    }
    if blob[MAGIC.len()] != VERSION {
        return Err(CryptoError::UnsupportedVersion);
    }

    let (header, ciphertext) = blob.split_at(HEADER_LEN);
    let salt = &header[MAGIC.len() + 1..MAGIC.len() + 1 + SALT_LEN];
    let nonce_bytes = &header[MAGIC.len() + 1 + SALT_LEN..];

    let mut key = derive_key(passphrase, salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::WrongPassphrase)?;
    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(nonce_bytes),
            Payload {
                msg: ciphertext,
                aad: header,
            },
        )
        .map_err(|_| CryptoError::WrongPassphrase);
    key.zeroize();

    plaintext
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_open_roundtrip() {
        let blob = seal("correct horse", b"cycle data").unwrap();
        assert_eq!(open("correct horse", &blob).unwrap(), b"cycle data");
    }

    #[test]
    fn wrong_passphrase_is_rejected() {
        let blob = seal("right", b"secret").unwrap();
        assert!(matches!(
            open("wrong", &blob),
            Err(CryptoError::WrongPassphrase)
        ));
    }

    #[test]
    fn garbage_is_not_a_vault() {
        assert!(matches!(
            open("any", &[0u8; 8]),
            Err(CryptoError::InvalidFormat)
        ));
    }

    #[test]
    fn future_version_is_refused() {
        let mut blob = seal("pass", b"data").unwrap();
        blob[MAGIC.len()] = VERSION + 1;
        assert!(matches!(
            open("pass", &blob),
            Err(CryptoError::UnsupportedVersion)
        ));
    }

    #[test]
    fn tampered_header_fails_authentication() {
        let mut blob = seal("pass", b"data").unwrap();
        // Flip a salt bit: the header is covered by the AEAD tag.
        blob[MAGIC.len() + 1] ^= 0x01;
        assert!(open("pass", &blob).is_err());
    }
}
