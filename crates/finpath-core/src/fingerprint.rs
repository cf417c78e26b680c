//! Content fingerprints for engine outputs
//!
//! Two runs over identical inputs must produce byte-identical JSON; the
//! fingerprint is the SHA-256 of that JSON, hex encoded.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let bytes = serde_json::to_vec(value)
        .map_err(|e| Error::Serialization(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
