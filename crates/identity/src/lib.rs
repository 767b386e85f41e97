//! Content-identity hashing for rendered records.
//!
//! A record's identity is the SHA-256 digest of its canonical JSON
//! serialization, with the identity field itself excluded from the input.
//! Rendering stamps the digest onto list-item nodes (see the `data-hash`
//! attribute in `fragment`), which is how reconciliation recognizes an
//! already-rendered item across re-renders.

use anyhow::{anyhow, Error};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Record field holding the identity digest. Stripped before hashing,
/// written back by [`tag_records`].
pub const HASH_FIELD: &str = "hash";

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute the identity digest of a record.
///
/// Removes a stale identity field from object records, serializes the
/// remainder with `serde_json` (object keys enumerate in the serializer's
/// stable order), and digests the bytes on a blocking worker; the digest is
/// the write path's only suspension point. The caller is responsible for
/// storing the returned digest back onto the record.
pub async fn digest(record: &mut Value) -> Result<String, Error> {
    if let Some(fields) = record.as_object_mut() {
        fields.remove(HASH_FIELD);
    }
    let bytes = serde_json::to_vec(record)?;
    tokio::task::spawn_blocking(move || sha256_hex(&bytes))
        .await
        .map_err(|_| anyhow!("digest worker panicked"))
}

/// Digest a batch of list items sequentially, assigning each digest onto the
/// item's identity field. Item order is preserved: the digest for `items[i]`
/// is always written back to `items[i]` before the next item is hashed.
pub async fn tag_records(items: &mut [Value]) -> Result<(), Error> {
    for item in items.iter_mut() {
        let identity = digest(item).await?;
        if let Some(fields) = item.as_object_mut() {
            fields.insert(HASH_FIELD.to_string(), Value::String(identity));
        }
    }
    Ok(())
}
