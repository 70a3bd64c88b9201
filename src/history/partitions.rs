//! Key layout and encoding utilities for Fjall partitions
//!
//! Partition structure:
//! - `submissions`: sub:{uuid_v7} -> HistoryEntry (JSON)
//!
//! UUIDv7 keys sort by creation time, which makes the reverse scan in
//! `HistoryStore::recent` a newest-first listing.

use uuid::Uuid;

/// Encode a submission key: sub:{uuid}
pub fn encode_entry_key(id: &Uuid) -> Vec<u8> {
    format!("sub:{}", id).into_bytes()
}

/// Decode a submission key: sub:{uuid} -> uuid
pub fn decode_entry_key(key: &[u8]) -> Option<Uuid> {
    let key_str = std::str::from_utf8(key).ok()?;
    key_str.strip_prefix("sub:")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_key_roundtrip() {
        let id = Uuid::now_v7();
        let key = encode_entry_key(&id);
        assert!(key.starts_with(b"sub:"));

        let decoded = decode_entry_key(&key).unwrap();
        assert_eq!(decoded, id);
    }

    #[test]
    fn test_decode_rejects_foreign_keys() {
        assert!(decode_entry_key(b"job:123").is_none());
        assert!(decode_entry_key(b"sub:not-a-uuid").is_none());
    }

    #[test]
    fn test_v7_keys_sort_by_creation_time() {
        let first = encode_entry_key(&Uuid::now_v7());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = encode_entry_key(&Uuid::now_v7());

        assert!(first < second);
    }
}
