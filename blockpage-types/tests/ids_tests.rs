use blockpage_types::{BlockId, EntryUid, Error};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

// ── BlockId ───────────────────────────────────────────────────────

#[test]
fn block_id_new_is_unique() {
    let a = BlockId::new();
    let b = BlockId::new();
    assert_ne!(a, b);
}

#[test]
fn block_id_rapid_creation_never_collides() {
    let ids: HashSet<BlockId> = (0..10_000).map(|_| BlockId::new()).collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn block_id_new_is_a_uuid() {
    let id = BlockId::new();
    assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
}

#[test]
fn block_id_from_uuid() {
    let uuid = uuid::Uuid::now_v7();
    let id = BlockId::from_uuid(uuid);
    assert_eq!(id.as_str(), uuid.to_string());
}

#[test]
fn block_id_accepts_legacy_timestamp_ids() {
    let id = BlockId::parse("1718000000000").unwrap();
    assert_eq!(id.as_str(), "1718000000000");
    assert_eq!(id.to_string(), "1718000000000");
}

#[test]
fn block_id_parse_rejects_empty() {
    assert!(matches!(BlockId::parse(""), Err(Error::InvalidId(_))));
    assert!(BlockId::from_str("   ").is_err());
}

#[test]
fn block_id_default_is_unique() {
    assert_ne!(BlockId::default(), BlockId::default());
}

#[test]
fn block_id_serializes_as_plain_string() {
    let id = BlockId::parse("abc").unwrap();
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    let parsed: BlockId = serde_json::from_str("\"abc\"").unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn block_id_deserialize_rejects_empty() {
    assert!(serde_json::from_str::<BlockId>("\"\"").is_err());
    assert!(serde_json::from_str::<BlockId>("\"  \"").is_err());
}

#[test]
fn block_id_hash_and_eq() {
    let id = BlockId::new();
    let mut set = HashSet::new();
    set.insert(id.clone());
    set.insert(id);
    assert_eq!(set.len(), 1);
}

// ── EntryUid ──────────────────────────────────────────────────────

#[test]
fn entry_uid_parse_and_display() {
    let uid = EntryUid::parse("blt1234567890abcdef").unwrap();
    assert_eq!(uid.as_str(), "blt1234567890abcdef");
    assert_eq!(uid.to_string(), "blt1234567890abcdef");
}

#[test]
fn entry_uid_rejects_empty() {
    assert!(EntryUid::from_str("").is_err());
}

#[test]
fn entry_uid_serde_roundtrip() {
    let uid = EntryUid::parse("entry-1").unwrap();
    let json = serde_json::to_string(&uid).unwrap();
    assert_eq!(json, "\"entry-1\"");
    let back: EntryUid = serde_json::from_str(&json).unwrap();
    assert_eq!(back, uid);
}

#[test]
fn entry_uid_deserialize_rejects_empty() {
    let err = serde_json::from_str::<EntryUid>("\"\"").unwrap_err();
    assert!(err.to_string().contains("invalid identifier"));
}

proptest! {
    #[test]
    fn block_id_parse_preserves_any_non_blank_string(s in "[a-zA-Z0-9_-]{1,40}") {
        let id = BlockId::parse(&s).unwrap();
        prop_assert_eq!(id.as_str(), s.as_str());
    }
}
