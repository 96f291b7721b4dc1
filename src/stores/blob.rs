use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Error as JsonError, Value};
use tracing::warn;

/// Persistent key -> serialized value mapping
///
/// Implementations use interior mutability so a store can be shared
/// behind an `Arc`.
pub trait BlobStore: Send + Sync {
    /// Raw value for `key`, `None` if the key was never written or was removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Outcome of decoding a stored blob
#[derive(Debug)]
pub enum Decoded<T> {
    Missing,
    Value(T),
    Malformed(JsonError),
}

pub fn decode<T: DeserializeOwned>(raw: Option<String>) -> Decoded<T> {
    match raw {
        None => Decoded::Missing,
        Some(text) => match serde_json::from_str(&text) {
            Ok(value) => Decoded::Value(value),
            Err(e) => Decoded::Malformed(e),
        },
    }
}

/// Read `key` as a JSON value. A blob that fails to parse is logged and
/// treated the same as a missing key.
pub fn read_json<T: DeserializeOwned>(store: &dyn BlobStore, key: &str) -> Result<Option<T>> {
    match decode(store.get(key)?) {
        Decoded::Missing => Ok(None),
        Decoded::Value(value) => Ok(Some(value)),
        Decoded::Malformed(e) => {
            warn!(key = key, error = %e, "Malformed stored data, falling back to empty");
            Ok(None)
        }
    }
}

/// A stored JSON array decoded entry by entry.
///
/// Entries that do not fit `T` are skipped by readers but retained, so a
/// rewrite of the collection carries them through unchanged.
#[derive(Debug)]
pub struct Collection<T> {
    pub items: Vec<T>,
    /// Undecodable entries, each with the count of decoded items before it
    retained: Vec<(usize, Value)>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            retained: Vec::new(),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Slot<'a, T> {
    Item(&'a T),
    Retained(&'a Value),
}

impl<T: Serialize> Collection<T> {
    pub fn retained_len(&self) -> usize {
        self.retained.len()
    }

    /// Encode the items with every retained entry back in its slot. A slot
    /// past the end of `items` lands at the end.
    pub fn encode(&self) -> Result<String, JsonError> {
        let mut slots = Vec::with_capacity(self.items.len() + self.retained.len());
        let mut retained = self.retained.iter().peekable();

        for (idx, item) in self.items.iter().enumerate() {
            while let Some((_, raw)) = retained.next_if(|(slot, _)| *slot <= idx) {
                slots.push(Slot::Retained(raw));
            }
            slots.push(Slot::Item(item));
        }
        slots.extend(retained.map(|(_, raw)| Slot::Retained(raw)));

        encode(&slots)
    }
}

/// Read `key` as a JSON array of `T`. A blob that is not an array reads as
/// an empty collection; single entries that do not decode are retained.
pub fn read_collection<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &str,
) -> Result<Collection<T>> {
    let entries: Vec<Value> = match read_json(store, key)? {
        Some(entries) => entries,
        None => return Ok(Collection::default()),
    };

    let mut collection = Collection::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<T>(entry.clone()) {
            Ok(item) => collection.items.push(item),
            Err(e) => {
                warn!(key = key, index = index, error = %e, "Skipping undecodable record");
                collection.retained.push((collection.items.len(), entry));
            }
        }
    }
    Ok(collection)
}

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, JsonError> {
    serde_json::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::memory::MemoryStore;

    #[test]
    fn test_read_json_missing_key() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = read_json(&store, "numbers").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_read_json_valid_blob() {
        let store = MemoryStore::new();
        store.set("numbers", "[1,2,3]").unwrap();

        let value: Option<Vec<u32>> = read_json(&store, "numbers").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_read_json_malformed_blob_is_none() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();

        let value: Option<Vec<u32>> = read_json(&store, "numbers").unwrap();
        assert!(value.is_none());
        // the blob itself is left alone
        assert!(store.contains("numbers").unwrap());
    }

    #[test]
    fn test_decode_distinguishes_malformed() {
        assert!(matches!(decode::<u32>(None), Decoded::Missing));
        assert!(matches!(decode::<u32>(Some("7".into())), Decoded::Value(7)));
        assert!(matches!(decode::<u32>(Some("seven".into())), Decoded::Malformed(_)));
    }

    #[test]
    fn test_read_collection_retains_undecodable_entries() {
        let store = MemoryStore::new();
        store.set("numbers", r#"[1,"two",3,{"n":4}]"#).unwrap();

        let mut numbers: Collection<u32> = read_collection(&store, "numbers").unwrap();
        assert_eq!(numbers.items, vec![1, 3]);
        assert_eq!(numbers.retained_len(), 2);

        numbers.items.push(5);
        assert_eq!(numbers.encode().unwrap(), r#"[1,"two",3,{"n":4},5]"#);
    }

    #[test]
    fn test_read_collection_non_array_is_empty() {
        let store = MemoryStore::new();
        store.set("numbers", r#"{"n":1}"#).unwrap();

        let numbers: Collection<u32> = read_collection(&store, "numbers").unwrap();
        assert!(numbers.items.is_empty());
        assert_eq!(numbers.retained_len(), 0);
        assert_eq!(numbers.encode().unwrap(), "[]");
    }
}
