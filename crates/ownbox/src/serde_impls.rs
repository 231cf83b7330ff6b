//! Serde support (enabled by the `serde` feature)
//!
//! An `OwnedBox<T>` serializes exactly like `Option<T>`: an empty box is
//! `null`, anything else is the owned value.
//!
//! The encoding is lossy for owned values that themselves serialize to
//! `null`. An `OwnedBox<Option<T>>` holding `None` writes `null`, and `null`
//! reads back as an empty box, not as a box owning `None`. This is the same
//! ambiguity `Option<Option<T>>` has.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::owned::OwnedBox;

impl<T: Serialize> Serialize for OwnedBox<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().ok().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OwnedBox<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<T>::deserialize(deserializer)?;
        Ok(value.map_or_else(OwnedBox::empty, OwnedBox::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_value_and_empty() {
        assert_eq!(serde_json::to_string(&OwnedBox::new(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&OwnedBox::<i32>::empty()).unwrap(),
            "null"
        );
    }

    #[test]
    fn test_deserialize_null_is_empty() {
        let b: OwnedBox<String> = serde_json::from_str("null").unwrap();
        assert!(b.is_empty());

        let b: OwnedBox<String> = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(b.get().map(String::as_str), Ok("x"));
    }

    #[test]
    fn test_owned_none_reads_back_empty() {
        let owned_none: OwnedBox<Option<u8>> = OwnedBox::new(None);
        let json = serde_json::to_string(&owned_none).unwrap();
        assert_eq!(json, "null");

        let back: OwnedBox<Option<u8>> = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());

        let owned_some: OwnedBox<Option<u8>> = serde_json::from_str("3").unwrap();
        assert_eq!(owned_some.get(), Ok(&Some(3)));
    }
}
