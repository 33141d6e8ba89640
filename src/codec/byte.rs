use crate::codec::Key;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::ToOwned;
use std::cmp::Ordering;
use std::fmt;

/// Byte-string key with lexicographic order, the usual table key shape.
#[derive(Eq, PartialEq)]
pub struct ByteKey {
    inner: Vec<u8>,
}

impl Key for ByteKey {}

impl PartialOrd for ByteKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.inner.partial_cmp(&other.inner)
    }
}

impl Ord for ByteKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl ToOwned for ByteKey {
    type Owned = Self;

    fn to_owned(&self) -> Self::Owned {
        ByteKey {
            inner: self.inner.to_owned(),
        }
    }
}

impl<const N: usize> From<&[u8; N]> for ByteKey {
    fn from(t: &[u8; N]) -> ByteKey {
        ByteKey { inner: t.to_vec() }
    }
}

impl ToString for ByteKey {
    fn to_string(&self) -> String {
        match std::str::from_utf8(&self.inner) {
            Ok(v) => v.to_owned(),
            Err(e) => format!("Invalid UTF-8 sequence: {}", e),
        }
    }
}

impl fmt::Debug for ByteKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

// keys cross the catalog wire as their raw byte sequence so that the
// persisted layout round-trips exactly, valid UTF-8 or not.
impl Serialize for ByteKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ByteKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<u8>::deserialize(deserializer).map(|inner| ByteKey { inner })
    }
}

impl ByteKey {
    pub fn new(bytes: &[u8]) -> ByteKey {
        ByteKey {
            inner: bytes.to_owned(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_key_order() {
        let a = ByteKey::new(b"a");
        let ab = ByteKey::new(b"ab");
        let b = ByteKey::new(b"b");
        assert!(a < ab);
        assert!(ab < b);
        assert_eq!(a, ByteKey::from(b"a"));
    }

    #[test]
    fn test_byte_key_serde() {
        let key = ByteKey::new(&[0x00, 0xff, 0x61]);
        let value = serde_json::to_value(&key).unwrap();
        let back: ByteKey = serde_json::from_value(value).unwrap();
        assert_eq!(key, back);
    }
}
