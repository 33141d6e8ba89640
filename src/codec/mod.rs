use std::cmp::Ordering;
use std::fmt;

pub trait Key: ToOwned<Owned = Self> + ToString + Ord {}

/// A position in the keyspace extended with the two infinite sentinels.
/// `NegInf` orders below every concrete key and `PosInf` above, so a pair
/// of bounds can describe an open-ended shard without a second encoding.
#[derive(PartialEq, Eq)]
pub enum KeyBound<K: Key> {
    NegInf,
    Key(K),
    PosInf,
}

impl<K: Key> KeyBound<K> {
    /// where this bound sits relative to a concrete key.
    pub fn cmp_key(&self, key: &K) -> Ordering {
        match self {
            KeyBound::NegInf => Ordering::Less,
            KeyBound::Key(k) => k.cmp(key),
            KeyBound::PosInf => Ordering::Greater,
        }
    }

}

impl<K: Key> Ord for KeyBound<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyBound::NegInf, KeyBound::NegInf) => Ordering::Equal,
            (KeyBound::PosInf, KeyBound::PosInf) => Ordering::Equal,
            (KeyBound::NegInf, _) => Ordering::Less,
            (_, KeyBound::NegInf) => Ordering::Greater,
            (KeyBound::PosInf, _) => Ordering::Greater,
            (_, KeyBound::PosInf) => Ordering::Less,
            (KeyBound::Key(a), KeyBound::Key(b)) => a.cmp(b),
        }
    }
}

impl<K: Key> PartialOrd for KeyBound<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Key> Clone for KeyBound<K> {
    fn clone(&self) -> Self {
        match self {
            KeyBound::NegInf => KeyBound::NegInf,
            KeyBound::Key(k) => KeyBound::Key(k.to_owned()),
            KeyBound::PosInf => KeyBound::PosInf,
        }
    }
}

impl<K: Key> fmt::Display for KeyBound<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyBound::NegInf => write!(f, "-inf"),
            KeyBound::Key(k) => write!(f, "{}", k.to_string()),
            KeyBound::PosInf => write!(f, "+inf"),
        }
    }
}

impl<K: Key> fmt::Debug for KeyBound<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub mod byte;
