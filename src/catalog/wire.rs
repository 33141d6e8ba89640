use crate::codec::{Key, KeyBound};
use crate::shard::{Range, ShardSet};
use crate::util::{CatalogError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A shard set travels (and is persisted) as the ordered list of its
/// `[start, end]` pairs, `null` standing for the infinite bound on that
/// side. The layout must round-trip exactly.
pub fn encode<K>(set: &ShardSet<K>) -> Result<Value>
where
    K: Key + Serialize,
{
    let mut pairs = Vec::with_capacity(set.len());
    for range in set.ranges() {
        pairs.push(Value::Array(vec![
            encode_bound(range.start())?,
            encode_bound(range.end())?,
        ]));
    }
    Ok(Value::Array(pairs))
}

pub fn decode<K>(value: &Value) -> Result<ShardSet<K>>
where
    K: Key + DeserializeOwned,
{
    let pairs = match value {
        Value::Array(pairs) => pairs,
        _ => {
            return Err(
                CatalogError::MalformedPayload("expected a list of range pairs".to_owned()).into(),
            )
        }
    };
    let mut ranges = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let pair = match pair {
            Value::Array(p) if p.len() == 2 => p,
            _ => {
                return Err(CatalogError::MalformedPayload(
                    "range must be a [start, end] pair".to_owned(),
                )
                .into())
            }
        };
        let start = decode_bound(&pair[0], KeyBound::NegInf)?;
        let end = decode_bound(&pair[1], KeyBound::PosInf)?;
        // a decoded set answers to the same invariants as any other
        ranges.push(Range::new(start, end)?);
    }
    ShardSet::new(ranges)
}

fn encode_bound<K>(bound: &KeyBound<K>) -> Result<Value>
where
    K: Key + Serialize,
{
    match bound {
        KeyBound::Key(k) => {
            serde_json::to_value(k).map_err(|e| CatalogError::KeyType(e.to_string()).into())
        }
        _ => Ok(Value::Null),
    }
}

fn decode_bound<K>(value: &Value, infinite: KeyBound<K>) -> Result<KeyBound<K>>
where
    K: Key + DeserializeOwned,
{
    match value {
        Value::Null => Ok(infinite),
        v => serde_json::from_value(v.clone())
            .map(KeyBound::Key)
            .map_err(|e| CatalogError::KeyType(e.to_string()).into()),
    }
}
