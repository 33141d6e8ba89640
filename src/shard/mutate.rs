use crate::codec::{Key, KeyBound};
use crate::shard::{Range, ShardSet};
use crate::util::{Result, ShardError};
use std::cmp::Ordering;

/// Splits shard `index` at `point`, replacing it with `[start, point)` and
/// `[point, end)`. The input set is untouched; validation runs before any
/// range is built. There is no cap pre-check here, the result only answers
/// to set construction like every other shard set.
pub fn split<K: Key>(set: &ShardSet<K>, index: usize, point: K) -> Result<ShardSet<K>> {
    let len = set.len();
    let target = match set.ranges().get(index) {
        Some(range) => range,
        None => return Err(ShardError::IndexOutOfRange { index, len }.into()),
    };
    let inside = target.start().cmp_key(&point) == Ordering::Less
        && target.end().cmp_key(&point) == Ordering::Greater;
    if !inside {
        return Err(ShardError::InvalidSplitPoint {
            index,
            point: point.to_string(),
        }
        .into());
    }
    let mut ranges = Vec::with_capacity(len + 1);
    for (i, range) in set.ranges().iter().enumerate() {
        if i == index {
            ranges.push(Range::new(
                range.start().clone(),
                KeyBound::Key(point.to_owned()),
            )?);
            ranges.push(Range::new(
                KeyBound::Key(point.to_owned()),
                range.end().clone(),
            )?);
        } else {
            ranges.push(range.clone());
        }
    }
    ShardSet::new(ranges)
}

/// Merges shard `index` with its right neighbor into one range. The last
/// shard has no right neighbor and cannot be the merge index.
pub fn merge<K: Key>(set: &ShardSet<K>, index: usize) -> Result<ShardSet<K>> {
    let len = set.len();
    if index + 1 >= len {
        return Err(ShardError::IndexOutOfRange { index, len }.into());
    }
    let mut ranges = Vec::with_capacity(len - 1);
    for (i, range) in set.ranges().iter().enumerate() {
        if i == index {
            let right = &set.ranges()[index + 1];
            ranges.push(Range::new(range.start().clone(), right.end().clone())?);
        } else if i != index + 1 {
            ranges.push(range.clone());
        }
    }
    ShardSet::new(ranges)
}

/// Discards pending edits by handing back a copy of the baseline.
pub fn reset<K: Key>(baseline: &ShardSet<K>) -> ShardSet<K> {
    baseline.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::byte::ByteKey;
    use crate::shard::MAX_SHARD_COUNT;
    use crate::util::Invariant;

    #[test]
    fn test_split_full_range() {
        let set: ShardSet<ByteKey> = ShardSet::full_range();
        let set = split(&set, 0, ByteKey::from(b"m")).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(*set.ranges()[0].start(), KeyBound::NegInf);
        assert_eq!(*set.ranges()[0].end(), KeyBound::Key(ByteKey::from(b"m")));
        assert_eq!(*set.ranges()[1].start(), KeyBound::Key(ByteKey::from(b"m")));
        assert_eq!(*set.ranges()[1].end(), KeyBound::PosInf);

        let merged = merge(&set, 0).unwrap();
        assert_eq!(merged, ShardSet::full_range());
    }

    #[test]
    fn test_merge_undoes_split() {
        let set: ShardSet<i32> = ShardSet::full_range();
        let set = split(&set, 0, 100).unwrap();
        let set = split(&set, 1, 200).unwrap();
        for (i, point) in vec![(0, 50), (1, 150), (2, 250)] {
            let bigger = split(&set, i, point).unwrap();
            assert_eq!(bigger.len(), set.len() + 1);
            assert_eq!(merge(&bigger, i).unwrap(), set);
        }
    }

    #[test]
    fn test_split_rejects_outside_point() {
        let set: ShardSet<i32> = ShardSet::full_range();
        let set = split(&set, 0, 10).unwrap();
        // shard 0 is [-inf, 10): the boundary itself is not inside
        let err = split(&set, 0, 10).unwrap_err();
        assert_eq!(
            err,
            ShardError::InvalidSplitPoint {
                index: 0,
                point: "10".to_owned(),
            }
            .into()
        );
        let err = split(&set, 1, 9).unwrap_err();
        assert_eq!(
            err,
            ShardError::InvalidSplitPoint {
                index: 1,
                point: "9".to_owned(),
            }
            .into()
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let set: ShardSet<i32> = ShardSet::full_range();
        let set = split(&set, 0, 1).unwrap();
        let set = split(&set, 1, 2).unwrap();
        assert_eq!(set.len(), 3);

        let err = split(&set, 3, 9).unwrap_err();
        assert_eq!(err, ShardError::IndexOutOfRange { index: 3, len: 3 }.into());

        // the last shard has no right neighbor
        let err = merge(&set, 2).unwrap_err();
        assert_eq!(err, ShardError::IndexOutOfRange { index: 2, len: 3 }.into());
        let err = merge(&set, 7).unwrap_err();
        assert_eq!(err, ShardError::IndexOutOfRange { index: 7, len: 3 }.into());
    }

    #[test]
    fn test_split_past_cap_fails_loudly() {
        let mut set: ShardSet<i32> = ShardSet::full_range();
        for i in 0..MAX_SHARD_COUNT as i32 - 1 {
            set = split(&set, i as usize, i).unwrap();
        }
        assert_eq!(set.len(), MAX_SHARD_COUNT);
        let err = split(&set, 0, -1).unwrap_err();
        assert_eq!(
            err,
            ShardError::InvariantViolation {
                which: Invariant::ShardCount,
                index: MAX_SHARD_COUNT + 1,
            }
            .into()
        );
        // the working set is untouched by the failed split
        assert_eq!(set.len(), MAX_SHARD_COUNT);
    }

    #[test]
    fn test_reset_copies_baseline() {
        let baseline: ShardSet<i32> = ShardSet::full_range();
        let copy = reset(&baseline);
        assert_eq!(copy, baseline);
    }
}
