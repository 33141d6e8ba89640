use crate::codec::{Key, KeyBound};
use crate::sampler::DistributionSample;
use crate::shard::{Range, ShardSet, MAX_SHARD_COUNT};
use crate::util::{Result, SuggestError};

/// A computed shard layout plus the count that was asked for. The sample
/// may not hold enough accumulation points to reach the request, in which
/// case the layout is still usable, just smaller.
pub struct Suggestion<K: Key> {
    set: ShardSet<K>,
    requested: usize,
}

impl<K: Key> Suggestion<K> {
    pub fn set(&self) -> &ShardSet<K> {
        &self.set
    }

    pub fn into_set(self) -> ShardSet<K> {
        self.set
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn achieved(&self) -> usize {
        self.set.len()
    }

    /// the achieved count, when it fell short of the request.
    pub fn shortfall(&self) -> Option<usize> {
        if self.set.len() < self.requested {
            Some(self.set.len())
        } else {
            None
        }
    }
}

/// Computes up to `desired` balanced shards from a key-density sample,
/// walking the sample once in ascending key order and closing a shard each
/// time the running count reaches an even share of the total. Hands back
/// whatever the sample supports; the caller decides what a shortfall means.
pub fn propose<K: Key>(sample: &DistributionSample<K>, desired: usize) -> Result<Suggestion<K>> {
    if desired < 1 || desired > MAX_SHARD_COUNT {
        return Err(SuggestError::InvalidDesiredCount {
            desired,
            bound: MAX_SHARD_COUNT,
        }
        .into());
    }
    // one shard needs no split points, so even an unusable sample is fine.
    if desired == 1 {
        return Ok(Suggestion {
            set: ShardSet::full_range(),
            requested: 1,
        });
    }
    if sample.len() < 2 {
        return Err(SuggestError::InsufficientSample.into());
    }

    let total = sample.total();
    let target = total / desired as u64;
    let mut running = 0u64;
    let mut splits: Vec<K> = Vec::new();
    for point in sample.points() {
        running += point.count;
        // >= closes a shard the moment the share is met; an all-zero
        // sample has target 0 and every key qualifies. once desired - 1
        // splits exist the rest of the sample folds into the final shard.
        if running >= target && splits.len() < desired - 1 {
            splits.push(point.key.to_owned());
            running = 0;
        }
    }

    let set = build(splits)?;
    Ok(Suggestion {
        set,
        requested: desired,
    })
}

/// The strict form: fails with the achieved count when the sample could
/// not support `desired` shards.
pub fn suggest<K: Key>(sample: &DistributionSample<K>, desired: usize) -> Result<ShardSet<K>> {
    let suggestion = propose(sample, desired)?;
    match suggestion.shortfall() {
        Some(achieved) => Err(SuggestError::PartialSuggestion { achieved }.into()),
        None => Ok(suggestion.into_set()),
    }
}

fn build<K: Key>(splits: Vec<K>) -> Result<ShardSet<K>> {
    let mut ranges = Vec::with_capacity(splits.len() + 1);
    let mut start = KeyBound::NegInf;
    for split in splits {
        ranges.push(Range::new(start, KeyBound::Key(split.to_owned()))?);
        start = KeyBound::Key(split);
    }
    ranges.push(Range::new(start, KeyBound::PosInf)?);
    ShardSet::new(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::byte::ByteKey;

    fn sample(pairs: Vec<(i32, u64)>) -> DistributionSample<i32> {
        DistributionSample::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_even_sample_two_way() {
        let sample = DistributionSample::from_pairs(vec![
            (ByteKey::from(b"a"), 10),
            (ByteKey::from(b"b"), 10),
            (ByteKey::from(b"c"), 10),
            (ByteKey::from(b"d"), 10),
        ])
        .unwrap();
        let set = suggest(&sample, 2).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(*set.ranges()[0].start(), KeyBound::NegInf);
        assert_eq!(*set.ranges()[0].end(), KeyBound::Key(ByteKey::from(b"b")));
        assert_eq!(*set.ranges()[1].start(), KeyBound::Key(ByteKey::from(b"b")));
        assert_eq!(*set.ranges()[1].end(), KeyBound::PosInf);
    }

    #[test]
    fn test_short_sample_rejected() {
        let one = sample(vec![(5, 100)]);
        for desired in vec![2, 16, 32] {
            let err = suggest(&one, desired).unwrap_err();
            assert_eq!(err, SuggestError::InsufficientSample.into());
        }
        let none = sample(vec![]);
        assert_eq!(
            suggest(&none, 2).unwrap_err(),
            SuggestError::InsufficientSample.into()
        );
    }

    #[test]
    fn test_desired_count_bounds() {
        let s = sample(vec![(1, 10), (2, 10)]);
        for desired in vec![0, MAX_SHARD_COUNT + 1] {
            let err = suggest(&s, desired).unwrap_err();
            assert_eq!(
                err,
                SuggestError::InvalidDesiredCount {
                    desired,
                    bound: MAX_SHARD_COUNT,
                }
                .into()
            );
        }
    }

    #[test]
    fn test_single_shard_ignores_sample() {
        // n=1 succeeds even on samples the guard would otherwise reject
        let none: DistributionSample<i32> = sample(vec![]);
        assert_eq!(suggest(&none, 1).unwrap(), ShardSet::full_range());
        let some = sample(vec![(1, 5), (2, 5), (3, 5)]);
        assert_eq!(suggest(&some, 1).unwrap(), ShardSet::full_range());
    }

    #[test]
    fn test_result_never_exceeds_desired() {
        let s = sample((0..20).map(|i| (i, 7)).collect());
        for desired in 1..=MAX_SHARD_COUNT {
            let suggestion = propose(&s, desired).unwrap();
            assert!(suggestion.achieved() <= desired);
        }
    }

    #[test]
    fn test_tail_absorbed_into_last_shard() {
        // target is 200; key 4 reaches it on its own but desired - 1
        // splits were already emitted, so it folds into the final shard
        let s = sample(vec![(1, 100), (2, 100), (3, 100), (4, 100)]);
        let set = suggest(&s, 2).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(*set.ranges()[0].end(), KeyBound::Key(2));
        assert_eq!(*set.ranges()[1].start(), KeyBound::Key(2));
        assert_eq!(*set.ranges()[1].end(), KeyBound::PosInf);
    }

    #[test]
    fn test_zero_counts_split_everywhere() {
        let s = sample(vec![(10, 0), (20, 0), (30, 0), (40, 0)]);
        let set = suggest(&s, 4).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(*set.ranges()[0].end(), KeyBound::Key(10));
        assert_eq!(*set.ranges()[1].end(), KeyBound::Key(20));
        assert_eq!(*set.ranges()[2].end(), KeyBound::Key(30));
    }

    #[test]
    fn test_partial_suggestion_reports_achieved() {
        let s = sample(vec![(1, 10), (2, 10)]);
        let err = suggest(&s, 8).unwrap_err();
        assert_eq!(err, SuggestError::PartialSuggestion { achieved: 3 }.into());

        let suggestion = propose(&s, 8).unwrap();
        assert_eq!(suggestion.requested(), 8);
        assert_eq!(suggestion.achieved(), 3);
        assert_eq!(suggestion.shortfall(), Some(3));
        assert_eq!(suggestion.set().len(), 3);
    }

    #[test]
    fn test_exact_tie_emits_split() {
        // running == target exactly closes the shard, not the next key
        let s = sample(vec![(1, 20), (2, 5), (3, 15)]);
        let set = suggest(&s, 2).unwrap();
        assert_eq!(*set.ranges()[0].end(), KeyBound::Key(1));
    }
}
