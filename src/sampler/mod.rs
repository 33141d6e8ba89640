use crate::catalog::TableId;
use crate::codec::Key;
use crate::util::{Result, SamplerError};
use async_trait::async_trait;

/// One histogram bucket: a sampled key and the approximate number of rows
/// accumulated at it.
#[derive(Debug)]
pub struct SamplePoint<K: Key> {
    pub key: K,
    pub count: u64,
}

impl<K: Key> Clone for SamplePoint<K> {
    fn clone(&self) -> Self {
        SamplePoint {
            key: self.key.to_owned(),
            count: self.count,
        }
    }
}

/// An approximate row-density histogram over a table's keyspace, ordered
/// strictly ascending by key. Construction enforces the ordering; holders
/// never mutate a sample afterwards.
#[derive(Debug)]
pub struct DistributionSample<K: Key> {
    points: Vec<SamplePoint<K>>,
}

impl<K: Key> DistributionSample<K> {
    pub fn new(points: Vec<SamplePoint<K>>) -> Result<Self> {
        for i in 1..points.len() {
            if points[i - 1].key >= points[i].key {
                return Err(SamplerError::OutOfOrder { index: i }.into());
            }
        }
        Ok(DistributionSample { points })
    }

    pub fn from_pairs(pairs: Vec<(K, u64)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(key, count)| SamplePoint { key, count })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SamplePoint<K>] {
        &self.points
    }

    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.count).sum()
    }
}

impl<K: Key> Clone for DistributionSample<K> {
    fn clone(&self) -> Self {
        DistributionSample {
            points: self.points.clone(),
        }
    }
}

/// The distribution sampler collaborator: serves the key-density histogram
/// a split suggestion is computed from.
#[async_trait]
pub trait Sampler: Send + Sync {
    type K: Key;

    async fn sample(&self, table: &TableId) -> Result<DistributionSample<Self::K>>;
}

mod fixed;
pub use fixed::FixedSampler;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_enforced() {
        assert!(DistributionSample::from_pairs(vec![(1, 5), (2, 5), (3, 5)]).is_ok());

        let err = DistributionSample::from_pairs(vec![(1, 5), (3, 5), (2, 5)]).unwrap_err();
        assert_eq!(err, SamplerError::OutOfOrder { index: 2 }.into());

        // duplicates are not strictly increasing either
        let err = DistributionSample::from_pairs(vec![(1, 5), (1, 5)]).unwrap_err();
        assert_eq!(err, SamplerError::OutOfOrder { index: 1 }.into());
    }

    #[test]
    fn test_total() {
        let sample = DistributionSample::from_pairs(vec![(1, 5), (2, 0), (3, 7)]).unwrap();
        assert_eq!(sample.total(), 12);
        assert_eq!(sample.len(), 3);
        let empty: DistributionSample<i32> = DistributionSample::from_pairs(vec![]).unwrap();
        assert_eq!(empty.total(), 0);
        assert!(empty.is_empty());
    }
}
