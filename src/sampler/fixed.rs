use crate::catalog::TableId;
use crate::codec::Key;
use crate::sampler::{DistributionSample, Sampler};
use crate::util::{Result, SamplerError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Sampler serving pre-registered histograms, one per table. Stands in for
/// the real sampling service in wiring and tests.
pub struct FixedSampler<K: Key> {
    inner: RwLock<BTreeMap<TableId, DistributionSample<K>>>,
}

impl<K: Key> FixedSampler<K> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn register(&self, table: TableId, sample: DistributionSample<K>) {
        let mut inner = self.inner.write().unwrap();
        inner.insert(table, sample);
    }
}

#[async_trait]
impl<K> Sampler for FixedSampler<K>
where
    K: Key + Send + Sync,
{
    type K = K;

    async fn sample(&self, table: &TableId) -> Result<DistributionSample<K>> {
        let inner = self.inner.read().unwrap();
        match inner.get(table) {
            Some(sample) => Ok(sample.clone()),
            None => Err(SamplerError::NoSample(table.to_string()).into()),
        }
    }
}
