use crate::catalog::{wire, Catalog, TableId};
use crate::codec::Key;
use crate::shard::ShardSet;
use crate::util::{CatalogError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::RwLock;

/// Catalog kept in process memory. State is held in the wire layout, so
/// every fetch and commit runs through the same encode/decode path a real
/// catalog service would.
pub struct MemCatalog<K: Key> {
    inner: RwLock<BTreeMap<TableId, Value>>,
    phantom: PhantomData<K>,
}

impl<K: Key> MemCatalog<K> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<K> Catalog for MemCatalog<K>
where
    K: Key + Serialize + DeserializeOwned + Send + Sync,
{
    type K = K;

    async fn fetch(&self, table: &TableId) -> Result<ShardSet<K>> {
        let inner = self.inner.read().unwrap();
        match inner.get(table) {
            Some(value) => wire::decode(value),
            None => Err(CatalogError::NoSuchTable(table.to_string()).into()),
        }
    }

    async fn commit(&self, table: &TableId, set: &ShardSet<K>) -> Result<ShardSet<K>> {
        let value = wire::encode(set)?;
        let confirmed = wire::decode(&value)?;
        let mut inner = self.inner.write().unwrap();
        inner.insert(table.clone(), value);
        Ok(confirmed)
    }
}
