use crate::codec::Key;
use crate::shard::ShardSet;
use crate::util::Result;
use async_trait::async_trait;
use std::fmt;

/// Identifies a table in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId(String);

impl TableId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        TableId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The catalog service holds the committed shard set per table. `commit`
/// returns the persisted result, which is what callers should trust; a
/// failed commit leaves the catalog unchanged.
#[async_trait]
pub trait Catalog: Send + Sync {
    type K: Key;

    async fn fetch(&self, table: &TableId) -> Result<ShardSet<Self::K>>;
    async fn commit(&self, table: &TableId, set: &ShardSet<Self::K>) -> Result<ShardSet<Self::K>>;
}

pub mod wire;

mod mem;
pub use mem::MemCatalog;

mod channel;
pub use channel::{connect, ChannelCatalog};
