use crate::catalog::{Catalog, TableId};
use crate::codec::Key;
use crate::shard::ShardSet;
use crate::util::{CatalogError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

enum CatalogRequest<K: Key> {
    Fetch {
        table: TableId,
        res_tx: oneshot::Sender<Result<ShardSet<K>>>,
    },
    Commit {
        table: TableId,
        set: ShardSet<K>,
        res_tx: oneshot::Sender<Result<ShardSet<K>>>,
    },
}

/// Client half of an in-process catalog connection. Requests are forwarded
/// over a channel to the service task spawned by `connect`, one response
/// per request. Cheap to hand to several sessions.
pub struct ChannelCatalog<K: Key> {
    req_tx: mpsc::Sender<CatalogRequest<K>>,
}

/// Wraps a catalog behind a request channel and spawns the task serving
/// it. Must be called from within a tokio runtime. The task exits when the
/// last client is dropped.
pub fn connect<C>(service: Arc<C>) -> ChannelCatalog<C::K>
where
    C: Catalog + 'static,
    C::K: Send + 'static,
{
    let (req_tx, mut req_rx) = mpsc::channel::<CatalogRequest<C::K>>(1024);
    tokio::spawn(async move {
        while let Some(req) = req_rx.recv().await {
            match req {
                CatalogRequest::Fetch { table, res_tx } => {
                    let _ = res_tx.send(service.fetch(&table).await);
                }
                CatalogRequest::Commit { table, set, res_tx } => {
                    let _ = res_tx.send(service.commit(&table, &set).await);
                }
            }
        }
    });
    ChannelCatalog { req_tx }
}

impl<K: Key> Clone for ChannelCatalog<K> {
    fn clone(&self) -> Self {
        ChannelCatalog {
            req_tx: self.req_tx.clone(),
        }
    }
}

#[async_trait]
impl<K> Catalog for ChannelCatalog<K>
where
    K: Key + Send + Sync + 'static,
{
    type K = K;

    async fn fetch(&self, table: &TableId) -> Result<ShardSet<K>> {
        let (res_tx, res_rx) = oneshot::channel();
        self.req_tx
            .send(CatalogRequest::Fetch {
                table: table.clone(),
                res_tx,
            })
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        match res_rx.await {
            Ok(res) => res,
            Err(e) => Err(CatalogError::Unavailable(e.to_string()).into()),
        }
    }

    async fn commit(&self, table: &TableId, set: &ShardSet<K>) -> Result<ShardSet<K>> {
        let (res_tx, res_rx) = oneshot::channel();
        self.req_tx
            .send(CatalogRequest::Commit {
                table: table.clone(),
                set: set.clone(),
                res_tx,
            })
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        match res_rx.await {
            Ok(res) => res,
            Err(e) => Err(CatalogError::Unavailable(e.to_string()).into()),
        }
    }
}
