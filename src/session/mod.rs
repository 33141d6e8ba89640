use crate::catalog::{Catalog, TableId};
use crate::sampler::DistributionSample;
use crate::shard::{mutate, suggest, ShardSet};
use crate::util::{Result, SuggestError};
use tracing::{debug, info, warn};

/// One operator's edit session over a table's shard layout. `baseline` is
/// the last state exchanged with the catalog and `working` the pending
/// edits; both always satisfy the shard set invariants, so the session can
/// be committed or reset at any point.
pub struct Session<C: Catalog> {
    catalog: C,
    table: TableId,
    baseline: ShardSet<C::K>,
    working: ShardSet<C::K>,
}

impl<C: Catalog> Session<C> {
    /// Starts from the single full-keyspace shard until a fetch replaces it.
    pub fn new(catalog: C, table: TableId) -> Self {
        Session {
            catalog,
            table,
            baseline: ShardSet::full_range(),
            working: ShardSet::full_range(),
        }
    }

    pub fn table(&self) -> &TableId {
        &self.table
    }

    pub fn baseline(&self) -> &ShardSet<C::K> {
        &self.baseline
    }

    pub fn working(&self) -> &ShardSet<C::K> {
        &self.working
    }

    /// Installs a fetched shard set as both baseline and working copy,
    /// discarding any pending edits.
    pub fn load(&mut self, fetched: ShardSet<C::K>) {
        info!(
            target: "shardplan",
            "loaded {} shards for table {}",
            fetched.len(),
            self.table
        );
        self.baseline = fetched.clone();
        self.working = fetched;
    }

    /// Fetches the committed state from the catalog and loads it.
    pub async fn refresh(&mut self) -> Result<()> {
        let fetched = self.catalog.fetch(&self.table).await?;
        self.load(fetched);
        Ok(())
    }

    /// Replaces the working copy with a layout suggested from `sample`.
    /// When the sample cannot support `desired` shards the achieved layout
    /// is still installed and the shortfall comes back as
    /// `SuggestError::PartialSuggestion` so it can be shown to the
    /// operator.
    pub fn apply_suggestion(
        &mut self,
        sample: &DistributionSample<C::K>,
        desired: usize,
    ) -> Result<()> {
        let suggestion = suggest::propose(sample, desired)?;
        let shortfall = suggestion.shortfall();
        self.working = suggestion.into_set();
        match shortfall {
            Some(achieved) => {
                warn!(
                    target: "shardplan",
                    "suggestion for table {} fell short: {} of {} shards",
                    self.table,
                    achieved,
                    desired
                );
                Err(SuggestError::PartialSuggestion { achieved }.into())
            }
            None => Ok(()),
        }
    }

    pub fn apply_split(&mut self, index: usize, point: C::K) -> Result<()> {
        let next = mutate::split(&self.working, index, point)?;
        debug!(
            target: "shardplan",
            "split shard {} of table {}, now {} shards",
            index,
            self.table,
            next.len()
        );
        self.working = next;
        Ok(())
    }

    pub fn apply_merge(&mut self, index: usize) -> Result<()> {
        let next = mutate::merge(&self.working, index)?;
        debug!(
            target: "shardplan",
            "merged shard {} of table {}, now {} shards",
            index,
            self.table,
            next.len()
        );
        self.working = next;
        Ok(())
    }

    pub fn reset_to_baseline(&mut self) {
        self.working = mutate::reset(&self.baseline);
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.working != self.baseline
    }

    /// Pushes the working copy to the catalog and returns the confirmed
    /// state. The baseline only advances on success; a failure leaves the
    /// pending edits in place for retry.
    pub async fn commit(&mut self) -> Result<ShardSet<C::K>> {
        let confirmed = self.catalog.commit(&self.table, &self.working).await?;
        self.baseline = self.working.clone();
        info!(
            target: "shardplan",
            "committed {} shards for table {}",
            self.baseline.len(),
            self.table
        );
        Ok(confirmed)
    }
}
