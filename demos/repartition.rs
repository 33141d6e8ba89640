use shardplan::catalog::{connect, Catalog, MemCatalog, TableId};
use shardplan::codec::byte::ByteKey;
use shardplan::sampler::{DistributionSample, FixedSampler, Sampler};
use shardplan::shard::ShardSet;
use shardplan::Session;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn main() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let service: Arc<MemCatalog<ByteKey>> = Arc::new(MemCatalog::new());
        let table = TableId::new("users");

        // the catalog starts with the whole keyspace in one shard
        service
            .commit(&table, &ShardSet::full_range())
            .await
            .unwrap();

        let sampler = FixedSampler::new();
        sampler.register(
            table.clone(),
            DistributionSample::from_pairs(vec![
                (ByteKey::from(b"d"), 120),
                (ByteKey::from(b"h"), 90),
                (ByteKey::from(b"m"), 130),
                (ByteKey::from(b"r"), 110),
                (ByteKey::from(b"w"), 100),
            ])
            .unwrap(),
        );

        let mut session = Session::new(connect(service), table.clone());
        session.refresh().await.unwrap();
        println!("fetched:   {:?}", session.working());

        let sample = sampler.sample(&table).await.unwrap();
        session.apply_suggestion(&sample, 3).unwrap();
        println!("suggested: {:?}", session.working());

        // the operator trims the open-ended shard by hand before committing
        session.apply_split(2, ByteKey::from(b"w")).unwrap();
        println!("edited:    {:?}", session.working());

        let confirmed = session.commit().await.unwrap();
        println!("committed: {:?}", confirmed);
        assert!(!session.has_unsaved_changes());
    });
}
