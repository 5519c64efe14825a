//! End-to-end aggregation runs against the in-memory provider.

use std::time::Duration;

use catalog_core::{CatalogQuery, ChainLink, EntityId, EntityRange, SortKey};
use catalog_provider::mock::species_ref;
use catalog_provider::{CreatureFixture, MockProvider, StatFixture};
use pipeline::{
    AggregateError, Aggregator, CancellationToken, ErrorPolicy, PipelineConfig, ResolveError,
    aggregate,
};
use serde_json::json;

fn id(raw: u32) -> EntityId {
    EntityId::new(raw).unwrap()
}

fn ids(raw: &[u32]) -> Vec<EntityId> {
    raw.iter().copied().map(id).collect()
}

fn hp() -> StatFixture {
    StatFixture::new(1, "hp", 50).label("fr", "PV")
}

fn attack() -> StatFixture {
    StatFixture::new(2, "attack", 50).label("fr", "Attaque")
}

/// Creatures 1..=n named `mon-{id}`, localized as `Monstre {id}`.
fn provider_with(n: u32) -> MockProvider {
    let provider = MockProvider::new();
    for raw in 1..=n {
        provider.seed(
            &CreatureFixture::new(id(raw), format!("mon-{raw}"))
                .typed(if raw % 2 == 0 { "water" } else { "fire" })
                .named("fr", format!("Monstre {raw}"))
                .flavor("fr", format!("Texte {raw}"))
                .stat(hp())
                .stat(attack()),
        );
    }
    provider
}

fn returned_ids(views: &catalog_core::CatalogStore) -> Vec<u32> {
    views.iter().map(|v| v.id().get()).collect()
}

#[tokio::test]
async fn one_view_per_id_in_input_order() {
    let provider = provider_with(6);
    let aggregator = Aggregator::new(provider, PipelineConfig::default());

    let requested = ids(&[5, 2, 6, 1, 4, 3]);
    let report = aggregator.aggregate(&requested).await.unwrap();

    assert!(report.is_complete());
    assert_eq!(returned_ids(&report.views), vec![5, 2, 6, 1, 4, 3]);
    let first = &report.views.as_slice()[0];
    assert_eq!(first.name, "Monstre 5");
    assert_eq!(first.flavor_text.as_deref(), Some("Texte 5"));
    assert_eq!(first.stats[1].label, "Attaque");
}

#[tokio::test(start_paused = true)]
async fn order_survives_reversed_completion() {
    let provider = provider_with(5);
    // Earlier ids answer last.
    for raw in 1..=5u32 {
        provider.delay(
            provider.endpoints().entity(id(raw)),
            Duration::from_millis(100 * u64::from(6 - raw)),
        );
    }

    let aggregator = Aggregator::new(provider, PipelineConfig::default());
    let range: EntityRange = "1-5".parse().unwrap();
    let report = aggregator.aggregate(&range.to_vec()).await.unwrap();
    assert_eq!(returned_ids(&report.views), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn unmatched_locale_keeps_original_name() {
    let provider = provider_with(3);
    let config = PipelineConfig::default().with_locale("ja");
    let report = Aggregator::new(provider, config)
        .aggregate(&ids(&[1, 2, 3]))
        .await
        .unwrap();

    let names: Vec<&str> = report.views.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["mon-1", "mon-2", "mon-3"]);
    assert!(report.views.iter().all(|v| v.flavor_text.is_none()));
    assert!(report.views.iter().all(|v| v.stats[0].label == "hp"));
}

#[tokio::test]
async fn repeated_runs_are_identical() {
    let provider = provider_with(4);
    let aggregator = Aggregator::new(provider, PipelineConfig::default());
    let requested = ids(&[1, 2, 3, 4]);

    let first = aggregator.aggregate(&requested).await.unwrap();
    let second = aggregator.aggregate(&requested).await.unwrap();

    assert_eq!(first.views, second.views);
    assert_eq!(second.views.len(), 4);
}

#[tokio::test]
async fn evolution_chain_is_flattened_pre_order() {
    let provider = MockProvider::new();
    // root -> [A] -> [B, C], shared by all four creatures.
    let chain = ChainLink::with_children(
        species_ref("root", 1),
        vec![ChainLink::with_children(
            species_ref("a", 2),
            vec![
                ChainLink::leaf(species_ref("b", 3)),
                ChainLink::leaf(species_ref("c", 4)),
            ],
        )],
    );
    provider.seed(&CreatureFixture::new(id(1), "root").chain(7, Some(chain)));
    for (raw, name) in [(2, "a"), (3, "b"), (4, "c")] {
        provider.seed(&CreatureFixture::new(id(raw), name).chain(7, None));
    }

    let report = Aggregator::new(provider, PipelineConfig::default())
        .aggregate(&ids(&[1, 2, 3, 4]))
        .await
        .unwrap();

    for view in report.views.iter() {
        let names: Vec<&str> = view.evolutions.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["root", "a", "b", "c"], "creature {}", view.id());
    }
}

#[tokio::test]
async fn failed_stat_aborts_whole_batch() {
    let provider = provider_with(6);
    // Creature 4 gets its own second stat document, which is down.
    provider.seed(
        &CreatureFixture::new(id(4), "mon-4")
            .stat(hp())
            .stat(StatFixture::new(42, "special-attack", 60)),
    );
    provider.fail(provider.endpoints().stat(42), "connection reset");

    let aggregator = Aggregator::new(provider, PipelineConfig::default());
    let err = aggregator
        .aggregate(&ids(&[1, 2, 3, 4, 5, 6]))
        .await
        .unwrap_err();

    assert_eq!(err.entity_id(), Some(id(4)));
    match err {
        AggregateError::Entity {
            source: ResolveError::Provider(provider_error),
            ..
        } => assert!(provider_error.is_transport()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn partial_policy_reports_failures_and_keeps_order() {
    let provider = provider_with(6);
    provider.fail(provider.endpoints().entity(id(2)), "timeout");
    provider.fail(provider.endpoints().species(id(5)), "timeout");

    let config = PipelineConfig::default().with_error_policy(ErrorPolicy::Partial);
    let report = Aggregator::new(provider, config)
        .aggregate(&ids(&[6, 5, 4, 3, 2, 1]))
        .await
        .unwrap();

    assert!(!report.is_complete());
    assert_eq!(returned_ids(&report.views), vec![6, 4, 3, 1]);
    let failed: Vec<u32> = report.failures.iter().map(|f| f.id.get()).collect();
    assert_eq!(failed, vec![5, 2]);
}

#[tokio::test]
async fn malformed_species_is_decode_failure() {
    let provider = provider_with(2);
    provider.insert_raw(
        provider.endpoints().species(id(2)),
        json!({ "names": "not-a-list" }),
    );

    let err = Aggregator::new(provider, PipelineConfig::default())
        .aggregate(&ids(&[1, 2]))
        .await
        .unwrap_err();

    match err {
        AggregateError::Entity {
            id: failed,
            source: ResolveError::Provider(provider_error),
        } => {
            assert_eq!(failed, id(2));
            assert!(provider_error.is_decode());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn concurrency_cap_bounds_fan_out() {
    let delay = Duration::from_secs(1);

    let serial = provider_with(4);
    for raw in 1..=4 {
        serial.delay(serial.endpoints().entity(id(raw)), delay);
    }
    let started = tokio::time::Instant::now();
    Aggregator::new(serial, PipelineConfig::default().with_concurrency(1))
        .aggregate(&ids(&[1, 2, 3, 4]))
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_secs(4));

    let parallel = provider_with(4);
    for raw in 1..=4 {
        parallel.delay(parallel.endpoints().entity(id(raw)), delay);
    }
    let started = tokio::time::Instant::now();
    Aggregator::new(parallel, PipelineConfig::default().with_concurrency(4))
        .aggregate(&ids(&[1, 2, 3, 4]))
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_the_run() {
    let provider = provider_with(3);
    for raw in 1..=3 {
        provider.delay(provider.endpoints().entity(id(raw)), Duration::from_secs(60));
    }
    let aggregator = Aggregator::new(provider, PipelineConfig::default());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.cancel();
    });

    let started = tokio::time::Instant::now();
    let err = aggregator
        .aggregate_with_cancel(&ids(&[1, 2, 3]), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AggregateError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(60));
}

#[tokio::test]
async fn empty_batch_is_empty_report() {
    let report = Aggregator::new(MockProvider::new(), PipelineConfig::default())
        .aggregate(&[])
        .await
        .unwrap();
    assert!(report.views.is_empty());
    assert!(report.is_complete());
}

#[tokio::test]
async fn free_function_feeds_queries() {
    let provider = provider_with(6);
    let store = aggregate(provider, &ids(&[3, 1, 2, 6, 5, 4]), "fr")
        .await
        .unwrap();

    let everything = store.query(&CatalogQuery::default());
    assert_eq!(everything.len(), 6);

    let by_number = store.query(&CatalogQuery::new("", Some(SortKey::Number)));
    let numbers: Vec<u32> = by_number.iter().map(|v| v.id().get()).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);

    let ones = store.query(&CatalogQuery::new(" monstre 1 ", None));
    assert_eq!(ones.len(), 1);

    assert!(store.query(&CatalogQuery::new("pikachu", None)).is_empty());
}

#[tokio::test]
async fn details_use_configured_locale() {
    let provider = provider_with(2);
    let aggregator = Aggregator::new(provider, PipelineConfig::default());
    let view = aggregator.resolve_details(id(2)).await.unwrap();
    assert_eq!(view.name, "Monstre 2");
    assert_eq!(view.stats[0].label, "PV");
    assert!(view.evolutions.is_empty());
}
