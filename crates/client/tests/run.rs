//! Whole client runs against the in-memory provider.

use catalog_core::{CatalogQuery, ChainLink, EntityId, SortKey, SpriteVariant};
use catalog_provider::mock::species_ref;
use catalog_provider::{CreatureFixture, MockProvider, StatFixture};
use pipeline::{Aggregator, CancellationToken, ErrorPolicy, PipelineConfig};
use pokedex_client::{ClientConfig, OutputFormat, run};

fn id(raw: u32) -> EntityId {
    EntityId::new(raw).unwrap()
}

fn starters() -> MockProvider {
    let provider = MockProvider::new();
    let hp = || StatFixture::new(1, "hp", 45).label("fr", "PV");
    provider.seed(
        &CreatureFixture::new(id(1), "bulbasaur")
            .typed("grass")
            .typed("poison")
            .named("fr", "Bulbizarre")
            .stat(hp())
            .chain(
                1,
                Some(ChainLink::with_children(
                    species_ref("bulbasaur", 1),
                    vec![ChainLink::leaf(species_ref("ivysaur", 2))],
                )),
            ),
    );
    provider.seed(
        &CreatureFixture::new(id(2), "ivysaur")
            .typed("grass")
            .named("fr", "Herbizarre")
            .stat(hp())
            .chain(1, None),
    );
    provider.seed(
        &CreatureFixture::new(id(3), "charmander")
            .typed("fire")
            .named("fr", "Salamèche")
            .flavor("fr", "Préfère les endroits chauds.")
            .stat(hp()),
    );
    provider
}

fn config(range: &str) -> ClientConfig {
    ClientConfig {
        range: range.parse().unwrap(),
        ..ClientConfig::default()
    }
}

async fn output(provider: MockProvider, config: &ClientConfig) -> anyhow::Result<String> {
    let aggregator = Aggregator::new(provider, config.pipeline.clone());
    let mut out = Vec::new();
    run(&aggregator, config, &CancellationToken::new(), &mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn lists_range_in_id_order() {
    let text = output(starters(), &config("1-3")).await.unwrap();
    let rows: Vec<&str> = text.lines().filter(|l| l.starts_with('#')).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("#001  Bulbizarre"));
    assert!(rows[0].contains("grass/poison"));
    assert!(rows[0].ends_with("bulbasaur > ivysaur"));
    assert!(rows[2].starts_with("#003  Salamèche"));
    assert!(text.contains("      Préfère les endroits chauds."));
}

#[tokio::test]
async fn search_and_sort_shape_the_list() {
    let mut config = config("1-3");
    config.query = CatalogQuery::new("IZARRE", Some(SortKey::Name));
    let text = output(starters(), &config).await.unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("Bulbizarre"));
    assert!(rows[1].contains("Herbizarre"));

    config.query = CatalogQuery::new("pikachu", None);
    let text = output(starters(), &config).await.unwrap();
    assert_eq!(text, "No creatures match.\n");
}

#[tokio::test]
async fn json_output_is_an_array_of_views() {
    let mut config = config("1-3");
    config.output = OutputFormat::Json;
    let text = output(starters(), &config).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bulbizarre", "Herbizarre", "Salamèche"]);
}

#[tokio::test]
async fn detail_card_follows_shiny_flag() {
    let mut config = config("1-3");
    config.detail = Some(id(1));
    config.sprite = SpriteVariant::Shiny;
    let text = output(starters(), &config).await.unwrap();
    assert!(text.contains("Bulbizarre (#001)"));
    assert!(text.contains("Sprite (shiny): https://sprites.test/shiny/1.png"));
    assert!(text.contains("PV"));
    assert!(text.contains("ivysaur"));
}

#[tokio::test]
async fn failed_creature_fails_the_run() {
    let provider = starters();
    provider.fail(provider.endpoints().species(id(2)), "connection reset");
    let err = output(provider, &config("1-3")).await.unwrap_err();
    let chain = format!("{:#}", err);
    assert!(chain.contains("Failed to load the catalog"));
    assert!(chain.contains("#2"));
}

#[tokio::test]
async fn partial_policy_prints_what_loaded() {
    let provider = starters();
    provider.fail(provider.endpoints().species(id(2)), "connection reset");
    let mut config = config("1-3");
    config.pipeline = PipelineConfig::default().with_error_policy(ErrorPolicy::Partial);
    let text = output(provider, &config).await.unwrap();
    assert!(text.contains("Bulbizarre"));
    assert!(!text.contains("Herbizarre"));
    assert!(text.contains("Salamèche"));
}
