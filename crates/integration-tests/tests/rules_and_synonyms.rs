//! Query Rules and Synonyms Integration Tests

use chrono::{TimeZone, Utc};
use hosted_search_sdk::domain::{AutomaticFacetFilter, Edit, HiddenObject, TimeRange};
use hosted_search_sdk::{
    AltCorrectionType, Anchoring, Index, Record, Rule, RuleCondition, RuleConsequence,
    SearchClient, SearchParams, Synonym,
};
use serde_json::json;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn consoles_index(client: &SearchClient, name: &str) -> Index {
    let index = client.init_index(name);
    let receipt = index
        .add_objects(
            [
                "Sony PlayStation <PLAYSTATIONVERSION>",
                "Nintendo Switch",
                "Nintendo Wii U",
                "Nintendo Game Boy Advance",
                "Microsoft Xbox",
                "Microsoft Xbox 360",
                "Microsoft Xbox One",
            ]
            .into_iter()
            .map(|console| Record::new().with("console", console))
            .collect(),
        )
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    index
}

fn brand_rule() -> Rule {
    Rule::new(
        "brand_tagging",
        RuleCondition::new(Anchoring::Contains, "{facet:brand}"),
        RuleConsequence {
            params: json!({"automaticFacetFilters": ["brand"]})
                .as_object()
                .cloned()
                .unwrap(),
            ..Default::default()
        },
    )
    .with_description("Automatic tagging of brands in queries")
}

/// Rule exercising validity windows, scored facet filters, query edits and hides
fn query_edits_rule() -> Rule {
    let from = Utc.with_ymd_and_hms(2018, 7, 24, 13, 35, 0).unwrap();
    let until = Utc.with_ymd_and_hms(2018, 7, 25, 13, 35, 0).unwrap();

    let mut rule = Rule::new(
        "query_edits",
        RuleCondition::new(Anchoring::Is, "mobile phone").with_context("mobile"),
        RuleConsequence {
            params: json!({
                "automaticFacetFilters": [AutomaticFacetFilter {
                    facet: "brand".to_string(),
                    disjunctive: true,
                    score: 42,
                }],
                "query": {"edits": [Edit::remove("android"), Edit::replace("iphone", "apple")]}
            })
            .as_object()
            .cloned()
            .unwrap(),
            hide: vec![
                HiddenObject { object_id: "42".to_string() },
                HiddenObject { object_id: "43".to_string() },
            ],
            ..Default::default()
        },
    )
    .with_validity(vec![TimeRange { from, until }]);
    rule.disable();
    rule
}

#[tokio::test]
async fn test_rules_lifecycle() {
    let client = SearchClient::in_memory();
    let index = consoles_index(&client, "rules").await;

    let brand = brand_rule();
    let edits = query_edits_rule();
    let receipt = index.save_rule(&brand, false).await.unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    let receipt = index.batch_rules(&[edits.clone()], false, false).await.unwrap();
    index.wait_task(receipt.task_id).await.unwrap();

    assert_eq!(index.get_rule("brand_tagging").await.unwrap(), brand);
    let found = index.get_rule("query_edits").await.unwrap();
    assert_eq!(found, edits);
    assert!(!found.enabled);
    assert_eq!(found.consequence.hide.len(), 2);

    let res = index.search_rules(&SearchParams::new()).await.unwrap();
    assert_eq!(res.nb_hits, 2);

    let mut params = SearchParams::new();
    params.insert("query".to_string(), json!("brand"));
    let res = index.search_rules(&params).await.unwrap();
    assert_eq!(res.nb_hits, 1);
    assert_eq!(res.hits[0].object_id, "brand_tagging");

    let receipt = index.delete_rule("brand_tagging", false).await.unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    let err = index.get_rule("brand_tagging").await.unwrap_err();
    assert!(err.is_not_found());

    // Replacing the whole set drops rules that are not resent
    let receipt = index.batch_rules(&[brand.clone()], false, true).await.unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    assert!(index.get_rule("query_edits").await.unwrap_err().is_not_found());
    assert!(index.get_rule("brand_tagging").await.is_ok());

    let receipt = index.clear_rules(false).await.unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    let res = index.search_rules(&SearchParams::new()).await.unwrap();
    assert_eq!(res.nb_hits, 0);

    println!("✅ Rules saved, searched and removed");
}

#[tokio::test]
async fn test_synonyms_lifecycle() {
    let client = SearchClient::in_memory();
    let index = consoles_index(&client, "synonyms").await;

    let synonyms = vec![
        Synonym::regular("gba", strings(&["gba", "gameboy advance", "game boy advance"])),
        Synonym::one_way("wii_to_wii_u", "Wii", strings(&["Wii U"])),
        Synonym::placeholder(
            "playstation_version_placeholder",
            "<PLAYSTATIONVERSION>",
            strings(&["1", "One", "2", "3", "4", "4 Pro"]),
        ),
        Synonym::alt_correction("psone", strings(&["playstationone"]), "psone", AltCorrectionType::One),
        Synonym::alt_correction("pike", strings(&["robpike"]), "pike", AltCorrectionType::Two),
    ];

    let mut tasks = vec![index.save_synonym(&synonyms[0], false).await.unwrap().task_id];
    tasks.push(
        index
            .batch_synonyms(&synonyms[1..], false, false)
            .await
            .unwrap()
            .task_id,
    );
    index.wait_tasks(&tasks).await.unwrap();

    for expected in &synonyms {
        let found = index.get_synonym(expected.object_id()).await.unwrap();
        assert_eq!(&found, expected);
    }

    let res = index.search_synonyms("", &[], 0, 10).await.unwrap();
    assert_eq!(res.nb_hits, 5);
    assert_eq!(res.hits.len(), 5);

    let res = index
        .search_synonyms("", &strings(&["placeholder", "altCorrection2"]), 0, 10)
        .await
        .unwrap();
    assert_eq!(res.nb_hits, 2);

    // Type filters ignore case
    let res = index
        .search_synonyms("", &strings(&["onewaysynonym", "altcorrection1"]), 0, 10)
        .await
        .unwrap();
    assert_eq!(res.nb_hits, 2);

    let res = index.search_synonyms("wii", &[], 0, 10).await.unwrap();
    assert_eq!(res.nb_hits, 1);
    assert_eq!(res.hits[0].type_name(), "oneWaySynonym");

    let res = index.search_synonyms("", &[], 1, 2).await.unwrap();
    assert_eq!(res.nb_hits, 5);
    assert_eq!(res.hits.len(), 2);

    let receipt = index.delete_synonym("gba", false).await.unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    let err = index.get_synonym("gba").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Synonym set does not exist"));

    let receipt = index.clear_synonyms(false).await.unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    let res = index.search_synonyms("", &[], 0, 10).await.unwrap();
    assert_eq!(res.nb_hits, 0);

    println!("✅ All five synonym kinds round-tripped");
}

#[tokio::test]
async fn test_replace_existing_synonyms() {
    let client = SearchClient::in_memory();
    let index = client.init_index("replace_synonyms");

    let receipt = index
        .save_synonym(&Synonym::regular("old", strings(&["a", "b"])), false)
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();

    let receipt = index
        .batch_synonyms(&[Synonym::regular("new", strings(&["c", "d"]))], false, true)
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();

    assert!(index.get_synonym("old").await.unwrap_err().is_not_found());
    assert!(index.get_synonym("new").await.is_ok());
}
