//! Tests for resolving result rows to option combos.

#[path = "../common/mod.rs"]
mod common;

use std::collections::{BTreeMap, HashMap};

use common::*;
use pidisag::disag::{
    canonical_key, DisagError, DisaggregationContext, DisaggregationPlanner, NamedRow, RowOutcome,
    RowResolver, WILDCARD,
};
use pidisag::model::{EventQuery, ProgramIndicator, QueryDimension};

async fn plan_for(indicator: &ProgramIndicator, query: &EventQuery) -> DisaggregationContext {
    DisaggregationPlanner::new()
        .plan(query, indicator, &catalog_2x2())
        .await
        .unwrap()
}

fn accept(coc: &str, aoc: &str) -> RowOutcome {
    RowOutcome::Accept {
        coc: coc.into(),
        aoc: aoc.into(),
    }
}

#[tokio::test]
async fn test_column_order_does_not_matter() {
    let ctx = plan_for(&indicator_2x2(), &EventQuery::new()).await;
    let resolver = RowResolver::new(&ctx);

    let a_first = NamedRow::new()
        .with(CAT_A, Some("A2"))
        .with(CAT_B, Some("B1"))
        .with("value", Some("7"));
    let b_first = NamedRow::new()
        .with("value", Some("7"))
        .with(CAT_B, Some("B1"))
        .with(CAT_A, Some("A2"));

    assert_eq!(resolver.resolve(&a_first).unwrap(), accept("C21", WILDCARD));
    assert_eq!(resolver.resolve(&b_first).unwrap(), accept("C21", WILDCARD));
}

#[tokio::test]
async fn test_every_combo_round_trips() {
    let indicator = indicator_2x2();
    let ctx = plan_for(&indicator, &EventQuery::new()).await;
    let resolver = RowResolver::new(&ctx);

    for coc in &indicator.category_combo.option_combos {
        // One synthesized value per category, whichever option of that
        // category the combo carries
        let mut row = BTreeMap::new();
        for category in &indicator.category_combo.categories {
            let option = coc
                .options
                .iter()
                .find(|o| category.has_option(o))
                .unwrap();
            row.insert(category.uid.clone(), option.clone());
        }

        assert_eq!(resolver.resolve(&row).unwrap(), accept(&coc.uid, WILDCARD));
        assert_eq!(ctx.coc_resolver()[&canonical_key(&coc.options)], coc.uid);
    }
}

#[tokio::test]
async fn test_missing_data_rejects() {
    let ctx = plan_for(&indicator_2x2(), &EventQuery::new()).await;
    let resolver = RowResolver::new(&ctx);

    // Empty string: no filter of B matched
    assert_eq!(
        resolver.resolve(&row(&[(CAT_A, "A1"), (CAT_B, "")])).unwrap(),
        RowOutcome::Reject
    );

    // Column absent altogether
    assert_eq!(resolver.resolve(&row(&[(CAT_A, "A1")])).unwrap(), RowOutcome::Reject);

    // SQL NULL
    let nullable: HashMap<String, Option<String>> = HashMap::from([
        (CAT_A.to_string(), Some("A1".to_string())),
        (CAT_B.to_string(), None),
    ]);
    assert_eq!(resolver.resolve(&nullable).unwrap(), RowOutcome::Reject);

    // Value that is not an option of the category
    assert_eq!(
        resolver.resolve(&row(&[(CAT_A, "A1"), (CAT_B, "A1")])).unwrap(),
        RowOutcome::Reject
    );
}

#[tokio::test]
async fn test_two_matching_filters_are_an_error() {
    let ctx = plan_for(&indicator_2x2(), &EventQuery::new()).await;
    let resolver = RowResolver::new(&ctx);

    let err = resolver
        .resolve(&row(&[(CAT_A, "A1"), (CAT_B, "B1B2")]))
        .unwrap_err();

    let details = match err {
        DisagError::AmbiguousMapping(details) => details,
        other => panic!("expected ambiguity, got {other}"),
    };
    assert_eq!(details.options, vec!["B1", "B2"]);
    assert_eq!(details.category_uid, CAT_B);
    assert_eq!(details.category_name, "Category B");
    assert_eq!(details.indicator_uid, INDICATOR);
    assert_eq!(details.combo_uid, "ccAB0000001");

    let message = DisagError::AmbiguousMapping(details).to_string();
    assert!(message.contains("B1"));
    assert!(message.contains("B2"));
}

#[tokio::test]
async fn test_dimension_category_read_by_alias() {
    let query = EventQuery::new().with_dimension(QueryDimension::category(CAT_A, ["A1", "A2"]));
    let ctx = plan_for(&indicator_2x2(), &query).await;
    assert_eq!(ctx.coc_categories(), [CAT_B]);

    // The executor selects the dimension category under its own UID
    let outcome = RowResolver::new(&ctx)
        .resolve(&row(&[(CAT_A, "A1"), (CAT_B, "B2")]))
        .unwrap();
    assert_eq!(outcome, accept("C12", WILDCARD));
}

#[tokio::test]
async fn test_attribute_side() {
    let ctx = plan_for(&indicator_2x2_attribute(), &EventQuery::new()).await;
    let resolver = RowResolver::new(&ctx);

    assert_eq!(
        resolver.resolve(&row(&[(CAT_A, "A2"), (CAT_B, "B2")])).unwrap(),
        accept(WILDCARD, "C22")
    );
    assert_eq!(
        resolver.resolve(&row(&[(CAT_A, "A2")])).unwrap(),
        RowOutcome::Reject
    );
}

#[tokio::test]
async fn test_default_combos_accept_without_reading() {
    let ctx = DisaggregationContext::noop();
    let outcome = RowResolver::new(&ctx).resolve(&NamedRow::new()).unwrap();
    assert_eq!(outcome, accept(WILDCARD, WILDCARD));
}

#[tokio::test]
async fn test_resolve_rows_batch() {
    let ctx = plan_for(&indicator_2x2(), &EventQuery::new()).await;

    let rows = vec![
        row(&[(CAT_A, "A1"), (CAT_B, "B1"), ("value", "3")]),
        row(&[(CAT_A, "A9"), (CAT_B, "B1"), ("value", "4")]),
        row(&[(CAT_B, "B2"), ("value", "5")]),
        row(&[(CAT_A, "A2"), (CAT_B, "B1"), ("value", "6")]),
    ];

    let resolved = RowResolver::new(&ctx).resolve_rows(rows).unwrap();
    assert_eq!(resolved.rejected, 2);
    assert_eq!(resolved.accepted.len(), 2);
    assert_eq!(resolved.accepted[1].coc, "C21");
    assert_eq!(resolved.accepted[1].row["value"], "6");
}

#[tokio::test]
async fn test_resolve_rows_stops_on_ambiguity() {
    let ctx = plan_for(&indicator_2x2(), &EventQuery::new()).await;

    let rows = vec![
        row(&[(CAT_A, "A1"), (CAT_B, "B1")]),
        row(&[(CAT_A, "A1A2"), (CAT_B, "B1")]),
    ];

    let result = RowResolver::new(&ctx).resolve_rows(rows);
    assert!(matches!(result, Err(DisagError::AmbiguousMapping(_))));
}

#[tokio::test]
async fn test_data_value_id_uses_export_id() {
    let indicator = indicator_2x2().with_export_data_element("ExportDeId");
    let ctx = plan_for(&indicator, &EventQuery::new()).await;

    let outcome = RowResolver::new(&ctx)
        .resolve(&row(&[(CAT_A, "A2"), (CAT_B, "B1")]))
        .unwrap();

    assert_eq!(
        outcome.data_value_id(indicator.export_id()).as_deref(),
        Some("ExportDeId-C21-*")
    );
}
