//! Tests for synthesized column SQL.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use insta::assert_snapshot;
use pidisag::config::SqlSettings;
use pidisag::disag::{
    ColumnGenerator, DisagError, DisaggregationContext, DisaggregationPlanner, GroupByMode,
};
use pidisag::model::{EventQuery, QueryDimension};
use pidisag::sql::Dialect;

async fn plan(query: &EventQuery) -> DisaggregationContext {
    DisaggregationPlanner::new()
        .plan(query, &indicator_2x2(), &catalog_2x2())
        .await
        .unwrap()
}

/// Assemble a full aggregate query around the generated fragments.
fn assemble(generator: &ColumnGenerator<'_>) -> String {
    let mut select = generator.select_columns().unwrap();
    select.push("count(*) AS total".to_string());
    let conditions = generator.coc_where_conditions().unwrap();
    let group_by = generator.group_by_columns().unwrap();

    format!(
        "SELECT {} FROM analytics_event WHERE {} GROUP BY {}",
        select.join(", "),
        conditions.join(" AND "),
        group_by.join(", ")
    )
}

#[tokio::test]
async fn test_select_columns_postgres() {
    let ctx = plan(&EventQuery::new()).await;
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());
    let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range);

    let cols = generator.select_columns().unwrap();
    assert_snapshot!(cols.join("\n"), @r#"
    CASE WHEN "a" = 1 THEN 'A1' ELSE '' END || CASE WHEN "a" = 2 THEN 'A2' ELSE '' END AS "catA"
    CASE WHEN "b" = 1 THEN 'B1' ELSE '' END || CASE WHEN "b" = 2 THEN 'B2' ELSE '' END AS "catB"
    "#);
}

#[tokio::test]
async fn test_group_by_alias_matches_select() {
    let ctx = plan(&EventQuery::new()).await;
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());
    let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range);

    let select = generator.select_columns().unwrap();
    let group_by = generator.group_by_columns().unwrap();

    assert_eq!(group_by, vec!["\"catA\"", "\"catB\""]);
    for (sel, grp) in select.iter().zip(&group_by) {
        assert!(sel.ends_with(&format!(" AS {grp}")));
    }
}

#[tokio::test]
async fn test_group_by_expression_matches_select() {
    let ctx = plan(&EventQuery::new()).await;
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());
    let generator =
        ColumnGenerator::new(&ctx, &compiler, &pi, &range).with_group_by(GroupByMode::Expression);

    let select = generator.select_columns().unwrap();
    let group_by = generator.group_by_columns().unwrap();

    for ((sel, grp), uid) in select.iter().zip(&group_by).zip([CAT_A, CAT_B]) {
        assert_eq!(sel, &format!("{grp} AS \"{uid}\""));
        assert_eq!(grp, &generator.where_column(uid).unwrap());
    }
}

#[tokio::test]
async fn test_doris_fragments() {
    let ctx = plan(&EventQuery::new()).await;
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());
    let settings = SqlSettings {
        dialect: Dialect::Doris,
        group_by: GroupByMode::Alias,
    };
    let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range).with_settings(&settings);

    assert_snapshot!(generator.select_column(CAT_A).unwrap(), @r#"CONCAT(CASE WHEN "a" = 1 THEN 'A1' ELSE '' END, CASE WHEN "a" = 2 THEN 'A2' ELSE '' END) AS `catA`"#);
    assert_eq!(generator.group_by_column(CAT_A).unwrap(), "`catA`");
    // `||` is logical OR in Doris
    assert!(!assemble(&generator).contains("||"));
}

#[tokio::test]
async fn test_assembled_query_parses_in_every_dialect() {
    let ctx = plan(&EventQuery::new()).await;
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());

    for dialect in [Dialect::Postgres, Dialect::Doris, Dialect::ClickHouse] {
        for mode in [GroupByMode::Alias, GroupByMode::Expression] {
            let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range)
                .with_dialect(dialect)
                .with_group_by(mode);
            assert_valid_sql(&assemble(&generator), dialect);
        }
    }
}

#[tokio::test]
async fn test_dimension_category_column() {
    let query = EventQuery::new().with_dimension(QueryDimension::category(CAT_A, ["A2"]));
    let ctx = plan(&query).await;
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());
    let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range);

    // Only B is synthesized; A is emitted in place of its dimension column
    assert_eq!(generator.select_columns().unwrap().len(), 1);
    assert!(generator.select_columns().unwrap()[0].ends_with("AS \"catB\""));
    assert!(generator.select_column(CAT_A).unwrap().ends_with("AS \"catA\""));

    let clause = generator.dimension_where_clause(&query.dimensions[0]).unwrap();
    assert_snapshot!(clause.unwrap(), @r#"(CASE WHEN "a" = 1 THEN 'A1' ELSE '' END || CASE WHEN "a" = 2 THEN 'A2' ELSE '' END) IN ('A2')"#);
}

#[tokio::test]
async fn test_plain_dimension_where_clause() {
    let ctx = plan(&EventQuery::new()).await;
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());
    let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range).with_dialect(Dialect::Doris);

    let dim = QueryDimension::category("catOther001", ["optX", "optY"]);
    assert_eq!(
        generator.dimension_where_clause(&dim).unwrap().as_deref(),
        Some("`catOther001` IN ('optX', 'optY')")
    );
}

#[tokio::test]
async fn test_coc_where_conditions() {
    let ctx = plan(&EventQuery::new()).await;
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());
    let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range);

    let conditions = generator.coc_where_conditions().unwrap();
    assert_eq!(conditions.len(), 2);
    assert_eq!(
        conditions[1],
        format!("({}) <> ''", generator.where_column(CAT_B).unwrap())
    );
}

#[tokio::test]
async fn test_unplanned_category() {
    let ctx = plan(&EventQuery::new()).await;
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());
    let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range);

    let err = generator.select_column("catZ").unwrap_err();
    assert!(matches!(err, DisagError::InvariantViolation { .. }));
}

#[tokio::test]
async fn test_compiler_failure_is_fatal() {
    let ctx = plan(&EventQuery::new()).await;
    let (pi, range) = (indicator_2x2(), range());
    let compiler = StubCompiler::new([("#{st.a} == 1", "\"a\" = 1")]);
    let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range);

    let err = generator.select_columns().unwrap_err();
    match err {
        DisagError::FilterCompile {
            indicator,
            category,
            option,
            source,
        } => {
            assert_eq!(indicator, INDICATOR);
            assert_eq!(category, CAT_A);
            assert_eq!(option, "A2");
            assert!(source.message.contains("#{st.a} == 2"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_noop_context() {
    let ctx = DisaggregationContext::noop();
    let (pi, range, compiler) = (indicator_2x2(), range(), StubCompiler::for_2x2());
    let generator = ColumnGenerator::new(&ctx, &compiler, &pi, &range);

    assert!(generator.select_columns().unwrap().is_empty());
    assert!(generator.group_by_columns().unwrap().is_empty());
}
