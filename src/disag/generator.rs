//! SQL fragments for synthesized category columns.
//!
//! Every planned category becomes one string-valued column: a `CASE WHEN`
//! per option mapping, yielding the option UID when its filter holds and
//! `''` otherwise, concatenated in configured order. For a well-formed
//! mapping at most one branch is non-empty, so the column holds the single
//! matching option UID or `''`.
//!
//! ```text
//! CASE WHEN <filter A1> THEN 'A1' ELSE '' END || CASE WHEN <filter A2> THEN 'A2' ELSE '' END
//! ```

use serde::{Deserialize, Serialize};

use super::context::DisaggregationContext;
use super::error::{DisagError, DisagResult, FilterCompileError};
use crate::config::SqlSettings;
use crate::model::{DateRange, ProgramIndicator, QueryDimension};
use crate::sql::{col, concat_all, if_then_else, lit_str, raw_sql, Dialect, Expr, ExprExt};

/// Compiles a stored boolean filter expression into a SQL predicate.
///
/// Implemented by the host's expression service. Closures with the same
/// signature implement it too.
pub trait FilterCompiler: Send + Sync {
    fn compile(
        &self,
        expression: &str,
        indicator: &ProgramIndicator,
        range: &DateRange,
    ) -> Result<String, FilterCompileError>;
}

impl<F> FilterCompiler for F
where
    F: Fn(&str, &ProgramIndicator, &DateRange) -> Result<String, FilterCompileError> + Send + Sync,
{
    fn compile(
        &self,
        expression: &str,
        indicator: &ProgramIndicator,
        range: &DateRange,
    ) -> Result<String, FilterCompileError> {
        self(expression, indicator, range)
    }
}

/// How GROUP BY refers to a synthesized column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupByMode {
    /// The quoted SELECT alias
    #[default]
    Alias,
    /// The full column expression, identical to the SELECT item
    Expression,
}

/// Emits SELECT, GROUP BY and WHERE fragments for a planned query.
pub struct ColumnGenerator<'a> {
    context: &'a DisaggregationContext,
    compiler: &'a dyn FilterCompiler,
    indicator: &'a ProgramIndicator,
    range: &'a DateRange,
    dialect: Dialect,
    group_by: GroupByMode,
}

impl<'a> ColumnGenerator<'a> {
    pub fn new(
        context: &'a DisaggregationContext,
        compiler: &'a dyn FilterCompiler,
        indicator: &'a ProgramIndicator,
        range: &'a DateRange,
    ) -> Self {
        Self {
            context,
            compiler,
            indicator,
            range,
            dialect: Dialect::default(),
            group_by: GroupByMode::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_group_by(mut self, mode: GroupByMode) -> Self {
        self.group_by = mode;
        self
    }

    pub fn with_settings(self, settings: &SqlSettings) -> Self {
        self.with_dialect(settings.dialect).with_group_by(settings.group_by)
    }

    /// The column expression for a planned category.
    pub fn column_expr(&self, category_uid: &str) -> DisagResult<Expr> {
        let mapping = self.context.mapping(category_uid).ok_or_else(|| {
            DisagError::invariant(category_uid, "no category mapping was planned for it")
        })?;

        let branches = mapping
            .option_mappings
            .iter()
            .map(|option| {
                let predicate = self
                    .compiler
                    .compile(&option.filter, self.indicator, self.range)
                    .map_err(|source| DisagError::FilterCompile {
                        indicator: self.indicator.uid.clone(),
                        category: category_uid.to_string(),
                        option: option.option_uid.clone(),
                        source,
                    })?;
                Ok(if_then_else(
                    raw_sql(&predicate),
                    lit_str(&option.option_uid),
                    lit_str(""),
                ))
            })
            .collect::<DisagResult<Vec<_>>>()?;

        concat_all(branches)
            .ok_or_else(|| DisagError::invariant(category_uid, "category mapping has no options"))
    }

    /// `<expr> AS "<category>"` for every synthesized category, in plan order.
    pub fn select_columns(&self) -> DisagResult<Vec<String>> {
        self.context
            .coc_categories()
            .iter()
            .map(|uid| self.select_column(uid))
            .collect()
    }

    /// GROUP BY items matching [`select_columns`](Self::select_columns).
    pub fn group_by_columns(&self) -> DisagResult<Vec<String>> {
        self.context
            .coc_categories()
            .iter()
            .map(|uid| self.group_by_column(uid))
            .collect()
    }

    /// Unaliased expression for use in a predicate.
    pub fn where_column(&self, category_uid: &str) -> DisagResult<String> {
        Ok(self.column_expr(category_uid)?.to_sql(self.dialect))
    }

    pub fn select_column(&self, category_uid: &str) -> DisagResult<String> {
        Ok(self
            .column_expr(category_uid)?
            .alias(category_uid)
            .to_sql(self.dialect))
    }

    pub fn group_by_column(&self, category_uid: &str) -> DisagResult<String> {
        match self.group_by {
            GroupByMode::Alias => {
                // Still fail for categories that were never planned
                self.context.mapping(category_uid).ok_or_else(|| {
                    DisagError::invariant(category_uid, "no category mapping was planned for it")
                })?;
                Ok(col(category_uid).to_sql(self.dialect))
            }
            GroupByMode::Expression => self.where_column(category_uid),
        }
    }

    /// `(<expr>) <> ''` per synthesized category, pruning rows no option
    /// filter matched.
    pub fn coc_where_conditions(&self) -> DisagResult<Vec<String>> {
        self.context
            .coc_categories()
            .iter()
            .map(|uid| Ok(self.column_expr(uid)?.paren().ne("").to_sql(self.dialect)))
            .collect()
    }

    /// `<column> IN (...)` for a category or option group set dimension with
    /// selected items.
    ///
    /// Disaggregated categories filter on their synthesized expression,
    /// everything else on the analytics table column of the same name.
    pub fn dimension_where_clause(&self, dimension: &QueryDimension) -> DisagResult<Option<String>> {
        if matches!(dimension, QueryDimension::Other { .. }) || dimension.items().is_empty() {
            return Ok(None);
        }

        let uid = dimension.uid();
        let column = if self.context.is_disag_dimension(uid) {
            self.column_expr(uid)?.paren()
        } else {
            col(uid)
        };

        let items = dimension.items().iter().map(|i| lit_str(i)).collect();
        Ok(Some(column.in_list(items).to_sql(self.dialect)))
    }
}
