//! Per-row resolution of category option combos.
//!
//! After the base query runs, every result row carries one synthesized
//! column per planned category holding the UID of the option whose filter
//! matched. The resolver reads those columns back, assembles the canonical
//! key for each side and looks up the COC and AOC.

use std::collections::HashMap;

use super::context::{DisaggregationContext, WILDCARD};
use super::error::{AmbiguousMapping, DisagError, DisagResult};
use super::key::canonical_key;
use super::row::ResultRow;

/// Separator of composite data value ids.
pub const COMPOSITE_DIM_SEPARATOR: &str = "-";

/// What happened to one result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row belongs to this COC and AOC (either may be [`WILDCARD`]).
    Accept { coc: String, aoc: String },
    /// The row cannot be attributed to a combo and is dropped.
    Reject,
}

impl RowOutcome {
    pub fn is_accept(&self) -> bool {
        matches!(self, RowOutcome::Accept { .. })
    }

    /// `<measure>-<coc>-<aoc>` for an accepted row.
    pub fn data_value_id(&self, measure: &str) -> Option<String> {
        match self {
            RowOutcome::Accept { coc, aoc } => {
                Some([measure, coc.as_str(), aoc.as_str()].join(COMPOSITE_DIM_SEPARATOR))
            }
            RowOutcome::Reject => None,
        }
    }
}

/// A row that resolved, with the combos it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRow<R> {
    pub row: R,
    pub coc: String,
    pub aoc: String,
}

/// Outcome of resolving a batch of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRows<R> {
    pub accepted: Vec<ResolvedRow<R>>,
    pub rejected: usize,
}

/// Resolves result rows against a planned context.
#[derive(Debug, Clone, Copy)]
pub struct RowResolver<'a> {
    context: &'a DisaggregationContext,
}

impl<'a> RowResolver<'a> {
    pub fn new(context: &'a DisaggregationContext) -> Self {
        Self { context }
    }

    /// Resolve one row.
    ///
    /// Missing, NULL, empty and unknown values reject the row. A value
    /// built from more than one option of the same category means two
    /// filters matched, which fails the query.
    pub fn resolve<R: ResultRow + ?Sized>(&self, row: &R) -> DisagResult<RowOutcome> {
        let ctx = self.context;
        if ctx.coc_resolver().is_empty() && ctx.aoc_resolver().is_empty() {
            return Ok(RowOutcome::Accept {
                coc: WILDCARD.to_string(),
                aoc: WILDCARD.to_string(),
            });
        }

        // Both sides are read before deciding so ambiguity is never masked
        // by a reject on the other side.
        let coc = self.resolve_side(ctx.coc_side(), ctx.coc_resolver(), row)?;
        let aoc = self.resolve_side(ctx.aoc_side(), ctx.aoc_resolver(), row)?;

        match (coc, aoc) {
            (Some(coc), Some(aoc)) => Ok(RowOutcome::Accept { coc, aoc }),
            (coc, aoc) => {
                tracing::trace!(
                    "Rejecting row for program indicator {}: COC resolved {}, AOC resolved {}",
                    ctx.indicator_uid(),
                    coc.is_some(),
                    aoc.is_some()
                );
                Ok(RowOutcome::Reject)
            }
        }
    }

    /// Resolve a batch, keeping accepted rows and counting rejects.
    ///
    /// Stops at the first fatal error.
    pub fn resolve_rows<R, I>(&self, rows: I) -> DisagResult<ResolvedRows<R>>
    where
        R: ResultRow,
        I: IntoIterator<Item = R>,
    {
        let mut accepted = Vec::new();
        let mut rejected = 0;

        for row in rows {
            let outcome = self.resolve(&row)?;
            match outcome {
                RowOutcome::Accept { coc, aoc } => accepted.push(ResolvedRow { row, coc, aoc }),
                RowOutcome::Reject => rejected += 1,
            }
        }

        tracing::debug!(
            "Resolved rows for program indicator {}: {} accepted, {} rejected",
            self.context.indicator_uid(),
            accepted.len(),
            rejected
        );

        Ok(ResolvedRows { accepted, rejected })
    }

    fn resolve_side<R: ResultRow + ?Sized>(
        &self,
        categories: &[String],
        resolver: &HashMap<String, String>,
        row: &R,
    ) -> DisagResult<Option<String>> {
        if resolver.is_empty() {
            return Ok(Some(WILDCARD.to_string()));
        }

        let mut options = Vec::with_capacity(categories.len());
        let mut complete = true;

        for category in categories {
            let mapping = self.context.mapping(category).ok_or_else(|| {
                DisagError::invariant(category.as_str(), "category is resolved but was not planned")
            })?;

            let Some(value) = row.get(category).filter(|v| !v.is_empty()) else {
                complete = false;
                continue;
            };

            match mapping.decompose(value) {
                Some(matched) if matched.len() > 1 => {
                    return Err(self.ambiguous(category, matched));
                }
                Some(_) => options.push(value),
                None => complete = false,
            }
        }

        if !complete {
            return Ok(None);
        }
        Ok(resolver.get(&canonical_key(&options)).cloned())
    }

    fn ambiguous(&self, category: &str, options: Vec<&str>) -> DisagError {
        let ctx = self.context;
        let details = AmbiguousMapping {
            indicator_uid: ctx.indicator_uid().to_string(),
            indicator_name: ctx.indicator_name().to_string(),
            combo_uid: ctx.combo_uid().to_string(),
            combo_name: ctx.combo_name().to_string(),
            category_uid: category.to_string(),
            category_name: ctx.category_name(category).to_string(),
            options: options.into_iter().map(str::to_string).collect(),
        };
        tracing::error!("{}", details);
        DisagError::AmbiguousMapping(Box::new(details))
    }
}
