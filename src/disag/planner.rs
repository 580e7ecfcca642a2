//! Disaggregation planning.
//!
//! Runs once per query. Decides which categories are already covered by
//! explicit query dimensions and which must be synthesized from category
//! mapping filters, and builds the reverse lookups from option sets to
//! category option combos.

use std::collections::HashMap;
use std::time::Duration;

use super::context::DisaggregationContext;
use super::error::{ConfigurationError, DisagResult};
use super::key::canonical_key;
use crate::catalog::{CatalogError, MappingCatalog};
use crate::config::CatalogSettings;
use crate::model::{CategoryCombo, CategoryMapping, EventQuery, ProgramIndicator};

/// Builds a [`DisaggregationContext`] for a program indicator query.
#[derive(Debug, Clone, Default)]
pub struct DisaggregationPlanner {
    timeout: Option<Duration>,
}

impl DisaggregationPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound every catalog fetch by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_settings(settings: &CatalogSettings) -> Self {
        Self {
            timeout: settings.timeout(),
        }
    }

    /// Fast-path guard: false when the query has no category dimensions or
    /// filters and both combos are default.
    pub fn is_needed(
        query: &EventQuery,
        category_combo: &CategoryCombo,
        attribute_combo: &CategoryCombo,
    ) -> bool {
        query.has_category_dimensions() || !category_combo.is_default || !attribute_combo.is_default
    }

    /// Plan disaggregation for `indicator` under `query`.
    ///
    /// Invalid or missing mappings fail the query. An indicator whose
    /// mappings cover none of the relevant categories yields the no-op
    /// context.
    pub async fn plan<C>(
        &self,
        query: &EventQuery,
        indicator: &ProgramIndicator,
        catalog: &C,
    ) -> DisagResult<DisaggregationContext>
    where
        C: MappingCatalog + ?Sized,
    {
        let mappings = self.fetch_mappings(indicator, catalog).await.map_err(|e| {
            tracing::warn!(
                "Category mappings of program indicator {} are unusable: {}",
                indicator.uid,
                e
            );
            e
        })?;

        let mut by_category: HashMap<String, CategoryMapping> = mappings
            .into_iter()
            .map(|m| (m.category_uid.clone(), m))
            .collect();

        let mut dimension_categories: Vec<String> = Vec::new();
        for uid in query.dimension_category_uids() {
            if by_category.contains_key(uid) && !dimension_categories.iter().any(|d| d == uid) {
                dimension_categories.push(uid.to_string());
            }
        }

        let coc_side = side_categories(&indicator.category_combo);
        let aoc_side = side_categories(&indicator.attribute_combo);

        let mut coc_categories: Vec<String> = Vec::new();
        for uid in coc_side.iter().chain(aoc_side.iter()) {
            if !dimension_categories.contains(uid) && !coc_categories.contains(uid) {
                coc_categories.push(uid.clone());
            }
        }

        by_category.retain(|uid, _| dimension_categories.contains(uid) || coc_categories.contains(uid));

        if by_category.is_empty() {
            tracing::debug!(
                "Program indicator {} has no category mappings in use; skipping disaggregation",
                indicator.uid
            );
            return Ok(DisaggregationContext::noop());
        }

        if let Some(unmapped) = coc_categories.iter().find(|uid| !by_category.contains_key(*uid)) {
            let err = ConfigurationError::UnmappedCategory {
                indicator: indicator.uid.clone(),
                category: unmapped.clone(),
            };
            tracing::warn!("{}", err);
            return Err(err.into());
        }

        let coc_resolver = build_resolver(&indicator.category_combo)?;
        let aoc_resolver = build_resolver(&indicator.attribute_combo)?;

        let category_names = indicator
            .category_combo
            .categories
            .iter()
            .chain(indicator.attribute_combo.categories.iter())
            .map(|c| (c.uid.clone(), c.name.clone()))
            .collect();

        tracing::debug!(
            "Planned disaggregation of program indicator {}: synthesized {:?}, dimensions {:?}, {} COCs, {} AOCs",
            indicator.uid,
            coc_categories,
            dimension_categories,
            coc_resolver.len(),
            aoc_resolver.len()
        );

        Ok(DisaggregationContext {
            indicator_uid: indicator.uid.clone(),
            indicator_name: indicator.name.clone(),
            combo_uid: indicator.category_combo.uid.clone(),
            combo_name: indicator.category_combo.name.clone(),
            dimension_categories,
            coc_categories,
            category_mappings: by_category,
            coc_resolver,
            aoc_resolver,
            coc_side,
            aoc_side,
            category_names,
        })
    }

    async fn fetch_mappings<C>(
        &self,
        indicator: &ProgramIndicator,
        catalog: &C,
    ) -> DisagResult<Vec<CategoryMapping>>
    where
        C: MappingCatalog + ?Sized,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, catalog.get_category_mappings(indicator))
                .await
                .map_err(|_| CatalogError::Timeout(limit))?,
            None => catalog.get_category_mappings(indicator).await,
        }
    }
}

/// Categories that make up one side's key; none for a default combo.
fn side_categories(combo: &CategoryCombo) -> Vec<String> {
    if combo.is_default {
        Vec::new()
    } else {
        combo.category_uids().map(str::to_string).collect()
    }
}

/// Map canonical option keys to option combo UIDs; empty for a default combo.
fn build_resolver(combo: &CategoryCombo) -> Result<HashMap<String, String>, ConfigurationError> {
    let mut resolver = HashMap::new();
    if combo.is_default {
        return Ok(resolver);
    }

    for coc in &combo.option_combos {
        let key = canonical_key(&coc.options);
        if let Some(first) = resolver.insert(key.clone(), coc.uid.clone()) {
            if first != coc.uid {
                return Err(ConfigurationError::DuplicateOptionCombo {
                    combo: combo.uid.clone(),
                    first,
                    second: coc.uid.clone(),
                    key,
                });
            }
        }
    }

    Ok(resolver)
}
