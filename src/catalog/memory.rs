//! In-memory mapping catalog.
//!
//! Holds program indicators and their category mappings, either built up in
//! code or loaded from a metadata export:
//!
//! ```json
//! {
//!   "categories": [{ "id": "...", "name": "...", "categoryOptions": [{ "id": "..." }] }],
//!   "categoryCombos": [{ "id": "...", "name": "...", "categories": [{ "id": "..." }] }],
//!   "categoryOptionCombos": [{ "id": "...", "categoryCombo": { "id": "..." },
//!                              "categoryOptions": [{ "id": "..." }] }],
//!   "programIndicators": [{ "id": "...", "program": { "id": "..." },
//!                           "categoryCombo": { "id": "..." }, "categoryMappingIds": ["..."] }],
//!   "categoryMappings": [{ "id": "...", "categoryId": "...", "optionMappings": [...] }]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::provider::{CatalogError, CatalogResult, MappingCatalog};
use crate::config::CatalogSettings;
use crate::model::{
    Category, CategoryCombo, CategoryMapping, CategoryOptionCombo, ProgramIndicator,
    DEFAULT_CATEGORY_COMBO_UID,
};

static UID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]{10}$").unwrap());

/// Whether `uid` has the platform's 11-character identifier shape.
pub fn is_valid_uid(uid: &str) -> bool {
    UID_PATTERN.is_match(uid)
}

/// Catalog backed by hash maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    mappings: HashMap<String, CategoryMapping>,
    indicators: HashMap<String, ProgramIndicator>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(mut self, mapping: CategoryMapping) -> Self {
        self.insert_mapping(mapping);
        self
    }

    pub fn with_indicator(mut self, indicator: ProgramIndicator) -> Self {
        self.insert_indicator(indicator);
        self
    }

    pub fn insert_mapping(&mut self, mapping: CategoryMapping) {
        self.mappings.insert(mapping.uid.clone(), mapping);
    }

    pub fn insert_indicator(&mut self, indicator: ProgramIndicator) {
        self.indicators.insert(indicator.uid.clone(), indicator);
    }

    pub fn mapping(&self, uid: &str) -> Option<&CategoryMapping> {
        self.mappings.get(uid)
    }

    pub fn program_indicator(&self, uid: &str) -> CatalogResult<&ProgramIndicator> {
        self.indicators
            .get(uid)
            .ok_or_else(|| CatalogError::IndicatorNotFound(uid.to_string()))
    }

    /// Load a catalog from a metadata export file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load the export named by the catalog settings, or an empty catalog
    /// when no path is configured.
    pub fn from_settings(settings: &CatalogSettings) -> CatalogResult<Self> {
        match settings.resolved_path()? {
            Some(path) => Self::from_file(path),
            None => Ok(Self::new()),
        }
    }

    /// Load a catalog from metadata export JSON.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let export: MetadataExport = serde_json::from_str(json)?;
        export.into_catalog()
    }
}

#[async_trait]
impl MappingCatalog for InMemoryCatalog {
    async fn get_category_mapping(&self, uid: &str) -> CatalogResult<Option<CategoryMapping>> {
        Ok(self.mappings.get(uid).cloned())
    }
}

// ============================================================================
// Metadata export shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct IdRef {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MetadataExport {
    categories: Vec<CategoryDto>,
    category_combos: Vec<CategoryComboDto>,
    category_option_combos: Vec<OptionComboDto>,
    program_indicators: Vec<ProgramIndicatorDto>,
    category_mappings: Vec<CategoryMapping>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryDto {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    category_options: Vec<IdRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryComboDto {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    categories: Vec<IdRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionComboDto {
    id: String,
    #[serde(default)]
    name: String,
    category_combo: IdRef,
    #[serde(default)]
    category_options: Vec<IdRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgramIndicatorDto {
    id: String,
    #[serde(default)]
    name: String,
    program: IdRef,
    category_combo: Option<IdRef>,
    attribute_combo: Option<IdRef>,
    #[serde(default)]
    category_mapping_ids: Vec<String>,
    aggregate_export_data_element: Option<String>,
}

fn check_uid(kind: &'static str, uid: &str) -> CatalogResult<()> {
    if is_valid_uid(uid) {
        Ok(())
    } else {
        Err(CatalogError::InvalidUid {
            kind,
            uid: uid.to_string(),
        })
    }
}

impl MetadataExport {
    fn into_catalog(self) -> CatalogResult<InMemoryCatalog> {
        let mut categories = HashMap::new();
        for dto in self.categories {
            check_uid("category", &dto.id)?;
            for option in &dto.category_options {
                check_uid("category option", &option.id)?;
            }
            let options = dto.category_options.into_iter().map(|o| o.id);
            categories.insert(dto.id.clone(), Category::new(dto.id, dto.name, options));
        }

        let mut option_combos: HashMap<String, Vec<CategoryOptionCombo>> = HashMap::new();
        for dto in self.category_option_combos {
            check_uid("category option combo", &dto.id)?;
            for option in &dto.category_options {
                check_uid("category option", &option.id)?;
            }
            let coc = CategoryOptionCombo::new(dto.id, dto.category_options.into_iter().map(|o| o.id))
                .with_name(dto.name);
            option_combos.entry(dto.category_combo.id).or_default().push(coc);
        }

        let mut combos = HashMap::new();
        for dto in self.category_combos {
            check_uid("category combo", &dto.id)?;
            let mut combo_categories = Vec::with_capacity(dto.categories.len());
            for cat in &dto.categories {
                let category = categories.get(&cat.id).ok_or_else(|| {
                    CatalogError::DanglingReference {
                        kind: "Category combo",
                        uid: dto.id.clone(),
                        target: "category",
                        target_uid: cat.id.clone(),
                    }
                })?;
                combo_categories.push(category.clone());
            }
            let cocs = option_combos.remove(&dto.id).unwrap_or_default();
            combos.insert(
                dto.id.clone(),
                CategoryCombo::new(dto.id, dto.name, combo_categories, cocs),
            );
        }

        let mut catalog = InMemoryCatalog::new();

        for mapping in self.category_mappings {
            check_uid("category mapping", &mapping.uid)?;
            for option in &mapping.option_mappings {
                check_uid("category option", &option.option_uid)?;
            }
            catalog.insert_mapping(mapping);
        }

        for dto in self.program_indicators {
            check_uid("program indicator", &dto.id)?;
            let category_combo = resolve_combo(&combos, &dto.id, dto.category_combo.as_ref())?;
            let attribute_combo = resolve_combo(&combos, &dto.id, dto.attribute_combo.as_ref())?;

            let mut indicator = ProgramIndicator::new(dto.id, dto.name, dto.program.id)
                .with_category_combo(category_combo)
                .with_attribute_combo(attribute_combo)
                .with_mappings(dto.category_mapping_ids);
            indicator.aggregate_export_data_element = dto.aggregate_export_data_element;
            catalog.insert_indicator(indicator);
        }

        Ok(catalog)
    }
}

/// A missing reference, or one to the default combo that the export omits,
/// resolves to the built-in default combo.
fn resolve_combo(
    combos: &HashMap<String, CategoryCombo>,
    indicator: &str,
    reference: Option<&IdRef>,
) -> CatalogResult<CategoryCombo> {
    match reference {
        None => Ok(CategoryCombo::default_combo()),
        Some(r) => match combos.get(&r.id) {
            Some(combo) => Ok(combo.clone()),
            None if r.id == DEFAULT_CATEGORY_COMBO_UID => Ok(CategoryCombo::default_combo()),
            None => Err(CatalogError::DanglingReference {
                kind: "Program indicator",
                uid: indicator.to_string(),
                target: "category combo",
                target_uid: r.id.clone(),
            }),
        },
    }
}
