//! Structural checks on category mappings before they are planned.

use std::collections::HashSet;

use crate::disag::error::ConfigurationError;
use crate::model::{Category, CategoryMapping, ProgramIndicator};

/// Check mappings against the indicator they belong to.
///
/// Every mapping must target a category of the indicator's category combo or
/// attribute combo, map only options of that category, map each option once
/// with a non-empty filter, and be the only mapping for its category.
pub fn validate_mappings(
    indicator: &ProgramIndicator,
    mappings: &[CategoryMapping],
) -> Result<(), ConfigurationError> {
    let mut seen_categories = HashSet::new();

    for mapping in mappings {
        let category = find_category(indicator, &mapping.category_uid).ok_or_else(|| {
            ConfigurationError::UnknownCategory {
                indicator: indicator.uid.clone(),
                mapping: mapping.uid.clone(),
                category: mapping.category_uid.clone(),
            }
        })?;

        if !seen_categories.insert(category.uid.as_str()) {
            return Err(ConfigurationError::DuplicateCategory {
                indicator: indicator.uid.clone(),
                category: category.uid.clone(),
            });
        }

        validate_options(mapping, category)?;
    }

    Ok(())
}

fn find_category<'a>(indicator: &'a ProgramIndicator, uid: &str) -> Option<&'a Category> {
    indicator
        .category_combo
        .category(uid)
        .or_else(|| indicator.attribute_combo.category(uid))
}

fn validate_options(mapping: &CategoryMapping, category: &Category) -> Result<(), ConfigurationError> {
    if mapping.option_mappings.is_empty() {
        return Err(ConfigurationError::NoOptions {
            mapping: mapping.uid.clone(),
        });
    }

    let mut seen = HashSet::new();
    for option in &mapping.option_mappings {
        if !category.has_option(&option.option_uid) {
            return Err(ConfigurationError::OptionNotInCategory {
                mapping: mapping.uid.clone(),
                category: category.uid.clone(),
                option: option.option_uid.clone(),
            });
        }
        if !seen.insert(option.option_uid.as_str()) {
            return Err(ConfigurationError::DuplicateOption {
                mapping: mapping.uid.clone(),
                option: option.option_uid.clone(),
            });
        }
        if option.filter.trim().is_empty() {
            return Err(ConfigurationError::EmptyFilter {
                mapping: mapping.uid.clone(),
                option: option.option_uid.clone(),
            });
        }
    }

    Ok(())
}
