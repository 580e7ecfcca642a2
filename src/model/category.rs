// src/model/category.rs
use serde::{Deserialize, Serialize};

/// UID of the built-in default category combo.
pub const DEFAULT_CATEGORY_COMBO_UID: &str = "bjDvmb4bfuf";
/// UID of the single option combo of the default category combo.
pub const DEFAULT_OPTION_COMBO_UID: &str = "HllvX50cXC0";
/// UID of the category carried by the default category combo.
pub const DEFAULT_CATEGORY_UID: &str = "GLevLNI9wkl";
/// UID of the single option of the default category.
pub const DEFAULT_CATEGORY_OPTION_UID: &str = "xYerKDKCefk";

/// A classification axis with an ordered set of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub uid: String,
    pub name: String,
    /// Option UIDs in definition order
    pub options: Vec<String>,
}

impl Category {
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_option(&self, option_uid: &str) -> bool {
        self.options.iter().any(|o| o == option_uid)
    }
}

/// One concrete combination of options, one per category of its combo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOptionCombo {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    pub options: Vec<String>,
}

impl CategoryOptionCombo {
    pub fn new(uid: impl Into<String>, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            uid: uid.into(),
            name: String::new(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Cross product of one or more categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCombo {
    pub uid: String,
    pub name: String,
    pub categories: Vec<Category>,
    pub option_combos: Vec<CategoryOptionCombo>,
    /// The trivial combo carrying a single option combo.
    #[serde(default)]
    pub is_default: bool,
}

impl CategoryCombo {
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        categories: Vec<Category>,
        option_combos: Vec<CategoryOptionCombo>,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            categories,
            option_combos,
            is_default: false,
        }
    }

    /// The platform's built-in default combo.
    pub fn default_combo() -> Self {
        Self {
            uid: DEFAULT_CATEGORY_COMBO_UID.into(),
            name: "default".into(),
            categories: vec![Category::new(
                DEFAULT_CATEGORY_UID,
                "default",
                [DEFAULT_CATEGORY_OPTION_UID],
            )],
            option_combos: vec![CategoryOptionCombo::new(
                DEFAULT_OPTION_COMBO_UID,
                [DEFAULT_CATEGORY_OPTION_UID],
            )
            .with_name("default")],
            is_default: true,
        }
    }

    pub fn category_uids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.uid.as_str())
    }

    pub fn category(&self, uid: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.uid == uid)
    }
}
