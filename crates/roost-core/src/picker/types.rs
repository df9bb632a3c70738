use crate::catalog::CatalogItem;

use super::errors::PickerError;

/// One row offered to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub label: String,
    pub subtitle: String,
    /// Opaque key returned on selection.
    pub key: String,
    pub active: bool,
}

impl From<&CatalogItem> for PickerItem {
    fn from(item: &CatalogItem) -> Self {
        Self {
            label: item.label.clone(),
            subtitle: item.subtitle.clone(),
            key: item.key(),
            active: item.active,
        }
    }
}

/// Interactive single-choice selection.
///
/// Returns the key of the chosen item, or `None` when the user cancels.
pub trait Picker {
    fn pick(&self, title: &str, items: &[PickerItem]) -> Result<Option<String>, PickerError>;
}
