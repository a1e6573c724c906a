//! Product list composition state.
//!
//! Backs the "compose a product list" editor: products are added one at a
//! time, categorized on entry, adjusted, and finally turned into a
//! [`ProductListMessage`] ready for [`ChatService::send_product_list`].
//!
//! [`ChatService::send_product_list`]: crate::service::chat_service::ChatService::send_product_list

use crate::category::categorize;
use crate::grouping::{group_by_category, into_labeled_groups, sort_groups_by_name, CategoryGroup};
use crate::model::message::{ProductItem, ProductListMessage, DEFAULT_PRODUCT_LIST_TITLE};
use crate::service::collapse_whitespace;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("add at least one product before sending")]
    Empty,
}

/// Editable product list under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListDraft {
    title: String,
    products: Vec<ProductItem>,
}

impl ProductListDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn products(&self) -> &[ProductItem] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Adds a product from raw form input.
    ///
    /// Blank names are ignored (`None`). A quantity that does not parse as a
    /// positive integer becomes `1`.
    pub fn add_product(&mut self, name: &str, quantity_text: &str) -> Option<&ProductItem> {
        let name = collapse_whitespace(name);
        if name.is_empty() {
            return None;
        }

        let quantity = quantity_text
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|value| *value >= 1)
            .unwrap_or(1);
        let category_id = categorize(&name);
        self.products.push(ProductItem {
            name,
            quantity,
            category_id: Some(category_id),
        });
        self.products.last()
    }

    /// Removes the product at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<ProductItem> {
        (index < self.products.len()).then(|| self.products.remove(index))
    }

    /// Sets a new quantity; values below 1 are ignored.
    ///
    /// Returns whether the product changed.
    pub fn change_quantity(&mut self, index: usize, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.products.get_mut(index) {
            Some(product) => {
                product.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Products grouped by category and sorted by name for display.
    pub fn grouped_for_display(&self) -> Vec<CategoryGroup<ProductItem>> {
        let mut groups = group_by_category(self.products.iter().cloned());
        sort_groups_by_name(&mut groups);
        into_labeled_groups(groups)
    }

    /// Consumes the draft into a sendable product list.
    pub fn finish(self) -> Result<ProductListMessage, DraftError> {
        if self.products.is_empty() {
            return Err(DraftError::Empty);
        }
        let title = collapse_whitespace(&self.title);
        Ok(ProductListMessage {
            title: Some(if title.is_empty() {
                DEFAULT_PRODUCT_LIST_TITLE.to_string()
            } else {
                title
            }),
            products: self.products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftError, ProductListDraft};

    #[test]
    fn add_product_categorizes_and_defaults_quantity() {
        let mut draft = ProductListDraft::new();
        let added = draft.add_product(" Bread ", "abc").cloned().unwrap();
        assert_eq!(added.name, "Bread");
        assert_eq!(added.quantity, 1);
        assert_eq!(added.category_id, Some(6));

        let added = draft.add_product("حليب", "3").cloned().unwrap();
        assert_eq!(added.quantity, 3);
        assert_eq!(added.category_id, Some(4));

        assert!(draft.add_product("   ", "2").is_none());
        assert_eq!(draft.products().len(), 2);
    }

    #[test]
    fn quantity_changes_below_one_are_ignored() {
        let mut draft = ProductListDraft::new();
        draft.add_product("soap", "2");
        assert!(!draft.change_quantity(0, 0));
        assert!(draft.change_quantity(0, 5));
        assert!(!draft.change_quantity(7, 5));
        assert_eq!(draft.products()[0].quantity, 5);
    }

    #[test]
    fn remove_ignores_out_of_range_index() {
        let mut draft = ProductListDraft::new();
        draft.add_product("tea", "1");
        assert!(draft.remove(3).is_none());
        assert_eq!(draft.remove(0).map(|item| item.name), Some("tea".to_string()));
        assert!(draft.is_empty());
    }

    #[test]
    fn grouped_view_sorts_names_within_category() {
        let mut draft = ProductListDraft::new();
        draft.add_product("orange", "1");
        draft.add_product("Milk", "1");
        draft.add_product("banana", "1");

        let groups = draft.grouped_for_display();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category_id, 2);
        let names: Vec<_> = groups[0].items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["banana", "orange"]);
        assert_eq!(groups[1].label, "الألبان");
        // insertion order of the draft itself is untouched
        assert_eq!(draft.products()[0].name, "orange");
    }

    #[test]
    fn finish_requires_products_and_defaults_title() {
        assert_eq!(ProductListDraft::new().finish().unwrap_err(), DraftError::Empty);

        let mut draft = ProductListDraft::new();
        draft.add_product("water", "6");
        let list = draft.finish().unwrap();
        assert_eq!(list.title.as_deref(), Some("قائمة منتجات"));
        assert_eq!(list.products.len(), 1);
    }
}
