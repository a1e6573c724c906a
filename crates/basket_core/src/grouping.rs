//! Category grouping for list views.
//!
//! # Responsibility
//! - Partition tagged items into per-category buckets for display.
//!
//! # Invariants
//! - Grouping is stable: items keep their input order inside a bucket.
//! - Untagged items and tags outside `1..=9` land in the "other" bucket.
//! - Buckets iterate in ascending category id order.

use crate::category::{category_label, Category, CategoryId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Items that may carry a category tag.
pub trait Categorized {
    /// Category id attached to the item, if any.
    fn category_id(&self) -> Option<CategoryId>;
}

/// Items that can be ordered by a display name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Groups items by category id, preserving input order within each group.
pub fn group_by_category<T, I>(items: I) -> BTreeMap<CategoryId, Vec<T>>
where
    T: Categorized,
    I: IntoIterator<Item = T>,
{
    let mut groups: BTreeMap<CategoryId, Vec<T>> = BTreeMap::new();
    for item in items {
        let key = effective_category(item.category_id());
        groups.entry(key).or_default().push(item);
    }
    groups
}

/// Resolves the bucket an optional tag belongs to.
pub fn effective_category(tag: Option<CategoryId>) -> CategoryId {
    tag.and_then(|id| Category::try_from_id(id))
        .unwrap_or(Category::Other)
        .id()
}

/// Sorts every group alphabetically by name, ignoring Latin case.
///
/// Presentation-only helper; [`group_by_category`] itself never re-sorts.
pub fn sort_groups_by_name<T: Named>(groups: &mut BTreeMap<CategoryId, Vec<T>>) {
    for items in groups.values_mut() {
        items.sort_by_cached_key(|item| item.name().to_lowercase());
    }
}

/// One labeled bucket, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup<T> {
    pub category_id: CategoryId,
    pub label: &'static str,
    pub items: Vec<T>,
}

/// Flattens a grouping into labeled buckets in ascending id order.
pub fn into_labeled_groups<T>(groups: BTreeMap<CategoryId, Vec<T>>) -> Vec<CategoryGroup<T>> {
    groups
        .into_iter()
        .map(|(category_id, items)| CategoryGroup {
            category_id,
            label: category_label(category_id),
            items,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        group_by_category, into_labeled_groups, sort_groups_by_name, Categorized, Named,
    };
    use crate::category::CategoryId;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        name: &'static str,
        category: Option<CategoryId>,
    }

    impl Categorized for Row {
        fn category_id(&self) -> Option<CategoryId> {
            self.category
        }
    }

    impl Named for Row {
        fn name(&self) -> &str {
            self.name
        }
    }

    fn row(name: &'static str, category: Option<CategoryId>) -> Row {
        Row { name, category }
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let groups = group_by_category(Vec::<Row>::new());
        assert!(groups.is_empty());
    }

    #[test]
    fn untagged_items_go_to_other_in_input_order() {
        let groups = group_by_category(vec![row("b", None), row("a", None), row("c", None)]);
        assert_eq!(groups.len(), 1);
        let names: Vec<_> = groups[&9].iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn tagged_items_keep_relative_order() {
        let groups = group_by_category(vec![
            row("milk", Some(4)),
            row("tomato", Some(1)),
            row("cheese", Some(4)),
            row("onion", Some(1)),
        ]);
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec![1, 4]);
        assert_eq!(groups[&1], vec![row("tomato", Some(1)), row("onion", Some(1))]);
        assert_eq!(groups[&4], vec![row("milk", Some(4)), row("cheese", Some(4))]);
    }

    #[test]
    fn out_of_range_tags_share_the_other_bucket() {
        let groups = group_by_category(vec![row("x", Some(0)), row("y", Some(42)), row("z", None)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&9].len(), 3);
    }

    #[test]
    fn display_sort_is_case_insensitive() {
        let mut groups = group_by_category(vec![
            row("banana", Some(2)),
            row("Apple", Some(2)),
            row("cherry", Some(2)),
        ]);
        sort_groups_by_name(&mut groups);
        let names: Vec<_> = groups[&2].iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn labeled_groups_carry_arabic_labels() {
        let groups = group_by_category(vec![row("soap", Some(8)), row("tea", Some(7))]);
        let labeled = into_labeled_groups(groups);
        let heads: Vec<_> = labeled
            .iter()
            .map(|group| (group.category_id, group.label))
            .collect();
        assert_eq!(heads, vec![(7, "المشروبات"), (8, "المنظفات")]);
    }
}
