//! Shopping item categorization.
//!
//! # Responsibility
//! - Map a free-text item name to one of nine fixed display categories.
//! - Provide Arabic and English labels for category identifiers.
//!
//! # Invariants
//! - `categorize` is total: every input yields an id in `1..=9`.
//! - Categories are scanned in ascending id order, keywords in table order,
//!   and the first substring hit wins.
//! - Matching is substring-based, not whole-word. "pineapple" is a fruit and
//!   "steak" hits meat before beverages ever sees "tea".
//! - Unknown ids resolve to [`Category::Other`] for label lookups.

use serde::{Deserialize, Serialize};

/// Numeric category identifier as stored and exchanged (`1..=9`).
pub type CategoryId = u8;

/// Closed set of display categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Vegetables,
    Fruits,
    Meat,
    Dairy,
    Canned,
    Bakery,
    Beverages,
    Cleaning,
    /// Catch-all bucket for anything the keyword table does not recognize.
    Other,
}

impl Category {
    /// All categories in ascending id order.
    pub const ALL: [Category; 9] = [
        Category::Vegetables,
        Category::Fruits,
        Category::Meat,
        Category::Dairy,
        Category::Canned,
        Category::Bakery,
        Category::Beverages,
        Category::Cleaning,
        Category::Other,
    ];

    /// Stable numeric id.
    pub fn id(self) -> CategoryId {
        match self {
            Self::Vegetables => 1,
            Self::Fruits => 2,
            Self::Meat => 3,
            Self::Dairy => 4,
            Self::Canned => 5,
            Self::Bakery => 6,
            Self::Beverages => 7,
            Self::Cleaning => 8,
            Self::Other => 9,
        }
    }

    /// Resolves an id, falling back to [`Category::Other`] for unknown values.
    ///
    /// Accepts any integer width so untrusted ids (negative, above 255) go
    /// through the same fallback.
    pub fn from_id(id: impl Into<i64>) -> Self {
        Self::try_from_id(id).unwrap_or(Self::Other)
    }

    /// Resolves an id, returning `None` for values outside `1..=9`.
    pub fn try_from_id(id: impl Into<i64>) -> Option<Self> {
        let id = id.into();
        Self::ALL
            .into_iter()
            .find(|category| i64::from(category.id()) == id)
    }

    /// Arabic display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetables => "الخضروات",
            Self::Fruits => "الفواكه",
            Self::Meat => "اللحوم",
            Self::Dairy => "الألبان",
            Self::Canned => "المعلبات",
            Self::Bakery => "المخبوزات",
            Self::Beverages => "المشروبات",
            Self::Cleaning => "المنظفات",
            Self::Other => "أخرى",
        }
    }

    /// English display label.
    pub fn label_en(self) -> &'static str {
        match self {
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Meat => "Meat",
            Self::Dairy => "Dairy",
            Self::Canned => "Canned food",
            Self::Bakery => "Bakery",
            Self::Beverages => "Beverages",
            Self::Cleaning => "Cleaning supplies",
            Self::Other => "Other",
        }
    }

    /// Matching keywords in scan order (Arabic first, then English).
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Vegetables => VEGETABLES,
            Self::Fruits => FRUITS,
            Self::Meat => MEAT,
            Self::Dairy => DAIRY,
            Self::Canned => CANNED,
            Self::Bakery => BAKERY,
            Self::Beverages => BEVERAGES,
            Self::Cleaning => CLEANING,
            Self::Other => OTHER,
        }
    }
}

const VEGETABLES: &[&str] = &[
    "طماطم", "خيار", "بصل", "جزر", "بطاطس", "بطاطا", "باذنجان", "فلفل", "كوسة", "خس",
    "tomato", "cucumber", "onion", "carrot", "potato", "eggplant", "pepper", "lettuce",
    "vegetable",
];

const FRUITS: &[&str] = &[
    "تفاح", "موز", "برتقال", "فراولة", "عنب", "بطيخ", "مانجو", "خوخ", "مشمش", "تين", "رمان",
    "apple", "banana", "orange", "strawberry", "grape", "watermelon", "mango", "peach", "fruit",
];

const MEAT: &[&str] = &[
    "لحم", "دجاج", "لحمة", "ستيك", "مفروم", "كبدة", "سمك", "تونة", "سلمون",
    "meat", "chicken", "steak", "beef", "fish", "tuna", "salmon", "liver", "pork", "lamb",
];

const DAIRY: &[&str] = &[
    "حليب", "جبن", "زبادي", "لبن", "زبدة", "كريمة", "جبنة",
    "milk", "cheese", "yogurt", "butter", "cream", "dairy",
];

const CANNED: &[&str] = &[
    "معلب", "علبة", "معلبات", "تونة", "ذرة", "فول", "حمص",
    "can", "canned", "tuna", "corn", "beans", "chickpeas",
];

const BAKERY: &[&str] = &[
    "خبز", "كعك", "بسكويت", "كيك", "طحين", "دقيق", "سكر",
    "bread", "cake", "biscuit", "cookie", "flour", "sugar", "bakery",
];

const BEVERAGES: &[&str] = &[
    "ماء", "عصير", "شاي", "قهوة", "كولا", "بيبسي", "مشروب",
    "water", "juice", "tea", "coffee", "cola", "pepsi", "drink", "beverage",
];

const CLEANING: &[&str] = &[
    "صابون", "شامبو", "منظف", "معطر", "كلوركس", "مبيض", "معجون أسنان", "فرشاة",
    "soap", "shampoo", "cleaner", "detergent", "bleach", "toothpaste", "brush",
];

// Hits here resolve to the default bucket anyway.
const OTHER: &[&str] = &[
    "ورق", "قلم", "بطارية", "شاحن", "أدوات",
    "paper", "pen", "battery", "charger", "tool",
];

/// Assigns a category id to a free-text item name.
///
/// Input is trimmed and lower-cased before matching; lower-casing leaves
/// Arabic text untouched. Returns `9` when nothing matches.
pub fn categorize(item_name: &str) -> CategoryId {
    categorize_as(item_name).id()
}

/// Same as [`categorize`], returning the typed category.
pub fn categorize_as(item_name: &str) -> Category {
    let normalized = item_name.trim().to_lowercase();
    Category::ALL
        .into_iter()
        .find(|category| {
            category
                .keywords()
                .iter()
                .any(|keyword| normalized.contains(keyword))
        })
        .unwrap_or(Category::Other)
}

/// Arabic label for an id; unknown ids get the "other" label.
pub fn category_label(id: impl Into<i64>) -> &'static str {
    Category::from_id(id).label()
}

/// English label for an id; unknown ids get the "other" label.
pub fn category_label_en(id: impl Into<i64>) -> &'static str {
    Category::from_id(id).label_en()
}

#[cfg(test)]
mod tests {
    use super::{categorize, categorize_as, category_label, category_label_en, Category};
    use proptest::prelude::*;

    #[test]
    fn empty_and_blank_input_fall_through_to_other() {
        assert_eq!(categorize(""), 9);
        assert_eq!(categorize("   \t\n"), 9);
    }

    #[test]
    fn vegetables_match_in_both_languages() {
        assert_eq!(categorize("Tomato"), 1);
        assert_eq!(categorize("طماطم"), 1);
        assert_eq!(categorize("  CUCUMBER  "), 1);
    }

    #[test]
    fn matching_is_substring_based() {
        assert_eq!(categorize("Apple"), 2);
        assert_eq!(categorize("apple pie filling"), 2);
        assert_eq!(categorize("pineapple"), 2);
        // "can" hides inside "pecan"
        assert_eq!(categorize("pecans"), 5);
    }

    #[test]
    fn one_word_per_category() {
        assert_eq!(categorize("Chicken"), 3);
        assert_eq!(categorize("Milk"), 4);
        assert_eq!(categorize("chickpeas"), 5);
        assert_eq!(categorize("Bread"), 6);
        assert_eq!(categorize("Water"), 7);
        assert_eq!(categorize("Soap"), 8);
        assert_eq!(categorize("batteries"), 9);
    }

    #[test]
    fn lower_category_wins_on_overlap() {
        // tuna is listed under both meat and canned food
        assert_eq!(categorize("tuna"), 3);
        assert_eq!(categorize("تونة"), 3);
        // "steak" also contains "tea"
        assert_eq!(categorize("steak"), 3);
        // "watermelon" contains "water"
        assert_eq!(categorize("watermelon"), 2);
    }

    #[test]
    fn arabic_terms_match_inside_phrases() {
        assert_eq!(categorize("كيس خبز أسمر"), 6);
        assert_eq!(categorize("معجون أسنان للأطفال"), 8);
        assert_eq!(categorize_as("حليب كامل الدسم"), Category::Dairy);
    }

    #[test]
    fn unknown_ids_resolve_to_other_label() {
        assert_eq!(category_label(999), category_label(9));
        assert_eq!(category_label(-1_i64), "أخرى");
        assert_eq!(category_label(i64::MAX), "أخرى");
        assert_eq!(category_label(0), "أخرى");
        assert_eq!(category_label_en(42), "Other");
        assert_eq!(category_label_en(256), "Other");
        assert_eq!(category_label(1), "الخضروات");
    }

    #[test]
    fn ids_round_trip_through_enum() {
        for (index, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(category.id()), index + 1);
            assert_eq!(Category::from_id(category.id()), category);
        }
        assert_eq!(Category::try_from_id(10), None);
        // 265 would wrap to 9 if narrowed to a byte
        assert_eq!(Category::try_from_id(265), None);
    }

    proptest! {
        #[test]
        fn categorize_is_total_and_stable(input in ".*") {
            let first = categorize(&input);
            prop_assert!((1..=9).contains(&first));
            prop_assert_eq!(first, categorize(&input));
            prop_assert!(!category_label(first).is_empty());
        }
    }
}
