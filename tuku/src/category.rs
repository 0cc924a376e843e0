//! Map marker styles of attraction categories.

/// The marker icon and color of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// A Font Awesome icon class.
    pub icon: &'static str,
    /// A CSS color.
    pub color: &'static str,
}

/// The style of categories without their own entry.
pub const FALLBACK_STYLE: CategoryStyle = CategoryStyle {
    icon: "fa-map-marker-alt",
    color: "#708090",
};

const STYLES: [(&str, CategoryStyle); 7] = [
    ("歷史建築", CategoryStyle { icon: "fa-landmark", color: "#8B4513" }),
    ("歷史街區", CategoryStyle { icon: "fa-landmark", color: "#A0522D" }),
    ("美食", CategoryStyle { icon: "fa-utensils", color: "#FFA500" }),
    ("信仰", CategoryStyle { icon: "fa-place-of-worship", color: "#FFD700" }),
    ("文化", CategoryStyle { icon: "fa-palette", color: "#800080" }),
    ("體驗", CategoryStyle { icon: "fa-hand-paper", color: "#008080" }),
    ("咖啡", CategoryStyle { icon: "fa-coffee", color: "#654321" }),
];

/// Look up the style by the category name in the default language.
pub fn category_style(category_key: &str) -> CategoryStyle {
    STYLES
        .iter()
        .find(|(name, _)| *name == category_key)
        .map(|(_, style)| *style)
        .unwrap_or(FALLBACK_STYLE)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_and_unknown() {
        assert_eq!(category_style("咖啡").icon, "fa-coffee");
        assert_eq!(category_style("信仰").color, "#FFD700");
        assert_eq!(category_style("Coffee"), FALLBACK_STYLE);
        assert_eq!(category_style(""), FALLBACK_STYLE);
    }
}
