//! Derived pricing display: price labels, limits, ordering, popular tier and
//! grid layout.

use crate::dream::{Tier, TierLimit};

/// Format minor currency units as dollars, dropping cents on whole amounts.
///
/// ```rust
/// use saas_starter::pricing::format_price;
///
/// assert_eq!(format_price(0), "$0");
/// assert_eq!(format_price(999), "$9.99");
/// assert_eq!(format_price(2000), "$20");
/// assert_eq!(format_price(1050), "$10.50");
/// ```
pub fn format_price(minor: u64) -> String {
    let (major, cents) = (minor / 100, minor % 100);
    if cents == 0 {
        format!("${}", group_thousands(major))
    } else {
        format!("${}.{cents:02}", group_thousands(major))
    }
}

/// Format an integer with comma thousands separators.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Request allowance line for a pricing card, e.g. `1,000 requests/mo`.
pub fn format_limit(limit: TierLimit, period: &str) -> String {
    match limit {
        TierLimit::Unlimited => "Unlimited requests".to_string(),
        TierLimit::Requests(n) => format!("{} requests/{period}", group_thousands(n)),
    }
}

/// Tiers in ascending price order; equal prices keep their listing order.
pub fn sort_by_price(tiers: &[Tier]) -> Vec<Tier> {
    let mut sorted = tiers.to_vec();
    sorted.sort_by_key(|t| t.price);
    sorted
}

/// Which tiers of a price-sorted list are marked popular.
///
/// Explicitly flagged tiers win; without any flag the tier at
/// `floor(len / 2)` is popular.
pub fn popular_flags(sorted: &[Tier]) -> Vec<bool> {
    if sorted.iter().any(|t| t.popular) {
        return sorted.iter().map(|t| t.popular).collect();
    }
    let middle = sorted.len() / 2;
    (0..sorted.len()).map(|i| i == middle).collect()
}

/// Column layout of the pricing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLayout {
    Single,
    TwoColumn,
    ThreeColumn,
}

impl GridLayout {
    pub fn for_count(count: usize) -> Self {
        match count {
            2 => Self::TwoColumn,
            n if n >= 3 => Self::ThreeColumn,
            _ => Self::Single,
        }
    }

    /// Get CSS classes for this layout.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Single => "",
            Self::TwoColumn => "md:grid-cols-2 max-w-3xl mx-auto",
            Self::ThreeColumn => "md:grid-cols-3",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(name: &str, price: u64) -> Tier {
        Tier {
            name: name.to_string(),
            display_name: None,
            price,
            limit: TierLimit::Requests(100),
            features: Vec::new(),
            popular: false,
            price_id: format!("price_{name}"),
        }
    }

    #[test]
    fn price_examples() {
        assert_eq!(format_price(0), "$0");
        assert_eq!(format_price(999), "$9.99");
        assert_eq!(format_price(2000), "$20");
        assert_eq!(format_price(1050), "$10.50");
        assert_eq!(format_price(5), "$0.05");
        assert_eq!(format_price(123_456_700), "$1,234,567");
    }

    #[test]
    fn limits_are_grouped() {
        assert_eq!(format_limit(TierLimit::Requests(1000), "mo"), "1,000 requests/mo");
        assert_eq!(format_limit(TierLimit::Requests(50), "month"), "50 requests/month");
        assert_eq!(format_limit(TierLimit::Unlimited, "mo"), "Unlimited requests");
    }

    #[test]
    fn sort_is_ascending_and_stable() {
        let sorted = sort_by_price(&[
            tier("team", 5000),
            tier("free", 0),
            tier("pro", 2000),
            tier("alt", 2000),
        ]);
        let names: Vec<&str> = sorted.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["free", "pro", "alt", "team"]);
    }

    #[test]
    fn middle_tier_is_popular_without_flags() {
        let sorted = sort_by_price(&[tier("free", 0), tier("pro", 2000), tier("team", 5000)]);
        assert_eq!(popular_flags(&sorted), [false, true, false]);

        let two = sort_by_price(&[tier("free", 0), tier("pro", 2000)]);
        assert_eq!(popular_flags(&two), [false, true]);

        let four = sort_by_price(&[tier("a", 0), tier("b", 1), tier("c", 2), tier("d", 3)]);
        assert_eq!(popular_flags(&four), [false, false, true, false]);
    }

    #[test]
    fn flagged_tier_overrides_middle() {
        let mut team = tier("team", 5000);
        team.popular = true;
        let sorted = sort_by_price(&[tier("free", 0), tier("pro", 2000), team]);
        assert_eq!(popular_flags(&sorted), [false, false, true]);
    }

    #[test]
    fn popular_flags_of_empty_list() {
        assert!(popular_flags(&[]).is_empty());
    }

    #[test]
    fn grid_layout_by_count() {
        assert_eq!(GridLayout::for_count(0), GridLayout::Single);
        assert_eq!(GridLayout::for_count(1), GridLayout::Single);
        assert_eq!(GridLayout::for_count(2), GridLayout::TwoColumn);
        assert_eq!(GridLayout::for_count(3), GridLayout::ThreeColumn);
        assert_eq!(GridLayout::for_count(7), GridLayout::ThreeColumn);
        assert!(GridLayout::TwoColumn.classes().contains("md:grid-cols-2"));
    }
}
