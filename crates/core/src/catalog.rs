//! Catalog filtering.
//!
//! The storefront narrows the product list by a free-text query and a
//! category selection. Besides real categories there are three synthetic
//! ones: everything, products on offer, and the best sellers (the first
//! six products in catalog order).

use serde::{Deserialize, Serialize};

use crate::models::{Order, Product};

/// Display name of the "everything" pseudo-category.
pub const ALL_CATEGORY: &str = "الكل";
/// Display name of the offers pseudo-category.
pub const OFFERS_CATEGORY: &str = "العروض";
/// Display name of the best-sellers pseudo-category.
pub const BEST_SELLERS_CATEGORY: &str = "الأكثر مبيعاً";
/// How many leading products count as best sellers.
pub const BEST_SELLERS_COUNT: usize = 6;

/// Category selection for [`filter_products`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum CategoryFilter {
    #[default]
    All,
    Offers,
    BestSellers,
    Named(String),
}

impl CategoryFilter {
    /// Interpret a category parameter.
    ///
    /// Accepts the Arabic display names as well as `all`, `offers` and
    /// `best_sellers`; anything else is a real category name.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | "all" | ALL_CATEGORY) => Self::All,
            Some("offers" | OFFERS_CATEGORY) => Self::Offers,
            Some("best_sellers" | BEST_SELLERS_CATEGORY) => Self::BestSellers,
            Some(name) => Self::Named(name.to_owned()),
        }
    }

    fn admits(&self, product: &Product, position: usize) -> bool {
        match self {
            Self::All => true,
            Self::Offers => product.has_offer(),
            Self::BestSellers => position < BEST_SELLERS_COUNT,
            Self::Named(name) => &product.category == name,
        }
    }
}

/// Whether `product` matches `query` in name, description or category.
///
/// Case-insensitive substring match; an empty query matches everything.
#[must_use]
pub fn matches_query(product: &Product, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [&product.name, &product.description, &product.category]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Products matching both the text query and the category, in catalog order.
///
/// Best-seller position is taken from the full list, not the filtered one.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    query: &str,
    category: &CategoryFilter,
) -> Vec<&'a Product> {
    products
        .iter()
        .enumerate()
        .filter(|(position, product)| {
            matches_query(product, query) && category.admits(product, *position)
        })
        .map(|(_, product)| product)
        .collect()
}

/// Back-office product search: case-insensitive match on name only.
#[must_use]
pub fn search_by_name<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
        .collect()
}

/// Back-office order search: id or phone contains `query`.
#[must_use]
pub fn search_orders<'a>(orders: &'a [Order], query: &str) -> Vec<&'a Order> {
    orders.iter().filter(|o| o.matches_search(query)).collect()
}
