//! Cache types for catalog responses.
//!
//! Only anonymous catalog reads are cached; anything fetched with a
//! caller's bearer token bypasses the cache entirely.

use silsila_core::ProductId;

use super::types::{Category, Page, Product, Series, Theme};

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products(String),
    Categories,
    Series,
    Themes,
    Trending,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Page<Product>),
    Categories(Vec<Category>),
    Series(Vec<Series>),
    Themes(Vec<Theme>),
    Trending(Vec<Product>),
}
