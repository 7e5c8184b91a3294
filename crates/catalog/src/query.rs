/// Ordering of listed products by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parses `"asc"` / `"desc"` (case-insensitive). Anything else is ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

/// Builder for product listing queries.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Filter by exact category.
    pub category: Option<String>,

    /// Ordering by product id.
    pub order: SortOrder,
}

impl ProductQuery {
    /// Creates a query that matches every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the ordering.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns true if the product passes the filters of this query.
    pub fn matches(&self, product: &crate::Product) -> bool {
        match &self.category {
            Some(category) => product.category.as_deref() == Some(category.as_str()),
            None => true,
        }
    }
}
