use serde::{Deserialize, Serialize};

/// Identity of a product.
///
/// Assigned by the product store on first save and immutable afterwards.
/// The inventory service references products by this value, so it travels
/// on the wire as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product ID from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Error returned when a string is not a valid product ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProductIdError(String);

impl std::fmt::Display for ParseProductIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid product id: {:?}", self.0)
    }
}

impl std::error::Error for ParseProductIdError {}

impl std::str::FromStr for ProductId {
    type Err = ParseProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ParseProductIdError(s.to_string()))
    }
}
