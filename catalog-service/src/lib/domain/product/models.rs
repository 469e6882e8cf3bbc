use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::product::errors::PriceError;
use crate::domain::product::errors::ProductIdError;
use crate::domain::product::errors::ProductNameError;
use crate::domain::user::models::UserId;

/// Product aggregate entity.
///
/// `posted_by` is fixed at creation and is what ownership checks compare
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: Price,
    pub posted_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product name value type
///
/// Trimmed, non-empty, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    const MAX_LENGTH: usize = 200;

    pub fn new(name: String) -> Result<Self, ProductNameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            Err(ProductNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ProductNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Price value type
///
/// Non-negative, rounded to two fraction digits to match the `NUMERIC(12, 2)`
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    const SCALE: u32 = 2;

    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        let max = Self::max();
        let rounded = amount.round_dp(Self::SCALE);
        if rounded > max {
            return Err(PriceError::TooLarge {
                max: max.to_string(),
            });
        }

        Ok(Self(rounded))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    fn max() -> Decimal {
        // 10 integer digits, 2 fraction digits
        Decimal::new(999_999_999_999, Self::SCALE)
    }
}

/// Command to create a product; the owner comes from the caller's identity.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub price: Price,
}

/// Command to replace a product's editable fields.
///
/// Values are unchecked: they are validated only once the caller is known
/// to be allowed to edit the product, so a denied caller always sees the denial.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub name: String,
    pub price: Decimal,
}
