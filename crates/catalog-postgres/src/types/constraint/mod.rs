//! Database constraint violations organized by table.

mod products;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::products::ProductConstraints;

/// Constraint violation raised by any table of the catalog schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Product(ProductConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("products_name_length");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        match constraint.split('_').next()? {
            "products" => ProductConstraints::new(constraint).map(Self::Product),
            _ => None,
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Product(_) => "products",
        }
    }

    /// Returns the column name associated with this constraint.
    pub fn column_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Product(c) => c.column(),
        }
    }

    /// Returns the category of this constraint violation.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Product(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Product(c) => write!(f, "{}", c),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_parsing() {
        assert_eq!(
            ConstraintViolation::new("products_updated_after_created"),
            Some(ConstraintViolation::Product(
                ProductConstraints::UpdatedAfterCreated
            ))
        );
        assert_eq!(ConstraintViolation::new("products_unknown"), None);
        assert_eq!(ConstraintViolation::new("orders_total_min"), None);
    }

    #[test]
    fn test_constraint_categorization() {
        let violation = ConstraintViolation::Product(ProductConstraints::NameLength);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Validation
        );
        assert_eq!(violation.table_name(), "products");
        assert_eq!(violation.column_name(), "name");

        let violation = ConstraintViolation::Product(ProductConstraints::UpdatedAfterCreated);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Chronological
        );
    }

    #[test]
    fn test_constraint_serde() {
        let violation = ConstraintViolation::Product(ProductConstraints::DescriptionLength);
        let json = serde_json::to_string(&violation).unwrap();
        assert_eq!(json, "\"products_description_length\"");

        let parsed: ConstraintViolation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, violation);
    }
}
