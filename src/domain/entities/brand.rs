//! Domain entity representing a vehicle brand.

use super::{Entity, names_match};

/// A vehicle brand owned by a company.
///
/// The (brand, company) pair is unique, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: i64,
    pub brand: String,
    pub company: String,
}

impl Brand {
    pub fn new(id: i64, brand: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id,
            brand: brand.into(),
            company: company.into(),
        }
    }

    /// Returns true when this brand has the given name and company, ignoring case.
    pub fn is_named(&self, brand: &str, company: &str) -> bool {
        names_match(&self.brand, brand) && names_match(&self.company, company)
    }
}

impl Entity for Brand {
    type New = NewBrand;
    const KIND: &'static str = "Brand";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Input data for creating or replacing a brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBrand {
    pub brand: String,
    pub company: String,
}

impl NewBrand {
    /// Trims both names so stored values never carry stray whitespace.
    pub fn new(brand: &str, company: &str) -> Self {
        Self {
            brand: brand.trim().to_string(),
            company: company.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_named_ignores_case() {
        let brand = Brand::new(1, "Toyota", "ToyotaCorp");

        assert!(brand.is_named("toyota", "TOYOTACORP"));
        assert!(!brand.is_named("toyota", "Lexus"));
    }

    #[test]
    fn test_is_named_folds_non_ascii() {
        let brand = Brand::new(1, "Octavia", "Škoda");

        assert!(brand.is_named("OCTAVIA", "ŠKODA"));
    }

    #[test]
    fn test_new_brand_trims() {
        let new_brand = NewBrand::new("  Seat ", " VW Group");

        assert_eq!(new_brand.brand, "Seat");
        assert_eq!(new_brand.company, "VW Group");
    }
}
