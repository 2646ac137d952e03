use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use catalog_core::{DomainError, DomainResult, ProductId};

/// Longest accepted product name, in characters.
pub const NAME_MAX_LEN: usize = 255;

/// Longest accepted product description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 65_535;

/// A product record as held by the store.
///
/// `id`, `created_at` and `updated_at` are assigned by the store; callers only
/// ever supply the mutable fields through [`NewProduct`] / [`ProductChanges`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the record was created on the given UTC calendar day.
    pub fn created_on(&self, date: chrono::NaiveDate) -> bool {
        self.created_at.date_naive() == date
    }

    /// Apply a set of changes in place. Absent fields are left untouched.
    pub fn apply_changes(&mut self, changes: &ProductChanges, now: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        self.updated_at = now;
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: Option<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description,
            price,
        }
    }

    /// Check the input and return it normalized (name trimmed).
    pub fn validate(self) -> DomainResult<Self> {
        let name = validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        validate_price(self.price)?;

        Ok(Self {
            name,
            description: self.description,
            price: self.price,
        })
    }
}

/// Partial update input. `None` means "leave this field as it is".
///
/// `description` distinguishes an absent field (`None`) from an explicit
/// `null` (`Some(None)`), which clears the stored description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Check every provided field; same rules as [`NewProduct::validate`].
    pub fn validate(self) -> DomainResult<Self> {
        let name = match &self.name {
            Some(name) => Some(validate_name(name)?),
            None => None,
        };
        if let Some(Some(description)) = &self.description {
            validate_description(description)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }

        Ok(Self {
            name,
            description: self.description,
            price: self.price,
        })
    }
}

/// Deserialize a field that may be absent, `null` or a value.
///
/// Pair with `#[serde(default)]`: an absent field stays `None`, while a present
/// one (including `null`) becomes `Some(..)`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(DomainError::validation(format!(
            "name cannot exceed {NAME_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: &str) -> DomainResult<()> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(DomainError::validation(format!(
            "description cannot exceed {DESCRIPTION_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> DomainResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(DomainError::validation("price cannot be negative"));
    }
    Ok(())
}
