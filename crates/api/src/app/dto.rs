use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use catalog_core::{DomainError, DomainResult};
use catalog_products::{NewProduct, ProductChanges};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /products`.
///
/// Fields are optional at the JSON level so a missing field is reported as a
/// validation error rather than a body parse error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> DomainResult<NewProduct> {
        let name = self
            .name
            .ok_or_else(|| DomainError::validation("name is required"))?;
        let price = self
            .price
            .ok_or_else(|| DomainError::validation("price is required"))?;
        Ok(NewProduct::new(name, self.description, price))
    }
}

/// Body of `PUT /products/{id}`. Absent fields are left unchanged;
/// `"description": null` clears the description.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "catalog_products::double_option")]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(body: UpdateProductRequest) -> Self {
        ProductChanges {
            name: body.name,
            description: body.description,
            price: body.price,
        }
    }
}

// -------------------------
// Path parameters
// -------------------------

/// Parse a date filter into a calendar date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose UTC date is used.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.naive_utc().date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates() {
        assert_eq!(
            parse_calendar_date("2024-01-05"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn parses_rfc3339_as_utc_date() {
        assert_eq!(
            parse_calendar_date("2024-01-05T23:30:00-02:00"),
            NaiveDate::from_ymd_opt(2024, 1, 6)
        );
    }

    #[test]
    fn accepts_last_representable_date() {
        assert_eq!(parse_calendar_date("+262142-12-31"), Some(NaiveDate::MAX));
    }

    #[test]
    fn rejects_malformed_dates() {
        for raw in ["2024-13-01", "2024-02-30", "05/01/2024", "yesterday", ""] {
            assert_eq!(parse_calendar_date(raw), None, "{raw}");
        }
    }

    #[test]
    fn create_request_reports_missing_fields() {
        let body: CreateProductRequest = serde_json::from_str(r#"{"price": 1}"#).unwrap();
        assert_eq!(
            body.into_new_product().unwrap_err(),
            DomainError::validation("name is required")
        );

        let body: CreateProductRequest = serde_json::from_str(r#"{"name": "Widget"}"#).unwrap();
        assert_eq!(
            body.into_new_product().unwrap_err(),
            DomainError::validation("price is required")
        );
    }

    #[test]
    fn update_request_maps_to_changes() {
        let body: UpdateProductRequest = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        let changes = ProductChanges::from(body);
        assert_eq!(changes.price, Some(Decimal::new(125, 1)));
        assert!(changes.name.is_none());
        assert!(changes.description.is_none());
    }

    #[test]
    fn update_request_null_description_clears() {
        let body: UpdateProductRequest =
            serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(ProductChanges::from(body).description, Some(None));

        let body: UpdateProductRequest =
            serde_json::from_str(r#"{"description": "New"}"#).unwrap();
        assert_eq!(
            ProductChanges::from(body).description,
            Some(Some("New".to_string()))
        );
    }
}
