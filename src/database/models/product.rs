use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persisted product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub selected: Option<bool>,
}

/// Product that has not been stored yet. The store assigns its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub selected: Option<bool>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, quantity: i64, selected: Option<bool>) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            selected,
        }
    }
}

/// Editable fields once a form has passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl From<ProductFields> for NewProduct {
    fn from(fields: ProductFields) -> Self {
        NewProduct::new(fields.name, fields.price, fields.quantity, None)
    }
}

/// Raw form submission. Every field arrives as text so that a bad number
/// is reported next to its input instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: String,
}

/// Per-field messages shown next to the form inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.price.is_none() && self.quantity.is_none()
    }
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }

    /// Check name non-empty, price >= 0, quantity >= 1
    pub fn validate(&self) -> Result<ProductFields, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some("must not be empty".to_string());
        }

        let price = match self.price.trim().parse::<f64>() {
            Ok(p) if !p.is_finite() => {
                errors.price = Some("must be a number".to_string());
                None
            }
            Ok(p) if p < 0.0 => {
                errors.price = Some("must be greater than or equal to 0".to_string());
                None
            }
            Ok(p) => Some(p),
            Err(_) => {
                errors.price = Some("must be a number".to_string());
                None
            }
        };

        let quantity = match self.quantity.trim().parse::<i64>() {
            Ok(q) if q < 1 => {
                errors.quantity = Some("must be greater than or equal to 1".to_string());
                None
            }
            Ok(q) => Some(q),
            Err(_) => {
                errors.quantity = Some("must be a whole number".to_string());
                None
            }
        };

        match (price, quantity) {
            (Some(price), Some(quantity)) if errors.is_empty() => Ok(ProductFields {
                name: name.to_string(),
                price,
                quantity,
            }),
            _ => Err(errors),
        }
    }

    /// Identity carried by an edit form
    pub fn parse_id(&self) -> Result<i64, FieldErrors> {
        self.id.trim().parse::<i64>().map_err(|_| FieldErrors {
            id: Some("missing or invalid product id".to_string()),
            ..FieldErrors::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, price: &str, quantity: &str) -> ProductForm {
        ProductForm {
            id: String::new(),
            name: name.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn accepts_valid_product() {
        let fields = form("souris2", "300", "10").validate().unwrap();
        assert_eq!(fields.name, "souris2");
        assert_eq!(fields.price, 300.0);
        assert_eq!(fields.quantity, 10);
    }

    #[test]
    fn accepts_boundary_values() {
        let fields = form("gratuit", "0", "1").validate().unwrap();
        assert_eq!(fields.price, 0.0);
        assert_eq!(fields.quantity, 1);
    }

    #[test]
    fn rejects_empty_name() {
        let errors = form("   ", "10", "1").validate().unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.price.is_none());
    }

    #[test]
    fn rejects_negative_price_and_zero_quantity() {
        let errors = form("clavier", "-1", "0").validate().unwrap_err();
        assert!(errors.name.is_none());
        assert!(errors.price.is_some());
        assert!(errors.quantity.is_some());
    }

    #[test]
    fn rejects_non_numeric_input() {
        let errors = form("clavier", "cheap", "1.5").validate().unwrap_err();
        assert_eq!(errors.price.as_deref(), Some("must be a number"));
        assert_eq!(errors.quantity.as_deref(), Some("must be a whole number"));
    }

    #[test]
    fn parses_edit_form_id() {
        let mut f = form("a", "1", "1");
        assert!(f.parse_id().unwrap_err().id.is_some());
        f.id = "42".to_string();
        assert_eq!(f.parse_id().unwrap(), 42);
    }
}
