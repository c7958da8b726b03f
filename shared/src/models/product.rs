//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Closed schema: the fields below are the contract; unknown server
/// fields are ignored on deserialize. Every field is defaulted so
/// partially-populated rows still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub marca: String,
    #[serde(default)]
    pub precio: Price,
    #[serde(default)]
    pub cantidad: i64,
    /// Category reference (optional foreign key, >= 1 when present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
    /// Category display label resolved by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
}

impl Product {
    /// The product id coerced to an integer.
    ///
    /// `None` when the id is absent or not numeric. Products without a
    /// resolvable id cannot be edited, deleted, or opened in detail; the
    /// resolved value is also the key for all per-row busy guards.
    pub fn resolve_id(&self) -> Option<i64> {
        self.id.as_ref().and_then(ProductId::as_i64)
    }
}

/// Product id as it arrives on the wire: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Num(i64),
    Text(String),
}

impl ProductId {
    /// Coerce to an integer; `None` for non-numeric strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Num(id)
    }
}

/// Price as it arrives on the wire: a number, a numeric string, or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Option<PriceRepr>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Num(f64),
    Text(String),
}

impl Price {
    pub fn new(value: f64) -> Self {
        Self(Some(PriceRepr::Num(value)))
    }

    /// Total coercion: null/absent → 0, numeric string → parsed value
    /// (unparsable → 0), number passed through. Idempotent.
    pub fn value(&self) -> f64 {
        match &self.0 {
            None => 0.0,
            Some(PriceRepr::Num(n)) => *n,
            Some(PriceRepr::Text(s)) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub nombre: String,
    pub marca: String,
    pub cantidad: i64,
    pub precio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
}

/// Update product payload (partial update, omitted fields untouched)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cantidad: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_id_accepts_numbers_and_numeric_strings() {
        let mut producto = Product {
            id: Some(ProductId::Num(7)),
            ..Default::default()
        };
        assert_eq!(producto.resolve_id(), Some(7));

        producto.id = Some(ProductId::Text("12".into()));
        assert_eq!(producto.resolve_id(), Some(12));

        producto.id = Some(ProductId::Text("doce".into()));
        assert_eq!(producto.resolve_id(), None);

        producto.id = None;
        assert_eq!(producto.resolve_id(), None);
    }

    #[test]
    fn price_coercion_is_total() {
        assert_eq!(Price::default().value(), 0.0);
        assert_eq!(Price::new(7.0).value(), 7.0);

        let parsed: Price = serde_json::from_value(json!("12.5")).unwrap();
        assert_eq!(parsed.value(), 12.5);

        let garbage: Price = serde_json::from_value(json!("abc")).unwrap();
        assert_eq!(garbage.value(), 0.0);

        let null: Price = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(null.value(), 0.0);
    }

    #[test]
    fn product_deserializes_loose_wire_types() {
        let producto: Product = serde_json::from_value(json!({
            "id": "3",
            "nombre": "Tornillo",
            "marca": "ACME",
            "precio": "2.50",
            "cantidad": 100,
            "sucursal": "centro"
        }))
        .unwrap();

        assert_eq!(producto.resolve_id(), Some(3));
        assert_eq!(producto.precio.value(), 2.5);
        assert_eq!(producto.cantidad, 100);
        assert_eq!(producto.categoria_id, None);
    }

    #[test]
    fn create_payload_omits_missing_category() {
        let payload = ProductCreate {
            nombre: "Tornillo".into(),
            marca: "ACME".into(),
            cantidad: 100,
            precio: 2.5,
            categoria_id: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("categoria_id").is_none());
    }
}
