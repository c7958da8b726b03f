//! API response reconciliation
//!
//! The backend wraps payloads inconsistently across endpoints: a list may
//! arrive bare or under `productos`; a single product bare, under
//! `producto`, under `data`, or as a one-element array. The envelope
//! types here absorb that variance so the rest of the client only ever
//! sees canonical shapes.

use serde::Deserialize;
use serde_json::Value;

use crate::models::Product;

/// Every shape the list endpoint is known to produce.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope {
    Bare(Vec<Product>),
    Wrapped { productos: Vec<Product> },
    Other(Value),
}

/// Every shape the single-product endpoints are known to produce.
///
/// Variant order matters: wrapped forms must win over the bare object,
/// which matches any map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProductEnvelope {
    Wrapped { producto: Product },
    Data { data: Product },
    Seq(Vec<Product>),
    Bare(Product),
    Other(Value),
}

/// Canonical product list: a bare sequence passes through verbatim, a
/// wrapped one is unwrapped, anything else degrades to empty.
pub fn normalize_list(envelope: ListEnvelope) -> Vec<Product> {
    match envelope {
        ListEnvelope::Bare(productos) | ListEnvelope::Wrapped { productos } => productos,
        ListEnvelope::Other(value) => {
            tracing::debug!("unrecognized list response shape: {value}");
            Vec::new()
        }
    }
}

/// Canonical single product, or `None` when the response cannot be read
/// as one.
pub fn normalize_one(envelope: ProductEnvelope) -> Option<Product> {
    match envelope {
        ProductEnvelope::Wrapped { producto } => Some(producto),
        ProductEnvelope::Data { data } => Some(data),
        ProductEnvelope::Seq(items) => items.into_iter().next(),
        ProductEnvelope::Bare(producto) => Some(producto),
        ProductEnvelope::Other(value) => {
            tracing::debug!("unrecognized product response shape: {value}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list_from(value: Value) -> Vec<Product> {
        normalize_list(serde_json::from_value(value).unwrap())
    }

    fn one_from(value: Value) -> Option<Product> {
        normalize_one(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn bare_sequence_passes_through() {
        let productos = list_from(json!([
            {"id": 1, "nombre": "Tornillo", "marca": "ACME", "precio": "2.50", "cantidad": 100}
        ]));
        assert_eq!(productos.len(), 1);
        assert_eq!(productos[0].nombre, "Tornillo");
        assert_eq!(productos[0].precio.value(), 2.5);
    }

    #[test]
    fn wrapped_sequence_is_unwrapped() {
        let productos = list_from(json!({
            "productos": [{"id": 1, "nombre": "Clavo", "marca": "ACME", "precio": 1.0, "cantidad": 5}],
            "total": 1
        }));
        assert_eq!(productos.len(), 1);
        assert_eq!(productos[0].nombre, "Clavo");
    }

    #[test]
    fn unrecognized_list_shapes_degrade_to_empty() {
        assert!(list_from(json!({"items": []})).is_empty());
        assert!(list_from(json!("nada")).is_empty());
        assert!(list_from(json!(null)).is_empty());
    }

    #[test]
    fn one_prefers_producto_then_data() {
        let wrapped = one_from(json!({"producto": {"id": 1, "nombre": "Taladro"}})).unwrap();
        assert_eq!(wrapped.nombre, "Taladro");

        let data = one_from(json!({"data": {"id": 2, "nombre": "Sierra"}})).unwrap();
        assert_eq!(data.nombre, "Sierra");
    }

    #[test]
    fn one_takes_first_of_sequence() {
        let first = one_from(json!([{"id": 9, "nombre": "Llave"}, {"id": 10}])).unwrap();
        assert_eq!(first.resolve_id(), Some(9));

        assert!(one_from(json!([])).is_none());
    }

    #[test]
    fn one_accepts_bare_object_and_rejects_scalars() {
        let bare = one_from(json!({"id": 4, "nombre": "Martillo"})).unwrap();
        assert_eq!(bare.resolve_id(), Some(4));

        assert!(one_from(json!(null)).is_none());
        assert!(one_from(json!(42)).is_none());
    }
}
