//! Product form workflow
//!
//! A modal form collects raw field values; this module validates them,
//! re-opens the dialog with per-field messages while the submission is
//! invalid, and maps a valid one to a request payload. Cancelling
//! abandons the workflow without touching the collection.

use async_trait::async_trait;
use shared::models::{Product, ProductCreate, ProductUpdate};
use validator::Validate;

/// Raw field values as a dialog collects them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub nombre: String,
    pub marca: String,
    pub cantidad: String,
    pub precio: String,
    pub categoria_id: String,
}

impl FormValues {
    /// Seed values for editing an existing product
    pub fn from_product(producto: &Product) -> Self {
        Self {
            nombre: producto.nombre.clone(),
            marca: producto.marca.clone(),
            cantidad: producto.cantidad.to_string(),
            precio: producto.precio.value().to_string(),
            categoria_id: producto
                .categoria_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Per-field validation messages for the dialog to render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub nombre: Option<String>,
    pub marca: Option<String>,
    pub cantidad: Option<String>,
    pub precio: Option<String>,
    pub categoria_id: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.marca.is_none()
            && self.cantidad.is_none()
            && self.precio.is_none()
            && self.categoria_id.is_none()
    }

    fn slot(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            "nombre" => Some(&mut self.nombre),
            "marca" => Some(&mut self.marca),
            "cantidad" => Some(&mut self.cantidad),
            "precio" => Some(&mut self.precio),
            "categoria_id" => Some(&mut self.categoria_id),
            _ => None,
        }
    }

    fn set_if_empty(&mut self, field: &str, message: String) {
        if let Some(slot) = self.slot(field) {
            if slot.is_none() {
                *slot = Some(message);
            }
        }
    }
}

/// One round of the dialog: display strings plus the current values and
/// any messages from the previous submission
#[derive(Debug, Clone)]
pub struct FormRequest {
    pub title: String,
    pub description: String,
    pub confirm_label: String,
    pub values: FormValues,
    pub errors: FormErrors,
    /// Every field renders its validation state (set once a submission
    /// has been rejected)
    pub touched: bool,
}

/// Display strings and seed values for one workflow invocation
#[derive(Debug, Clone)]
pub struct FormSetup {
    pub title: String,
    pub description: String,
    pub confirm_label: String,
    pub initial: FormValues,
}

/// Modal form primitive: suspends until the user confirms (values) or
/// cancels (`None`)
#[async_trait]
pub trait FormDialog: Send + Sync {
    async fn open(&self, request: FormRequest) -> Option<FormValues>;
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 3, message = "El nombre debe tener al menos 3 caracteres."))]
    pub nombre: String,
    #[validate(length(min = 2, message = "La marca debe tener al menos 2 caracteres."))]
    pub marca: String,
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa."))]
    pub cantidad: i64,
    #[validate(range(min = 0.0, message = "El precio no puede ser negativo."))]
    pub precio: f64,
    #[validate(range(min = 1, message = "La categoría debe ser un número mayor a 0."))]
    pub categoria_id: Option<i64>,
}

impl ProductDraft {
    pub fn to_create(&self) -> ProductCreate {
        ProductCreate {
            nombre: self.nombre.clone(),
            marca: self.marca.clone(),
            cantidad: self.cantidad,
            precio: self.precio,
            categoria_id: self.categoria_id,
        }
    }

    pub fn to_update(&self) -> ProductUpdate {
        ProductUpdate {
            nombre: Some(self.nombre.clone()),
            marca: Some(self.marca.clone()),
            cantidad: Some(self.cantidad),
            precio: Some(self.precio),
            categoria_id: self.categoria_id,
        }
    }
}

const DRAFT_FIELDS: [&str; 5] = ["nombre", "marca", "cantidad", "precio", "categoria_id"];

/// Validate one submission
///
/// Text fields are trimmed; `cantidad`/`precio` are coerced to numbers
/// (non-numeric coerces to 0) but must be present; a `categoria_id` that
/// does not parse counts as "not provided", like a numeric form control.
pub fn validate_values(values: &FormValues) -> Result<ProductDraft, FormErrors> {
    let mut errors = FormErrors::default();
    if values.cantidad.trim().is_empty() {
        errors.cantidad = Some("La cantidad es obligatoria.".into());
    }
    if values.precio.trim().is_empty() {
        errors.precio = Some("El precio es obligatorio.".into());
    }

    let draft = ProductDraft {
        nombre: values.nombre.trim().to_string(),
        marca: values.marca.trim().to_string(),
        cantidad: values.cantidad.trim().parse().unwrap_or(0),
        precio: values.precio.trim().parse().unwrap_or(0.0),
        categoria_id: parse_categoria(&values.categoria_id),
    };

    if let Err(report) = draft.validate() {
        let fields = report.field_errors();
        for name in DRAFT_FIELDS {
            if let Some(first) = fields.get(name).and_then(|errs| errs.first()) {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Valor inválido.".into());
                errors.set_if_empty(name, message);
            }
        }
    }

    if errors.is_empty() { Ok(draft) } else { Err(errors) }
}

fn parse_categoria(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Drive the dialog until the user cancels or submits valid input
///
/// An invalid submission re-opens the dialog with every field touched and
/// the per-field messages populated instead of closing it.
pub async fn run_form(dialog: &dyn FormDialog, setup: FormSetup) -> Option<ProductDraft> {
    let mut values = setup.initial;
    let mut errors = FormErrors::default();
    let mut touched = false;
    loop {
        let request = FormRequest {
            title: setup.title.clone(),
            description: setup.description.clone(),
            confirm_label: setup.confirm_label.clone(),
            values: values.clone(),
            errors: errors.clone(),
            touched,
        };
        let submitted = dialog.open(request).await?;
        match validate_values(&submitted) {
            Ok(draft) => return Some(draft),
            Err(report) => {
                values = submitted;
                errors = report;
                touched = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_values() -> FormValues {
        FormValues {
            nombre: "Tornillo".into(),
            marca: "ACME".into(),
            cantidad: "100".into(),
            precio: "2.50".into(),
            categoria_id: String::new(),
        }
    }

    #[test]
    fn accepts_a_complete_submission() {
        let draft = validate_values(&valid_values()).unwrap();
        assert_eq!(draft.nombre, "Tornillo");
        assert_eq!(draft.cantidad, 100);
        assert_eq!(draft.precio, 2.5);
        assert_eq!(draft.categoria_id, None);
    }

    #[test]
    fn nombre_boundary_is_three_chars() {
        let mut values = valid_values();
        values.nombre = "ab".into();
        assert!(validate_values(&values).unwrap_err().nombre.is_some());

        values.nombre = "abc".into();
        assert!(validate_values(&values).is_ok());
    }

    #[test]
    fn marca_boundary_is_two_chars() {
        let mut values = valid_values();
        values.marca = "a".into();
        assert!(validate_values(&values).unwrap_err().marca.is_some());

        values.marca = "ab".into();
        assert!(validate_values(&values).is_ok());
    }

    #[test]
    fn cantidad_boundary_is_zero() {
        let mut values = valid_values();
        values.cantidad = "-1".into();
        assert!(validate_values(&values).unwrap_err().cantidad.is_some());

        values.cantidad = "0".into();
        assert!(validate_values(&values).is_ok());
    }

    #[test]
    fn cantidad_is_required() {
        let mut values = valid_values();
        values.cantidad = "  ".into();
        assert!(validate_values(&values).unwrap_err().cantidad.is_some());
    }

    #[test]
    fn categoria_boundary_is_one() {
        let mut values = valid_values();
        values.categoria_id = "0".into();
        assert!(validate_values(&values).unwrap_err().categoria_id.is_some());

        values.categoria_id = "1".into();
        assert_eq!(validate_values(&values).unwrap().categoria_id, Some(1));
    }

    #[test]
    fn unparsable_categoria_counts_as_absent() {
        let mut values = valid_values();
        values.categoria_id = "herramientas".into();
        assert_eq!(validate_values(&values).unwrap().categoria_id, None);
    }

    #[test]
    fn non_numeric_amounts_coerce_to_zero() {
        let mut values = valid_values();
        values.precio = "abc".into();
        values.cantidad = "x".into();
        let draft = validate_values(&values).unwrap();
        assert_eq!(draft.precio, 0.0);
        assert_eq!(draft.cantidad, 0);
    }

    #[test]
    fn text_fields_are_trimmed() {
        let mut values = valid_values();
        values.nombre = "  Tornillo  ".into();
        values.marca = "  ACME ".into();
        let draft = validate_values(&values).unwrap();
        assert_eq!(draft.nombre, "Tornillo");
        assert_eq!(draft.marca, "ACME");
    }

    #[test]
    fn update_payload_keeps_optional_category_absent() {
        let draft = validate_values(&valid_values()).unwrap();
        let payload = draft.to_update();
        assert_eq!(payload.nombre.as_deref(), Some("Tornillo"));
        assert_eq!(payload.categoria_id, None);
    }
}
