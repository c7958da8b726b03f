//! Inventory view controller
//!
//! Owns the published product collection and orchestrates the load,
//! create, edit, delete, and detail flows against the gateway. Busy
//! markers gate duplicate submissions: create is single-flight for the
//! whole view, edit and delete are single-flight per product id.

use std::sync::Arc;

use shared::models::Product;
use shared::response::normalize_list;
use tokio::sync::watch;

use crate::detail::{DetailDialog, run_detail};
use crate::error::ClientError;
use crate::form::{FormDialog, FormSetup, FormValues, ProductDraft, run_form};
use crate::gateway::ProductGateway;
use crate::state::{BusyGuard, BusyKind, CreateGuard, InventoryState};

/// Transient user notifications (snackbar-style)
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Controller for the product list view
pub struct InventoryController {
    gateway: Arc<dyn ProductGateway>,
    form_dialog: Arc<dyn FormDialog>,
    detail_dialog: Arc<dyn DetailDialog>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<InventoryState>,
}

impl InventoryController {
    pub fn new(
        gateway: Arc<dyn ProductGateway>,
        form_dialog: Arc<dyn FormDialog>,
        detail_dialog: Arc<dyn DetailDialog>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(InventoryState::default());
        Self {
            gateway,
            form_dialog,
            detail_dialog,
            notifier,
            state,
        }
    }

    /// Receiver for the published view state
    pub fn subscribe(&self) -> watch::Receiver<InventoryState> {
        self.state.subscribe()
    }

    /// Current snapshot of the view state
    pub fn snapshot(&self) -> InventoryState {
        self.state.borrow().clone()
    }

    /// Reload the whole collection
    ///
    /// A failed load publishes an empty collection and sets the error
    /// flag; `loading` is cleared on every path.
    pub async fn load(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.load_error = false;
        });
        let outcome = self.gateway.list().await;
        self.state.send_modify(|s| {
            match outcome {
                Ok(envelope) => {
                    s.products = normalize_list(envelope);
                    s.load_error = false;
                }
                Err(ref error) => {
                    tracing::error!("product list load failed: {error}");
                    s.products = Vec::new();
                    s.load_error = true;
                }
            }
            s.loading = false;
        });
    }

    /// Create flow: form dialog, payload re-validation, POST, reload
    ///
    /// Single-flight for the whole view; invoking it again while a create
    /// is pending is a no-op.
    pub async fn create(&self) {
        if self.state.borrow().creating {
            return;
        }

        let setup = FormSetup {
            title: "Agregar producto".into(),
            description: "Completa la información para registrar un nuevo artículo.".into(),
            confirm_label: "Guardar".into(),
            initial: FormValues::default(),
        };
        let Some(draft) = run_form(self.form_dialog.as_ref(), setup).await else {
            return;
        };
        if !self.accept_payload(&draft) {
            return;
        }

        let Some(_guard) = CreateGuard::try_acquire(&self.state) else {
            return;
        };
        match self.gateway.create(&draft.to_create()).await {
            Ok(_) => {
                self.notifier.success("Producto agregado correctamente.");
                self.load().await;
            }
            Err(error) => {
                tracing::error!("product create failed: {error}");
                self.notify_failure(&error, "No se pudo agregar el producto. Intenta nuevamente.");
            }
        }
    }

    /// Edit flow for one product
    ///
    /// Requires a resolvable id. Drop-on-busy per id, so edits of
    /// different products may run concurrently.
    pub async fn edit(&self, producto: &Product) {
        let Some(id) = producto.resolve_id() else {
            return;
        };
        if self.state.borrow().editing_ids.contains(&id) {
            return;
        }

        let nombre = if producto.nombre.is_empty() {
            "este producto".to_string()
        } else {
            producto.nombre.clone()
        };
        let setup = FormSetup {
            title: "Editar producto".into(),
            description: format!("Actualiza la información de {nombre}."),
            confirm_label: "Actualizar".into(),
            initial: FormValues::from_product(producto),
        };
        let Some(draft) = run_form(self.form_dialog.as_ref(), setup).await else {
            return;
        };
        if !self.accept_payload(&draft) {
            return;
        }

        let Some(_guard) = BusyGuard::try_acquire(&self.state, BusyKind::Edit, id) else {
            return;
        };
        match self.gateway.update(id, &draft.to_update()).await {
            Ok(_) => {
                self.notifier.success("Producto actualizado correctamente.");
                self.load().await;
            }
            Err(error) => {
                tracing::error!("product update for {id} failed: {error}");
                self.notify_failure(
                    &error,
                    "No se pudo actualizar el producto. Intenta nuevamente.",
                );
            }
        }
    }

    /// Delete flow for one product
    ///
    /// Drop-on-busy per id. Success prunes the published collection
    /// without a reload; failure leaves the product in place and
    /// surfaces the error.
    pub async fn delete(&self, producto: &Product) {
        let Some(id) = producto.resolve_id() else {
            return;
        };
        let Some(_guard) = BusyGuard::try_acquire(&self.state, BusyKind::Delete, id) else {
            return;
        };
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.products.retain(|item| item.resolve_id() != Some(id));
                });
            }
            Err(error) => {
                tracing::warn!("product delete for {id} failed: {error}");
                self.notify_failure(
                    &error,
                    "No se pudo eliminar el producto. Intenta nuevamente.",
                );
            }
        }
    }

    /// Open the detail modal for one product; the collection is left
    /// untouched
    pub async fn show_detail(&self, producto: &Product) {
        let Some(id) = producto.resolve_id() else {
            return;
        };
        run_detail(self.gateway.as_ref(), self.detail_dialog.as_ref(), id).await;
    }

    pub fn is_deleting(&self, producto: &Product) -> bool {
        producto
            .resolve_id()
            .is_some_and(|id| self.state.borrow().deleting_ids.contains(&id))
    }

    pub fn is_editing(&self, producto: &Product) -> bool {
        producto
            .resolve_id()
            .is_some_and(|id| self.state.borrow().editing_ids.contains(&id))
    }

    /// Defensive re-validation of a dialog result before it reaches the
    /// network, mirroring the checks the form already made
    fn accept_payload(&self, draft: &ProductDraft) -> bool {
        if let Some(categoria_id) = draft.categoria_id {
            if categoria_id <= 0 {
                self.notifier
                    .error("La categoría debe ser un número mayor a 0.");
                return false;
            }
        }
        if draft.nombre.is_empty() || draft.marca.is_empty() || draft.precio.is_nan() {
            self.notifier.error("Por favor completa los campos requeridos.");
            return false;
        }
        true
    }

    fn notify_failure(&self, error: &ClientError, fallback: &str) {
        let message = error.server_message().unwrap_or(fallback);
        self.notifier.error(message);
    }
}
