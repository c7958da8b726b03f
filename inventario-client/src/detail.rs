//! Product detail workflow
//!
//! A modal that fetches one product and renders it. The dialog observes
//! the workflow state through a watch channel; `Success` and `Error` are
//! terminal, so retrying means closing and reopening the dialog.

use async_trait::async_trait;
use shared::models::Product;
use shared::response::normalize_one;
use tokio::sync::watch;

use crate::gateway::ProductGateway;

/// Load status of the detail modal
#[derive(Debug, Clone, Default)]
pub enum DetailState {
    #[default]
    Loading,
    Success(Product),
    Error,
}

/// Modal detail primitive: renders the states it observes and resolves
/// when the user closes the dialog
#[async_trait]
pub trait DetailDialog: Send + Sync {
    async fn open(&self, states: watch::Receiver<DetailState>);
}

/// One `get_one` call resolved to a terminal state
pub async fn fetch_detail(gateway: &dyn ProductGateway, id: i64) -> DetailState {
    match gateway.get_one(id).await {
        Ok(envelope) => match normalize_one(envelope) {
            Some(producto) => DetailState::Success(producto),
            None => DetailState::Error,
        },
        Err(error) => {
            tracing::warn!("detail fetch for product {id} failed: {error}");
            DetailState::Error
        }
    }
}

/// Run the workflow: publish `Loading`, resolve the fetch, publish the
/// terminal state, and wait for the dialog to close
///
/// Dismissing the dialog does not cancel the request; a result arriving
/// after dismissal is simply never observed.
pub async fn run_detail(gateway: &dyn ProductGateway, dialog: &dyn DetailDialog, id: i64) {
    let (tx, rx) = watch::channel(DetailState::Loading);
    let fetch = async {
        let state = fetch_detail(gateway, id).await;
        let _ = tx.send(state);
    };
    tokio::join!(fetch, dialog.open(rx));
}
