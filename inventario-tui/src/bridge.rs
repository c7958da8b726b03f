//! UI bridge
//!
//! The controller's dialog and notifier seams are implemented by message
//! passing with the render loop: each dialog request carries a oneshot
//! channel the loop answers when the user resolves the modal, so
//! controller tasks suspend on the modal exactly like an awaited dialog.

use async_trait::async_trait;
use inventario_client::controller::Notifier;
use inventario_client::detail::{DetailDialog, DetailState};
use inventario_client::form::{FormDialog, FormRequest, FormValues};
use tokio::sync::{mpsc, oneshot, watch};

/// Notice severity for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Requests the controller side sends to the render loop
pub enum UiRequest {
    Form {
        request: FormRequest,
        reply: oneshot::Sender<Option<FormValues>>,
    },
    Detail {
        states: watch::Receiver<DetailState>,
        closed: oneshot::Sender<()>,
    },
    Notice {
        kind: NoticeKind,
        message: String,
    },
}

/// Controller-side handle implementing the dialog and notifier traits
#[derive(Clone)]
pub struct UiBridge {
    tx: mpsc::UnboundedSender<UiRequest>,
}

impl UiBridge {
    pub fn new(tx: mpsc::UnboundedSender<UiRequest>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl FormDialog for UiBridge {
    async fn open(&self, request: FormRequest) -> Option<FormValues> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .tx
            .send(UiRequest::Form {
                request,
                reply: reply_tx,
            })
            .is_err()
        {
            return None;
        }
        // A dropped reply (render loop gone) counts as cancel
        reply_rx.await.unwrap_or(None)
    }
}

#[async_trait]
impl DetailDialog for UiBridge {
    async fn open(&self, states: watch::Receiver<DetailState>) {
        let (closed_tx, closed_rx) = oneshot::channel();
        if self
            .tx
            .send(UiRequest::Detail {
                states,
                closed: closed_tx,
            })
            .is_err()
        {
            return;
        }
        let _ = closed_rx.await;
    }
}

impl Notifier for UiBridge {
    fn success(&self, message: &str) {
        tracing::info!("{message}");
        let _ = self.tx.send(UiRequest::Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        });
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
        let _ = self.tx.send(UiRequest::Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        });
    }
}
