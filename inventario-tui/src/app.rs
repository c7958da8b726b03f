//! Application state and event loop

use std::collections::VecDeque;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use inventario_client::controller::InventoryController;
use inventario_client::detail::DetailState;
use inventario_client::form::{FormErrors, FormRequest, FormValues};
use inventario_client::state::InventoryState;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use shared::models::Product;
use tokio::sync::{mpsc, oneshot, watch};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::bridge::{NoticeKind, UiRequest};
use crate::ui;

pub const FORM_FIELDS: [&str; 5] = ["Nombre", "Marca", "Cantidad", "Precio", "Categoría (id)"];

/// Modal form state
pub struct FormModal {
    pub title: String,
    pub description: String,
    pub confirm_label: String,
    pub errors: FormErrors,
    pub touched: bool,
    pub inputs: Vec<Input>,
    pub focus: usize,
    reply: Option<oneshot::Sender<Option<FormValues>>>,
}

impl FormModal {
    fn new(request: FormRequest, reply: oneshot::Sender<Option<FormValues>>) -> Self {
        let values = &request.values;
        let inputs = vec![
            Input::new(values.nombre.clone()),
            Input::new(values.marca.clone()),
            Input::new(values.cantidad.clone()),
            Input::new(values.precio.clone()),
            Input::new(values.categoria_id.clone()),
        ];
        Self {
            title: request.title,
            description: request.description,
            confirm_label: request.confirm_label,
            errors: request.errors,
            touched: request.touched,
            inputs,
            focus: 0,
            reply: Some(reply),
        }
    }

    fn values(&self) -> FormValues {
        FormValues {
            nombre: self.inputs[0].value().into(),
            marca: self.inputs[1].value().into(),
            cantidad: self.inputs[2].value().into(),
            precio: self.inputs[3].value().into(),
            categoria_id: self.inputs[4].value().into(),
        }
    }

    pub fn error_for(&self, index: usize) -> Option<&str> {
        match index {
            0 => self.errors.nombre.as_deref(),
            1 => self.errors.marca.as_deref(),
            2 => self.errors.cantidad.as_deref(),
            3 => self.errors.precio.as_deref(),
            4 => self.errors.categoria_id.as_deref(),
            _ => None,
        }
    }
}

/// Modal detail state
pub struct DetailModal {
    states: watch::Receiver<DetailState>,
    closed: Option<oneshot::Sender<()>>,
}

impl DetailModal {
    pub fn current(&self) -> DetailState {
        self.states.borrow().clone()
    }
}

pub enum Modal {
    None,
    Form(FormModal),
    Detail(DetailModal),
}

pub struct App {
    pub controller: Arc<InventoryController>,
    pub state_rx: watch::Receiver<InventoryState>,
    ui_rx: mpsc::UnboundedReceiver<UiRequest>,
    /// Dialog requests waiting for the modal slot
    pending: VecDeque<UiRequest>,
    pub modal: Modal,
    pub selected: usize,
    pub notice: Option<(NoticeKind, String)>,
}

impl App {
    pub fn new(
        controller: Arc<InventoryController>,
        state_rx: watch::Receiver<InventoryState>,
        ui_rx: mpsc::UnboundedReceiver<UiRequest>,
    ) -> Self {
        Self {
            controller,
            state_rx,
            ui_rx,
            pending: VecDeque::new(),
            modal: Modal::None,
            selected: 0,
            notice: None,
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.pump_requests();
            self.clamp_selection();
            terminal.draw(|frame| ui::draw(frame, self))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
                        && self.on_key(key)
                    {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Drain controller-side requests. Notices apply immediately; dialog
    /// requests wait in order for the single modal slot.
    fn pump_requests(&mut self) {
        while let Ok(request) = self.ui_rx.try_recv() {
            self.pending.push_back(request);
        }
        let mut deferred = VecDeque::new();
        while let Some(request) = self.pending.pop_front() {
            match request {
                UiRequest::Notice { kind, message } => self.notice = Some((kind, message)),
                dialog if matches!(self.modal, Modal::None) => self.open_modal(dialog),
                dialog => deferred.push_back(dialog),
            }
        }
        self.pending = deferred;
    }

    fn open_modal(&mut self, request: UiRequest) {
        match request {
            UiRequest::Form { request, reply } => {
                self.modal = Modal::Form(FormModal::new(request, reply));
            }
            UiRequest::Detail { states, closed } => {
                self.modal = Modal::Detail(DetailModal {
                    states,
                    closed: Some(closed),
                });
            }
            UiRequest::Notice { .. } => {}
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.state_rx.borrow().products.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Returns true when the app should quit
    fn on_key(&mut self, key: KeyEvent) -> bool {
        match &mut self.modal {
            Modal::Form(form) => {
                match key.code {
                    KeyCode::Esc => {
                        if let Some(reply) = form.reply.take() {
                            let _ = reply.send(None);
                        }
                        self.modal = Modal::None;
                    }
                    KeyCode::Enter => {
                        let values = form.values();
                        if let Some(reply) = form.reply.take() {
                            let _ = reply.send(Some(values));
                        }
                        self.modal = Modal::None;
                    }
                    KeyCode::Tab | KeyCode::Down => {
                        form.focus = (form.focus + 1) % form.inputs.len();
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        form.focus = (form.focus + form.inputs.len() - 1) % form.inputs.len();
                    }
                    _ => {
                        let focus = form.focus;
                        form.inputs[focus].handle_event(&Event::Key(key));
                    }
                }
                false
            }
            Modal::Detail(detail) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    if let Some(closed) = detail.closed.take() {
                        let _ = closed.send(());
                    }
                    self.modal = Modal::None;
                }
                false
            }
            Modal::None => self.on_list_key(key),
        }
    }

    fn on_list_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.state_rx.borrow().products.len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Char('r') => {
                let controller = self.controller.clone();
                tokio::spawn(async move { controller.load().await });
            }
            KeyCode::Char('a') => {
                let controller = self.controller.clone();
                tokio::spawn(async move { controller.create().await });
            }
            KeyCode::Char('e') => {
                if let Some(producto) = self.selected_product() {
                    let controller = self.controller.clone();
                    tokio::spawn(async move { controller.edit(&producto).await });
                }
            }
            KeyCode::Char('d') => {
                if let Some(producto) = self.selected_product() {
                    let controller = self.controller.clone();
                    tokio::spawn(async move { controller.delete(&producto).await });
                }
            }
            KeyCode::Char('v') | KeyCode::Enter => {
                if let Some(producto) = self.selected_product() {
                    let controller = self.controller.clone();
                    tokio::spawn(async move { controller.show_detail(&producto).await });
                }
            }
            _ => {}
        }
        false
    }

    fn selected_product(&self) -> Option<Product> {
        self.state_rx.borrow().products.get(self.selected).cloned()
    }
}
