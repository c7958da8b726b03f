//! Rendering

use inventario_client::detail::DetailState;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use shared::util::format_price;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, DetailModal, FORM_FIELDS, FormModal, Modal};
use crate::bridge::NoticeKind;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Table + logs
            Constraint::Length(3), // Status / help
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(chunks[1]);
    draw_table(frame, app, main[0]);
    draw_logs(frame, main[1]);
    draw_status(frame, app, chunks[2]);

    match &app.modal {
        Modal::Form(form) => draw_form_modal(frame, form),
        Modal::Detail(detail) => draw_detail_modal(frame, detail),
        Modal::None => {}
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state_rx.borrow();
    let badge = if state.loading {
        Span::styled(
            " CARGANDO... ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else if state.load_error {
        Span::styled(
            " ERROR DE CARGA ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!(" {} productos ", state.products.len()),
            Style::default().fg(Color::Green),
        )
    };
    let title = Paragraph::new(Line::from(vec![
        Span::raw(" Inventario "),
        Span::styled(" Productos ", Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        badge,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(title, area);
}

fn draw_table(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state_rx.borrow();
    let header = Row::new(vec![
        "Id", "Nombre", "Marca", "Precio", "Cantidad", "Categoría", "Estado",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = state.products.iter().enumerate().map(|(index, producto)| {
        let id = producto.resolve_id();
        let busy = if id.is_some_and(|id| state.deleting_ids.contains(&id)) {
            "eliminando…"
        } else if id.is_some_and(|id| state.editing_ids.contains(&id)) {
            "editando…"
        } else {
            ""
        };
        let row = Row::new(vec![
            Cell::from(id.map(|id| id.to_string()).unwrap_or_else(|| "-".into())),
            Cell::from(producto.nombre.clone()),
            Cell::from(producto.marca.clone()),
            Cell::from(format_price(producto.precio.value())),
            Cell::from(producto.cantidad.to_string()),
            Cell::from(producto.categoria.clone().unwrap_or_else(|| "-".into())),
            Cell::from(busy),
        ]);
        if index == app.selected {
            row.style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            row
        }
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(12),
            Constraint::Min(8),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Min(8),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(Block::default().title(" Productos ").borders(Borders::ALL));
    frame.render_widget(table, area);

    if state.load_error && state.products.is_empty() {
        let banner =
            Paragraph::new("No se pudieron cargar los productos. Pulsa 'r' para reintentar.")
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 2,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(banner, inner);
    }
}

fn draw_logs(frame: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(Block::default().title(" Registro ").borders(Borders::ALL))
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White));
    frame.render_widget(logs, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let help = "r recargar | a agregar | e editar | d eliminar | v detalle | q salir";
    let line = match &app.notice {
        Some((kind, message)) => {
            let color = match kind {
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(message.clone(), Style::default().fg(color)),
                Span::raw("  |  "),
                Span::styled(help, Style::default().fg(Color::DarkGray)),
            ])
        }
        None => Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_form_modal(frame: &mut Frame, form: &FormModal) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default()
            .title(format!(" {} ", form.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
        area,
    );

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(std::iter::repeat(Constraint::Length(3)).take(FORM_FIELDS.len()));
    constraints.push(Constraint::Min(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area);

    frame.render_widget(
        Paragraph::new(form.description.clone())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Gray)),
        rows[0],
    );

    for (index, label) in FORM_FIELDS.iter().enumerate() {
        let focused = form.focus == index;
        let error = if form.touched { form.error_for(index) } else { None };
        let border = if error.is_some() {
            Style::default().fg(Color::Red)
        } else if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut block = Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_style(border);
        if let Some(message) = error {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {message} "),
                Style::default().fg(Color::Red),
            )));
        }

        let input = &form.inputs[index];
        let field_area = rows[index + 1];
        let width = field_area.width.max(3) - 3;
        let scroll = input.visual_scroll(width as usize);
        frame.render_widget(
            Paragraph::new(input.value())
                .scroll((0, scroll as u16))
                .block(block),
            field_area,
        );
        if focused {
            frame.set_cursor_position((
                field_area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
                field_area.y + 1,
            ));
        }
    }

    let footer = Paragraph::new(format!(
        "Enter {} | Esc cancelar | Tab siguiente campo",
        form.confirm_label
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(footer, rows[FORM_FIELDS.len() + 1]);
}

fn draw_detail_modal(frame: &mut Frame, detail: &DetailModal) {
    let area = centered_rect(50, 55, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(" Detalle del producto ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content: Vec<Line> = match detail.current() {
        DetailState::Loading => vec![Line::from("Cargando producto…")],
        DetailState::Error => vec![
            Line::from(Span::styled(
                "No se pudo cargar el producto.",
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Cierra el diálogo y vuelve a intentarlo.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        DetailState::Success(producto) => {
            let id = producto
                .resolve_id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".into());
            vec![
                detail_line("Id", id),
                detail_line("Nombre", producto.nombre.clone()),
                detail_line("Marca", producto.marca.clone()),
                detail_line("Precio", format_price(producto.precio.value())),
                detail_line("Cantidad", producto.cantidad.to_string()),
                detail_line(
                    "Categoría",
                    producto.categoria.clone().unwrap_or_else(|| "-".into()),
                ),
                Line::from(""),
                Line::from(Span::styled(
                    "Esc para cerrar",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
    };
    frame.render_widget(Paragraph::new(content).wrap(Wrap { trim: true }), inner);
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Yellow)),
        Span::raw(value),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
