//! Bills list, bill detail and PDF download.

use crate::models::Bill;
use crate::orders::{bills_filters, bills_table, BillEntry};
use crate::ui::components::common::{
    create_dialog_block, create_instructions_paragraph, labeled_line, loading_paragraph, shortcuts,
    InstructionShortcut,
};
use crate::ui::components::DataTable;
use crate::ui::core::{Action, Component, Screen, UiContext};
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::format_datetime_long;
use crate::utils::money::format_cop;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Row, Table},
    Frame,
};
use std::path::PathBuf;

const DETAIL: InstructionShortcut = ("Enter", Color::Green, " Ver factura");
const DOWNLOAD: InstructionShortcut = ("d", Color::Green, " Descargar PDF");

pub struct BillsScreen {
    ctx: UiContext,
    table: DataTable<BillEntry>,
    loaded: bool,
    bill: Option<Bill>,
    busy: bool,
    last_download: Option<PathBuf>,
}

impl BillsScreen {
    pub fn new(ctx: UiContext) -> Self {
        let table = DataTable::new(bills_table(ctx.items_per_page), bills_filters());
        Self {
            ctx,
            table,
            loaded: false,
            bill: None,
            busy: false,
            last_download: None,
        }
    }

    /// Show a bill fetched elsewhere, e.g. right after checkout
    pub fn show_bill(&mut self, bill: Bill) {
        self.last_download = None;
        self.bill = Some(bill);
    }

    fn render_bill(&self, f: &mut Frame, rect: Rect, bill: &Bill) {
        let area = LayoutManager::centered_rect(70, 85, rect);
        f.render_widget(Clear, area);
        let number = bill.bill_number.clone().unwrap_or_else(|| bill.num_id.to_string());
        let title = format!(" Factura {} ", number);
        let block = create_dialog_block(&title, Color::Green);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(inner);

        let na = || "N/A".to_string();
        let document = match (&bill.client_doc_type, &bill.client_doc_id) {
            (Some(kind), Some(id)) => format!("{} {}", kind, id),
            (None, Some(id)) => id.clone(),
            _ => na(),
        };
        let header = vec![
            labeled_line("Fecha", format_datetime_long(&bill.created_at, self.ctx.timezone)),
            labeled_line("Cliente", bill.client_name.clone().unwrap_or_else(na)),
            labeled_line("Documento", document),
            labeled_line("Teléfono", bill.client_phone.clone().unwrap_or_else(na)),
            labeled_line("Correo", bill.client_email.clone().unwrap_or_else(na)),
        ];
        f.render_widget(Paragraph::new(header), chunks[0]);

        let rows: Vec<Row> = bill
            .details
            .iter()
            .map(|d| {
                Row::new(vec![
                    d.display_name().to_string(),
                    d.quantity.to_string(),
                    format_cop(d.unit_price.unwrap_or(d.price)),
                    format_cop(d.line_total()),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(46),
                Constraint::Percentage(12),
                Constraint::Percentage(21),
                Constraint::Percentage(21),
            ],
        )
        .header(
            Row::new(vec!["Producto", "Cant.", "Precio", "Subtotal"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        );
        f.render_widget(table, chunks[1]);

        let mut footer = vec![Line::from(vec![
            Span::styled("Total: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_cop(bill.total_price),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ])];
        if let Some(path) = &self.last_download {
            footer.push(Line::from(Span::styled(
                format!("Guardado en {}", path.display()),
                Style::default().fg(Color::Gray),
            )));
        }
        f.render_widget(Paragraph::new(footer), chunks[2]);

        let instructions = if self.busy {
            vec![("⟳", Color::Yellow, " Generando PDF...")]
        } else {
            vec![DOWNLOAD, shortcuts::SEPARATOR, shortcuts::ESC_BACK]
        };
        f.render_widget(create_instructions_paragraph(&instructions), chunks[3]);
    }
}

impl Component for BillsScreen {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if let Some(bill) = &self.bill {
            return match key.code {
                KeyCode::Esc => {
                    self.bill = None;
                    Action::Render
                }
                KeyCode::Char('d') if !self.busy => {
                    self.busy = true;
                    Action::DownloadBill(Box::new(bill.clone()))
                }
                _ => Action::Render,
            };
        }
        if self.table.handle_key(key) {
            return Action::Render;
        }
        match key.code {
            KeyCode::Enter => match self.table.selected_item() {
                Some(entry) if !self.busy => {
                    self.busy = true;
                    Action::LoadBill {
                        source: entry.source,
                        id: entry.id.clone(),
                    }
                }
                _ => Action::Render,
            },
            KeyCode::Char('r') => Action::LoadScreen(Screen::Bills),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::BillsLoaded(entries) => {
                self.table.set_items(entries.clone());
                self.loaded = true;
            }
            Action::BillLoaded(bill) => {
                self.busy = false;
                self.show_bill((**bill).clone());
            }
            Action::BillDownloaded(path) => {
                self.busy = false;
                self.last_download = Some(path.clone());
            }
            Action::Failed(_) => self.busy = false,
            _ => {}
        }
        action
    }

    fn captures_input(&self) -> bool {
        self.bill.is_some() || self.table.is_editing_filter()
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.loaded && self.bill.is_none() {
            f.render_widget(loading_paragraph(" Facturas "), rect);
            return;
        }
        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(rect);
        self.table.render(f, chunks[0], "Facturas", self.ctx.timezone);
        f.render_widget(
            create_instructions_paragraph(&[
                shortcuts::ARROWS_MOVE,
                shortcuts::SEPARATOR,
                shortcuts::PAGES,
                shortcuts::SEPARATOR,
                shortcuts::FILTER,
                shortcuts::SEPARATOR,
                DETAIL,
                shortcuts::SEPARATOR,
                shortcuts::RELOAD,
            ]),
            chunks[1],
        );

        if let Some(bill) = &self.bill {
            self.render_bill(f, rect, bill);
        }
    }
}
