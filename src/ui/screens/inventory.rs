//! Store inventory table and the supply/return/relocation request form.

use crate::inventory::{inventory_filters, inventory_table, relocation_targets, RequestKind, RequestTable};
use crate::models::{Product, ReturnReason, Store, StoreProduct};
use crate::ui::components::common::{
    create_dialog_block, create_instructions_paragraph, cycle_index, loading_paragraph, shortcuts,
    InstructionShortcut,
};
use crate::ui::components::DataTable;
use crate::ui::core::{Action, Component, Screen, UiContext};
use crate::ui::layout::LayoutManager;
use crate::utils::money::format_cop;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowField {
    Product,
    Quantity,
    Reason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Kind,
    Target,
    Row(usize, RowField),
}

struct RequestForm {
    kind: RequestKind,
    table: RequestTable,
    target: Option<String>,
    field: usize,
    submitting: bool,
}

impl RequestForm {
    fn new(kind: RequestKind) -> Self {
        let mut table = RequestTable::new();
        table.add_row();
        Self {
            kind,
            table,
            target: None,
            field: 0,
            submitting: false,
        }
    }

    fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Kind];
        if self.kind == RequestKind::Relocation {
            fields.push(FormField::Target);
        }
        for i in 0..self.table.len() {
            fields.push(FormField::Row(i, RowField::Product));
            fields.push(FormField::Row(i, RowField::Quantity));
            if self.kind == RequestKind::Return {
                fields.push(FormField::Row(i, RowField::Reason));
            }
        }
        fields
    }

    fn current(&self) -> FormField {
        let fields = self.fields();
        fields[self.field.min(fields.len() - 1)]
    }

    fn total(&self) -> Decimal {
        self.table.to_details(self.kind).iter().map(|d| d.total_price).sum()
    }
}

const NEW_REQUEST: InstructionShortcut = ("n", Color::Green, " Nueva solicitud");
const REQUEST_ROW: InstructionShortcut = ("Enter", Color::Green, " Solicitar producto");
const ADD_ROW: InstructionShortcut = ("F2", Color::Cyan, " Agregar fila");
const REMOVE_ROW: InstructionShortcut = ("F3", Color::Red, " Quitar fila");
const SEND: InstructionShortcut = ("F10", Color::Green, " Enviar");
const CYCLE: InstructionShortcut = ("←/→", Color::Yellow, " Cambiar");

pub struct InventoryScreen {
    ctx: UiContext,
    table: DataTable<StoreProduct>,
    loaded: bool,
    products: Vec<Product>,
    stores: Vec<Store>,
    store_id: String,
    form: Option<RequestForm>,
}

impl InventoryScreen {
    pub fn new(ctx: UiContext) -> Self {
        let table = DataTable::new(inventory_table(ctx.items_per_page), inventory_filters());
        Self {
            ctx,
            table,
            loaded: false,
            products: Vec::new(),
            stores: Vec::new(),
            store_id: String::new(),
            form: None,
        }
    }

    /// Own store, excluded from relocation targets
    pub fn set_store_id(&mut self, store_id: impl Into<String>) {
        self.store_id = store_id.into();
    }

    fn targets(&self) -> Vec<&Store> {
        relocation_targets(&self.stores, &self.store_id)
    }

    fn open_form(&mut self, prefill: Option<Product>) {
        let mut form = RequestForm::new(RequestKind::Supply);
        if let Some(product) = prefill {
            form.table.clear();
            form.table.push(product, 1);
        }
        self.form = Some(form);
    }

    fn cycle_product(&self, current: Option<&Product>, forward: bool) -> Option<Product> {
        if self.products.is_empty() {
            return None;
        }
        let next = match current.and_then(|p| self.products.iter().position(|x| x.id == p.id)) {
            Some(idx) => cycle_index(idx, self.products.len(), forward),
            None => 0,
        };
        self.products.get(next).cloned()
    }

    fn cycle_target(&self, current: Option<&str>, forward: bool) -> Option<String> {
        let targets = self.targets();
        if targets.is_empty() {
            return None;
        }
        let next = match current.and_then(|id| targets.iter().position(|s| s.id == id)) {
            Some(idx) => cycle_index(idx, targets.len(), forward),
            None => 0,
        };
        targets.get(next).map(|s| s.id.clone())
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let Some(form) = self.form.as_ref() else {
            return Action::None;
        };
        if form.submitting {
            return Action::Render;
        }
        let current = form.current();
        let field_count = form.fields().len();
        let forward = matches!(key.code, KeyCode::Right);

        // Lookups that need &self happen before the mutable borrow below
        let next_product = match (current, key.code) {
            (FormField::Row(i, RowField::Product), KeyCode::Left | KeyCode::Right) => self.cycle_product(
                form.table.rows().get(i).and_then(|r| r.product.as_ref()),
                forward,
            ),
            _ => None,
        };
        let next_target = match (current, key.code) {
            (FormField::Target, KeyCode::Left | KeyCode::Right) => self.cycle_target(form.target.as_deref(), forward),
            _ => None,
        };
        let stores = self.stores.clone();

        let Some(form) = self.form.as_mut() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                return Action::Render;
            }
            KeyCode::Tab | KeyCode::Down => form.field = cycle_index(form.field, field_count, true),
            KeyCode::BackTab | KeyCode::Up => form.field = cycle_index(form.field, field_count, false),
            KeyCode::F(2) => form.table.add_row(),
            KeyCode::F(3) => {
                if let FormField::Row(i, _) = current {
                    form.table.remove_row(i);
                    form.field = form.field.min(form.fields().len() - 1);
                }
            }
            KeyCode::F(10) => {
                form.submitting = true;
                return Action::SubmitRequest {
                    kind: form.kind,
                    table: form.table.clone(),
                    stores,
                    target: form.target.clone(),
                };
            }
            _ => match current {
                FormField::Kind => {
                    if matches!(key.code, KeyCode::Left | KeyCode::Right) {
                        let idx = RequestKind::ALL.iter().position(|k| *k == form.kind).unwrap_or(0);
                        form.kind = RequestKind::ALL[cycle_index(idx, RequestKind::ALL.len(), forward)];
                        form.target = None;
                    }
                }
                FormField::Target => {
                    if next_target.is_some() {
                        form.target = next_target;
                    }
                }
                FormField::Row(i, RowField::Product) => {
                    if let Some(product) = next_product {
                        form.table.set_product(i, product);
                    }
                }
                FormField::Row(i, RowField::Quantity) => {
                    let quantity = form.table.rows().get(i).map(|r| r.quantity).unwrap_or(0);
                    match key.code {
                        KeyCode::Char(c) if c.is_ascii_digit() => {
                            let digit = i64::from(c.to_digit(10).unwrap_or(0));
                            form.table.set_quantity(i, quantity.saturating_mul(10).saturating_add(digit));
                        }
                        KeyCode::Backspace => form.table.set_quantity(i, quantity / 10),
                        KeyCode::Char('+') => form.table.set_quantity(i, quantity + 1),
                        KeyCode::Char('-') => form.table.set_quantity(i, quantity - 1),
                        _ => {}
                    }
                }
                FormField::Row(i, RowField::Reason) => {
                    if matches!(key.code, KeyCode::Left | KeyCode::Right) {
                        let current = form.table.rows().get(i).and_then(|r| r.return_reason);
                        let idx = match current.and_then(|r| ReturnReason::ALL.iter().position(|x| *x == r)) {
                            Some(idx) => cycle_index(idx, ReturnReason::ALL.len(), forward),
                            None => 0,
                        };
                        form.table.set_return_reason(i, ReturnReason::ALL[idx]);
                    }
                }
            },
        }
        Action::Render
    }

    fn render_form(&self, f: &mut Frame, rect: Rect, form: &RequestForm) {
        let area = LayoutManager::centered_rect(75, 80, rect);
        f.render_widget(Clear, area);
        let block = create_dialog_block(" Nueva solicitud ", Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(inner);

        let current = form.current();
        let kind_idx = RequestKind::ALL.iter().position(|k| *k == form.kind).unwrap_or(0);
        let kind_style = if current == FormField::Kind {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        let tabs = Tabs::new(RequestKind::ALL.iter().map(|k| k.tab_label()).collect::<Vec<_>>())
            .select(kind_idx)
            .highlight_style(kind_style)
            .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(tabs, chunks[0]);

        let marker = |field: FormField| if field == current { "▶ " } else { "  " };
        let focus_style = |field: FormField| {
            if field == current {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            }
        };

        let mut lines = Vec::new();
        if form.kind == RequestKind::Relocation {
            let name = form
                .target
                .as_deref()
                .and_then(|id| self.stores.iter().find(|s| s.id == id))
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Seleccionar tienda".to_string());
            lines.push(Line::from(vec![
                Span::styled(format!("{}Tienda destino: ", marker(FormField::Target)), Style::default().fg(Color::Gray)),
                Span::styled(name, focus_style(FormField::Target)),
            ]));
            lines.push(Line::default());
        }

        for (i, row) in form.table.rows().iter().enumerate() {
            let product = row
                .product
                .as_ref()
                .map(|p| format!("{} ({})", p.name, format_cop(p.base_price)))
                .unwrap_or_else(|| "Seleccionar producto".to_string());
            let mut spans = vec![
                Span::styled(format!("{}{}. ", marker(FormField::Row(i, RowField::Product)), i + 1), Style::default().fg(Color::Gray)),
                Span::styled(product, focus_style(FormField::Row(i, RowField::Product))),
                Span::styled("   Cantidad: ", Style::default().fg(Color::Gray)),
                Span::styled(row.quantity.to_string(), focus_style(FormField::Row(i, RowField::Quantity))),
            ];
            if form.kind == RequestKind::Return {
                let reason = row.return_reason.map(|r| r.label()).unwrap_or("Motivo");
                spans.push(Span::styled("   Motivo: ", Style::default().fg(Color::Gray)));
                spans.push(Span::styled(reason, focus_style(FormField::Row(i, RowField::Reason))));
            }
            lines.push(Line::from(spans));
        }
        if form.table.is_empty() {
            lines.push(Line::from(Span::styled("Sin productos. F2 agrega una fila.", Style::default().fg(Color::DarkGray))));
        }
        f.render_widget(Paragraph::new(lines), chunks[1]);

        let total = Paragraph::new(Line::from(vec![
            Span::styled("Total estimado: ", Style::default().fg(Color::Gray)),
            Span::styled(format_cop(form.total()), Style::default().fg(Color::Green)),
        ]))
        .block(Block::default().borders(Borders::TOP));
        f.render_widget(total, chunks[2]);

        let instructions = if form.submitting {
            vec![("⟳", Color::Yellow, " Enviando...")]
        } else {
            vec![
                shortcuts::TAB_NEXT,
                shortcuts::SEPARATOR,
                CYCLE,
                shortcuts::SEPARATOR,
                ADD_ROW,
                shortcuts::SEPARATOR,
                REMOVE_ROW,
                shortcuts::SEPARATOR,
                SEND,
                shortcuts::SEPARATOR,
                shortcuts::ESC_CANCEL,
            ]
        };
        f.render_widget(create_instructions_paragraph(&instructions), chunks[3]);
    }
}

impl Component for InventoryScreen {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.form.is_some() {
            return self.handle_form_key(key);
        }
        if self.table.handle_key(key) {
            return Action::Render;
        }
        match key.code {
            KeyCode::Char('n') => {
                self.open_form(None);
                Action::Render
            }
            KeyCode::Enter => {
                let product = self.table.selected_item().and_then(|item| item.product.clone());
                self.open_form(product);
                Action::Render
            }
            KeyCode::Char('r') => Action::LoadScreen(Screen::Inventory),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::InventoryLoaded { items, products, stores } => {
                self.table.set_items(items.clone());
                self.products = products.iter().filter(|p| p.available).cloned().collect();
                self.stores = stores.clone();
                self.loaded = true;
            }
            Action::RequestCreated(_) => self.form = None,
            Action::Failed(_) => {
                if let Some(form) = self.form.as_mut() {
                    form.submitting = false;
                }
            }
            _ => {}
        }
        action
    }

    fn captures_input(&self) -> bool {
        self.form.is_some() || self.table.is_editing_filter()
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.loaded {
            f.render_widget(loading_paragraph(" Inventario "), rect);
            return;
        }
        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(rect);
        self.table.render(f, chunks[0], "Inventario", self.ctx.timezone);
        f.render_widget(
            create_instructions_paragraph(&[
                shortcuts::ARROWS_MOVE,
                shortcuts::SEPARATOR,
                shortcuts::PAGES,
                shortcuts::SEPARATOR,
                shortcuts::FILTER,
                shortcuts::SEPARATOR,
                REQUEST_ROW,
                shortcuts::SEPARATOR,
                NEW_REQUEST,
                shortcuts::SEPARATOR,
                shortcuts::RELOAD,
            ]),
            chunks[1],
        );

        if let Some(form) = &self.form {
            self.render_form(f, rect, form);
        }
    }
}
