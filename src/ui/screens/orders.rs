//! Custom orders: status tabs, order detail and the new-order form.

use crate::models::{CustomOrder, Product, StatusOrder};
use crate::orders::{CustomOrderDraft, StatusFilter};
use crate::ui::components::common::{
    create_dialog_block, create_instructions_paragraph, cycle_index, edit_amount, edit_digits, edit_text, heading,
    labeled_line, loading_paragraph, shortcuts, InstructionShortcut,
};
use crate::ui::core::{Action, Component, Screen, UiContext};
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::format_datetime_long;
use crate::utils::money::format_cop;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CakeField {
    Pounds,
    Tiers,
    Price,
    Image,
}

impl CakeField {
    const ALL: [CakeField; 4] = [CakeField::Pounds, CakeField::Tiers, CakeField::Price, CakeField::Image];

    fn label(self) -> &'static str {
        match self {
            CakeField::Pounds => "Libras",
            CakeField::Tiers => "Niveles",
            CakeField::Price => "Precio",
            CakeField::Image => "Imagen (URL)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Phone,
    Email,
    ProductPicker,
    Line(usize),
    Cake(usize, CakeField),
    Deposit,
}

fn form_fields(draft: &CustomOrderDraft) -> Vec<FormField> {
    let mut fields = vec![FormField::Name, FormField::Phone, FormField::Email, FormField::ProductPicker];
    fields.extend((0..draft.products.len()).map(FormField::Line));
    for i in 0..draft.cakes.len() {
        fields.extend(CakeField::ALL.iter().map(|f| FormField::Cake(i, *f)));
    }
    fields.push(FormField::Deposit);
    fields
}

/// Status change waiting for a second keypress
#[derive(Debug, Clone)]
struct PendingConfirm {
    id: String,
    status: StatusOrder,
}

const NEW_ORDER: InstructionShortcut = ("n", Color::Green, " Nuevo pedido");
const COMPLETE: InstructionShortcut = ("c", Color::Green, " Completar");
const CANCEL_ORDER: InstructionShortcut = ("x", Color::Red, " Cancelar pedido");
const TABS: InstructionShortcut = ("Tab", Color::Cyan, " Estado");
const ADD_CAKE: InstructionShortcut = ("F2", Color::Cyan, " Agregar torta");
const REMOVE_CAKE: InstructionShortcut = ("F3", Color::Red, " Quitar torta");
const SAVE: InstructionShortcut = ("F10", Color::Green, " Guardar");

pub struct OrdersScreen {
    ctx: UiContext,
    orders: Option<Vec<CustomOrder>>,
    products: Vec<Product>,
    filter: StatusFilter,
    selected: usize,
    draft: Option<CustomOrderDraft>,
    field: usize,
    picker_index: usize,
    confirm: Option<PendingConfirm>,
    submitting: bool,
}

impl OrdersScreen {
    pub fn new(ctx: UiContext) -> Self {
        Self {
            ctx,
            orders: None,
            products: Vec::new(),
            filter: StatusFilter::All,
            selected: 0,
            draft: None,
            field: 0,
            picker_index: 0,
            confirm: None,
            submitting: false,
        }
    }

    fn visible(&self) -> Vec<&CustomOrder> {
        self.orders
            .as_deref()
            .map(|orders| self.filter.apply(orders))
            .unwrap_or_default()
    }

    fn selected_order(&self) -> Option<&CustomOrder> {
        self.visible().get(self.selected).copied()
    }

    fn ask_status(&mut self, status: StatusOrder) -> Action {
        match self.selected_order() {
            Some(order) if order.status == StatusOrder::Pending => {
                self.confirm = Some(PendingConfirm {
                    id: order.id.clone(),
                    status,
                });
            }
            _ => {}
        }
        Action::Render
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        if self.submitting {
            return Action::Render;
        }
        let products_len = self.products.len();
        let Some(draft) = self.draft.as_mut() else {
            return Action::None;
        };
        let fields = form_fields(draft);
        self.field = self.field.min(fields.len() - 1);
        let current = fields[self.field];

        match key.code {
            KeyCode::Esc => {
                self.draft = None;
                return Action::Render;
            }
            KeyCode::Tab | KeyCode::Down => self.field = cycle_index(self.field, fields.len(), true),
            KeyCode::BackTab | KeyCode::Up => self.field = cycle_index(self.field, fields.len(), false),
            KeyCode::F(2) => draft.add_cake(),
            KeyCode::F(3) => {
                if let FormField::Cake(i, _) = current {
                    draft.remove_cake(i);
                }
            }
            KeyCode::F(10) => {
                self.submitting = true;
                return Action::CreateCustomOrder(Box::new(draft.clone()));
            }
            _ => match current {
                FormField::Name => {
                    edit_text(&mut draft.client.name, key);
                }
                FormField::Phone => {
                    edit_text(&mut draft.client.phone, key);
                }
                FormField::Email => {
                    edit_text(&mut draft.client.email, key);
                }
                FormField::Deposit => {
                    edit_amount(&mut draft.deposit, key);
                }
                FormField::ProductPicker => match key.code {
                    KeyCode::Left => self.picker_index = cycle_index(self.picker_index, products_len, false),
                    KeyCode::Right => self.picker_index = cycle_index(self.picker_index, products_len, true),
                    KeyCode::Enter => {
                        if let Some(product) = self.products.get(self.picker_index) {
                            draft.add_product(product);
                        }
                    }
                    _ => {}
                },
                FormField::Line(i) => {
                    if let Some(line) = draft.products.get(i) {
                        let id = line.product.id.clone();
                        let quantity = line.quantity;
                        match key.code {
                            KeyCode::Char('+') | KeyCode::Right => draft.set_product_quantity(&id, quantity + 1),
                            KeyCode::Char('-') | KeyCode::Left => draft.set_product_quantity(&id, quantity - 1),
                            KeyCode::Delete | KeyCode::Char('x') => draft.remove_product(&id),
                            _ => {}
                        }
                    }
                }
                FormField::Cake(i, field) => {
                    if let Some(cake) = draft.cakes.get_mut(i) {
                        match field {
                            CakeField::Pounds => edit_amount(&mut cake.pounds, key),
                            CakeField::Tiers => edit_digits(&mut cake.tiers, key),
                            CakeField::Price => edit_amount(&mut cake.price, key),
                            CakeField::Image => edit_text(&mut cake.image_url, key),
                        };
                    }
                }
            },
        }
        Action::Render
    }

    fn render_detail(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Detalle ")
            .border_style(Style::default().fg(Color::DarkGray));

        let Some(order) = self.selected_order() else {
            f.render_widget(Paragraph::new("Sin pedidos").block(block), area);
            return;
        };

        let tz = self.ctx.timezone;
        let mut lines = vec![
            heading(format!("Pedido #{}", order.num_id)),
            labeled_line("Estado", order.status.label()),
            labeled_line("Creado", format_datetime_long(&order.created_at, tz)),
        ];
        if let Some(client) = &order.client {
            lines.push(labeled_line("Cliente", client.name.clone()));
            if let Some(phone) = &client.phone {
                lines.push(labeled_line("Teléfono", phone.clone()));
            }
        }
        if !order.products.is_empty() {
            lines.push(Line::default());
            lines.push(heading("Productos"));
            for p in &order.products {
                let name = p.product.as_ref().map(|p| p.name.as_str()).unwrap_or("Producto");
                lines.push(Line::from(format!(
                    "  {} x{}  {}",
                    name,
                    p.quantity,
                    format_cop(p.total_price)
                )));
            }
        }
        if !order.details.is_empty() {
            lines.push(Line::default());
            lines.push(heading("Tortas"));
            for (i, cake) in order.details.iter().enumerate() {
                lines.push(Line::from(format!(
                    "  Torta {}: {} lb, {} niveles, {}",
                    i + 1,
                    cake.pounds,
                    cake.tiers,
                    format_cop(cake.price)
                )));
            }
        }
        lines.push(Line::default());
        lines.push(labeled_line("Total", format_cop(order.total_price)));
        lines.push(labeled_line("Abono", format_cop(order.deposit_amount)));
        lines.push(labeled_line("Saldo", format_cop(order.remaining_amount)));

        f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
    }

    fn render_form(&self, f: &mut Frame, rect: Rect, draft: &CustomOrderDraft) {
        let area = LayoutManager::centered_rect(80, 90, rect);
        f.render_widget(Clear, area);
        let block = create_dialog_block(" Nuevo pedido ", Color::Green);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(3), Constraint::Length(1)]).split(inner);
        let fields = form_fields(draft);

        let mut lines = Vec::new();
        let mut focused_line = 0;
        for (idx, field) in fields.iter().enumerate() {
            let focused = idx == self.field;
            let cursor = if focused { "█" } else { "" };
            let (label, value) = match field {
                FormField::Name => ("Nombre del cliente".to_string(), format!("{}{}", draft.client.name, cursor)),
                FormField::Phone => ("Teléfono".to_string(), format!("{}{}", draft.client.phone, cursor)),
                FormField::Email => ("Correo (opcional)".to_string(), format!("{}{}", draft.client.email, cursor)),
                FormField::ProductPicker => {
                    let name = self
                        .products
                        .get(self.picker_index)
                        .map(|p| format!("◀ {} ({}) ▶", p.name, format_cop(p.base_price)))
                        .unwrap_or_else(|| "Sin productos".to_string());
                    ("Agregar producto".to_string(), name)
                }
                FormField::Line(i) => match draft.products.get(*i) {
                    Some(line) => (
                        format!("  {}", line.product.name),
                        format!("x{}  {}", line.quantity, format_cop(line.subtotal())),
                    ),
                    None => continue,
                },
                FormField::Cake(i, cake_field) => {
                    if *cake_field == CakeField::Pounds {
                        lines.push(heading(format!("Torta {}", i + 1)));
                    }
                    let cake = &draft.cakes[*i];
                    let value = match cake_field {
                        CakeField::Pounds => &cake.pounds,
                        CakeField::Tiers => &cake.tiers,
                        CakeField::Price => &cake.price,
                        CakeField::Image => &cake.image_url,
                    };
                    (format!("  {}", cake_field.label()), format!("{}{}", value, cursor))
                }
                FormField::Deposit => ("Abono".to_string(), format!("{}{}", draft.deposit, cursor)),
            };
            if focused {
                focused_line = lines.len();
            }
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}{}: ", if focused { "▶ " } else { "  " }, label), label_style),
                Span::styled(value, Style::default().fg(Color::White)),
            ]));
        }

        let height = chunks[0].height as usize;
        let scroll = focused_line.saturating_sub(height.saturating_sub(2)) as u16;
        f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[0]);

        let totals = Paragraph::new(vec![Line::from(vec![
            Span::styled("Total: ", Style::default().fg(Color::Gray)),
            Span::styled(format_cop(draft.total()), Style::default().fg(Color::White)),
            Span::styled("   Abono: ", Style::default().fg(Color::Gray)),
            Span::styled(format_cop(draft.deposit_amount()), Style::default().fg(Color::White)),
            Span::styled("   Saldo: ", Style::default().fg(Color::Gray)),
            Span::styled(format_cop(draft.remaining()), Style::default().fg(Color::Yellow)),
        ])])
        .block(Block::default().borders(Borders::TOP));
        f.render_widget(totals, chunks[1]);

        let instructions = if self.submitting {
            vec![("⟳", Color::Yellow, " Guardando...")]
        } else {
            vec![
                shortcuts::TAB_NEXT,
                shortcuts::SEPARATOR,
                SAVE,
                shortcuts::SEPARATOR,
                ADD_CAKE,
                shortcuts::SEPARATOR,
                REMOVE_CAKE,
                shortcuts::SEPARATOR,
                shortcuts::ESC_CANCEL,
            ]
        };
        f.render_widget(create_instructions_paragraph(&instructions), chunks[2]);
    }
}

impl Component for OrdersScreen {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.draft.is_some() {
            return self.handle_form_key(key);
        }
        if let Some(confirm) = self.confirm.take() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('s') => Action::SetCustomOrderStatus {
                    id: confirm.id,
                    status: confirm.status,
                },
                _ => Action::Render,
            };
        }

        match key.code {
            KeyCode::Tab => {
                self.filter = self.filter.next();
                self.selected = 0;
                Action::Render
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = cycle_index(self.selected, self.visible().len(), true);
                Action::Render
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = cycle_index(self.selected, self.visible().len(), false);
                Action::Render
            }
            KeyCode::Char('n') => {
                self.draft = Some(CustomOrderDraft::new());
                self.field = 0;
                self.picker_index = 0;
                Action::Render
            }
            KeyCode::Char('c') => self.ask_status(StatusOrder::Completed),
            KeyCode::Char('x') => self.ask_status(StatusOrder::Canceled),
            KeyCode::Char('r') => Action::LoadScreen(Screen::Orders),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::CustomOrdersLoaded { orders, products } => {
                let mut orders = orders.clone();
                orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                self.orders = Some(orders);
                self.products = products.iter().filter(|p| p.available).cloned().collect();
                self.selected = self.selected.min(self.visible().len().saturating_sub(1));
            }
            Action::CustomOrderSaved(order) => {
                self.submitting = false;
                self.draft = None;
                if let Some(orders) = self.orders.as_mut() {
                    match orders.iter_mut().find(|o| o.id == order.id) {
                        Some(existing) => *existing = (**order).clone(),
                        None => orders.insert(0, (**order).clone()),
                    }
                }
            }
            Action::Failed(_) => self.submitting = false,
            _ => {}
        }
        action
    }

    fn captures_input(&self) -> bool {
        self.draft.is_some()
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if self.orders.is_none() {
            f.render_widget(loading_paragraph(" Pedidos "), rect);
            return;
        }

        let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)]).split(rect);

        let titles: Vec<&str> = StatusFilter::ALL.iter().map(|s| s.label()).collect();
        let active = StatusFilter::ALL.iter().position(|s| *s == self.filter).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(active)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).title(" Pedidos "))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, rows[0]);

        let columns = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(rows[1]);
        let items: Vec<ListItem> = self
            .visible()
            .into_iter()
            .map(|order| {
                let client = order.client.as_ref().map(|c| c.name.as_str()).unwrap_or("-");
                let status_color = match order.status {
                    StatusOrder::Pending => Color::Yellow,
                    StatusOrder::Completed => Color::Green,
                    StatusOrder::Canceled => Color::Red,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("#{:<5} ", order.num_id), Style::default().fg(Color::Gray)),
                    Span::styled(format!("{:<22}", client), Style::default().fg(Color::White)),
                    Span::styled(format!("{:>14} ", format_cop(order.total_price)), Style::default().fg(Color::Green)),
                    Span::styled(order.status.label(), Style::default().fg(status_color)),
                ]))
            })
            .collect();
        let has_items = !items.is_empty();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        if has_items {
            state.select(Some(self.selected));
        }
        f.render_stateful_widget(list, columns[0], &mut state);
        self.render_detail(f, columns[1]);

        let footer = match &self.confirm {
            Some(confirm) => {
                let verb = if confirm.status == StatusOrder::Canceled { "cancelar" } else { "completar" };
                Paragraph::new(Span::styled(
                    format!("¿Seguro que deseas {} este pedido? Enter para confirmar", verb),
                    Style::default().fg(Color::Yellow),
                ))
            }
            None => create_instructions_paragraph(&[
                TABS,
                shortcuts::SEPARATOR,
                NEW_ORDER,
                shortcuts::SEPARATOR,
                COMPLETE,
                shortcuts::SEPARATOR,
                CANCEL_ORDER,
                shortcuts::SEPARATOR,
                shortcuts::RELOAD,
            ]),
        };
        f.render_widget(footer, rows[2]);

        if let Some(draft) = &self.draft {
            self.render_form(f, rect, draft);
        }
    }
}
