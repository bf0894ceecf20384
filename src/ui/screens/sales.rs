//! Sales terminal: category browser, product grid, cart and payment modal.

use crate::api::BillSource;
use crate::constants::{ERROR_EMPTY_CART, ERROR_EMPTY_CART_DESC};
use crate::models::Product;
use crate::notify::ValidationError;
use crate::sales::{Cart, Catalog, KeypadKey, PaymentForm, PaymentMethod, SubcategorySelection, TransferOption};
use crate::ui::components::common::{
    create_dialog_block, create_instructions_paragraph, create_selection_paragraph, cycle_index, labeled_line,
    loading_paragraph, shortcuts, InstructionShortcut,
};
use crate::ui::core::{Action, Component, Screen};
use crate::ui::layout::LayoutManager;
use crate::utils::money::format_cop;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Pane {
    #[default]
    Products,
    Categories,
    Subcategories,
    Cart,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Categories => Pane::Subcategories,
            Pane::Subcategories => Pane::Products,
            Pane::Products => Pane::Cart,
            Pane::Cart => Pane::Categories,
        }
    }
}

/// Payment modal fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaymentField {
    Method,
    Detail,
}

const ADD: InstructionShortcut = ("Enter", Color::Green, " Agregar");
const PAY: InstructionShortcut = ("p", Color::Green, " Pagar");
const QUANTITY: InstructionShortcut = ("+/-", Color::Yellow, " Cantidad");
const REMOVE: InstructionShortcut = ("x", Color::Red, " Quitar");
const LAST_BILL: InstructionShortcut = ("b", Color::Cyan, " Última factura");

pub struct SalesScreen {
    catalog: Option<Catalog>,
    cart: Cart,
    pane: Pane,
    category_index: usize,
    subcategory_index: usize,
    product_index: usize,
    cart_index: usize,
    payment: Option<PaymentForm>,
    payment_field: PaymentField,
    submitting: bool,
    /// Id of the last order created here, for showing its bill
    last_order: Option<String>,
}

impl SalesScreen {
    pub fn new() -> Self {
        Self {
            catalog: None,
            cart: Cart::new(),
            pane: Pane::default(),
            category_index: 0,
            subcategory_index: 0,
            product_index: 0,
            cart_index: 0,
            payment: None,
            payment_field: PaymentField::Method,
            submitting: false,
            last_order: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    fn visible_products(&self) -> Vec<Product> {
        self.catalog
            .as_ref()
            .map(|c| c.visible_products().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// "Todos" first, then the subcategory options
    fn subcategory_labels(&self) -> Vec<(String, String)> {
        let Some(catalog) = &self.catalog else {
            return Vec::new();
        };
        let options = catalog.subcategory_options();
        if options.is_empty() {
            return Vec::new();
        }
        let mut labels = vec![(String::new(), "Todos".to_string())];
        labels.extend(options.into_iter().map(|s| (s.id, s.name)));
        labels
    }

    fn move_selection(&mut self, forward: bool) {
        match self.pane {
            Pane::Categories => {
                let Some(catalog) = self.catalog.as_mut() else { return };
                let len = catalog.categories().len();
                self.category_index = cycle_index(self.category_index, len, forward);
                if let Some(id) = catalog.categories().get(self.category_index).map(|c| c.id.clone()) {
                    catalog.select_category(&id);
                }
                self.subcategory_index = if self.subcategory_labels().len() > 1 { 1 } else { 0 };
                self.product_index = 0;
            }
            Pane::Subcategories => {
                let labels = self.subcategory_labels();
                self.subcategory_index = cycle_index(self.subcategory_index, labels.len(), forward);
                if let (Some(catalog), Some((id, _))) = (self.catalog.as_mut(), labels.get(self.subcategory_index)) {
                    catalog.select_subcategory(id);
                }
                self.product_index = 0;
            }
            Pane::Products => {
                let len = self.visible_products().len();
                self.product_index = cycle_index(self.product_index, len, forward);
            }
            Pane::Cart => {
                self.cart_index = cycle_index(self.cart_index, self.cart.lines().len(), forward);
            }
        }
    }

    fn add_selected_product(&mut self) -> Action {
        let Some(catalog) = &self.catalog else {
            return Action::Render;
        };
        let products = self.visible_products();
        let Some(product) = products.get(self.product_index) else {
            return Action::Render;
        };
        let stock = catalog.stock_of(&product.id);
        match self.cart.add(product, stock) {
            Ok(()) => Action::Render,
            Err(e) => Action::Failed(e.to_validation()),
        }
    }

    fn change_cart_quantity(&mut self, delta: i64) -> Action {
        let Some(line) = self.cart.lines().get(self.cart_index) else {
            return Action::Render;
        };
        let product_id = line.product.id.clone();
        let quantity = line.quantity + delta;
        let stock = self.catalog.as_ref().map(|c| c.stock_of(&product_id)).unwrap_or(0);
        let result = self.cart.update_quantity(&product_id, quantity, stock);
        self.cart_index = self.cart_index.min(self.cart.lines().len().saturating_sub(1));
        match result {
            Ok(()) => Action::Render,
            Err(e) => Action::Failed(e.to_validation()),
        }
    }

    fn open_payment(&mut self) -> Action {
        if self.cart.is_empty() {
            return Action::Failed(ValidationError::new(ERROR_EMPTY_CART, ERROR_EMPTY_CART_DESC));
        }
        self.payment = Some(PaymentForm::new(self.cart.total()));
        self.payment_field = PaymentField::Method;
        Action::Render
    }

    fn handle_payment_key(&mut self, key: KeyEvent) -> Action {
        if self.submitting {
            return Action::Render;
        }
        let Some(payment) = self.payment.as_mut() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Esc => self.payment = None,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.payment_field = match self.payment_field {
                    PaymentField::Method => PaymentField::Detail,
                    PaymentField::Detail => PaymentField::Method,
                };
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match self.payment_field {
                    PaymentField::Method => {
                        let current = payment
                            .method
                            .and_then(|m| PaymentMethod::ALL.iter().position(|x| *x == m))
                            .unwrap_or(0);
                        let next = cycle_index(current, PaymentMethod::ALL.len(), forward);
                        payment.method = Some(PaymentMethod::ALL[next]);
                    }
                    PaymentField::Detail if payment.method == Some(PaymentMethod::Transfer) => {
                        let current = payment
                            .transfer_option
                            .and_then(|o| TransferOption::ALL.iter().position(|x| *x == o))
                            .unwrap_or(0);
                        let next = cycle_index(current, TransferOption::ALL.len(), forward);
                        payment.transfer_option = Some(TransferOption::ALL[next]);
                    }
                    PaymentField::Detail => {}
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => payment.cash.press(KeypadKey::Digit(c)),
            KeyCode::Char('.') | KeyCode::Char(',') => payment.cash.press(KeypadKey::Dot),
            KeyCode::Backspace => payment.cash.press(KeypadKey::Backspace),
            KeyCode::Delete => payment.cash.press(KeypadKey::Clear),
            KeyCode::Enter => {
                self.submitting = true;
                return Action::Checkout {
                    cart: self.cart.clone(),
                    payment: payment.clone(),
                };
            }
            _ => {}
        }
        Action::Render
    }

    fn render_list(f: &mut Frame, area: Rect, title: &str, items: Vec<ListItem<'static>>, selected: usize, focused: bool) {
        let has_items = !items.is_empty();
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(format!(" {} ", title))
                    .border_style(Style::default().fg(border)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        if has_items && focused {
            state.select(Some(selected));
        }
        f.render_stateful_widget(list, area, &mut state);
    }

    fn render_payment(&self, f: &mut Frame, rect: Rect, payment: &PaymentForm) {
        let area = LayoutManager::centered_rect_lines(50, 16, rect);
        f.render_widget(Clear, area);
        let block = create_dialog_block(" Pago ", Color::Green);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .split(inner);

        f.render_widget(
            Paragraph::new(labeled_line("Total a pagar", format_cop(payment.total()))),
            chunks[0],
        );

        let method = payment.method.map(PaymentMethod::label).unwrap_or("-").to_string();
        f.render_widget(
            create_selection_paragraph(method, "Método de pago", self.payment_field == PaymentField::Method),
            chunks[1],
        );

        let detail_focused = self.payment_field == PaymentField::Detail;
        match payment.method {
            Some(PaymentMethod::Cash) => {
                let value = format!("{}{}", payment.cash.as_str(), if detail_focused { "█" } else { "" });
                f.render_widget(
                    create_selection_paragraph(value, "Monto recibido", false),
                    chunks[2],
                );
                f.render_widget(
                    Paragraph::new(labeled_line("Cambio", format_cop(payment.change()))),
                    chunks[3],
                );
            }
            Some(PaymentMethod::Transfer) => {
                let option = payment.transfer_option.map(TransferOption::label).unwrap_or("-").to_string();
                f.render_widget(create_selection_paragraph(option, "Banco", detail_focused), chunks[2]);
            }
            _ => {}
        }

        let instructions = if self.submitting {
            vec![("⟳", Color::Yellow, " Registrando orden...")]
        } else {
            vec![
                shortcuts::ENTER_CONFIRM,
                shortcuts::SEPARATOR,
                ("←/→", Color::Yellow, " Cambiar"),
                shortcuts::SEPARATOR,
                shortcuts::ESC_CANCEL,
            ]
        };
        f.render_widget(create_instructions_paragraph(&instructions), chunks[4]);
    }
}

impl Default for SalesScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SalesScreen {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.payment.is_some() {
            return self.handle_payment_key(key);
        }
        match key.code {
            KeyCode::Tab => {
                self.pane = self.pane.next();
                Action::Render
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(true);
                Action::Render
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(false);
                Action::Render
            }
            KeyCode::Enter if self.pane == Pane::Products => self.add_selected_product(),
            KeyCode::Char('+') if self.pane == Pane::Cart => self.change_cart_quantity(1),
            KeyCode::Char('-') if self.pane == Pane::Cart => self.change_cart_quantity(-1),
            KeyCode::Char('x') | KeyCode::Delete if self.pane == Pane::Cart => {
                if let Some(id) = self.cart.lines().get(self.cart_index).map(|l| l.product.id.clone()) {
                    self.cart.remove(&id);
                    self.cart_index = self.cart_index.min(self.cart.lines().len().saturating_sub(1));
                }
                Action::Render
            }
            KeyCode::Char('p') => self.open_payment(),
            KeyCode::Char('b') => match &self.last_order {
                Some(id) => Action::LoadBill {
                    source: BillSource::Order,
                    id: id.clone(),
                },
                None => Action::None,
            },
            KeyCode::Char('r') => Action::LoadScreen(Screen::Sales),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::SalesLoaded(catalog) => {
                self.catalog = Some((**catalog).clone());
                self.category_index = 0;
                self.subcategory_index = if self.subcategory_labels().len() > 1 { 1 } else { 0 };
                self.product_index = 0;
            }
            Action::OrderCreated(order) => {
                self.last_order = Some(order.id.clone());
                self.cart.clear();
                self.cart_index = 0;
                self.payment = None;
                self.submitting = false;
            }
            Action::Failed(_) => self.submitting = false,
            _ => {}
        }
        action
    }

    fn captures_input(&self) -> bool {
        self.payment.is_some()
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(catalog) = &self.catalog else {
            f.render_widget(loading_paragraph(" Ventas "), rect);
            return;
        };

        let columns = Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).split(rect);
        let left = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(columns[0]);

        let category = catalog
            .selected_category()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Sin categorías".to_string());
        f.render_widget(
            create_selection_paragraph(category, "Categoría", self.pane == Pane::Categories),
            left[0],
        );

        let labels = self.subcategory_labels();
        let subcategory = match catalog.selected_subcategory() {
            _ if labels.is_empty() => "-".to_string(),
            None | Some(SubcategorySelection::All) => "Todos".to_string(),
            Some(_) => labels
                .get(self.subcategory_index)
                .map(|(_, name)| name.clone())
                .unwrap_or_default(),
        };
        f.render_widget(
            create_selection_paragraph(subcategory, "Subcategoría", self.pane == Pane::Subcategories),
            left[1],
        );

        let products: Vec<ListItem> = catalog
            .visible_products()
            .into_iter()
            .map(|p| {
                let stock = catalog.stock_of(&p.id);
                let in_cart = self.cart.quantity_of(&p.id);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<28}", p.name), Style::default().fg(Color::White)),
                    Span::styled(format!("{:>14}", format_cop(p.base_price)), Style::default().fg(Color::Green)),
                    Span::styled(
                        format!("  stock {}{}", stock, if in_cart > 0 { format!(" · en carrito {}", in_cart) } else { String::new() }),
                        Style::default().fg(Color::Gray),
                    ),
                ]))
            })
            .collect();
        Self::render_list(f, left[2], "Productos", products, self.product_index, self.pane == Pane::Products);

        let instructions = [
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            ADD,
            shortcuts::SEPARATOR,
            QUANTITY,
            shortcuts::SEPARATOR,
            REMOVE,
            shortcuts::SEPARATOR,
            PAY,
        ];
        let mut instructions = instructions.to_vec();
        if self.last_order.is_some() {
            instructions.extend([shortcuts::SEPARATOR, LAST_BILL]);
        }
        f.render_widget(create_instructions_paragraph(&instructions), left[3]);

        let right = Layout::vertical([Constraint::Min(3), Constraint::Length(4)]).split(columns[1]);
        let cart_items: Vec<ListItem> = self
            .cart
            .lines()
            .iter()
            .map(|line| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} x{}", line.product.name, line.quantity), Style::default().fg(Color::White)),
                    Span::styled(format!("  {}", format_cop(line.subtotal())), Style::default().fg(Color::Green)),
                ]))
            })
            .collect();
        Self::render_list(f, right[0], "Carrito", cart_items, self.cart_index, self.pane == Pane::Cart);

        let totals = Paragraph::new(vec![
            labeled_line("Artículos", self.cart.item_count().to_string()),
            labeled_line("Total", format_cop(self.cart.total())),
        ])
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(totals, right[1]);

        if let Some(payment) = &self.payment {
            self.render_payment(f, rect, payment);
        }
    }
}
