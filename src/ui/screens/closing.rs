//! Daily report with expense editing and the cash closing dialog.

use crate::closing::{check_can_delete, closing_totals, ClosingDraft, DailyReport};
use crate::constants::{ERROR_CLOSING_UNAVAILABLE, UNKNOWN_PRODUCT};
use crate::notify::Toast;
use crate::ui::components::common::{
    create_dialog_block, create_input_paragraph, create_instructions_paragraph, cycle_index, edit_amount, edit_text,
    heading, labeled_line, loading_paragraph, shortcuts, InstructionShortcut,
};
use crate::ui::core::{Action, Component, UiContext};
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::format_date_long;
use crate::utils::money::format_cop;
use chrono::{Days, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Pane {
    #[default]
    Saved,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingField {
    Category,
    Description,
    Amount,
}

impl PendingField {
    fn next(self) -> Self {
        match self {
            PendingField::Category => PendingField::Description,
            PendingField::Description => PendingField::Amount,
            PendingField::Amount => PendingField::Category,
        }
    }
}

/// Focus inside the closing dialog: the note or a request row quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogField {
    Note,
    Row(usize),
}

const DATE: InstructionShortcut = ("←/→", Color::Yellow, " Fecha");
const TODAY: InstructionShortcut = ("t", Color::Cyan, " Hoy");
const PANE: InstructionShortcut = ("Tab", Color::Cyan, " Sección");
const ADD_EXPENSE: InstructionShortcut = ("a", Color::Green, " Agregar gasto");
const EDIT_EXPENSE: InstructionShortcut = ("e", Color::Cyan, " Editar");
const DELETE: InstructionShortcut = ("x", Color::Red, " Eliminar");
const CLOSE_CASH: InstructionShortcut = ("c", Color::Green, " Cierre de caja");
const SUBMIT: InstructionShortcut = ("F10", Color::Green, " Confirmar cierre");

pub struct ClosingScreen {
    ctx: UiContext,
    date: NaiveDate,
    report: Option<DailyReport>,
    pane: Pane,
    saved_index: usize,
    pending_index: usize,
    editing: Option<PendingField>,
    draft: Option<ClosingDraft>,
    dialog_field: DialogField,
    busy: bool,
}

impl ClosingScreen {
    pub fn new(ctx: UiContext) -> Self {
        let date = ctx.today();
        Self {
            ctx,
            date,
            report: None,
            pane: Pane::Saved,
            saved_index: 0,
            pending_index: 0,
            editing: None,
            draft: None,
            dialog_field: DialogField::Note,
            busy: false,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    fn is_today(&self) -> bool {
        self.date == self.ctx.today()
    }

    fn shift_date(&mut self, forward: bool) -> Action {
        let shifted = if forward {
            self.date.checked_add_days(Days::new(1))
        } else {
            self.date.checked_sub_days(Days::new(1))
        };
        match shifted {
            // No reports from the future
            Some(date) if date <= self.ctx.today() => {
                self.date = date;
                Action::LoadReport(date)
            }
            _ => Action::Render,
        }
    }

    fn selected_pending_id(&self) -> Option<String> {
        self.report
            .as_ref()
            .and_then(|r| r.pending.items().get(self.pending_index))
            .map(|e| e.temp_id.clone())
    }

    fn handle_pending_edit(&mut self, field: PendingField, key: KeyEvent) -> Action {
        let Some(id) = self.selected_pending_id() else {
            self.editing = None;
            return Action::Render;
        };
        let Some(expense) = self.report.as_mut().and_then(|r| r.pending.get_mut(&id)) else {
            return Action::Render;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.editing = None,
            KeyCode::Tab => self.editing = Some(field.next()),
            _ => match field {
                PendingField::Category => {
                    if matches!(key.code, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) {
                        expense.category = expense.category.next();
                    }
                }
                PendingField::Description => {
                    edit_text(&mut expense.description, key);
                }
                PendingField::Amount => {
                    edit_amount(&mut expense.amount, key);
                }
            },
        }
        Action::Render
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> Action {
        if self.busy {
            return Action::Render;
        }
        let Some(draft) = self.draft.as_mut() else {
            return Action::None;
        };
        let count = draft.request.len() + 1;
        let index = match self.dialog_field {
            DialogField::Note => 0,
            DialogField::Row(i) => i + 1,
        };
        let to_field = |i: usize| if i == 0 { DialogField::Note } else { DialogField::Row(i - 1) };

        match key.code {
            KeyCode::Esc => {
                self.draft = None;
                return Action::Render;
            }
            KeyCode::Tab | KeyCode::Down => self.dialog_field = to_field(cycle_index(index, count, true)),
            KeyCode::BackTab | KeyCode::Up => self.dialog_field = to_field(cycle_index(index, count, false)),
            KeyCode::F(10) => {
                let Some(report) = self.report.clone() else {
                    return Action::Render;
                };
                self.busy = true;
                return Action::SubmitClosing {
                    report: Box::new(report),
                    draft: Box::new(draft.clone()),
                };
            }
            _ => match self.dialog_field {
                DialogField::Note => {
                    edit_text(&mut draft.note, key);
                }
                DialogField::Row(i) => {
                    let quantity = draft.request.rows().get(i).map(|r| r.quantity).unwrap_or(0);
                    match key.code {
                        KeyCode::Char(c) if c.is_ascii_digit() => {
                            let digit = i64::from(c.to_digit(10).unwrap_or(0));
                            draft.request.set_quantity(i, quantity.saturating_mul(10).saturating_add(digit));
                        }
                        KeyCode::Backspace => draft.request.set_quantity(i, quantity / 10),
                        KeyCode::Char('+') | KeyCode::Right => draft.request.set_quantity(i, quantity + 1),
                        KeyCode::Char('-') | KeyCode::Left => draft.request.set_quantity(i, quantity - 1),
                        KeyCode::Delete => {
                            draft.request.remove_row(i);
                            self.dialog_field = DialogField::Note;
                        }
                        _ => {}
                    }
                }
            },
        }
        Action::Render
    }

    fn render_summary(&self, f: &mut Frame, area: Rect, report: &DailyReport) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Productos vendidos ")
            .border_style(Style::default().fg(Color::DarkGray));

        let mut lines: Vec<Line> = report
            .products_summary()
            .into_iter()
            .map(|p| {
                let name = if p.product_name.is_empty() { UNKNOWN_PRODUCT.to_string() } else { p.product_name };
                Line::from(vec![
                    Span::styled(format!("{:<28}", name), Style::default().fg(Color::White)),
                    Span::styled(format!("{:>6}  ", p.quantity_sold), Style::default().fg(Color::Gray)),
                    Span::styled(format_cop(p.total_revenue), Style::default().fg(Color::Green)),
                ])
            })
            .collect();
        if lines.is_empty() {
            lines.push(Line::from(Span::styled("Sin ventas registradas", Style::default().fg(Color::DarkGray))));
        }
        lines.push(Line::default());
        lines.push(labeled_line("Órdenes", report.orders.len().to_string()));
        lines.push(labeled_line("Unidades", report.total_quantity().to_string()));
        lines.push(labeled_line("Ingresos", format_cop(report.total_revenue())));
        lines.push(labeled_line("Gastos", format_cop(report.total_expenses())));
        lines.push(Line::from(vec![
            Span::styled("Utilidad neta: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_cop(report.net_profit()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_expenses(&self, f: &mut Frame, area: Rect, report: &DailyReport) {
        let chunks = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
        let pane_block = |title: &'static str, active: bool| {
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title)
                .border_style(Style::default().fg(if active { Color::Cyan } else { Color::DarkGray }))
        };

        let saved: Vec<ListItem> = report
            .expenses
            .iter()
            .map(|e| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<18}", e.category.label()), Style::default().fg(Color::Gray)),
                    Span::styled(format!("{:<24}", e.description), Style::default().fg(Color::White)),
                    Span::styled(format_cop(e.amount), Style::default().fg(Color::Red)),
                ]))
            })
            .collect();
        let saved_empty = saved.is_empty();
        let saved_list = List::new(saved)
            .block(pane_block(" Gastos registrados ", self.pane == Pane::Saved))
            .highlight_style(Style::default().bg(Color::DarkGray));
        let mut saved_state = ListState::default();
        if self.pane == Pane::Saved && !saved_empty {
            saved_state.select(Some(self.saved_index));
        }
        f.render_stateful_widget(saved_list, chunks[0], &mut saved_state);

        let pending: Vec<ListItem> = report
            .pending
            .items()
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let editing = if self.pane == Pane::Pending && i == self.pending_index { self.editing } else { None };
                let style_for = |field: PendingField| {
                    if editing == Some(field) {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    }
                };
                let cursor = |field: PendingField| if editing == Some(field) { "█" } else { "" };
                let description = if e.description.is_empty() && editing.is_none() {
                    "Descripción".to_string()
                } else {
                    format!("{}{}", e.description, cursor(PendingField::Description))
                };
                let valid = if e.is_valid() { "✓ " } else { "• " };
                ListItem::new(Line::from(vec![
                    Span::styled(valid, Style::default().fg(if e.is_valid() { Color::Green } else { Color::Yellow })),
                    Span::styled(format!("{:<18}", e.category.label()), style_for(PendingField::Category)),
                    Span::styled(format!("{:<24}", description), style_for(PendingField::Description)),
                    Span::styled(
                        format!("$ {}{}", e.amount, cursor(PendingField::Amount)),
                        style_for(PendingField::Amount),
                    ),
                ]))
            })
            .collect();
        let pending_empty = pending.is_empty();
        let pending_list = List::new(pending)
            .block(pane_block(" Gastos pendientes ", self.pane == Pane::Pending))
            .highlight_style(Style::default().bg(Color::DarkGray));
        let mut pending_state = ListState::default();
        if self.pane == Pane::Pending && !pending_empty {
            pending_state.select(Some(self.pending_index));
        }
        f.render_stateful_widget(pending_list, chunks[1], &mut pending_state);
    }

    fn render_dialog(&self, f: &mut Frame, rect: Rect, report: &DailyReport, draft: &ClosingDraft) {
        let area = LayoutManager::centered_rect(75, 85, rect);
        f.render_widget(Clear, area);
        let title = format!(" Cierre de caja #{} ", draft.closing_number);
        let block = create_dialog_block(&title, Color::Green);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(if draft.is_partial() { 2 } else { 0 }),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(inner);

        if draft.is_partial() {
            f.render_widget(
                Paragraph::new("Cierre parcial: solo se incluyen las órdenes posteriores al último cierre.")
                    .style(Style::default().fg(Color::Yellow))
                    .wrap(Wrap { trim: true }),
                chunks[0],
            );
        }

        let note_focused = self.dialog_field == DialogField::Note;
        f.render_widget(
            create_input_paragraph(&draft.note, "Descripción del cierre", note_focused),
            chunks[1],
        );

        let mut lines = vec![heading("Solicitud de reposición")];
        for (i, row) in draft.request.rows().iter().enumerate() {
            let focused = self.dialog_field == DialogField::Row(i);
            let name = row.product.as_ref().map(|p| p.name.as_str()).unwrap_or(UNKNOWN_PRODUCT);
            let style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::styled(if focused { "▶ " } else { "  " }, style),
                Span::styled(format!("{:<30}", name), style),
                Span::styled(format!("x{}", row.quantity), style),
            ]));
        }
        if draft.request.is_empty() {
            lines.push(Line::from(Span::styled("Sin productos para reponer", Style::default().fg(Color::DarkGray))));
        }
        f.render_widget(Paragraph::new(lines), chunks[2]);

        let totals = closing_totals(draft, report);
        let summary = vec![
            labeled_line("Órdenes incluidas", draft.orders.len().to_string()),
            labeled_line("Ingresos", format_cop(totals.revenue)),
            labeled_line("Gastos pendientes", format_cop(totals.expenses)),
            labeled_line("Utilidad neta", format_cop(totals.net_profit)),
        ];
        f.render_widget(Paragraph::new(summary), chunks[3]);

        let instructions = if self.busy {
            vec![("⟳", Color::Yellow, " Procesando cierre...")]
        } else {
            vec![
                shortcuts::TAB_NEXT,
                shortcuts::SEPARATOR,
                ("+/-", Color::Yellow, " Cantidad"),
                shortcuts::SEPARATOR,
                SUBMIT,
                shortcuts::SEPARATOR,
                shortcuts::ESC_CANCEL,
            ]
        };
        f.render_widget(create_instructions_paragraph(&instructions), chunks[4]);
    }
}

impl Component for ClosingScreen {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.draft.is_some() {
            return self.handle_dialog_key(key);
        }
        if let Some(field) = self.editing {
            return self.handle_pending_edit(field, key);
        }
        let Some(report) = self.report.as_mut() else {
            return match key.code {
                KeyCode::Char('r') => Action::LoadReport(self.date),
                _ => Action::None,
            };
        };
        let today = self.ctx.today();

        match key.code {
            KeyCode::Left => self.shift_date(false),
            KeyCode::Right => self.shift_date(true),
            KeyCode::Char('t') => {
                self.date = today;
                Action::LoadReport(today)
            }
            KeyCode::Char('r') => Action::LoadReport(self.date),
            KeyCode::Tab => {
                self.pane = match self.pane {
                    Pane::Saved => Pane::Pending,
                    Pane::Pending => Pane::Saved,
                };
                Action::Render
            }
            KeyCode::Down | KeyCode::Char('j') => {
                match self.pane {
                    Pane::Saved => self.saved_index = cycle_index(self.saved_index, report.expenses.len(), true),
                    Pane::Pending => self.pending_index = cycle_index(self.pending_index, report.pending.len(), true),
                }
                Action::Render
            }
            KeyCode::Up | KeyCode::Char('k') => {
                match self.pane {
                    Pane::Saved => self.saved_index = cycle_index(self.saved_index, report.expenses.len(), false),
                    Pane::Pending => {
                        self.pending_index = cycle_index(self.pending_index, report.pending.len(), false)
                    }
                }
                Action::Render
            }
            KeyCode::Char('a') => match report.pending.add(report.is_today(today)) {
                Ok(_) => {
                    self.pane = Pane::Pending;
                    self.pending_index = report.pending.len() - 1;
                    self.editing = Some(PendingField::Description);
                    Action::Render
                }
                Err(e) => Action::Failed(e),
            },
            KeyCode::Char('e') | KeyCode::Enter if self.pane == Pane::Pending && !report.pending.is_empty() => {
                self.editing = Some(PendingField::Category);
                Action::Render
            }
            KeyCode::Char('x') | KeyCode::Delete => match self.pane {
                Pane::Pending => {
                    if let Some(id) = report.pending.items().get(self.pending_index).map(|e| e.temp_id.clone()) {
                        report.pending.remove(&id);
                        self.pending_index = self.pending_index.min(report.pending.len().saturating_sub(1));
                    }
                    Action::Render
                }
                Pane::Saved => {
                    if let Err(e) = check_can_delete(report.is_today(today)) {
                        return Action::Failed(e);
                    }
                    match report.expenses.get(self.saved_index) {
                        Some(expense) if !self.busy => {
                            self.busy = true;
                            Action::DeleteExpense {
                                id: expense.id.clone(),
                                report: Box::new(report.clone()),
                            }
                        }
                        _ => Action::Render,
                    }
                }
            },
            KeyCode::Char('c') => match report.closing_hint(today) {
                Some(hint) => Action::Toast(Toast::info(ERROR_CLOSING_UNAVAILABLE, hint)),
                None if !self.busy => {
                    self.busy = true;
                    Action::PrepareClosing(Box::new(report.clone()))
                }
                None => Action::Render,
            },
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::ReportLoaded(report) => {
                // Pending rows survive a reload of the same day
                let pending = self
                    .report
                    .take()
                    .filter(|old| old.date == report.date)
                    .map(|old| old.pending);
                let mut report = (**report).clone();
                if let Some(pending) = pending {
                    report.pending = pending;
                }
                self.date = report.date;
                self.saved_index = self.saved_index.min(report.expenses.len().saturating_sub(1));
                self.pending_index = self.pending_index.min(report.pending.len().saturating_sub(1));
                self.report = Some(report);
                self.busy = false;
            }
            Action::ExpenseDeleted(id) => {
                self.busy = false;
                if let Some(report) = self.report.as_mut() {
                    report.expenses.retain(|e| &e.id != id);
                    self.saved_index = self.saved_index.min(report.expenses.len().saturating_sub(1));
                }
            }
            Action::ClosingPrepared(draft) => {
                self.busy = false;
                self.dialog_field = DialogField::Note;
                self.draft = Some((**draft).clone());
            }
            Action::ClosingDone(outcome) => {
                self.busy = false;
                self.draft = None;
                if let Some(report) = self.report.as_mut() {
                    report.record_closing(outcome.saved_expenses.clone());
                }
                self.pending_index = 0;
            }
            Action::Failed(_) => self.busy = false,
            Action::Logout => {
                self.report = None;
                self.draft = None;
                self.editing = None;
                self.date = self.ctx.today();
            }
            _ => {}
        }
        action
    }

    fn captures_input(&self) -> bool {
        self.draft.is_some() || self.editing.is_some()
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(report) = &self.report else {
            f.render_widget(loading_paragraph(" Cierre de caja "), rect);
            return;
        };
        let today = self.ctx.today();
        let banner = report.banner(today);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(if banner.is_some() { 2 } else { 0 }),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(rect);

        let title = Line::from(vec![
            Span::styled("Reporte del ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_date_long(report.date),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                if self.is_today() { "  (hoy)" } else { "" },
                Style::default().fg(Color::Green),
            ),
        ]);
        f.render_widget(Paragraph::new(title), rows[0]);

        if let Some(banner) = banner {
            f.render_widget(
                Paragraph::new(banner).style(Style::default().fg(Color::Yellow)).wrap(Wrap { trim: true }),
                rows[1],
            );
        }

        let columns = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(rows[2]);
        self.render_summary(f, columns[0], report);
        self.render_expenses(f, columns[1], report);

        let instructions = if self.editing.is_some() {
            vec![
                ("Tab", Color::Cyan, " Campo"),
                shortcuts::SEPARATOR,
                ("←/→", Color::Yellow, " Categoría"),
                shortcuts::SEPARATOR,
                ("Enter", Color::Green, " Listo"),
            ]
        } else {
            vec![
                DATE,
                shortcuts::SEPARATOR,
                TODAY,
                shortcuts::SEPARATOR,
                PANE,
                shortcuts::SEPARATOR,
                ADD_EXPENSE,
                shortcuts::SEPARATOR,
                EDIT_EXPENSE,
                shortcuts::SEPARATOR,
                DELETE,
                shortcuts::SEPARATOR,
                CLOSE_CASH,
            ]
        };
        f.render_widget(create_instructions_paragraph(&instructions), rows[3]);

        if let Some(draft) = &self.draft {
            self.render_dialog(f, rect, report, draft);
        }
    }
}
