//! Requests list with the status stepper of the selected request.

use crate::inventory::{request_total, requests_filters, requests_table, stepper, RequestSummary, StepState};
use crate::models::StoreRequest;
use crate::ui::components::common::{
    create_dialog_block, create_instructions_paragraph, heading, labeled_line, loading_paragraph, shortcuts,
    InstructionShortcut,
};
use crate::ui::components::DataTable;
use crate::ui::core::{Action, Component, Screen, UiContext};
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::format_date_short;
use crate::utils::money::format_cop;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

const DETAIL: InstructionShortcut = ("Enter", Color::Green, " Ver detalle");

fn step_style(state: StepState) -> (Style, &'static str) {
    match state {
        StepState::Completed => (Style::default().fg(Color::Green), "●"),
        StepState::Current => (Style::default().fg(Color::Cyan), "◉"),
        StepState::Pending => (Style::default().fg(Color::DarkGray), "○"),
        StepState::Rejected | StepState::Canceled => (Style::default().fg(Color::Red), "✗"),
    }
}

pub struct RequestsScreen {
    ctx: UiContext,
    table: DataTable<RequestSummary>,
    loaded: bool,
    detail: Option<StoreRequest>,
    loading_detail: bool,
}

impl RequestsScreen {
    pub fn new(ctx: UiContext) -> Self {
        let table = DataTable::new(requests_table(ctx.items_per_page), requests_filters());
        Self {
            ctx,
            table,
            loaded: false,
            detail: None,
            loading_detail: false,
        }
    }

    fn render_detail(&self, f: &mut Frame, rect: Rect, request: &StoreRequest) {
        let area = LayoutManager::centered_rect(70, 80, rect);
        f.render_widget(Clear, area);
        let title = format!(" REQ-{} ", request.num_id);
        let block = create_dialog_block(&title, Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)]).split(inner);
        let tz = self.ctx.timezone;

        let mut steps = Vec::new();
        let mut dates = Vec::new();
        for (i, step) in stepper(request).iter().enumerate() {
            if i > 0 {
                steps.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
                dates.push(Span::raw("    "));
            }
            let (style, symbol) = step_style(step.state);
            let text = format!("{} {}", symbol, step.label);
            let date = step.date.map(|d| format_date_short(&d, tz)).unwrap_or_default();
            let width = text.chars().count().max(date.chars().count());
            steps.push(Span::styled(format!("{:<width$}", text, width = width), style));
            dates.push(Span::styled(
                format!("{:<width$}", date, width = width),
                Style::default().fg(Color::Gray),
            ));
        }
        f.render_widget(Paragraph::new(vec![Line::from(steps), Line::from(dates)]), chunks[0]);

        let store = |s: &Option<Box<crate::models::Store>>| {
            s.as_ref().map(|s| s.name.clone()).unwrap_or_else(|| "N/A".to_string())
        };
        let mut lines = vec![
            labeled_line("Tipo", request.request_type.label()),
            labeled_line("Estado", request.status.label()),
            labeled_line("Tienda solicitante", store(&request.requesting_store)),
            labeled_line("Tienda destino", store(&request.target_store)),
            Line::default(),
            heading("Productos"),
        ];
        for detail in &request.details {
            let name = detail.product.as_ref().map(|p| p.name.as_str()).unwrap_or("Producto");
            let mut text = format!(
                "  {} x{}  {}",
                name,
                detail.requested_quantity,
                format_cop(detail.total_price.unwrap_or_default())
            );
            if let Some(reason) = detail.return_reason {
                text.push_str(&format!("  ({})", reason.label()));
            }
            lines.push(Line::from(text));
        }
        lines.push(Line::default());
        lines.push(labeled_line("Total", format_cop(request_total(request))));
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[1]);

        f.render_widget(create_instructions_paragraph(&[shortcuts::ESC_BACK]), chunks[2]);
    }
}

impl Component for RequestsScreen {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.detail.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.detail = None;
            }
            return Action::Render;
        }
        if self.table.handle_key(key) {
            return Action::Render;
        }
        match key.code {
            KeyCode::Enter => match self.table.selected_item() {
                Some(summary) if !self.loading_detail => {
                    self.loading_detail = true;
                    Action::LoadRequestDetail(summary.id.clone())
                }
                _ => Action::Render,
            },
            KeyCode::Char('r') => Action::LoadScreen(Screen::Requests),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match &action {
            Action::RequestsLoaded(summaries) => {
                self.table.set_items(summaries.clone());
                self.loaded = true;
            }
            Action::RequestDetailLoaded(request) => {
                self.loading_detail = false;
                self.detail = Some((**request).clone());
            }
            Action::Failed(_) => self.loading_detail = false,
            _ => {}
        }
        action
    }

    fn captures_input(&self) -> bool {
        self.detail.is_some() || self.table.is_editing_filter()
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.loaded {
            f.render_widget(loading_paragraph(" Solicitudes "), rect);
            return;
        }
        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(rect);
        self.table.render(f, chunks[0], "Solicitudes", self.ctx.timezone);
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

        if let Some(request) = &self.detail {
            self.render_detail(f, rect, request);
        }
    }
}
