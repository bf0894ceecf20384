use crate::api::PosBackend;
use crate::auth;
use crate::closing::{self, DailyReport};
use crate::constants::*;
use crate::inventory;
use crate::logger::Logger;
use crate::models::{AuthUser, StatusOrder};
use crate::notify::{Toast, ValidationError};
use crate::orders;
use crate::profile;
use crate::sales;
use crate::session::Session;
use crate::ui::components::{LogsDialog, MenuComponent, StatusBar, ToastsComponent};
use crate::ui::core::{
    actions::{Action, Screen},
    event_handler::EventType,
    task_manager::TaskManager,
    Component, UiContext,
};
use crate::ui::layout::LayoutManager;
use crate::ui::screens::{
    BillsScreen, ClosingScreen, InventoryScreen, OrdersScreen, ProfileScreen, RequestsScreen, SalesScreen,
    SignInScreen,
};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Screens behind the dashboard menu
struct Screens {
    sales: SalesScreen,
    orders: OrdersScreen,
    inventory: InventoryScreen,
    requests: RequestsScreen,
    bills: BillsScreen,
    closing: ClosingScreen,
    profile: ProfileScreen,
}

impl Screens {
    fn new(ctx: &UiContext) -> Self {
        Self {
            sales: SalesScreen::new(),
            orders: OrdersScreen::new(ctx.clone()),
            inventory: InventoryScreen::new(ctx.clone()),
            requests: RequestsScreen::new(ctx.clone()),
            bills: BillsScreen::new(ctx.clone()),
            closing: ClosingScreen::new(ctx.clone()),
            profile: ProfileScreen::new(ctx.clone()),
        }
    }

    fn get_mut(&mut self, screen: Screen) -> Option<&mut dyn Component> {
        match screen {
            Screen::Dashboard => None,
            Screen::Sales => Some(&mut self.sales),
            Screen::Orders => Some(&mut self.orders),
            Screen::Inventory => Some(&mut self.inventory),
            Screen::Requests => Some(&mut self.requests),
            Screen::Bills => Some(&mut self.bills),
            Screen::Closing => Some(&mut self.closing),
            Screen::Profile => Some(&mut self.profile),
        }
    }

    /// Offer a result action to every screen
    fn update(&mut self, action: Action) -> Action {
        let action = self.sales.update(action);
        let action = self.orders.update(action);
        let action = self.inventory.update(action);
        let action = self.requests.update(action);
        let action = self.bills.update(action);
        let action = self.closing.update(action);
        self.profile.update(action)
    }
}

pub struct AppComponent {
    // Component composition
    sign_in: SignInScreen,
    menu: MenuComponent,
    screens: Screens,
    toasts: ToastsComponent,
    logs: LogsDialog,

    // Services
    session: Session,
    backend: Arc<dyn PosBackend>,
    ctx: UiContext,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,

    // Simple UI state
    should_quit: bool,
    last_session_check: Instant,
    menu_area: Rect,
}

impl AppComponent {
    pub fn new(backend: Arc<dyn PosBackend>, session: Session, ctx: UiContext, logger: Logger) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();
        let mut app = Self {
            sign_in: SignInScreen::new(),
            menu: MenuComponent::new(),
            screens: Screens::new(&ctx),
            toasts: ToastsComponent::new(ctx.toast_duration),
            logs: LogsDialog::new(logger),
            session,
            backend,
            ctx,
            task_manager,
            background_action_rx,
            should_quit: false,
            last_session_check: Instant::now(),
            menu_area: Rect::default(),
        };

        // A restored session skips the sign-in form
        if let Some(user) = app.session.user() {
            app.backend.set_token(app.session.token().map(str::to_string));
            app.enter_dashboard(user);
        }
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn active_screen(&self) -> Screen {
        self.menu.active()
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    fn enter_dashboard(&mut self, user: AuthUser) {
        self.screens.inventory.set_store_id(user.store_id.clone());
        self.menu.set_user(Some(user), Screen::menu_for(&self.session));
    }

    /// Drop the session and every loaded screen
    fn logout(&mut self, expired: bool) {
        log::info!("Logging out (expired: {})", expired);
        self.task_manager.cancel_all_tasks();
        self.session.logout();
        self.backend.set_token(None);
        self.menu.set_user(None, Vec::new());
        self.screens = Screens::new(&self.ctx);
        self.logs.set_visible(false);
        if expired {
            self.toasts.push(Toast::error(ERROR_SESSION_EXPIRED, ""));
        }
    }

    /// Spawn an operation that does not need a signed-in user
    fn spawn<F, Fut>(&mut self, description: &str, operation: F)
    where
        F: FnOnce(Arc<dyn PosBackend>) -> Fut,
        Fut: Future<Output = Result<Action, ValidationError>> + Send + 'static,
    {
        let future = operation(self.backend.clone());
        self.task_manager.spawn_operation(description, future);
    }

    /// Spawn an operation on behalf of the signed-in user
    fn spawn_as_user<F, Fut>(&mut self, description: &str, operation: F)
    where
        F: FnOnce(Arc<dyn PosBackend>, AuthUser) -> Fut,
        Fut: Future<Output = Result<Action, ValidationError>> + Send + 'static,
    {
        let Some(user) = self.session.user() else {
            log::warn!("'{}' skipped: no signed-in user", description);
            return;
        };
        let future = operation(self.backend.clone(), user);
        self.task_manager.spawn_operation(description, future);
    }

    /// Fetch whatever a screen shows
    fn load_screen(&mut self, screen: Screen) {
        match screen {
            Screen::Dashboard => {}
            Screen::Sales => self.spawn_as_user("Cargando productos", |backend, user| async move {
                let catalog = sales::load_catalog(backend.as_ref(), &user.store_id).await?;
                Ok(Action::SalesLoaded(Box::new(catalog)))
            }),
            Screen::Orders => self.spawn_as_user("Cargando pedidos", |backend, user| async move {
                let orders = orders::load_custom_orders(backend.as_ref(), &user.store_id).await?;
                let products = backend
                    .list_products()
                    .await
                    .map_err(|e| ValidationError::api(ERROR_REPORT_LOAD, &e))?;
                Ok(Action::CustomOrdersLoaded { orders, products })
            }),
            Screen::Inventory => self.spawn_as_user("Cargando inventario", |backend, user| async move {
                let items = inventory::load_inventory(backend.as_ref(), &user.store_id).await?;
                let (products, stores) = inventory::load_request_options(backend.as_ref()).await?;
                Ok(Action::InventoryLoaded { items, products, stores })
            }),
            Screen::Requests => self.spawn_as_user("Cargando solicitudes", |backend, user| async move {
                let summaries = inventory::load_requests(backend.as_ref(), &user.store_id).await?;
                Ok(Action::RequestsLoaded(summaries))
            }),
            Screen::Bills => self.spawn_as_user("Cargando facturas", |backend, user| async move {
                let entries = orders::load_bill_entries(backend.as_ref(), &user.store_id).await?;
                Ok(Action::BillsLoaded(entries))
            }),
            Screen::Closing => {
                let date = self.screens.closing.date();
                self.load_report(date);
            }
            Screen::Profile => self.spawn_as_user("Cargando perfil", |backend, user| async move {
                let user = profile::load_profile(backend.as_ref(), &user.user_id).await?;
                Ok(Action::ProfileLoaded(Box::new(user)))
            }),
        }
    }

    fn load_report(&mut self, date: chrono::NaiveDate) {
        self.spawn_as_user("Cargando reporte", move |backend, user| async move {
            let report = closing::load_report(backend.as_ref(), &user.store_id, date).await?;
            Ok(Action::ReportLoaded(Box::new(report)))
        });
    }

    /// Switch screens from app code, as if picked in the menu
    fn navigate(&mut self, screen: Screen) {
        self.menu.update(Action::Navigate(screen));
        self.load_screen(screen);
    }

    /// Handle global keyboard shortcuts that aren't screen-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => {
                log::debug!("Global key: 'q' - quitting application");
                Action::Quit
            }
            KeyCode::Char('G') => Action::ShowLogs(true),
            KeyCode::Char('L') => Action::Logout,
            KeyCode::Esc if self.menu.active() != Screen::Dashboard => Action::Back,
            _ => Action::None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            log::debug!("Global key: Ctrl+C - quitting application");
            return Action::Quit;
        }
        if self.logs.is_visible() {
            return self.logs.handle_key_events(key);
        }
        if !self.is_signed_in() {
            return self.sign_in.handle_key_events(key);
        }

        let active = self.menu.active();
        let (action, captured) = match self.screens.get_mut(active) {
            Some(screen) => {
                let action = screen.handle_key_events(key);
                (action, screen.captures_input())
            }
            None => (self.menu.handle_key_events(key), false),
        };
        if action.is_none() && !captured {
            self.handle_global_key(key)
        } else {
            action
        }
    }

    /// Handle app-level actions: spawn requests, toast results
    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Action::None
            }
            Action::Navigate(screen) if !self.session.allows(screen.roles()) => {
                log::warn!("Navigation to {} denied", screen.label());
                self.menu.update(Action::Back);
                Action::None
            }
            Action::Navigate(screen) => {
                log::info!("Navigation: {}", screen.label());
                self.load_screen(screen);
                Action::None
            }
            Action::LoadScreen(screen) => {
                self.load_screen(screen);
                Action::None
            }
            Action::Logout => {
                self.logout(false);
                Action::None
            }
            Action::Toast(toast) => {
                self.toasts.push(toast);
                Action::None
            }
            Action::Failed(error) => {
                if error.session_expired {
                    self.logout(true);
                } else {
                    self.toasts.push(error.to_toast());
                }
                Action::None
            }

            // Auth
            Action::SignIn(form) => {
                self.spawn("Iniciando sesión", |backend| async move {
                    let token = auth::sign_in(backend.as_ref(), &form).await?;
                    Ok(Action::SignedIn(token))
                });
                Action::None
            }
            Action::SignedIn(token) => {
                match self.session.login(&token) {
                    Ok(user) => {
                        self.backend.set_token(Some(token));
                        self.enter_dashboard(user);
                        self.last_session_check = Instant::now();
                        self.toasts.push(Toast::success(SUCCESS_LOGIN, SUCCESS_LOGIN_DESC));
                    }
                    Err(e) => {
                        log::error!("Rejected login token: {}", e);
                        self.toasts.push(Toast::error(ERROR_LOGIN, e.to_string()));
                    }
                }
                Action::None
            }
            Action::RequestPasswordReset(email) => {
                let app_url = self.ctx.app_url.clone();
                self.spawn("Enviando correo", |backend| async move {
                    auth::request_password_reset(backend.as_ref(), &email, &app_url).await?;
                    Ok(Action::PasswordResetRequested)
                });
                Action::None
            }
            Action::PasswordResetRequested => {
                self.toasts.push(Toast::success(SUCCESS_EMAIL_SENT, SUCCESS_EMAIL_SENT_DESC));
                Action::None
            }
            Action::ResetPassword(form) => {
                self.spawn("Restableciendo contraseña", |backend| async move {
                    auth::reset_password(backend.as_ref(), &form).await?;
                    Ok(Action::PasswordResetDone)
                });
                Action::None
            }
            Action::PasswordResetDone => {
                self.toasts.push(Toast::success(SUCCESS_PASSWORD_RESET, SUCCESS_PASSWORD_RESET_DESC));
                Action::None
            }

            // Sales
            Action::Checkout { cart, payment } => {
                self.spawn_as_user("Creando orden", |backend, user| async move {
                    let order = sales::checkout(backend.as_ref(), &cart, &payment, &user).await?;
                    Ok(Action::OrderCreated(Box::new(order)))
                });
                Action::None
            }
            Action::OrderCreated(order) => {
                log::info!("Order #{} created", order.num_id);
                self.toasts.push(Toast::success(SUCCESS_ORDER_CREATED, SUCCESS_ORDER_CREATED_DESC));
                // Stock changed
                self.load_screen(Screen::Sales);
                Action::None
            }

            // Custom orders
            Action::CreateCustomOrder(draft) => {
                self.spawn_as_user("Guardando pedido", |backend, user| async move {
                    let order = orders::create_custom_order(backend.as_ref(), &draft, &user).await?;
                    Ok(Action::CustomOrderSaved(Box::new(order)))
                });
                Action::None
            }
            Action::SetCustomOrderStatus { id, status } => {
                self.spawn("Actualizando pedido", |backend| async move {
                    let order = match status {
                        StatusOrder::Canceled => orders::cancel_custom_order(backend.as_ref(), &id).await?,
                        _ => orders::complete_custom_order(backend.as_ref(), &id).await?,
                    };
                    Ok(Action::CustomOrderSaved(Box::new(order)))
                });
                Action::None
            }
            Action::CustomOrderSaved(order) => {
                let title = match order.status {
                    StatusOrder::Pending => SUCCESS_CUSTOM_ORDER_CREATED,
                    StatusOrder::Completed => SUCCESS_CUSTOM_ORDER_COMPLETED,
                    StatusOrder::Canceled => SUCCESS_CUSTOM_ORDER_CANCELED,
                };
                self.toasts.push(Toast::success(title, format!("Pedido #{}", order.num_id)));
                self.load_screen(Screen::Orders);
                Action::None
            }

            // Stock requests
            Action::SubmitRequest {
                kind,
                table,
                stores,
                target,
            } => {
                self.spawn_as_user("Enviando solicitud", move |backend, user| async move {
                    inventory::submit_request(backend.as_ref(), kind, &table, &user, &stores, target.as_deref())
                        .await?;
                    Ok(Action::RequestCreated(kind))
                });
                Action::None
            }
            Action::RequestCreated(kind) => {
                let (title, description) = kind.success();
                self.toasts.push(Toast::success(title, description));
                Action::None
            }
            Action::LoadRequestDetail(id) => {
                self.spawn("Cargando solicitud", |backend| async move {
                    let request = inventory::load_request(backend.as_ref(), &id).await?;
                    Ok(Action::RequestDetailLoaded(Box::new(request)))
                });
                Action::None
            }

            // Bills
            Action::LoadBill { source, id } => {
                self.spawn("Cargando factura", move |backend| async move {
                    let bill = orders::load_bill(backend.as_ref(), source, &id).await?;
                    Ok(Action::BillLoaded(Box::new(bill)))
                });
                Action::None
            }
            Action::BillLoaded(_) => {
                // The bills screen already holds the bill; make sure it is visible
                if self.menu.active() != Screen::Bills {
                    self.navigate(Screen::Bills);
                }
                Action::None
            }
            Action::DownloadBill(bill) => {
                let directory = self.ctx.downloads_dir.clone();
                self.spawn("Generando PDF", |backend| async move {
                    let path = orders::download_bill_pdf(backend.as_ref(), &bill, &directory).await?;
                    Ok(Action::BillDownloaded(path))
                });
                Action::None
            }
            Action::BillDownloaded(path) => {
                self.toasts.push(Toast::success(SUCCESS_PDF, path.display().to_string()));
                Action::None
            }

            // Daily report and closing
            Action::LoadReport(date) => {
                self.load_report(date);
                Action::None
            }
            Action::DeleteExpense { report, id } => {
                let is_today = report.date == self.ctx.today();
                self.spawn("Eliminando gasto", move |backend| async move {
                    let mut report: DailyReport = *report;
                    closing::delete_expense(backend.as_ref(), &mut report, &id, is_today).await?;
                    Ok(Action::ExpenseDeleted(id))
                });
                Action::None
            }
            Action::ExpenseDeleted(_) => {
                self.toasts.push(Toast::success(SUCCESS_EXPENSE_DELETED, SUCCESS_EXPENSE_DELETED_DESC));
                Action::None
            }
            Action::PrepareClosing(report) => {
                let today = self.ctx.today();
                self.spawn_as_user("Preparando cierre", move |backend, user| async move {
                    let draft = closing::prepare_closing(backend.as_ref(), &report, &user.store_id, today)
                        .await
                        .map_err(|e| e.to_validation())?;
                    Ok(Action::ClosingPrepared(Box::new(draft)))
                });
                Action::None
            }
            Action::SubmitClosing { report, draft } => {
                self.spawn_as_user("Procesando cierre", |backend, user| async move {
                    let outcome = closing::submit_closing(backend.as_ref(), &report, &draft, &user)
                        .await
                        .map_err(|e| e.to_validation())?;
                    Ok(Action::ClosingDone(Box::new(outcome)))
                });
                Action::None
            }
            Action::ClosingDone(outcome) => {
                self.toasts.push(outcome.toast());
                Action::None
            }

            other => other,
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            log::debug!("Background: received {:?}", std::mem::discriminant(&action));
            actions.push(action);
        }

        let completed_tasks = self.task_manager.cleanup_finished_tasks();
        if !completed_tasks.is_empty() {
            log::debug!("Background: cleaned up {} finished tasks", completed_tasks.len());
        }
        actions
    }

    /// Periodic housekeeping; returns whether anything visible changed
    pub fn tick(&mut self) -> bool {
        let mut changed = self.toasts.tick(Instant::now());

        if self.is_signed_in() && self.last_session_check.elapsed() >= self.ctx.session_check_interval {
            self.last_session_check = Instant::now();
            if self.session.check_expiry(Utc::now()) {
                self.logout(true);
                changed = true;
            }
        }
        changed || self.task_manager.task_count() > 0
    }

    /// Check if any background operations are running
    pub fn is_busy(&self) -> bool {
        self.task_manager.task_count() > 0
    }

    /// Process an event through the component hierarchy
    pub fn handle_event(&mut self, event_type: EventType) -> anyhow::Result<()> {
        let action = match event_type {
            EventType::Key(key) => self.handle_key(key),
            EventType::Mouse(mouse) => {
                let in_menu = mouse.column >= self.menu_area.x
                    && mouse.column < self.menu_area.x + self.menu_area.width
                    && mouse.row < self.menu_area.y + self.menu_area.height;
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left)
                        if self.ctx.mouse_enabled && self.is_signed_in() && !self.logs.is_visible() && in_menu =>
                    {
                        self.menu.click(self.menu_area, mouse.row)
                    }
                    _ => Action::None,
                }
            }
            EventType::Resize(_, _) => Action::Render,
            EventType::Tick => {
                self.tick();
                Action::None
            }
            EventType::Other => Action::None,
        };

        let action = self.update(action);
        self.handle_app_action(action);
        Ok(())
    }

    fn render_dashboard(&self, f: &mut Frame, rect: Rect) {
        let name = self.session.user().map(|u| u.name).unwrap_or_default();
        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                format!("¡Hola, {}!", name),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Elige una sección en el menú con ↑/↓ y Enter.",
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!("Hoy es {}", crate::utils::datetime::format_date_long(self.ctx.today())),
                Style::default().fg(Color::Gray),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", APP_NAME))
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center).block(block), rect);
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.handle_key(key)
    }

    fn update(&mut self, action: Action) -> Action {
        // Process through component hierarchy
        let action = self.logs.update(action);
        let action = self.sign_in.update(action);
        let action = self.menu.update(action);
        self.screens.update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (top, status) = LayoutManager::main_layout(rect);

        if self.is_signed_in() {
            let (menu_area, content) = LayoutManager::dashboard_layout(top);
            self.menu_area = menu_area;
            self.menu.render(f, menu_area);
            let active = self.menu.active();
            match self.screens.get_mut(active) {
                Some(screen) => screen.render(f, content),
                None => self.render_dashboard(f, content),
            }
        } else {
            self.sign_in.render(f, top);
        }

        StatusBar::render(f, status, self.task_manager.current_description(), self.is_signed_in());
        self.toasts.render(f, rect);

        // Logs overlay goes on top of everything
        if self.logs.is_visible() {
            self.logs.render(f, rect);
        }
    }
}
