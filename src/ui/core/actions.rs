use crate::api::BillSource;
use crate::auth::{ResetPasswordForm, SignInForm};
use crate::closing::{ClosingDraft, ClosingOutcome, DailyReport};
use crate::inventory::{RequestKind, RequestSummary, RequestTable};
use crate::models::{Bill, CustomOrder, Order, Product, Role, StatusOrder, Store, StoreProduct, StoreRequest, User};
use crate::notify::{Toast, ValidationError};
use crate::orders::{BillEntry, CustomOrderDraft};
use crate::sales::{Cart, Catalog, PaymentForm};
use crate::session::Session;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Screens reachable from the dashboard menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Sales,
    Orders,
    Inventory,
    Requests,
    Bills,
    Closing,
    Profile,
}

impl Screen {
    /// Menu order
    pub const MENU: [Screen; 7] = [
        Screen::Sales,
        Screen::Orders,
        Screen::Inventory,
        Screen::Requests,
        Screen::Bills,
        Screen::Closing,
        Screen::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Dashboard => "Inicio",
            Screen::Sales => "Ventas",
            Screen::Orders => "Pedidos",
            Screen::Inventory => "Inventario",
            Screen::Requests => "Solicitudes",
            Screen::Bills => "Facturas",
            Screen::Closing => "Cierre de caja",
            Screen::Profile => "Perfil",
        }
    }

    /// Roles allowed on the screen; empty admits every signed-in user
    pub fn roles(self) -> &'static [Role] {
        &[]
    }

    /// Menu entries the session may open, in menu order
    pub fn menu_for(session: &Session) -> Vec<Screen> {
        Screen::MENU
            .iter()
            .copied()
            .filter(|screen| session.allows(screen.roles()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    Navigate(Screen),
    Back,
    ShowLogs(bool),
    Logout,

    // Notifications
    Toast(Toast),
    Failed(ValidationError),

    // Auth
    SignIn(SignInForm),
    SignedIn(String),
    RequestPasswordReset(String),
    PasswordResetRequested,
    ResetPassword(ResetPasswordForm),
    PasswordResetDone,

    // Data loading
    LoadScreen(Screen),
    SalesLoaded(Box<Catalog>),
    CustomOrdersLoaded {
        orders: Vec<CustomOrder>,
        products: Vec<Product>,
    },
    InventoryLoaded {
        items: Vec<StoreProduct>,
        products: Vec<Product>,
        stores: Vec<Store>,
    },
    RequestsLoaded(Vec<RequestSummary>),
    BillsLoaded(Vec<BillEntry>),
    ProfileLoaded(Box<User>),

    // Sales
    Checkout {
        cart: Cart,
        payment: PaymentForm,
    },
    OrderCreated(Box<Order>),

    // Custom orders
    CreateCustomOrder(Box<CustomOrderDraft>),
    SetCustomOrderStatus {
        id: String,
        status: StatusOrder,
    },
    CustomOrderSaved(Box<CustomOrder>),

    // Stock requests
    SubmitRequest {
        kind: RequestKind,
        table: RequestTable,
        stores: Vec<Store>,
        target: Option<String>,
    },
    RequestCreated(RequestKind),
    LoadRequestDetail(String),
    RequestDetailLoaded(Box<StoreRequest>),

    // Bills
    LoadBill {
        source: BillSource,
        id: String,
    },
    BillLoaded(Box<Bill>),
    DownloadBill(Box<Bill>),
    BillDownloaded(PathBuf),

    // Daily report and closing
    LoadReport(NaiveDate),
    ReportLoaded(Box<DailyReport>),
    DeleteExpense {
        report: Box<DailyReport>,
        id: String,
    },
    ExpenseDeleted(String),
    PrepareClosing(Box<DailyReport>),
    ClosingPrepared(Box<ClosingDraft>),
    SubmitClosing {
        report: Box<DailyReport>,
        draft: Box<ClosingDraft>,
    },
    ClosingDone(Box<ClosingOutcome>),

    // App control
    /// Key consumed, nothing else to do
    Render,
    Quit,
    None,
}

impl Action {
    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }
}
