//! Daily sales report and cash closing.

pub mod pending;
pub mod report;
pub mod workflow;

pub use pending::{PendingExpense, PendingExpenses};
pub use report::{
    check_can_delete, delete_expense, load_report, orders_revenue, products_sold, products_summary, DailyReport,
    ProductSummary,
};
pub use workflow::{
    closing_totals, orders_since, prepare_closing, submit_closing, ClosingDraft, ClosingError, ClosingOutcome,
    ClosingTotals,
};
