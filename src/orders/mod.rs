//! Custom orders and bills.

pub mod bills;
pub mod custom;

pub use bills::{
    bill_entries, bills_filters, bills_table, download_bill_pdf, load_bill, load_bill_entries, pdf_filename, BillEntry,
};
pub use custom::{
    cancel_custom_order, complete_custom_order, create_custom_order, load_custom_orders, CakeDraft, ClientDraft,
    CustomOrderDraft, ProductLine, StatusFilter,
};
