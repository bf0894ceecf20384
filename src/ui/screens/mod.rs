//! Full-page screens shown next to the dashboard menu.

pub mod bills;
pub mod closing;
pub mod inventory;
pub mod orders;
pub mod profile;
pub mod requests;
pub mod sales;
pub mod sign_in;

pub use bills::BillsScreen;
pub use closing::ClosingScreen;
pub use inventory::InventoryScreen;
pub use orders::OrdersScreen;
pub use profile::ProfileScreen;
pub use requests::RequestsScreen;
pub use sales::SalesScreen;
pub use sign_in::{AuthMode, SignInScreen};
