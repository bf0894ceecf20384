//! Data transfer objects mirroring the remote schema.
//!
//! The backend owns every invariant; these types only describe the wire shape.
//! Read models default missing fields so partial relations decode cleanly,
//! creation payloads (`New*`) skip unset optionals.

pub mod enums;
pub mod expenses;
pub mod requests;
pub mod sales;
pub mod store;
pub mod user;

pub use enums::{
    ExpenseCategory, RequestStatus, RequestType, ReturnReason, Role, StatusOrder, TypeContract, TypeId, TypeStore,
    UnitType,
};
pub use expenses::{CashClosing, ClosingCount, DailyExpense, LastClosing, NewCashClosing, NewDailyExpense};
pub use requests::{NewStoreRequest, NewStoreRequestDetail, StoreRequest, StoreRequestDetail};
pub use sales::{
    Bill, Client, CustomOrder, CustomOrderProduct, DetailBill, DetailCustomOrder, DetailOrder, NewCakeDetail,
    NewClient, NewCustomOrder, NewCustomOrderProduct, NewDetailOrder, NewOrder, Order,
};
pub use store::{CategoryProduct, Product, Store, StoreProduct, SubcategoryProduct};
pub use user::{AuthUser, Credentials, User, UserDetails};
