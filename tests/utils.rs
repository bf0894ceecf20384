#[path = "utils/datetime.rs"]
mod datetime;

#[path = "utils/money.rs"]
mod money;
