//! Typed wrappers for each endpoint family of the backend.

mod auth;
mod dish;
mod dish_spec;
mod order;
mod report;
mod table;

pub use auth::AuthApi;
pub use dish::DishApi;
pub use dish_spec::DishSpecApi;
pub use order::OrderApi;
pub use report::ReportApi;
pub use table::TableApi;
