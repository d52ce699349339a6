//! Order route handlers.

mod detail;
mod list;
mod print;

pub use detail::{show, update_status};
pub use list::index;
pub use print::print;

/// Shown for an unknown order id.
pub const ORDER_NOT_FOUND_MESSAGE: &str = "الطلب غير موجود";
