//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers
//! 2. `TraceLayer` (request span)
//! 3. Session layer (tower-sessions, `admin.session` table)
//! 4. Login rate limiting (governor)

pub mod auth;
pub mod rate_limit;
pub mod session;

pub use auth::{RequireAdminAuth, clear_current_admin, set_current_admin};
pub use rate_limit::login_rate_limiter;
pub use session::{create_session_layer, session_layer};
