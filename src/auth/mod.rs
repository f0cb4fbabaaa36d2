//! Authentication
//!
//! Handles:
//! - Signed session tokens
//! - Admin extractor for protected routes

mod middleware;
pub mod session;

pub use middleware::AdminUser;
pub use session::{ADMIN_SCOPE, Session, create_session_token, verify_session_token};
