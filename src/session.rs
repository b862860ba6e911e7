//! Session handling.
//!
//! Server-side session bags, the signed cookie credential that links a
//! client to its bag, and the stores the bags live in.

mod credential;
mod manager;
mod record;
mod store;

pub use credential::CredentialSigner;
pub use manager::SessionManager;
pub use record::{CookieOptions, Session, SessionData, format_set_cookie, generate_session_id};
pub use store::{MemoryStore, SessionStore};
