mod auth;
mod session;

pub use auth::TokenManager;
pub use session::{
    PendingLogin, SESSION_LIFETIME_SECS, Session, SessionStore, TOKEN_REFRESH_BUFFER_SECS,
};
