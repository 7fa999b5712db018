//! # CLI Module
//!
//! Command-line entry points of moodtunes. Each command is a thin wrapper
//! that wires configuration into the web server, the PKCE login or the
//! recommendation pipeline and reports results through the console macros.
//!
//! ## Commands
//!
//! - [`serve`] - runs the web application
//! - [`auth`] - signs in through the browser and stores the token on disk
//! - [`mood`] - classifies text offline and prints the resulting constraints
//! - [`recommend`] - runs the full pipeline with the stored token
//!
//! ## Usage Patterns
//!
//! ```bash
//! moodtunes serve --open
//! moodtunes auth
//! moodtunes mood "Need to focus on my work right now" --policy keyword
//! moodtunes recommend "I feel so energized and ready to dance!" --limit 10
//! ```

mod auth;
mod mood;
mod recommend;
mod serve;

pub use auth::auth;
pub use mood::mood;
pub use recommend::recommend;
pub use serve::serve;
