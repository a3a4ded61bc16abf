//! Client-side session engine for the Steam game tracker
//!
//! Owns fetch orchestration, the per-session achievement cache, and the
//! view-state derivation the presentation layer renders from. Rendering,
//! the Steam Web API proxy, and the OpenID login service are external
//! collaborators.

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod http;
pub mod session;

pub use bootstrap::Navigation;
pub use cache::{AchievementCache, CacheEntry};
pub use config::Config;
pub use http::HttpProvider;
pub use session::{RowControls, RowState, Session, SessionEvent};
