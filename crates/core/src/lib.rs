//! Shared data model and pure view logic for the Steamtrack engine

pub mod classify;
pub mod error;
pub mod models;
pub mod sort;

#[cfg(feature = "async")]
pub mod provider;

pub use error::ProviderError;
pub use models::{AchievementRecord, Game, GameAchievementSummary, GuideLink, PlayerSummary};
pub use sort::SortMode;

#[cfg(feature = "async")]
pub use provider::SteamProvider;
