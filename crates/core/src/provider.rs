//! Seam to the HTTP collaborator that fronts the Steam Web API

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::{Game, GameAchievementSummary, GuideLink, PlayerSummary};

/// Request/response surface of the tracker backend
///
/// Implementations normalize payloads into the canonical model shapes; the
/// engine never sees raw wire JSON.
#[async_trait]
pub trait SteamProvider: Send + Sync {
    /// Owned-game library for an account
    async fn fetch_owned_games(&self, account_id: &str) -> Result<Vec<Game>, ProviderError>;

    /// Achievement progress for one (account, game) pair
    async fn fetch_achievements(
        &self,
        account_id: &str,
        appid: u64,
    ) -> Result<GameAchievementSummary, ProviderError>;

    /// Persona name for an account
    async fn fetch_player_summary(&self, account_id: &str)
        -> Result<PlayerSummary, ProviderError>;

    /// Community guide URL for a game title
    async fn fetch_guide_link(&self, game_title: &str) -> Result<GuideLink, ProviderError>;
}
