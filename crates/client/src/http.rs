//! HTTP implementation of the provider seam
//!
//! All payload normalization happens here: responses are parsed as loose
//! JSON and reshaped into the canonical model types, so the rest of the
//! engine never checks for field presence. Malformed elements inside an
//! otherwise well-formed list are dropped; a body of the wrong overall
//! shape is a malformed-payload error.

use async_trait::async_trait;
use serde_json::Value;

use steamtrack_core::{
    AchievementRecord, Game, GameAchievementSummary, GuideLink, PlayerSummary, ProviderError,
    SteamProvider,
};

pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))
    }
}

#[async_trait]
impl SteamProvider for HttpProvider {
    async fn fetch_owned_games(&self, account_id: &str) -> Result<Vec<Game>, ProviderError> {
        let body = self.get_json(&format!("/games/{}", account_id)).await?;
        normalize_games(&body)
    }

    async fn fetch_achievements(
        &self,
        account_id: &str,
        appid: u64,
    ) -> Result<GameAchievementSummary, ProviderError> {
        let body = self
            .get_json(&format!("/achievements/{}/{}", account_id, appid))
            .await?;
        Ok(normalize_achievements(&body))
    }

    async fn fetch_player_summary(
        &self,
        account_id: &str,
    ) -> Result<PlayerSummary, ProviderError> {
        let body = self.get_json(&format!("/steamuser/{}", account_id)).await?;
        Ok(normalize_player(&body))
    }

    async fn fetch_guide_link(&self, game_title: &str) -> Result<GuideLink, ProviderError> {
        let body = self
            .get_json(&format!("/guidelink/{}", urlencoding::encode(game_title)))
            .await?;
        normalize_guide(&body)
    }
}

/// A library response is a JSON array of game-shaped records; entries that
/// don't parse are dropped rather than failing the whole list.
fn normalize_games(body: &Value) -> Result<Vec<Game>, ProviderError> {
    let arr = body
        .as_array()
        .ok_or(ProviderError::Malformed("library body is not an array"))?;
    Ok(arr
        .iter()
        .filter_map(|g| serde_json::from_value(g.clone()).ok())
        .collect())
}

/// The `all` list is authoritative; `recent` is a convenience subset and is
/// ignored even when empty. A payload without a usable `all` list settles
/// to the explicit no-data state. Non-numeric counts (the backend sends the
/// string "N/A") normalize to None.
fn normalize_achievements(body: &Value) -> GameAchievementSummary {
    let achievements: Vec<AchievementRecord> = match body["all"].as_array() {
        Some(arr) => arr
            .iter()
            .filter_map(|a| serde_json::from_value(a.clone()).ok())
            .collect(),
        None => return GameAchievementSummary::no_data(),
    };

    GameAchievementSummary {
        completed: body["completed"].as_i64().map(|v| v as i32),
        total: body["total"].as_i64().map(|v| v as i32),
        achievements,
    }
}

fn normalize_player(body: &Value) -> PlayerSummary {
    PlayerSummary {
        personaname: body["personaname"]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    }
}

fn normalize_guide(body: &Value) -> Result<GuideLink, ProviderError> {
    match body["guide_url"].as_str() {
        Some(url) if !url.is_empty() => Ok(GuideLink {
            guide_url: url.to_string(),
        }),
        _ => Err(ProviderError::Malformed("guide response has no guide_url")),
    }
}
