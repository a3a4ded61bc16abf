//! Canonical data shapes produced at the fetch boundary
//!
//! Everything downstream (classify, sort, view derivation) works on these
//! types and never re-checks field presence; normalization from loose wire
//! JSON happens in the provider implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

const ICON_URL_BASE: &str = "https://media.steampowered.com/steamcommunity/public/images/apps";

fn default_game_name() -> String {
    "Unknown Game".to_string()
}

/// One owned title as returned by the library endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub appid: u64,
    #[serde(default = "default_game_name")]
    pub name: String,
    /// Icon hash from the Steam CDN; empty when unknown
    #[serde(default)]
    pub img_icon_url: String,
    /// Total playtime in minutes
    #[serde(default)]
    pub playtime_forever: u32,
}

impl Game {
    /// Playtime the way the UI shows it, e.g. "2.0 hrs"
    pub fn playtime_display(&self) -> String {
        format!("{:.1} hrs", self.playtime_forever as f64 / 60.0)
    }

    /// Full CDN URL for the game icon; None when no icon hash is known so
    /// the view layer can render its fallback
    pub fn icon_url(&self) -> Option<String> {
        if self.img_icon_url.is_empty() {
            None
        } else {
            Some(format!(
                "{}/{}/{}.jpg",
                ICON_URL_BASE, self.appid, self.img_icon_url
            ))
        }
    }
}

/// One unlockable milestone for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Arrives on the wire as 0/1; anything ambiguous is not achieved
    #[serde(default, deserialize_with = "achieved_flag")]
    pub achieved: bool,
    /// Epoch seconds; meaningful only when achieved
    #[serde(default)]
    pub unlocktime: Option<i64>,
    /// Percent of all players holding this achievement, [0, 100]
    #[serde(default)]
    pub rarity: Option<f32>,
}

impl AchievementRecord {
    /// Sort key for recency: Some for achieved records (missing timestamps
    /// count as 0), None for everything else
    pub fn recency_key(&self) -> Option<i64> {
        if self.achieved {
            Some(self.unlocktime.unwrap_or(0))
        } else {
            None
        }
    }

    /// Unlock instant for display; None unless achieved with a recorded time
    pub fn unlocked_at(&self) -> Option<DateTime<Utc>> {
        if !self.achieved {
            return None;
        }
        self.unlocktime
            .filter(|&t| t > 0)
            .and_then(|t| DateTime::from_timestamp(t, 0))
    }
}

fn achieved_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    })
}

/// Per-game achievement data once a fetch has settled
///
/// `completed`/`total` are the counts the collaborator reported; they are
/// None when it had nothing usable (some iterations of the backend send the
/// literal string "N/A" there). The default value doubles as the explicit
/// no-data state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameAchievementSummary {
    pub completed: Option<i32>,
    pub total: Option<i32>,
    #[serde(default)]
    pub achievements: Vec<AchievementRecord>,
}

impl GameAchievementSummary {
    /// The state a failed or empty fetch settles to
    pub fn no_data() -> Self {
        Self::default()
    }

    pub fn has_data(&self) -> bool {
        !self.achievements.is_empty() || self.total.is_some()
    }

    /// Reported completion percentage; None when the total is unknown or zero
    pub fn completion_percent(&self) -> Option<f32> {
        let total = self.total?;
        if total <= 0 {
            return None;
        }
        Some(self.completed.unwrap_or(0) as f32 * 100.0 / total as f32)
    }

    /// "3 / 10", or "N/A" when the collaborator reported no counts
    pub fn counts_display(&self) -> String {
        match (self.completed, self.total) {
            (Some(completed), Some(total)) => format!("{} / {}", completed, total),
            _ => "N/A".to_string(),
        }
    }
}

/// Display-name lookup result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    #[serde(default)]
    pub personaname: Option<String>,
}

/// Community guide lookup result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideLink {
    pub guide_url: String,
}
