//! Core game records: the player and the mission.
//!
//! These are plain serde structs shared by the stores, the command handlers,
//! and the save snapshot. Constructors keep the invariants from the stores'
//! point of view: a freshly created mission is `Available`, a freshly created
//! player starts at level 1 with the configured seed credits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Starting credits for a brand-new player.
pub const INITIAL_CREDITS: u64 = 1000;

/// Default display name before the player picks one.
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// The player record.
///
/// Invariant (maintained by [`crate::game::player::PlayerProgress`]): `exp`
/// is always strictly below the requirement for the current `level`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    pub exp: u64,
    pub credits: u64,
    pub reputation: i64,
}

impl Player {
    /// A fresh level-1 player with a new id and the initial stat block.
    pub fn new(name: &str) -> Self {
        Player {
            id: Uuid::new_v4(),
            name: name.to_string(),
            level: 1,
            exp: 0,
            credits: INITIAL_CREDITS,
            reputation: 0,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new(DEFAULT_PLAYER_NAME)
    }
}

/// Where a mission currently sits in its lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MissionStatus {
    Available,
    Active,
    Completed,
}

impl MissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MissionStatus::Available => "AVAILABLE",
            MissionStatus::Active => "ACTIVE",
            MissionStatus::Completed => "COMPLETED",
        }
    }
}

/// Experience and credits granted when a mission is completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissionReward {
    pub exp: u64,
    pub credits: u64,
}

/// A single contract: a target address, a difficulty tier, and a payout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mission {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Dotted-quad target address; always a private-range address so it
    /// stays valid under strict address validation.
    pub target: String,
    /// Difficulty tier, 1..=5.
    pub difficulty: u8,
    pub reward: MissionReward,
    pub status: MissionStatus,
}

impl Mission {
    /// First 8 hex chars of the id, as shown in listings.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}
