//! Mission generation and the mission lifecycle board.
//!
//! Generation is pure apart from the caller-supplied RNG, so a seeded
//! [`rand::rngs::StdRng`] makes every batch reproducible. The board owns the
//! three lifecycle collections (available, active, completed) and is the only
//! place mission status changes: a mission's `status` field and the
//! collection it sits in always agree.

use rand::Rng;
use uuid::Uuid;

use crate::game::types::{Mission, MissionReward, MissionStatus};

/// Missions offered per batch before the level bonus.
pub const MISSIONS_PER_LEVEL: usize = 3;

/// Hardest tier a mission can roll.
pub const MAX_DIFFICULTY: u8 = 5;

/// Reward base for difficulty 1; doubles per tier.
pub const BASE_EXP_REWARD: u64 = 100;
pub const BASE_CREDITS_REWARD: u64 = 200;

/// Private-range prefixes targets are drawn from. All of these stay valid
/// under strict address validation.
const TARGET_RANGES: [&str; 3] = ["192.168.1.", "10.0.0.", "172.16.0."];

/// Per-tier title pools, indexed by `difficulty - 1`.
const TITLES: [[&str; 3]; 5] = [
    ["Simple Recon", "Basic Infiltration", "Data Collection"],
    ["Server Breach", "Password Crack", "Port Scan"],
    ["Network Intrusion", "Database Hack", "System Exploit"],
    ["Corporate Espionage", "Advanced Penetration", "Security Bypass"],
    ["Master Heist", "Legendary Hack", "Ultimate Breach"],
];

/// Per-tier descriptions, indexed by `difficulty - 1`.
const DESCRIPTIONS: [&str; 5] = [
    "A simple reconnaissance mission.",
    "Breach a basic server and extract data.",
    "Penetrate a network and steal sensitive information.",
    "Execute a sophisticated attack on a corporate system.",
    "An impossible mission requiring elite skills.",
];

/// Pick a random target: a fixed range prefix plus a host suffix in 1..=254.
pub fn generate_random_target(rng: &mut impl Rng) -> String {
    let range = TARGET_RANGES[rng.gen_range(0..TARGET_RANGES.len())];
    let suffix = rng.gen_range(1..=254u16);
    format!("{range}{suffix}")
}

/// Pick a title from the pool for the given tier.
///
/// Precondition: `difficulty` is in 1..=5. Out-of-range values are clamped.
pub fn generate_title(rng: &mut impl Rng, difficulty: u8) -> String {
    debug_assert!((1..=MAX_DIFFICULTY).contains(&difficulty));
    let tier = difficulty.clamp(1, MAX_DIFFICULTY) as usize - 1;
    let pool = &TITLES[tier];
    pool[rng.gen_range(0..pool.len())].to_string()
}

/// Description for the given tier.
///
/// Precondition: `difficulty` is in 1..=5. Out-of-range values are clamped.
pub fn generate_description(difficulty: u8) -> String {
    debug_assert!((1..=MAX_DIFFICULTY).contains(&difficulty));
    DESCRIPTIONS[difficulty.clamp(1, MAX_DIFFICULTY) as usize - 1].to_string()
}

/// Reward for the given tier: base values doubled per tier above 1.
/// Deterministic; no randomness involved.
pub fn generate_reward(difficulty: u8) -> MissionReward {
    let multiplier = 1u64 << (difficulty.clamp(1, MAX_DIFFICULTY) - 1);
    MissionReward {
        exp: BASE_EXP_REWARD * multiplier,
        credits: BASE_CREDITS_REWARD * multiplier,
    }
}

/// Compose a full mission record in `Available` status.
pub fn generate_mission(rng: &mut impl Rng, difficulty: u8) -> Mission {
    Mission {
        id: Uuid::new_v4(),
        title: generate_title(rng, difficulty),
        description: generate_description(difficulty),
        target: generate_random_target(rng),
        difficulty: difficulty.clamp(1, MAX_DIFFICULTY),
        reward: generate_reward(difficulty),
        status: MissionStatus::Available,
    }
}

/// Produce a batch sized to the player's level: three missions plus one per
/// two levels, each difficulty drawn uniformly from 1..=min(5, level + 2).
pub fn generate_mission_batch(rng: &mut impl Rng, player_level: u32) -> Vec<Mission> {
    let count = MISSIONS_PER_LEVEL + (player_level / 2) as usize;
    let cap = MAX_DIFFICULTY.min((player_level + 2).min(u8::MAX as u32) as u8);
    (0..count)
        .map(|_| {
            let difficulty = rng.gen_range(1..=cap);
            generate_mission(rng, difficulty)
        })
        .collect()
}

/// Result of trying to accept a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    Accepted,
    /// No available mission carries the given id.
    NotFound,
    /// Another mission is already active; it must be completed or abandoned
    /// first.
    AlreadyActive,
}

/// The three lifecycle collections. `available` keeps insertion order, so
/// index-based acceptance is stable within a generation.
#[derive(Debug, Clone, Default)]
pub struct MissionBoard {
    available: Vec<Mission>,
    active: Option<Mission>,
    completed: Vec<Mission>,
}

impl MissionBoard {
    pub fn new() -> Self {
        MissionBoard::default()
    }

    /// Rebuild from save-snapshot collections, trusting their statuses.
    pub fn from_parts(
        available: Vec<Mission>,
        active: Option<Mission>,
        completed: Vec<Mission>,
    ) -> Self {
        MissionBoard {
            available,
            active,
            completed,
        }
    }

    pub fn available(&self) -> &[Mission] {
        &self.available
    }

    pub fn active(&self) -> Option<&Mission> {
        self.active.as_ref()
    }

    pub fn completed(&self) -> &[Mission] {
        &self.completed
    }

    pub fn into_parts(self) -> (Vec<Mission>, Option<Mission>, Vec<Mission>) {
        (self.available, self.active, self.completed)
    }

    /// Replace the available list with a fresh batch for the given level.
    /// The active slot and the completed list are untouched.
    pub fn generate_missions(&mut self, rng: &mut impl Rng, player_level: u32) {
        self.available = generate_mission_batch(rng, player_level);
    }

    /// Move an available mission into the active slot. Rejected while another
    /// mission is active; an explicit abandon is required first.
    pub fn accept_mission(&mut self, mission_id: Uuid) -> AcceptOutcome {
        if self.active.is_some() {
            return AcceptOutcome::AlreadyActive;
        }
        let Some(pos) = self.available.iter().position(|m| m.id == mission_id) else {
            return AcceptOutcome::NotFound;
        };
        let mut mission = self.available.remove(pos);
        mission.status = MissionStatus::Active;
        self.active = Some(mission);
        AcceptOutcome::Accepted
    }

    /// Finish the active mission: move it to `completed` and hand back its
    /// reward. `None` when nothing is active.
    pub fn complete_mission(&mut self) -> Option<MissionReward> {
        let mut mission = self.active.take()?;
        mission.status = MissionStatus::Completed;
        let reward = mission.reward;
        self.completed.push(mission);
        Some(reward)
    }

    /// Put the active mission back at the end of the available list.
    /// Returns the abandoned mission's title, or `None` if nothing was active.
    pub fn abandon_mission(&mut self) -> Option<String> {
        let mut mission = self.active.take()?;
        mission.status = MissionStatus::Available;
        let title = mission.title.clone();
        self.available.push(mission);
        Some(title)
    }

    /// Clear all three collections.
    pub fn reset(&mut self) {
        self.available.clear();
        self.active = None;
        self.completed.clear();
    }
}
