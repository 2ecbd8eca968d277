//! Player progression store: experience, levels, credits, reputation.
//!
//! Levelling follows a geometric curve: the requirement for level `n` is
//! `floor(base * multiplier^(n-1))`. A single large experience grant can roll
//! over several levels; [`PlayerProgress::add_exp`] loops until the remaining
//! experience sits strictly below the current level's requirement.

use log::info;

use crate::game::types::{Player, DEFAULT_PLAYER_NAME};

/// Experience required to clear level 1.
pub const BASE_EXP_REQUIREMENT: u64 = 100;

/// Per-level growth factor for the experience curve.
pub const EXP_MULTIPLIER: f64 = 1.5;

/// Owns the [`Player`] record and applies all stat mutations.
#[derive(Debug, Clone)]
pub struct PlayerProgress {
    player: Player,
}

impl PlayerProgress {
    pub fn new(name: &str) -> Self {
        PlayerProgress {
            player: Player::new(name),
        }
    }

    /// Adopt an existing player record, e.g. from a save snapshot.
    pub fn from_player(player: Player) -> Self {
        PlayerProgress { player }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn set_name(&mut self, name: &str) {
        self.player.name = name.to_string();
    }

    /// Experience needed to clear the given level.
    pub fn exp_required_for_level(level: u32) -> u64 {
        let req = BASE_EXP_REQUIREMENT as f64 * EXP_MULTIPLIER.powi(level as i32 - 1);
        req.floor() as u64
    }

    /// Experience still needed to clear the player's current level.
    pub fn exp_to_next_level(&self) -> u64 {
        Self::exp_required_for_level(self.player.level)
    }

    /// Percent progress through the current level, 0..=100.
    pub fn level_progress(&self) -> u8 {
        let required = self.exp_to_next_level();
        if required == 0 {
            return 100;
        }
        ((self.player.exp * 100) / required).min(100) as u8
    }

    /// Grant experience, rolling over as many levels as the amount covers.
    /// Reaching the threshold exactly triggers the level-up. Returns the
    /// number of levels gained. Non-positive amounts are ignored.
    pub fn add_exp(&mut self, amount: i64) -> u32 {
        if amount <= 0 {
            return 0;
        }
        let old_level = self.player.level;
        self.player.exp += amount as u64;
        while self.player.exp >= Self::exp_required_for_level(self.player.level) {
            self.player.exp -= Self::exp_required_for_level(self.player.level);
            self.player.level += 1;
        }
        let gained = self.player.level - old_level;
        if gained > 0 {
            info!(
                "player {} levelled up: {} -> {}",
                self.player.name, old_level, self.player.level
            );
        }
        gained
    }

    pub fn add_credits(&mut self, amount: u64) {
        self.player.credits += amount;
    }

    /// Deduct credits if the balance covers them. No mutation on failure.
    pub fn spend_credits(&mut self, amount: u64) -> bool {
        if self.player.credits < amount {
            return false;
        }
        self.player.credits -= amount;
        true
    }

    pub fn add_reputation(&mut self, amount: i64) {
        self.player.reputation += amount;
    }

    /// Restore the initial stat block under a freshly generated id.
    pub fn reset(&mut self) {
        self.player = Player::new(DEFAULT_PLAYER_NAME);
    }
}

impl Default for PlayerProgress {
    fn default() -> Self {
        PlayerProgress::new(DEFAULT_PLAYER_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_curve_first_levels() {
        assert_eq!(PlayerProgress::exp_required_for_level(1), 100);
        assert_eq!(PlayerProgress::exp_required_for_level(2), 150);
        assert_eq!(PlayerProgress::exp_required_for_level(3), 225);
        assert_eq!(PlayerProgress::exp_required_for_level(4), 337);
    }

    #[test]
    fn add_exp_single_level() {
        let mut p = PlayerProgress::new("t");
        assert_eq!(p.add_exp(120), 1);
        assert_eq!(p.player().level, 2);
        assert_eq!(p.player().exp, 20);
    }

    #[test]
    fn add_exp_multi_level_rollover_exact_exhaustion() {
        // 100 consumed for 1->2, 150 for 2->3, nothing left over.
        let mut p = PlayerProgress::new("t");
        assert_eq!(p.add_exp(250), 2);
        assert_eq!(p.player().level, 3);
        assert_eq!(p.player().exp, 0);
    }

    #[test]
    fn exact_threshold_triggers_level_up() {
        let mut p = PlayerProgress::new("t");
        p.add_exp(100);
        assert_eq!(p.player().level, 2);
        assert_eq!(p.player().exp, 0);
    }

    #[test]
    fn non_positive_exp_is_ignored() {
        let mut p = PlayerProgress::new("t");
        assert_eq!(p.add_exp(0), 0);
        assert_eq!(p.add_exp(-5), 0);
        assert_eq!(p.player().level, 1);
        assert_eq!(p.player().exp, 0);
    }

    #[test]
    fn exp_stays_below_requirement_after_every_grant() {
        let mut p = PlayerProgress::new("t");
        for amount in [1, 99, 100, 777, 5000, 3, 250] {
            p.add_exp(amount);
            assert!(p.player().exp < PlayerProgress::exp_required_for_level(p.player().level));
        }
    }

    #[test]
    fn spend_credits_checks_balance() {
        let mut p = PlayerProgress::new("t");
        assert!(p.spend_credits(400));
        assert_eq!(p.player().credits, 600);
        assert!(!p.spend_credits(601));
        assert_eq!(p.player().credits, 600);
    }

    #[test]
    fn reputation_can_go_negative() {
        let mut p = PlayerProgress::new("t");
        p.add_reputation(-3);
        assert_eq!(p.player().reputation, -3);
    }

    #[test]
    fn reset_restores_initial_block_with_new_id() {
        let mut p = PlayerProgress::new("t");
        let old_id = p.player().id;
        p.add_exp(500);
        p.add_credits(50);
        p.reset();
        assert_eq!(p.player().level, 1);
        assert_eq!(p.player().exp, 0);
        assert_eq!(p.player().credits, crate::game::types::INITIAL_CREDITS);
        assert_ne!(p.player().id, old_id);
    }
}
