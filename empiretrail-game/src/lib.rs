//! Empire Trail Game Engine
//!
//! Platform-agnostic core logic for the Empire Trail real-estate investment
//! simulation. This crate provides the achievement engine, the player-stats
//! aggregate it evaluates, and the save-slot system, without UI or
//! platform-specific dependencies. Host layers (web, tester) plug in through
//! the [`KeyValueStore`] and [`Clock`] traits.

pub mod achievements;
pub mod data;
pub mod professions;
pub mod progress;
pub mod save;
pub mod service;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use achievements::{
    AchievementCategory, AchievementCriteria, AchievementDef, AchievementReward, CriteriaKind,
    PropertyFilter, Rarity, RewardKind, TimeConstraint, catalog, find_achievement,
};
pub use data::{
    GameEvent, GamePhase, InvestmentProperty, Location, Player, PropertyType,
    monthly_rental_income, portfolio_value,
};
pub use professions::{Profession, all_professions, find_profession};
pub use progress::evaluate_progress;
pub use save::{
    GameSnapshot, MAX_SAVE_SLOTS, SAVE_VERSION, SaveGame, SaveStats, SaveSystem, SlotInfo, slot_id,
};
pub use service::{AchievementService, AchievementView, CategoryProgress, ProgressSummary};
pub use stats::PlayerStats;
pub use storage::{
    AUTO_SAVE_KEY, KeyValueStore, MemoryStore, SAVE_SLOTS_KEY, StorageError,
    UNLOCKED_ACHIEVEMENTS_KEY,
};

/// Trait for abstracting wall-clock access.
/// Platform-specific implementations should provide this; tests and replays
/// substitute a deterministic clock.
pub trait Clock {
    /// Current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Deterministic clock returning a fixed timestamp (useful for tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now_millis();
        let b = clock.now_millis();
        assert!(b >= a);
        // Sanity: we are past 2020-01-01 in epoch milliseconds.
        assert!(a > 1_577_836_800_000);
    }

    #[test]
    fn fixed_clock_returns_its_value() {
        assert_eq!(FixedClock(42).now_millis(), 42);
    }
}
