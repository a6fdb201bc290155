//! Achievement tracking service.
//!
//! One service instance lives with the game session that owns it. It keeps
//! the permanently-unlocked id set in memory, mirrors every mutation to the
//! key-value store before returning, and reports fresh unlocks through an
//! optional callback. Unlocks are monotonic: once an id enters the set it
//! never leaves short of an explicit reset.
//!
//! The check-and-unlock sequence (evaluate, compare, insert, persist,
//! notify) assumes the single-writer model of the game: if the engine is
//! ever driven from multiple threads, that sequence becomes a critical
//! section.

use std::collections::{HashMap, HashSet};

use crate::Clock;
use crate::achievements::{AchievementCategory, AchievementDef, catalog};
use crate::data::{InvestmentProperty, monthly_rental_income, portfolio_value};
use crate::progress::evaluate_progress;
use crate::stats::PlayerStats;
use crate::storage::{KeyValueStore, UNLOCKED_ACHIEVEMENTS_KEY};

/// A catalog entry projected with its runtime unlock state.
#[derive(Debug, Clone)]
pub struct AchievementView {
    pub def: &'static AchievementDef,
    pub is_unlocked: bool,
    /// Clamped to `[0, target]`; pinned at the target once unlocked.
    pub progress: f64,
    /// Unlock time in Unix milliseconds. Only known for unlocks observed by
    /// this service instance; unlocks loaded from storage carry no timestamp.
    pub unlocked_at: Option<u64>,
}

/// Per-category unlock tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryProgress {
    pub total: u32,
    pub unlocked: u32,
}

/// Aggregate counts for UI summaries.
#[derive(Debug, Clone, Default)]
pub struct ProgressSummary {
    pub total: u32,
    pub unlocked: u32,
    pub by_category: HashMap<AchievementCategory, CategoryProgress>,
}

type UnlockCallback = Box<dyn FnMut(&AchievementView)>;

/// Evaluates criteria against player stats and game state, unlocks
/// achievements, and persists the unlocked set.
pub struct AchievementService<S, C = crate::SystemClock> {
    store: S,
    clock: C,
    unlocked: HashSet<String>,
    unlocked_at: HashMap<String, u64>,
    on_unlock: Option<UnlockCallback>,
}

impl<S: KeyValueStore, C: Clock> AchievementService<S, C> {
    /// Construct a service, loading the unlocked set from the store.
    /// Missing or unreadable data initializes to the empty set; construction
    /// never fails.
    pub fn new(store: S, clock: C) -> Self {
        let unlocked = Self::load_unlocked(&store);
        Self {
            store,
            clock,
            unlocked,
            unlocked_at: HashMap::new(),
            on_unlock: None,
        }
    }

    fn load_unlocked(store: &S) -> HashSet<String> {
        match store.load(UNLOCKED_ACHIEVEMENTS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    log::error!("unreadable unlocked-achievement data, starting empty: {e}");
                    HashSet::new()
                }
            },
            Ok(None) => HashSet::new(),
            Err(e) => {
                log::error!("failed to read unlocked achievements, starting empty: {e}");
                HashSet::new()
            }
        }
    }

    fn persist_unlocked(&mut self) {
        let mut ids: Vec<&str> = self.unlocked.iter().map(String::as_str).collect();
        ids.sort_unstable();
        match serde_json::to_string(&ids) {
            Ok(json) => {
                if let Err(e) = self.store.save(UNLOCKED_ACHIEVEMENTS_KEY, &json) {
                    log::error!("failed to persist unlocked achievements: {e}");
                }
            }
            Err(e) => log::error!("failed to serialize unlocked achievements: {e}"),
        }
    }

    /// Register the unlock observer, replacing any previous registration.
    pub fn set_unlocked_callback(&mut self, callback: impl FnMut(&AchievementView) + 'static) {
        self.on_unlock = Some(Box::new(callback));
    }

    // --- Stats event handlers ---

    /// Fresh, zeroed stats aggregate stamped with the current time.
    #[must_use]
    pub fn initialize_player_stats(&self) -> PlayerStats {
        PlayerStats::new(self.clock.now_millis())
    }

    /// Record a property purchase.
    ///
    /// Net worth is approximated from the bank balance plus the purchased
    /// property's sale value alone; the sale and rent handlers recompute it
    /// from the full portfolio.
    pub fn record_property_purchase(
        &self,
        stats: &mut PlayerStats,
        property: &InvestmentProperty,
        bank_balance: i64,
    ) {
        stats.total_properties_purchased += 1;
        stats.total_investment += property.total_cost();
        stats.current_net_worth = bank_balance + property.arv_sale_price;
        if let Some(ty) = property.property_type() {
            *stats.properties_by_type.entry(ty).or_insert(0) += 1;
        }
        if let Some(city) = property.city_name() {
            *stats.properties_by_city.entry(city.to_string()).or_insert(0) += 1;
        }
    }

    /// Record a property sale. ROI for the sale is measured against total
    /// investment to date.
    #[allow(clippy::cast_precision_loss)]
    pub fn record_property_sale(
        &self,
        stats: &mut PlayerStats,
        property: &InvestmentProperty,
        bank_balance: i64,
        portfolio: &[InvestmentProperty],
    ) {
        stats.total_properties_sold += 1;
        stats.total_revenue += property.arv_sale_price;
        let profit = property.arv_sale_price - property.total_cost();
        stats.total_profit += profit;
        if stats.total_investment > 0 {
            let roi = profit as f64 / stats.total_investment as f64 * 100.0;
            if roi > stats.highest_roi {
                stats.highest_roi = roi;
            }
        }
        let flip_months = f64::from(property.months_held);
        if flip_months < stats.fastest_flip {
            stats.fastest_flip = flip_months;
        }
        stats.current_net_worth = bank_balance + portfolio_value(portfolio);
    }

    /// Record a property being rented out. Monthly income is recomputed
    /// from every portfolio entry currently flagged as rented.
    pub fn record_property_rent(
        &self,
        stats: &mut PlayerStats,
        bank_balance: i64,
        portfolio: &[InvestmentProperty],
    ) {
        stats.total_properties_rented += 1;
        stats.current_monthly_income = monthly_rental_income(portfolio);
        stats.current_net_worth = bank_balance + portfolio_value(portfolio);
    }

    /// Record arriving in a city; repeat visits do not double-count.
    pub fn record_city_visit(&self, stats: &mut PlayerStats, city: &str) {
        if !stats.has_visited(city) {
            stats.cities_visited.push(city.to_string());
        }
    }

    /// Record a dice roll outcome. Failures reset the streak; the streak is
    /// session-local and not persisted beyond the stats aggregate.
    pub fn record_dice_roll(&self, stats: &mut PlayerStats, success: bool) {
        stats.total_dice_rolls += 1;
        if success {
            stats.successful_dice_rolls += 1;
            stats.consecutive_successful_rolls += 1;
        } else {
            stats.consecutive_successful_rolls = 0;
        }
    }

    /// Record a month tick: keeps the longest-held counter in step with the
    /// portfolio after hold durations advance.
    pub fn record_month_advance(&self, stats: &mut PlayerStats, portfolio: &[InvestmentProperty]) {
        let longest = portfolio.iter().map(|p| p.months_held).max().unwrap_or(0);
        if longest > stats.longest_property_held {
            stats.longest_property_held = longest;
        }
    }

    /// Recompute total play time in whole minutes since the session began.
    pub fn update_play_time(&self, stats: &mut PlayerStats) {
        let now = self.clock.now_millis();
        stats.total_play_time = now.saturating_sub(stats.game_start_time) / 60_000;
    }

    // --- Unlock checking ---

    /// Evaluate every locked achievement and unlock those whose progress has
    /// reached the target. Each fresh unlock is persisted immediately and
    /// reported to the callback, in catalog order. Already-unlocked
    /// achievements are skipped entirely, so repeated calls with unchanged
    /// inputs return nothing.
    pub fn check_achievements(
        &mut self,
        stats: &PlayerStats,
        bank_balance: i64,
        portfolio: &[InvestmentProperty],
    ) -> Vec<AchievementView> {
        let mut newly_unlocked = Vec::new();
        for def in catalog() {
            if self.unlocked.contains(def.id) {
                continue;
            }
            let progress = evaluate_progress(&def.criteria, stats, bank_balance, portfolio);
            if progress >= def.criteria.target {
                let now = self.clock.now_millis();
                self.unlocked.insert(def.id.to_string());
                self.unlocked_at.insert(def.id.to_string(), now);
                self.persist_unlocked();
                let view = AchievementView {
                    def,
                    is_unlocked: true,
                    progress: def.criteria.target,
                    unlocked_at: Some(now),
                };
                if let Some(callback) = self.on_unlock.as_mut() {
                    callback(&view);
                }
                newly_unlocked.push(view);
            }
        }
        newly_unlocked
    }

    /// Run an unlock check, then project the whole catalog with live
    /// progress. Unlocked achievements always report full progress, even if
    /// the underlying stats have since regressed below the target.
    pub fn refresh_achievement_progress(
        &mut self,
        stats: &PlayerStats,
        bank_balance: i64,
        portfolio: &[InvestmentProperty],
    ) -> Vec<AchievementView> {
        let _ = self.check_achievements(stats, bank_balance, portfolio);
        catalog()
            .iter()
            .map(|def| {
                let is_unlocked = self.unlocked.contains(def.id);
                let progress = if is_unlocked {
                    def.criteria.target
                } else {
                    evaluate_progress(&def.criteria, stats, bank_balance, portfolio)
                };
                AchievementView {
                    def,
                    is_unlocked,
                    progress,
                    unlocked_at: self.unlocked_at.get(def.id).copied(),
                }
            })
            .collect()
    }

    /// Project the catalog with unlock flags only; progress is not
    /// recomputed here (it defaults to zero). Callers wanting live progress
    /// use [`Self::refresh_achievement_progress`].
    #[must_use]
    pub fn current_achievements(&self) -> Vec<AchievementView> {
        catalog()
            .iter()
            .map(|def| AchievementView {
                def,
                is_unlocked: self.unlocked.contains(def.id),
                progress: 0.0,
                unlocked_at: None,
            })
            .collect()
    }

    /// Clear the unlocked set and persist the empty set. Used when starting
    /// a new game from scratch.
    pub fn reset_achievements(&mut self) {
        self.unlocked.clear();
        self.unlocked_at.clear();
        self.persist_unlocked();
    }

    /// Whether an achievement id is in the persisted unlocked set.
    #[must_use]
    pub fn is_permanently_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    /// Number of permanently unlocked achievements.
    #[must_use]
    pub fn permanently_unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Unlock tallies, overall and per category.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress_summary(&self) -> ProgressSummary {
        let mut summary = ProgressSummary {
            total: catalog().len() as u32,
            ..ProgressSummary::default()
        };
        for def in catalog() {
            let entry = summary.by_category.entry(def.category).or_default();
            entry.total += 1;
            if self.unlocked.contains(def.id) {
                entry.unlocked += 1;
                summary.unlocked += 1;
            }
        }
        summary
    }
}
