//! Criteria evaluation.
//!
//! Progress is a deterministic, side-effect-free function of the stats
//! aggregate, the current bank balance, and the portfolio. The service calls
//! this for every locked achievement on each check.

use crate::achievements::{AchievementCriteria, CriteriaKind, PropertyFilter};
use crate::data::{InvestmentProperty, monthly_rental_income, portfolio_value};
use crate::stats::PlayerStats;

/// Compute progress toward a criterion, clamped to `[0, target]`.
///
/// Clamping keeps negative inputs (an overdrawn bank balance) at zero and
/// keeps satisfied criteria pinned at the target. `flip_property` is scored
/// by sale count only: the `time.max_months` window some flip achievements
/// declare is not evaluated, and tightening it here would contradict
/// already-persisted unlocks. Unrecognized criteria kinds score zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn evaluate_progress(
    criteria: &AchievementCriteria,
    stats: &PlayerStats,
    bank_balance: i64,
    portfolio: &[InvestmentProperty],
) -> f64 {
    let raw = match criteria.kind {
        CriteriaKind::PurchaseProperty => f64::from(stats.total_properties_purchased),
        CriteriaKind::SellProperty | CriteriaKind::FlipProperty => {
            f64::from(stats.total_properties_sold)
        }
        CriteriaKind::RentProperty => f64::from(stats.total_properties_rented),
        CriteriaKind::ReachBankBalance => bank_balance as f64,
        CriteriaKind::ReachNetWorth => (bank_balance + portfolio_value(portfolio)) as f64,
        CriteriaKind::VisitCity => stats.cities_visited.len() as f64,
        CriteriaKind::OwnPropertyType => owned_of_types(criteria, stats, portfolio),
        CriteriaKind::OwnPropertiesInCity => owned_in_cities(criteria, stats, portfolio),
        CriteriaKind::HoldPropertyDuration => f64::from(stats.longest_property_held),
        CriteriaKind::AchieveRoi => stats.highest_roi,
        CriteriaKind::DiceRolls => f64::from(stats.successful_dice_rolls),
        CriteriaKind::ConsecutiveSuccesses => f64::from(stats.consecutive_successful_rolls),
        CriteriaKind::TimePlayed => stats.total_play_time as f64,
        CriteriaKind::PropertiesSoldValue => stats.total_revenue as f64,
        CriteriaKind::MonthlyIncome => monthly_rental_income(portfolio) as f64,
        CriteriaKind::PortfolioValue => portfolio_value(portfolio) as f64,
        CriteriaKind::Unknown => 0.0,
    };
    raw.max(0.0).min(criteria.target.max(0.0))
}

#[allow(clippy::cast_precision_loss)]
fn owned_of_types(
    criteria: &AchievementCriteria,
    stats: &PlayerStats,
    portfolio: &[InvestmentProperty],
) -> f64 {
    match criteria
        .property
        .as_ref()
        .and_then(|f: &PropertyFilter| f.property_types.as_ref())
    {
        Some(types) => types
            .iter()
            .map(|ty| f64::from(stats.count_of_type(*ty)))
            .sum(),
        None => portfolio.len() as f64,
    }
}

#[allow(clippy::cast_precision_loss)]
fn owned_in_cities(
    criteria: &AchievementCriteria,
    stats: &PlayerStats,
    portfolio: &[InvestmentProperty],
) -> f64 {
    match criteria
        .property
        .as_ref()
        .and_then(|f: &PropertyFilter| f.cities.as_ref())
    {
        Some(cities) => cities
            .iter()
            .map(|city| f64::from(stats.count_in_city(city)))
            .sum(),
        None => portfolio.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::{PropertyFilter, TimeConstraint};
    use crate::data::{Location, PropertyType};

    fn simple(kind: CriteriaKind, target: f64) -> AchievementCriteria {
        AchievementCriteria {
            kind,
            target,
            property: None,
            time: None,
        }
    }

    fn property(name: &str, city: &str, arv: i64, rent: i64, rented: bool) -> InvestmentProperty {
        InvestmentProperty {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            purchase_cost: 50_000,
            closing_cost: 2_000,
            renovation_cost: 8_000,
            arv_sale_price: arv,
            arv_rental_income: rent,
            is_rented: rented,
            months_held: 0,
            location: Some(Location {
                name: city.to_string(),
            }),
        }
    }

    #[test]
    fn counters_map_straight_through() {
        let mut stats = PlayerStats::default();
        stats.total_properties_purchased = 4;
        stats.total_properties_sold = 3;
        stats.total_properties_rented = 2;
        stats.successful_dice_rolls = 7;
        stats.consecutive_successful_rolls = 5;
        stats.total_play_time = 90;
        stats.total_revenue = 250_000;
        stats.longest_property_held = 12;
        stats.highest_roi = 42.0;

        let checks = [
            (CriteriaKind::PurchaseProperty, 4.0),
            (CriteriaKind::SellProperty, 3.0),
            (CriteriaKind::RentProperty, 2.0),
            (CriteriaKind::DiceRolls, 7.0),
            (CriteriaKind::ConsecutiveSuccesses, 5.0),
            (CriteriaKind::TimePlayed, 90.0),
            (CriteriaKind::PropertiesSoldValue, 250_000.0),
            (CriteriaKind::HoldPropertyDuration, 12.0),
            (CriteriaKind::AchieveRoi, 42.0),
        ];
        for (kind, expected) in checks {
            let c = simple(kind, 1_000_000.0);
            assert!(
                (evaluate_progress(&c, &stats, 0, &[]) - expected).abs() < f64::EPSILON,
                "{kind:?}"
            );
        }
    }

    #[test]
    fn flip_property_aliases_sold_count_ignoring_time_window() {
        let mut stats = PlayerStats::default();
        stats.total_properties_sold = 6;
        let criteria = AchievementCriteria {
            time: Some(TimeConstraint {
                max_months: Some(3),
            }),
            ..simple(CriteriaKind::FlipProperty, 10.0)
        };
        assert!((evaluate_progress(&criteria, &stats, 0, &[]) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bank_balance_and_net_worth() {
        let stats = PlayerStats::default();
        let portfolio = vec![
            property("Craftsman House", "Denver", 200_000, 0, false),
            property("Lakeview Condo", "Chicago", 150_000, 1_200, true),
        ];
        let balance = simple(CriteriaKind::ReachBankBalance, 1_000_000.0);
        assert!(
            (evaluate_progress(&balance, &stats, 100_000, &portfolio) - 100_000.0).abs()
                < f64::EPSILON
        );
        let net_worth = simple(CriteriaKind::ReachNetWorth, 1_000_000.0);
        assert!(
            (evaluate_progress(&net_worth, &stats, 100_000, &portfolio) - 450_000.0).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn negative_bank_balance_clamps_to_zero() {
        let stats = PlayerStats::default();
        let criteria = simple(CriteriaKind::ReachBankBalance, 100_000.0);
        assert_eq!(evaluate_progress(&criteria, &stats, -50_000, &[]), 0.0);
        let net_worth = simple(CriteriaKind::ReachNetWorth, 100_000.0);
        assert_eq!(evaluate_progress(&net_worth, &stats, -50_000, &[]), 0.0);
    }

    #[test]
    fn progress_never_exceeds_target() {
        let mut stats = PlayerStats::default();
        stats.total_properties_purchased = 500;
        let criteria = simple(CriteriaKind::PurchaseProperty, 10.0);
        assert_eq!(evaluate_progress(&criteria, &stats, 0, &[]), 10.0);
    }

    #[test]
    fn typed_ownership_sums_listed_types() {
        let mut stats = PlayerStats::default();
        stats.properties_by_type.insert(PropertyType::House, 4);
        stats.properties_by_type.insert(PropertyType::Townhome, 3);
        stats.properties_by_type.insert(PropertyType::Condo, 9);
        let criteria = AchievementCriteria {
            property: Some(PropertyFilter {
                property_types: Some(vec![PropertyType::House, PropertyType::Townhome]),
                cities: None,
            }),
            ..simple(CriteriaKind::OwnPropertyType, 10.0)
        };
        assert!((evaluate_progress(&criteria, &stats, 0, &[]) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unfiltered_ownership_falls_back_to_portfolio_size() {
        let stats = PlayerStats::default();
        let portfolio = vec![
            property("A House", "Denver", 1, 0, false),
            property("B Condo", "Denver", 1, 0, false),
        ];
        let by_type = simple(CriteriaKind::OwnPropertyType, 12.0);
        assert!((evaluate_progress(&by_type, &stats, 0, &portfolio) - 2.0).abs() < f64::EPSILON);
        let by_city = simple(CriteriaKind::OwnPropertiesInCity, 12.0);
        assert!((evaluate_progress(&by_city, &stats, 0, &portfolio) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn city_ownership_sums_listed_cities() {
        let mut stats = PlayerStats::default();
        stats.properties_by_city.insert("New York".to_string(), 3);
        stats.properties_by_city.insert("Chicago".to_string(), 2);
        let criteria = AchievementCriteria {
            property: Some(PropertyFilter {
                property_types: None,
                cities: Some(vec!["New York".to_string()]),
            }),
            ..simple(CriteriaKind::OwnPropertiesInCity, 5.0)
        };
        assert!((evaluate_progress(&criteria, &stats, 0, &[]) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn monthly_income_counts_only_rented_entries() {
        let stats = PlayerStats::default();
        let portfolio = vec![
            property("Rented Duplex", "Austin", 100_000, 2_000, true),
            property("Vacant Duplex", "Austin", 100_000, 2_000, false),
        ];
        let criteria = simple(CriteriaKind::MonthlyIncome, 20_000.0);
        assert!(
            (evaluate_progress(&criteria, &stats, 0, &portfolio) - 2_000.0).abs() < f64::EPSILON
        );
    }

    #[test]
    fn unknown_kind_scores_zero() {
        let mut stats = PlayerStats::default();
        stats.total_properties_purchased = 99;
        let criteria = simple(CriteriaKind::Unknown, 10.0);
        assert_eq!(evaluate_progress(&criteria, &stats, 1_000_000, &[]), 0.0);
    }
}
