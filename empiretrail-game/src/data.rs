//! Shared domain data: properties, events, players, game phases.
//!
//! Persisted shapes serialize with camelCase field names so save files stay
//! compatible with the documented JSON contract (`currentMonth`,
//! `arvSalePrice`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Property archetypes recognized by the collection achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    Condo,
    Duplex,
    Townhome,
    House,
    Mansion,
    Estate,
}

impl PropertyType {
    /// All property types, in inference precedence order.
    pub const ALL: &'static [PropertyType] = &[
        Self::Apartment,
        Self::Condo,
        Self::Duplex,
        Self::Townhome,
        Self::House,
        Self::Mansion,
        Self::Estate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::Condo => "Condo",
            Self::Duplex => "Duplex",
            Self::Townhome => "Townhome",
            Self::House => "House",
            Self::Mansion => "Mansion",
            Self::Estate => "Estate",
        }
    }

    /// Infer a property type from a free-text listing name.
    ///
    /// Case-insensitive substring match checked in a fixed precedence order:
    /// apartment, condo, duplex, townhome, house, mansion, then
    /// estate/palace. The first hit wins, so "Hillcrest House Estate" is a
    /// `House`, not an `Estate`. Names matching nothing stay untyped and are
    /// excluded from the per-type counters. Existing save data depends on
    /// this exact ordering.
    #[must_use]
    pub fn infer_from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        const NEEDLES: &[(&str, PropertyType)] = &[
            ("apartment", PropertyType::Apartment),
            ("condo", PropertyType::Condo),
            ("duplex", PropertyType::Duplex),
            ("townhome", PropertyType::Townhome),
            ("house", PropertyType::House),
            ("mansion", PropertyType::Mansion),
        ];
        for &(needle, ty) in NEEDLES {
            if lower.contains(needle) {
                return Some(ty);
            }
        }
        if lower.contains("estate") || lower.contains("palace") {
            return Some(Self::Estate);
        }
        None
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a property sits on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

/// A purchasable investment property.
///
/// Money fields are whole dollars. `arv` fields are after-repair values:
/// what the property sells or rents for once renovated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentProperty {
    pub id: String,
    pub name: String,
    pub purchase_cost: i64,
    #[serde(default)]
    pub closing_cost: i64,
    #[serde(default)]
    pub renovation_cost: i64,
    pub arv_sale_price: i64,
    #[serde(default)]
    pub arv_rental_income: i64,
    #[serde(default)]
    pub is_rented: bool,
    /// Months since purchase, advanced by the month tick.
    #[serde(default)]
    pub months_held: u32,
    #[serde(default)]
    pub location: Option<Location>,
}

impl InvestmentProperty {
    /// Total capital sunk into the property: purchase + closing + renovation.
    #[must_use]
    pub const fn total_cost(&self) -> i64 {
        self.purchase_cost + self.closing_cost + self.renovation_cost
    }

    /// Type inferred from the listing name, if any.
    #[must_use]
    pub fn property_type(&self) -> Option<PropertyType> {
        PropertyType::infer_from_name(&self.name)
    }

    /// City name, if the property carries a location.
    #[must_use]
    pub fn city_name(&self) -> Option<&str> {
        self.location.as_ref().map(|loc| loc.name.as_str())
    }
}

/// Sum of after-repair sale values across a portfolio.
#[must_use]
pub fn portfolio_value(portfolio: &[InvestmentProperty]) -> i64 {
    portfolio.iter().map(|p| p.arv_sale_price).sum()
}

/// Sum of rental income over portfolio entries currently rented out.
#[must_use]
pub fn monthly_rental_income(portfolio: &[InvestmentProperty]) -> i64 {
    portfolio
        .iter()
        .filter(|p| p.is_rented)
        .map(|p| p.arv_rental_income)
        .sum()
}

/// A random event presented to the player while travelling or at month end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Top-level screen the game is on. Persists as a lowercase string
/// (`"city"` is the default when a save omits it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    City,
    Travel,
    Event,
    PropertySearch,
    GameOver,
}

/// The player as stored in a save: identity, chosen profession, and the
/// stats aggregate the achievement engine evaluates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    /// Profession id; see [`crate::professions`].
    pub profession: String,
    #[serde(default)]
    pub stats: crate::stats::PlayerStats,
}
