//! Achievement catalog and its static metadata.
//!
//! The catalog is built once and never mutated; runtime unlock status and
//! progress live in the service, not on the definitions. Achievement ids are
//! stable and double as persistence keys, so renaming one orphans previously
//! unlocked data.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::data::PropertyType;

/// Display grouping for achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Financial,
    Property,
    Exploration,
    Skill,
    Collection,
    Milestone,
    Special,
}

impl AchievementCategory {
    pub const ALL: &'static [AchievementCategory] = &[
        Self::Financial,
        Self::Property,
        Self::Exploration,
        Self::Skill,
        Self::Collection,
        Self::Milestone,
        Self::Special,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Financial => "Financial",
            Self::Property => "Property",
            Self::Exploration => "Exploration",
            Self::Skill => "Skill",
            Self::Collection => "Collection",
            Self::Milestone => "Milestone",
            Self::Special => "Special",
        }
    }

    /// Accent color used by the achievement screens.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Financial => "#f1c40f",
            Self::Property => "#2ecc71",
            Self::Exploration => "#3498db",
            Self::Skill => "#e67e22",
            Self::Collection => "#9b59b6",
            Self::Milestone => "#1abc9c",
            Self::Special => "#e74c3c",
        }
    }
}

/// Rarity tier, from common to legendary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: &'static [Rarity] = &[
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Common => "#95a5a6",
            Self::Uncommon => "#27ae60",
            Self::Rare => "#2980b9",
            Self::Epic => "#8e44ad",
            Self::Legendary => "#d35400",
        }
    }
}

/// Which evaluation strategy a criterion selects.
///
/// `Unknown` absorbs unrecognized kinds from foreign or future data; the
/// evaluator scores them as zero progress instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaKind {
    PurchaseProperty,
    SellProperty,
    RentProperty,
    ReachBankBalance,
    ReachNetWorth,
    VisitCity,
    OwnPropertyType,
    OwnPropertiesInCity,
    FlipProperty,
    HoldPropertyDuration,
    AchieveRoi,
    DiceRolls,
    ConsecutiveSuccesses,
    TimePlayed,
    PropertiesSoldValue,
    MonthlyIncome,
    PortfolioValue,
    #[serde(other)]
    Unknown,
}

/// Optional narrowing of property-ownership criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    #[serde(default)]
    pub property_types: Option<Vec<PropertyType>>,
    #[serde(default)]
    pub cities: Option<Vec<String>>,
}

/// Optional time bound on a criterion.
///
/// `max_months` is declared by some flip achievements but is not evaluated;
/// see [`crate::progress::evaluate_progress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeConstraint {
    #[serde(default)]
    pub max_months: Option<u32>,
}

/// A criterion: kind, numeric target, and optional qualifiers.
///
/// `target` is `f64` because criteria mix counts, dollar amounts, minutes,
/// and ROI percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementCriteria {
    #[serde(rename = "type")]
    pub kind: CriteriaKind,
    pub target: f64,
    #[serde(default)]
    pub property: Option<PropertyFilter>,
    #[serde(default)]
    pub time: Option<TimeConstraint>,
}

/// What unlocking grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    /// Flat dollar bonus to the bank balance.
    Cash,
    /// Cosmetic title shown on the result screen.
    Title,
    /// Gameplay perk identified by the description.
    Perk,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementReward {
    pub kind: RewardKind,
    /// Dollar value for cash rewards, otherwise 0.
    pub value: i64,
    pub description: &'static str,
}

/// One immutable catalog entry. `id` is globally unique and stable.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub rarity: Rarity,
    pub icon: &'static str,
    pub criteria: AchievementCriteria,
    pub reward: AchievementReward,
}

const fn simple(kind: CriteriaKind, target: f64) -> AchievementCriteria {
    AchievementCriteria {
        kind,
        target,
        property: None,
        time: None,
    }
}

fn own_types(target: f64, types: &[PropertyType]) -> AchievementCriteria {
    AchievementCriteria {
        kind: CriteriaKind::OwnPropertyType,
        target,
        property: Some(PropertyFilter {
            property_types: Some(types.to_vec()),
            cities: None,
        }),
        time: None,
    }
}

fn own_in_cities(target: f64, cities: &[&str]) -> AchievementCriteria {
    AchievementCriteria {
        kind: CriteriaKind::OwnPropertiesInCity,
        target,
        property: Some(PropertyFilter {
            property_types: None,
            cities: Some(cities.iter().map(ToString::to_string).collect()),
        }),
        time: None,
    }
}

const fn cash(value: i64, description: &'static str) -> AchievementReward {
    AchievementReward {
        kind: RewardKind::Cash,
        value,
        description,
    }
}

const fn title(description: &'static str) -> AchievementReward {
    AchievementReward {
        kind: RewardKind::Title,
        value: 0,
        description,
    }
}

const fn perk(description: &'static str) -> AchievementReward {
    AchievementReward {
        kind: RewardKind::Perk,
        value: 0,
        description,
    }
}

static CATALOG: Lazy<Vec<AchievementDef>> = Lazy::new(|| {
    use AchievementCategory as Cat;
    use CriteriaKind as Kind;
    vec![
        // --- Financial ---
        AchievementDef {
            id: "thousandaire",
            name: "Thousandaire",
            description: "Hold $100,000 in the bank",
            category: Cat::Financial,
            rarity: Rarity::Uncommon,
            icon: "💵",
            criteria: simple(Kind::ReachBankBalance, 100_000.0),
            reward: cash(5_000, "$5,000 bonus"),
        },
        AchievementDef {
            id: "millionaire",
            name: "Millionaire",
            description: "Reach a net worth of $1,000,000",
            category: Cat::Financial,
            rarity: Rarity::Rare,
            icon: "💰",
            criteria: simple(Kind::ReachNetWorth, 1_000_000.0),
            reward: cash(25_000, "$25,000 bonus"),
        },
        AchievementDef {
            id: "multi_millionaire",
            name: "Multi-Millionaire",
            description: "Reach a net worth of $5,000,000",
            category: Cat::Financial,
            rarity: Rarity::Epic,
            icon: "🤑",
            criteria: simple(Kind::ReachNetWorth, 5_000_000.0),
            reward: cash(100_000, "$100,000 bonus"),
        },
        AchievementDef {
            id: "big_earner",
            name: "Big Earner",
            description: "Sell $2,000,000 worth of property",
            category: Cat::Financial,
            rarity: Rarity::Rare,
            icon: "📈",
            criteria: simple(Kind::PropertiesSoldValue, 2_000_000.0),
            reward: cash(20_000, "$20,000 bonus"),
        },
        AchievementDef {
            id: "cash_flow_king",
            name: "Cash Flow King",
            description: "Collect $20,000 in monthly rent",
            category: Cat::Financial,
            rarity: Rarity::Epic,
            icon: "🏦",
            criteria: simple(Kind::MonthlyIncome, 20_000.0),
            reward: title("Title: Cash Flow King"),
        },
        // --- Property ---
        AchievementDef {
            id: "first_property",
            name: "First Property",
            description: "Purchase your first property",
            category: Cat::Property,
            rarity: Rarity::Common,
            icon: "🏠",
            criteria: simple(Kind::PurchaseProperty, 1.0),
            reward: cash(1_000, "$1,000 bonus"),
        },
        AchievementDef {
            id: "growing_portfolio",
            name: "Growing Portfolio",
            description: "Purchase 10 properties",
            category: Cat::Property,
            rarity: Rarity::Uncommon,
            icon: "🏘️",
            criteria: simple(Kind::PurchaseProperty, 10.0),
            reward: cash(10_000, "$10,000 bonus"),
        },
        AchievementDef {
            id: "property_baron",
            name: "Property Baron",
            description: "Purchase 50 properties",
            category: Cat::Property,
            rarity: Rarity::Epic,
            icon: "🏙️",
            criteria: simple(Kind::PurchaseProperty, 50.0),
            reward: title("Title: Property Baron"),
        },
        AchievementDef {
            id: "first_sale",
            name: "First Sale",
            description: "Sell your first property",
            category: Cat::Property,
            rarity: Rarity::Common,
            icon: "🤝",
            criteria: simple(Kind::SellProperty, 1.0),
            reward: cash(1_000, "$1,000 bonus"),
        },
        AchievementDef {
            id: "dealmaker",
            name: "Dealmaker",
            description: "Sell 25 properties",
            category: Cat::Property,
            rarity: Rarity::Rare,
            icon: "📝",
            criteria: simple(Kind::SellProperty, 25.0),
            reward: cash(15_000, "$15,000 bonus"),
        },
        AchievementDef {
            id: "first_tenant",
            name: "First Tenant",
            description: "Rent out your first property",
            category: Cat::Property,
            rarity: Rarity::Common,
            icon: "🔑",
            criteria: simple(Kind::RentProperty, 1.0),
            reward: cash(1_000, "$1,000 bonus"),
        },
        AchievementDef {
            id: "landlord",
            name: "Landlord",
            description: "Rent out 10 properties",
            category: Cat::Property,
            rarity: Rarity::Uncommon,
            icon: "🗝️",
            criteria: simple(Kind::RentProperty, 10.0),
            reward: cash(8_000, "$8,000 bonus"),
        },
        AchievementDef {
            id: "full_house",
            name: "Full House",
            description: "Hold a portfolio worth $3,000,000",
            category: Cat::Property,
            rarity: Rarity::Rare,
            icon: "🏛️",
            criteria: simple(Kind::PortfolioValue, 3_000_000.0),
            reward: cash(30_000, "$30,000 bonus"),
        },
        // --- Exploration ---
        AchievementDef {
            id: "road_tripper",
            name: "Road Tripper",
            description: "Visit 3 cities",
            category: Cat::Exploration,
            rarity: Rarity::Common,
            icon: "🚗",
            criteria: simple(Kind::VisitCity, 3.0),
            reward: cash(2_000, "$2,000 bonus"),
        },
        AchievementDef {
            id: "coast_to_coast",
            name: "Coast to Coast",
            description: "Visit 8 cities",
            category: Cat::Exploration,
            rarity: Rarity::Rare,
            icon: "🗺️",
            criteria: simple(Kind::VisitCity, 8.0),
            reward: cash(10_000, "$10,000 bonus"),
        },
        AchievementDef {
            id: "seen_it_all",
            name: "Seen It All",
            description: "Visit 15 cities",
            category: Cat::Exploration,
            rarity: Rarity::Legendary,
            icon: "🌎",
            criteria: simple(Kind::VisitCity, 15.0),
            reward: title("Title: Trailblazer"),
        },
        AchievementDef {
            id: "king_of_new_york",
            name: "King of New York",
            description: "Own 5 properties in New York",
            category: Cat::Exploration,
            rarity: Rarity::Rare,
            icon: "🗽",
            criteria: own_in_cities(5.0, &["New York"]),
            reward: title("Title: King of New York"),
        },
        AchievementDef {
            id: "west_coast_empire",
            name: "West Coast Empire",
            description: "Own 10 properties on the west coast",
            category: Cat::Exploration,
            rarity: Rarity::Epic,
            icon: "🌉",
            criteria: own_in_cities(10.0, &["San Francisco", "Los Angeles", "Seattle"]),
            reward: perk("West coast listings surface first"),
        },
        // --- Skill ---
        AchievementDef {
            id: "lucky_streak",
            name: "Lucky Streak",
            description: "Win 5 dice rolls in a row",
            category: Cat::Skill,
            rarity: Rarity::Uncommon,
            icon: "🎲",
            criteria: simple(Kind::ConsecutiveSuccesses, 5.0),
            reward: cash(3_000, "$3,000 bonus"),
        },
        AchievementDef {
            id: "hot_hand",
            name: "Hot Hand",
            description: "Win 10 dice rolls in a row",
            category: Cat::Skill,
            rarity: Rarity::Epic,
            icon: "🔥",
            criteria: simple(Kind::ConsecutiveSuccesses, 10.0),
            reward: cash(20_000, "$20,000 bonus"),
        },
        AchievementDef {
            id: "high_roller",
            name: "High Roller",
            description: "Win 50 dice rolls",
            category: Cat::Skill,
            rarity: Rarity::Rare,
            icon: "♠️",
            criteria: simple(Kind::DiceRolls, 50.0),
            reward: cash(12_000, "$12,000 bonus"),
        },
        AchievementDef {
            id: "flipper",
            name: "Flipper",
            description: "Flip 5 properties",
            category: Cat::Skill,
            rarity: Rarity::Uncommon,
            icon: "🔨",
            criteria: simple(Kind::FlipProperty, 5.0),
            reward: cash(5_000, "$5,000 bonus"),
        },
        AchievementDef {
            id: "speed_flipper",
            name: "Speed Flipper",
            description: "Flip 10 properties, fast",
            category: Cat::Skill,
            rarity: Rarity::Epic,
            icon: "⚡",
            // The three-month window is declared but the evaluator scores
            // flips by count only; see progress::evaluate_progress.
            criteria: AchievementCriteria {
                time: Some(TimeConstraint {
                    max_months: Some(3),
                }),
                ..simple(Kind::FlipProperty, 10.0)
            },
            reward: title("Title: Speed Flipper"),
        },
        AchievementDef {
            id: "roi_master",
            name: "ROI Master",
            description: "Close a sale at 100% return on investment",
            category: Cat::Skill,
            rarity: Rarity::Rare,
            icon: "🎯",
            criteria: simple(Kind::AchieveRoi, 100.0),
            reward: cash(10_000, "$10,000 bonus"),
        },
        AchievementDef {
            id: "golden_touch",
            name: "Golden Touch",
            description: "Close a sale at 250% return on investment",
            category: Cat::Skill,
            rarity: Rarity::Legendary,
            icon: "✨",
            criteria: simple(Kind::AchieveRoi, 250.0),
            reward: title("Title: Golden Touch"),
        },
        // --- Collection ---
        AchievementDef {
            id: "apartment_tycoon",
            name: "Apartment Tycoon",
            description: "Own 10 apartments",
            category: Cat::Collection,
            rarity: Rarity::Rare,
            icon: "🏢",
            criteria: own_types(10.0, &[PropertyType::Apartment]),
            reward: cash(15_000, "$15,000 bonus"),
        },
        AchievementDef {
            id: "suburban_sprawl",
            name: "Suburban Sprawl",
            description: "Own 10 houses or townhomes",
            category: Cat::Collection,
            rarity: Rarity::Rare,
            icon: "🏡",
            criteria: own_types(10.0, &[PropertyType::House, PropertyType::Townhome]),
            reward: cash(15_000, "$15,000 bonus"),
        },
        AchievementDef {
            id: "estate_collector",
            name: "Estate Collector",
            description: "Own 3 mansions or estates",
            category: Cat::Collection,
            rarity: Rarity::Epic,
            icon: "🏰",
            criteria: own_types(3.0, &[PropertyType::Mansion, PropertyType::Estate]),
            reward: title("Title: Estate Collector"),
        },
        AchievementDef {
            id: "full_spread",
            name: "Full Spread",
            description: "Own 12 properties of any kind",
            category: Cat::Collection,
            rarity: Rarity::Uncommon,
            icon: "📦",
            // No filter: falls back to total portfolio size.
            criteria: simple(Kind::OwnPropertyType, 12.0),
            reward: cash(8_000, "$8,000 bonus"),
        },
        // --- Milestone ---
        AchievementDef {
            id: "patient_investor",
            name: "Patient Investor",
            description: "Hold a property for 24 months",
            category: Cat::Milestone,
            rarity: Rarity::Uncommon,
            icon: "⏳",
            criteria: simple(Kind::HoldPropertyDuration, 24.0),
            reward: cash(5_000, "$5,000 bonus"),
        },
        AchievementDef {
            id: "long_haul",
            name: "Long Haul",
            description: "Hold a property for 60 months",
            category: Cat::Milestone,
            rarity: Rarity::Epic,
            icon: "🕰️",
            criteria: simple(Kind::HoldPropertyDuration, 60.0),
            reward: title("Title: Long Hauler"),
        },
        AchievementDef {
            id: "marathon_session",
            name: "Marathon Session",
            description: "Play for 2 hours",
            category: Cat::Milestone,
            rarity: Rarity::Uncommon,
            icon: "⌛",
            criteria: simple(Kind::TimePlayed, 120.0),
            reward: cash(2_000, "$2,000 bonus"),
        },
        AchievementDef {
            id: "dedicated",
            name: "Dedicated",
            description: "Play for 10 hours",
            category: Cat::Milestone,
            rarity: Rarity::Rare,
            icon: "🏅",
            criteria: simple(Kind::TimePlayed, 600.0),
            reward: title("Title: Dedicated"),
        },
        // --- Special ---
        AchievementDef {
            id: "century_of_rolls",
            name: "Century of Rolls",
            description: "Win 100 dice rolls",
            category: Cat::Special,
            rarity: Rarity::Epic,
            icon: "💯",
            criteria: simple(Kind::DiceRolls, 100.0),
            reward: perk("Dice animations play twice as fast"),
        },
        AchievementDef {
            id: "empire_complete",
            name: "Empire Complete",
            description: "Reach a net worth of $100,000,000",
            category: Cat::Special,
            rarity: Rarity::Legendary,
            icon: "👑",
            criteria: simple(Kind::ReachNetWorth, 100_000_000.0),
            reward: title("Title: Emperor"),
        },
    ]
});

/// The immutable achievement catalog, built once per process.
#[must_use]
pub fn catalog() -> &'static [AchievementDef] {
    &CATALOG
}

/// Look up a catalog entry by id.
#[must_use]
pub fn find_achievement(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|def| def.id == id)
}
