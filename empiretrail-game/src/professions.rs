//! Starting professions.
//!
//! Each profession fixes the opening bank balance and the monthly salary the
//! economy pays out. Pure lookup data; the profession id is what saves
//! reference.

use once_cell::sync::Lazy;

/// A selectable starting profession.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profession {
    pub id: &'static str,
    pub name: &'static str,
    /// Opening bank balance in whole dollars.
    pub starting_balance: i64,
    /// Monthly salary in whole dollars.
    pub monthly_salary: i64,
    pub blurb: &'static str,
}

static PROFESSIONS: Lazy<Vec<Profession>> = Lazy::new(|| {
    vec![
        Profession {
            id: "banker",
            name: "Banker",
            starting_balance: 150_000,
            monthly_salary: 8_000,
            blurb: "Deep pockets, easy start.",
        },
        Profession {
            id: "contractor",
            name: "Contractor",
            starting_balance: 80_000,
            monthly_salary: 5_500,
            blurb: "Knows renovations inside out.",
        },
        Profession {
            id: "agent",
            name: "Real Estate Agent",
            starting_balance: 60_000,
            monthly_salary: 4_500,
            blurb: "Lives off the market's pulse.",
        },
        Profession {
            id: "teacher",
            name: "Teacher",
            starting_balance: 35_000,
            monthly_salary: 3_200,
            blurb: "Modest means, steady income.",
        },
        Profession {
            id: "drifter",
            name: "Drifter",
            starting_balance: 15_000,
            monthly_salary: 1_800,
            blurb: "The hard road. For bragging rights.",
        },
    ]
});

/// All professions, in menu order.
#[must_use]
pub fn all_professions() -> &'static [Profession] {
    &PROFESSIONS
}

/// Look up a profession by id.
#[must_use]
pub fn find_profession(id: &str) -> Option<&'static Profession> {
    PROFESSIONS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_fields_populated() {
        let mut seen = std::collections::HashSet::new();
        for p in all_professions() {
            assert!(seen.insert(p.id), "duplicate profession id {}", p.id);
            assert!(!p.name.is_empty());
            assert!(p.starting_balance > 0);
            assert!(p.monthly_salary > 0);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(find_profession("banker").unwrap().name, "Banker");
        assert!(find_profession("astronaut").is_none());
    }
}
