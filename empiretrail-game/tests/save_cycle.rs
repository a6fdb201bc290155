//! Full save/load lifecycle through the public API, including the failure
//! paths where the backing store rejects writes.

use empiretrail_game::{
    FixedClock, GamePhase, GameSnapshot, InvestmentProperty, KeyValueStore, Location,
    MAX_SAVE_SLOTS, MemoryStore, Player, PlayerStats, SaveSystem, StorageError,
};

fn snapshot() -> GameSnapshot {
    let mut stats = PlayerStats::new(500);
    stats.total_properties_purchased = 2;
    stats.cities_visited = vec!["Chicago".to_string(), "Denver".to_string()];
    GameSnapshot {
        player: Player {
            name: "Riley".to_string(),
            profession: "contractor".to_string(),
            stats,
        },
        current_month: 14,
        portfolio: vec![InvestmentProperty {
            id: "p1".to_string(),
            name: "Westside Duplex".to_string(),
            purchase_cost: 90_000,
            closing_cost: 3_000,
            renovation_cost: 12_000,
            arv_sale_price: 160_000,
            arv_rental_income: 1_400,
            is_rented: true,
            months_held: 5,
            location: Some(Location {
                name: "Denver".to_string(),
            }),
        }],
        current_event: None,
        current_bank_balance: 42_500,
        current_city: Some("Denver".to_string()),
        game_state: GamePhase::City,
    }
}

#[test]
fn save_load_roundtrip_preserves_everything() {
    let mut system = SaveSystem::new(MemoryStore::new(), FixedClock(9_000));
    assert!(system.save_game(1, "Mid Game", snapshot()));

    let loaded = system.load_game(1).expect("slot 1 should load");
    assert_eq!(loaded.name, "Mid Game");
    assert_eq!(loaded.timestamp, 9_000);
    assert_eq!(loaded.snapshot, snapshot());
    // The untouched infinity sentinel survives the JSON round trip.
    assert!(loaded.snapshot.player.stats.fastest_flip.is_infinite());
}

#[test]
fn slots_fill_lowest_first_until_exhausted() {
    let mut system = SaveSystem::new(MemoryStore::new(), FixedClock(1));
    for _ in 0..MAX_SAVE_SLOTS {
        let id = system.next_available_slot().expect("a slot should be free");
        let n: usize = id.trim_start_matches("slot_").parse().unwrap();
        assert!(system.save_game(n, "run", snapshot()));
    }
    assert_eq!(system.next_available_slot(), None);
    assert_eq!(system.save_stats().total_saves, MAX_SAVE_SLOTS);
}

#[test]
fn auto_save_is_a_separate_channel() {
    let mut system = SaveSystem::new(MemoryStore::new(), FixedClock(1));
    assert!(system.auto_save(snapshot()));
    assert_eq!(system.save_stats().total_saves, 0);
    assert!(system.save_stats().auto_save_exists);

    // Overwriting a numbered slot leaves the auto-save alone.
    assert!(system.save_game(1, "manual", snapshot()));
    assert!(system.load_auto_save().is_some());
}

#[test]
fn export_import_moves_a_save_between_slots() {
    let mut system = SaveSystem::new(MemoryStore::new(), FixedClock(77));
    system.save_game(2, "Traveling Save", snapshot());

    let exported = system.export_slot(2).expect("occupied slot exports");
    assert!(exported.contains("\"exportDate\":77"));

    assert!(system.import_slot(&exported, 5));
    let imported = system.load_game(5).expect("import should land in slot 5");
    assert_eq!(imported.id, "slot_5");
    assert_eq!(imported.name, "Traveling Save");
    assert_eq!(imported.snapshot, snapshot());
}

#[test]
fn import_validation_rejects_without_side_effects() {
    let mut system = SaveSystem::new(MemoryStore::new(), FixedClock(1));
    let missing_player = r#"{"currentMonth": 1, "portfolio": []}"#;
    assert!(!system.import_slot(missing_player, 1));
    assert!(system.load_game(1).is_none());
    assert_eq!(system.save_stats().total_saves, 0);
}

/// Store that accepts reads but refuses every write, like a browser with an
/// exhausted quota.
#[derive(Default)]
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded)
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("read-only".to_string()))
    }
}

#[test]
fn write_failures_degrade_to_false() {
    let mut system = SaveSystem::new(ReadOnlyStore, FixedClock(1));
    assert!(!system.save_game(1, "run", snapshot()));
    assert!(!system.auto_save(snapshot()));
    assert!(!system.delete_slot(1));
    assert!(!system.clear_auto_save());
    assert!(!system.clear_all());
    // Reads still work against the empty backend.
    assert!(system.load_game(1).is_none());
    assert!(system.save_slots().is_empty());
}
