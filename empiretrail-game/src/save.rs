//! Save system: five numbered slots plus one independent auto-save.
//!
//! Numbered slots live together in one JSON document under
//! [`SAVE_SLOTS_KEY`]; every mutation is a whole-document read-modify-write.
//! The auto-save is a single record under its own key so routine background
//! writes never touch the slot map. The engine assumes a single writer.
//!
//! Persistence failures never panic and never surface as errors here: they
//! are logged and degrade to `false`, `None`, or an empty map so the game
//! keeps running on whatever state is in memory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Clock;
use crate::data::{GameEvent, GamePhase, InvestmentProperty, Player};
use crate::storage::{AUTO_SAVE_KEY, KeyValueStore, SAVE_SLOTS_KEY};

/// Number of numbered save slots.
pub const MAX_SAVE_SLOTS: usize = 5;

/// Version stamped into every save record. Loading a record with a
/// different version logs a warning but still returns the record.
pub const SAVE_VERSION: &str = "1.0.0";

/// Storage id for a numbered slot (`slot_1` through `slot_5`).
#[must_use]
pub fn slot_id(slot: usize) -> String {
    format!("slot_{slot}")
}

/// Everything needed to resume a session. Serialized inline into the save
/// record, camelCase per the persistence contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub player: Player,
    pub current_month: u32,
    pub portfolio: Vec<InvestmentProperty>,
    #[serde(default)]
    pub current_event: Option<GameEvent>,
    #[serde(default)]
    pub current_bank_balance: i64,
    /// Absent in saves written before cities were tracked.
    #[serde(default)]
    pub current_city: Option<String>,
    #[serde(default)]
    pub game_state: GamePhase,
}

/// One save record: slot metadata plus the snapshot, flattened so the stored
/// JSON is a single flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGame {
    pub id: String,
    pub name: String,
    /// Unix milliseconds at save time.
    pub timestamp: u64,
    pub version: String,
    #[serde(flatten)]
    pub snapshot: GameSnapshot,
}

/// Display metadata for one numbered slot, occupied or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub id: String,
    pub name: Option<String>,
    pub timestamp: Option<u64>,
    pub has_data: bool,
}

/// Aggregate numbers for the save-management screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveStats {
    /// Occupied numbered slots.
    pub total_saves: usize,
    pub total_slots: usize,
    /// Most recent timestamp across numbered slots; auto-save excluded.
    pub last_save_time: Option<u64>,
    pub auto_save_exists: bool,
}

/// Slot-based persistence over a [`KeyValueStore`].
pub struct SaveSystem<S, C = crate::SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> SaveSystem<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    fn read_slots(&self) -> HashMap<String, SaveGame> {
        match self.store.load(SAVE_SLOTS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(slots) => slots,
                Err(e) => {
                    log::error!("unreadable save-slot data, treating as empty: {e}");
                    HashMap::new()
                }
            },
            Ok(None) => HashMap::new(),
            Err(e) => {
                log::error!("failed to read save slots: {e}");
                HashMap::new()
            }
        }
    }

    fn write_slots(&mut self, slots: &HashMap<String, SaveGame>) -> bool {
        match serde_json::to_string(slots) {
            Ok(json) => match self.store.save(SAVE_SLOTS_KEY, &json) {
                Ok(()) => true,
                Err(e) => {
                    log::error!("failed to write save slots: {e}");
                    false
                }
            },
            Err(e) => {
                log::error!("failed to serialize save slots: {e}");
                false
            }
        }
    }

    /// Write a snapshot into a numbered slot, replacing any previous save
    /// there. Returns `false` on an out-of-range slot or a storage failure.
    pub fn save_game(&mut self, slot: usize, name: &str, snapshot: GameSnapshot) -> bool {
        if !(1..=MAX_SAVE_SLOTS).contains(&slot) {
            log::error!("save rejected: slot {slot} out of range");
            return false;
        }
        let id = slot_id(slot);
        let record = SaveGame {
            id: id.clone(),
            name: name.to_string(),
            timestamp: self.clock.now_millis(),
            version: SAVE_VERSION.to_string(),
            snapshot,
        };
        let mut slots = self.read_slots();
        slots.insert(id, record);
        self.write_slots(&slots)
    }

    /// Load a numbered slot. A version other than [`SAVE_VERSION`] is
    /// tolerated with a warning.
    #[must_use]
    pub fn load_game(&self, slot: usize) -> Option<SaveGame> {
        let save = self.read_slots().remove(&slot_id(slot))?;
        if save.version != SAVE_VERSION {
            log::warn!(
                "loading save '{}' with version {} (current {SAVE_VERSION})",
                save.id,
                save.version
            );
        }
        Some(save)
    }

    /// Write the auto-save record. Independent of the numbered slots.
    pub fn auto_save(&mut self, snapshot: GameSnapshot) -> bool {
        let record = SaveGame {
            id: "auto".to_string(),
            name: "Auto Save".to_string(),
            timestamp: self.clock.now_millis(),
            version: SAVE_VERSION.to_string(),
            snapshot,
        };
        match serde_json::to_string(&record) {
            Ok(json) => match self.store.save(AUTO_SAVE_KEY, &json) {
                Ok(()) => true,
                Err(e) => {
                    log::error!("auto-save failed: {e}");
                    false
                }
            },
            Err(e) => {
                log::error!("failed to serialize auto-save: {e}");
                false
            }
        }
    }

    /// Load the auto-save record, if one exists and parses.
    #[must_use]
    pub fn load_auto_save(&self) -> Option<SaveGame> {
        match self.store.load(AUTO_SAVE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(save) => Some(save),
                Err(e) => {
                    log::error!("unreadable auto-save: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::error!("failed to read auto-save: {e}");
                None
            }
        }
    }

    /// Snapshot of the whole slot map; empty when nothing is saved or the
    /// data is unreadable.
    #[must_use]
    pub fn save_slots(&self) -> HashMap<String, SaveGame> {
        self.read_slots()
    }

    /// Delete a numbered slot. Deleting an empty slot succeeds.
    pub fn delete_slot(&mut self, slot: usize) -> bool {
        let mut slots = self.read_slots();
        slots.remove(&slot_id(slot));
        self.write_slots(&slots)
    }

    /// Remove the auto-save record.
    pub fn clear_auto_save(&mut self) -> bool {
        match self.store.remove(AUTO_SAVE_KEY) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to clear auto-save: {e}");
                false
            }
        }
    }

    /// Remove every numbered slot and the auto-save.
    pub fn clear_all(&mut self) -> bool {
        let slots_cleared = match self.store.remove(SAVE_SLOTS_KEY) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to clear save slots: {e}");
                false
            }
        };
        slots_cleared && self.clear_auto_save()
    }

    /// Lowest-numbered free slot id, or `None` when all five are occupied.
    #[must_use]
    pub fn next_available_slot(&self) -> Option<String> {
        let slots = self.read_slots();
        (1..=MAX_SAVE_SLOTS)
            .map(slot_id)
            .find(|id| !slots.contains_key(id))
    }

    /// Display metadata for one numbered slot.
    #[must_use]
    pub fn slot_info(&self, slot: usize) -> SlotInfo {
        let id = slot_id(slot);
        match self.read_slots().remove(&id) {
            Some(save) => SlotInfo {
                id,
                name: Some(save.name),
                timestamp: Some(save.timestamp),
                has_data: true,
            },
            None => SlotInfo {
                id,
                name: None,
                timestamp: None,
                has_data: false,
            },
        }
    }

    /// Export a slot as a standalone JSON document, stamped with the export
    /// time and version. `None` for an empty slot.
    #[must_use]
    pub fn export_slot(&self, slot: usize) -> Option<String> {
        let save = self.read_slots().remove(&slot_id(slot))?;
        let mut value = match serde_json::to_value(&save) {
            Ok(value) => value,
            Err(e) => {
                log::error!("failed to serialize export: {e}");
                return None;
            }
        };
        if let Some(map) = value.as_object_mut() {
            map.insert(
                "exportDate".to_string(),
                Value::from(self.clock.now_millis()),
            );
            map.insert("exportVersion".to_string(), Value::from(SAVE_VERSION));
        }
        match serde_json::to_string(&value) {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("failed to serialize export: {e}");
                None
            }
        }
    }

    /// Import an exported document into a numbered slot.
    ///
    /// The document must carry `player`, `currentMonth`, and `portfolio`;
    /// anything else is rejected with `false` and no write. Optional fields
    /// take their snapshot defaults. The record's id is rewritten to the
    /// target slot.
    pub fn import_slot(&mut self, json: &str, slot: usize) -> bool {
        if !(1..=MAX_SAVE_SLOTS).contains(&slot) {
            log::error!("import rejected: slot {slot} out of range");
            return false;
        }
        let value: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                log::error!("import rejected: not valid JSON: {e}");
                return false;
            }
        };
        for field in ["player", "currentMonth", "portfolio"] {
            if value.get(field).is_none() {
                log::error!("import rejected: missing required field '{field}'");
                return false;
            }
        }
        let snapshot: GameSnapshot = match serde_json::from_value(value.clone()) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("import rejected: malformed save data: {e}");
                return false;
            }
        };
        let id = slot_id(slot);
        let record = SaveGame {
            id: id.clone(),
            name: value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Imported Save")
                .to_string(),
            timestamp: value
                .get("timestamp")
                .and_then(Value::as_u64)
                .unwrap_or_else(|| self.clock.now_millis()),
            version: value
                .get("version")
                .and_then(Value::as_str)
                .unwrap_or(SAVE_VERSION)
                .to_string(),
            snapshot,
        };
        let mut slots = self.read_slots();
        slots.insert(id, record);
        self.write_slots(&slots)
    }

    /// Aggregate slot occupancy numbers.
    #[must_use]
    pub fn save_stats(&self) -> SaveStats {
        let slots = self.read_slots();
        SaveStats {
            total_saves: slots.len(),
            total_slots: MAX_SAVE_SLOTS,
            last_save_time: slots.values().map(|s| s.timestamp).max(),
            auto_save_exists: self.load_auto_save().is_some(),
        }
    }
}
