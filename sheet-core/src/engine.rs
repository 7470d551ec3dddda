//! Sheet engine facade for presentation layers.
//!
//! [`SheetEngine`] owns the live record and the store behind it. The
//! presentation layer translates input events into [`Command`]s, dispatches
//! them through [`SheetEngine::apply`], and renders from the returned
//! [`Resolution`]s. Every command that changes the record is followed by a
//! save; load and reset replace the record wholesale.

use crate::dice::DieType;
use crate::persist::{self, PersistError, SheetStore};
use crate::record::{Attribute, CharacterRecord, Skill};
use crate::rules::{self, Command, Effect, Field, Resolution};
use tracing::{debug, info};

pub struct SheetEngine<S: SheetStore> {
    record: CharacterRecord,
    store: S,
}

impl<S: SheetStore> SheetEngine<S> {
    /// Start from whatever the store holds, or a blank record.
    pub fn new(store: S) -> Self {
        let record = persist::load_record_or_blank(&store);
        Self { record, store }
    }

    pub fn record(&self) -> &CharacterRecord {
        &self.record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Resolve and apply a command, persisting any record change.
    pub fn apply(&mut self, command: Command) -> Result<Resolution, PersistError> {
        debug!(?command, "dispatch");
        let resolution = rules::resolve(&self.record, command);
        rules::apply_effects(&mut self.record, &resolution.effects);

        let reset = resolution
            .effects
            .iter()
            .any(|e| matches!(e, Effect::RecordReset));
        if reset {
            // A reset empties the slot instead of saving a blank record
            persist::clear_record(&mut self.store)?;
        } else if resolution.effects.iter().any(Effect::mutates_record) {
            persist::save_record(&mut self.store, &self.record)?;
        }

        Ok(resolution)
    }

    /// Explicitly persist the current record (the "save" button).
    pub fn save(&mut self) -> Result<(), PersistError> {
        persist::save_record(&mut self.store, &self.record)
    }

    /// Replace the in-memory record with the persisted one, or a blank
    /// record when the slot is empty or unreadable (the "load" button).
    pub fn load(&mut self) -> &CharacterRecord {
        self.record = persist::load_record_or_blank(&self.store);
        info!(name = %self.record.name, "record loaded");
        &self.record
    }

    /// Blank the record and clear the persisted slot. Obtaining the user's
    /// confirmation is the caller's job.
    pub fn reset_record(&mut self) -> Result<Resolution, PersistError> {
        info!("sheet reset");
        self.apply(Command::ResetRecord)
    }

    // Convenience wrappers over `apply` for each operation the
    // presentation layer invokes.

    pub fn apply_attribute_change(
        &mut self,
        attribute: Attribute,
        raw: &str,
    ) -> Result<Resolution, PersistError> {
        self.apply(Command::ApplyAttributeChange {
            attribute,
            raw: raw.to_string(),
        })
    }

    pub fn apply_skill_toggle(
        &mut self,
        skill: Skill,
        proficient: bool,
    ) -> Result<Resolution, PersistError> {
        self.apply(Command::ToggleSkill { skill, proficient })
    }

    pub fn apply_field_change(
        &mut self,
        field: Field,
        raw: &str,
    ) -> Result<Resolution, PersistError> {
        self.apply(Command::ApplyFieldChange {
            field,
            raw: raw.to_string(),
        })
    }

    pub fn add_possession(&mut self, name: &str) -> Result<Resolution, PersistError> {
        self.apply(Command::AddPossession {
            name: name.to_string(),
        })
    }

    pub fn remove_possession(&mut self, index: usize) -> Result<Resolution, PersistError> {
        self.apply(Command::RemovePossession { index })
    }

    /// Roll a die. Touches neither the record nor the store.
    pub fn roll(&self, die: DieType) -> Resolution {
        rules::resolve(&self.record, Command::RollDice { die })
    }
}
