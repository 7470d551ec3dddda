//! Character sheet engine with derived-stat rules.
//!
//! This crate provides:
//! - The character record model and blank-state construction
//! - Pure derived-value calculations (attribute modifiers, proficiency
//!   bonus, skill bonuses)
//! - A command/effect layer the presentation host drives with input events
//! - Persistence of the record as a single JSON blob in a key-value store
//!
//! Rendering, event wiring, toasts, and dice animation are the host's
//! concern: the engine hands back effects and messages, never markup.
//!
//! # Quick Start
//!
//! ```
//! use sheet_core::record::{Attribute, Skill};
//! use sheet_core::{MemoryStore, SheetEngine};
//!
//! let mut engine = SheetEngine::new(MemoryStore::new());
//!
//! engine.apply_attribute_change(Attribute::Intellect, "16")?;
//! engine.apply_skill_toggle(Skill::ArcaneLore, true)?;
//!
//! assert_eq!(engine.record().skill_bonus(Skill::ArcaneLore), 5);
//! # Ok::<(), sheet_core::PersistError>(())
//! ```

pub mod dice;
pub mod engine;
pub mod persist;
pub mod record;
pub mod rules;

// Primary public API
pub use dice::DieType;
pub use engine::SheetEngine;
pub use persist::{FileStore, MemoryStore, PersistError, SheetStore, STORAGE_KEY};
pub use record::{modifier, proficiency_bonus, Attribute, AttributeScores, CharacterRecord, Skill};
pub use rules::{apply_effect, apply_effects, resolve, Command, Effect, Field, FieldValue, Resolution};
