//! Command resolution for the character sheet.
//!
//! The pipeline has three steps:
//! 1. The presentation layer translates a raw input event into a [`Command`]
//! 2. [`resolve`] turns the command into [`Effect`]s describing state changes
//! 3. [`apply_effect`] applies those effects to the record
//!
//! Resolution never mutates the record, so rendering code can inspect a
//! [`Resolution`] before (or instead of) applying it. Effects carry the
//! freshly derived values the presentation layer needs to redraw, and the
//! resolution message is the toast text, when one is warranted.

use crate::dice::{self, DieType};
use crate::record::{modifier, Attribute, CharacterRecord, Skill};
use serde::{Deserialize, Serialize};

/// Scalar record fields addressable by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Name,
    Profession,
    Tier,
    Ancestry,
    CurrentLife,
    MaxLife,
    DefenseRating,
    MovementRate,
    Notes,
    Log,
}

impl Field {
    /// Whether raw input for this field is coerced to a number.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::Tier
                | Field::CurrentLife
                | Field::MaxLife
                | Field::DefenseRating
                | Field::MovementRate
        )
    }

    /// The wire name used by form inputs.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Profession => "profession",
            Field::Tier => "tier",
            Field::Ancestry => "ancestry",
            Field::CurrentLife => "currentLife",
            Field::MaxLife => "maxLife",
            Field::DefenseRating => "defenseRating",
            Field::MovementRate => "movementRate",
            Field::Notes => "notes",
            Field::Log => "log",
        }
    }

    /// Resolve a wire name coming from a form input.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::all().into_iter().find(|f| f.name() == name)
    }

    pub fn all() -> [Field; 10] {
        [
            Field::Name,
            Field::Profession,
            Field::Tier,
            Field::Ancestry,
            Field::CurrentLife,
            Field::MaxLife,
            Field::DefenseRating,
            Field::MovementRate,
            Field::Notes,
            Field::Log,
        ]
    }
}

/// A typed value produced by coercing raw field input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(i32),
}

/// A discrete update requested by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Command {
    /// Set an attribute from raw input (fallback 10 on garbage).
    ApplyAttributeChange { attribute: Attribute, raw: String },

    /// Mark or unmark a skill as proficient.
    ToggleSkill { skill: Skill, proficient: bool },

    /// Set a scalar field from raw input (numeric fields fall back to 0).
    ApplyFieldChange { field: Field, raw: String },

    /// Append an item to the possession list.
    AddPossession { name: String },

    /// Remove the possession at a catalog index.
    RemovePossession { index: usize },

    /// Replace the record with a blank one. Callers are expected to have
    /// confirmed the destruction with the user first.
    ResetRecord,

    /// Roll a die. Leaves the record untouched.
    RollDice { die: DieType },
}

/// A state change produced by resolving a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Effect {
    /// An attribute value changed; carries the new modifier for display.
    AttributeChanged {
        attribute: Attribute,
        value: i32,
        modifier: i32,
    },

    /// A skill proficiency was toggled; carries the new total bonus.
    SkillToggled {
        skill: Skill,
        proficient: bool,
        bonus: i32,
    },

    /// A scalar field changed.
    FieldChanged { field: Field, value: FieldValue },

    /// An item was appended to the possessions.
    PossessionAdded { name: String, count: usize },

    /// An item was removed from the possessions.
    PossessionRemoved {
        index: usize,
        name: String,
        remaining: usize,
    },

    /// The record was replaced with a blank one.
    RecordReset,

    /// A die was rolled.
    DiceRolled { die: DieType, result: u32 },
}

impl Effect {
    /// Whether applying this effect changes the record.
    pub fn mutates_record(&self) -> bool {
        !matches!(self, Effect::DiceRolled { .. })
    }
}

/// The result of resolving a command.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub effects: Vec<Effect>,
    /// Toast text for the presentation layer, when the action warrants one.
    pub message: Option<String>,
}

impl Resolution {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            effects: Vec::new(),
            message: Some(message.into()),
        }
    }

    pub fn silent() -> Self {
        Self {
            effects: Vec::new(),
            message: None,
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Coerce raw numeric input the way the form does: leading digits parse,
/// anything else falls back.
pub fn parse_number(raw: &str, fallback: i32) -> i32 {
    let trimmed = raw.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return fallback;
    }
    digits
        .parse::<i32>()
        .map(|value| sign * value)
        .unwrap_or(fallback)
}

/// Resolve a command against the current record, producing the effects to
/// apply and the message to show.
pub fn resolve(record: &CharacterRecord, command: Command) -> Resolution {
    match command {
        Command::ApplyAttributeChange { attribute, raw } => {
            let value = parse_number(&raw, 10);
            Resolution::silent().with_effect(Effect::AttributeChanged {
                attribute,
                value,
                modifier: modifier(value),
            })
        }

        Command::ToggleSkill { skill, proficient } => {
            // The bonus depends only on the linked attribute and the flag,
            // so it already reflects the record after the toggle.
            let attribute_mod = record.attributes.modifier(skill.attribute());
            let bonus = if proficient {
                attribute_mod + record.proficiency_bonus()
            } else {
                attribute_mod
            };
            Resolution::silent().with_effect(Effect::SkillToggled {
                skill,
                proficient,
                bonus,
            })
        }

        Command::ApplyFieldChange { field, raw } => {
            let value = if field.is_numeric() {
                FieldValue::Number(parse_number(&raw, 0))
            } else {
                FieldValue::Text(raw)
            };
            Resolution::silent().with_effect(Effect::FieldChanged { field, value })
        }

        Command::AddPossession { name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Resolution::silent();
            }
            Resolution::new("Item added").with_effect(Effect::PossessionAdded {
                count: record.possessions.len() + 1,
                name,
            })
        }

        Command::RemovePossession { index } => match record.possessions.get(index) {
            Some(name) => {
                Resolution::new("Item removed").with_effect(Effect::PossessionRemoved {
                    index,
                    name: name.clone(),
                    remaining: record.possessions.len() - 1,
                })
            }
            None => Resolution::silent(),
        },

        Command::ResetRecord => Resolution::new("Sheet cleared").with_effect(Effect::RecordReset),

        Command::RollDice { die } => {
            let result = dice::roll(die);
            Resolution::new(format!("Rolled {result} on {die}"))
                .with_effect(Effect::DiceRolled { die, result })
        }
    }
}

/// Apply a batch of effects to the record.
pub fn apply_effects(record: &mut CharacterRecord, effects: &[Effect]) {
    for effect in effects {
        apply_effect(record, effect);
    }
}

/// Apply a single effect to the record.
pub fn apply_effect(record: &mut CharacterRecord, effect: &Effect) {
    match effect {
        Effect::AttributeChanged {
            attribute, value, ..
        } => {
            record.attributes.set(*attribute, *value);
        }
        Effect::SkillToggled {
            skill, proficient, ..
        } => {
            if *proficient {
                record.skill_proficiencies.insert(*skill);
            } else {
                record.skill_proficiencies.remove(skill);
            }
        }
        Effect::FieldChanged { field, value } => {
            apply_field(record, *field, value);
        }
        Effect::PossessionAdded { name, .. } => {
            record.possessions.push(name.clone());
        }
        Effect::PossessionRemoved { index, .. } => {
            if *index < record.possessions.len() {
                record.possessions.remove(*index);
            }
        }
        Effect::RecordReset => {
            *record = CharacterRecord::blank();
        }
        Effect::DiceRolled { .. } => {}
    }
}

fn apply_field(record: &mut CharacterRecord, field: Field, value: &FieldValue) {
    match (field, value) {
        (Field::Name, FieldValue::Text(text)) => record.name = text.clone(),
        (Field::Profession, FieldValue::Text(text)) => record.profession = text.clone(),
        (Field::Ancestry, FieldValue::Text(text)) => record.ancestry = text.clone(),
        (Field::Notes, FieldValue::Text(text)) => record.notes = text.clone(),
        (Field::Log, FieldValue::Text(text)) => record.log = text.clone(),
        (Field::Tier, FieldValue::Number(n)) => record.tier = *n,
        (Field::CurrentLife, FieldValue::Number(n)) => record.current_life = *n,
        (Field::MaxLife, FieldValue::Number(n)) => record.max_life = *n,
        (Field::DefenseRating, FieldValue::Number(n)) => record.defense_rating = *n,
        (Field::MovementRate, FieldValue::Number(n)) => record.movement_rate = *n,
        // Mismatched field/value pairings are dropped rather than surfaced
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("14", 0), 14);
        assert_eq!(parse_number("  14 ", 0), 14);
        assert_eq!(parse_number("-3", 0), -3);
        assert_eq!(parse_number("+7", 0), 7);
        assert_eq!(parse_number("12abc", 0), 12);
        assert_eq!(parse_number("", 10), 10);
        assert_eq!(parse_number("abc", 10), 10);
        assert_eq!(parse_number("-", 10), 10);
        assert_eq!(parse_number("99999999999999999999", 10), 10);
    }

    #[test]
    fn test_attribute_change_coercion() {
        let record = CharacterRecord::blank();
        let resolution = resolve(
            &record,
            Command::ApplyAttributeChange {
                attribute: Attribute::Might,
                raw: "banana".to_string(),
            },
        );
        assert!(matches!(
            resolution.effects.as_slice(),
            [Effect::AttributeChanged {
                attribute: Attribute::Might,
                value: 10,
                modifier: 0,
            }]
        ));
    }

    #[test]
    fn test_field_change_coercion() {
        let mut record = CharacterRecord::blank();

        let resolution = resolve(
            &record,
            Command::ApplyFieldChange {
                field: Field::MaxLife,
                raw: "not a number".to_string(),
            },
        );
        apply_effects(&mut record, &resolution.effects);
        assert_eq!(record.max_life, 0);

        let resolution = resolve(
            &record,
            Command::ApplyFieldChange {
                field: Field::Name,
                raw: "Yevgenia".to_string(),
            },
        );
        apply_effects(&mut record, &resolution.effects);
        assert_eq!(record.name, "Yevgenia");
    }

    #[test]
    fn test_skill_toggle_reports_post_toggle_bonus() {
        let mut record = CharacterRecord::blank();
        record.tier = 4;
        record.attributes.intellect = 16;

        let resolution = resolve(
            &record,
            Command::ToggleSkill {
                skill: Skill::ArcaneLore,
                proficient: true,
            },
        );
        match resolution.effects.as_slice() {
            [Effect::SkillToggled { bonus, .. }] => assert_eq!(*bonus, 5),
            other => panic!("unexpected effects: {other:?}"),
        }

        apply_effects(&mut record, &resolution.effects);
        assert!(record.is_proficient(Skill::ArcaneLore));
        assert_eq!(record.skill_bonus(Skill::ArcaneLore), 5);
    }

    #[test]
    fn test_possession_flow() {
        let mut record = CharacterRecord::blank();
        record.possessions = vec!["Lantern".to_string()];

        let resolution = resolve(
            &record,
            Command::AddPossession {
                name: "  Sword  ".to_string(),
            },
        );
        assert_eq!(resolution.message.as_deref(), Some("Item added"));
        apply_effects(&mut record, &resolution.effects);
        assert_eq!(record.possessions, vec!["Lantern", "Sword"]);

        let resolution = resolve(&record, Command::RemovePossession { index: 1 });
        apply_effects(&mut record, &resolution.effects);
        assert_eq!(record.possessions, vec!["Lantern"]);
    }

    #[test]
    fn test_add_blank_possession_is_noop() {
        let record = CharacterRecord::blank();
        let resolution = resolve(
            &record,
            Command::AddPossession {
                name: "   ".to_string(),
            },
        );
        assert!(resolution.effects.is_empty());
        assert!(resolution.message.is_none());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut record = CharacterRecord::blank();
        record.possessions = vec!["Rope".to_string()];

        let resolution = resolve(&record, Command::RemovePossession { index: 5 });
        assert!(resolution.effects.is_empty());
        apply_effects(&mut record, &resolution.effects);
        assert_eq!(record.possessions, vec!["Rope"]);
    }

    #[test]
    fn test_reset_effect() {
        let mut record = CharacterRecord::blank();
        record.name = "Doomed".to_string();
        record.tier = 9;
        record.skill_proficiencies.insert(Skill::Stealth);

        let resolution = resolve(&record, Command::ResetRecord);
        assert_eq!(resolution.message.as_deref(), Some("Sheet cleared"));
        apply_effects(&mut record, &resolution.effects);
        assert_eq!(record, CharacterRecord::blank());
    }

    #[test]
    fn test_roll_does_not_mutate() {
        let mut record = CharacterRecord::blank();
        let before = record.clone();

        let resolution = resolve(&record, Command::RollDice { die: DieType::D20 });
        match resolution.effects.as_slice() {
            [Effect::DiceRolled { result, .. }] => {
                assert!((1..=20).contains(result));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
        assert!(!resolution.effects[0].mutates_record());

        apply_effects(&mut record, &resolution.effects);
        assert_eq!(record, before);
    }

    #[test]
    fn test_field_wire_names() {
        for field in Field::all() {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("newPossession"), None);
    }
}
