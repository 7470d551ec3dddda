//! Character record model and derived-value calculations.
//!
//! The record is a plain data structure: it is created blank, mutated
//! field-by-field through the command layer, persisted wholesale, and
//! replaced wholesale on load or reset. All derived values (attribute
//! modifiers, proficiency bonus, skill bonuses) are pure functions of the
//! record and are recomputed on demand rather than stored.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

// ============================================================================
// Attributes
// ============================================================================

/// The six attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Might,
    Agility,
    Endurance,
    Intellect,
    Perception,
    Presence,
}

impl Attribute {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Attribute::Might => "MGT",
            Attribute::Agility => "AGI",
            Attribute::Endurance => "END",
            Attribute::Intellect => "INT",
            Attribute::Perception => "PER",
            Attribute::Presence => "PRE",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Might => "Might",
            Attribute::Agility => "Agility",
            Attribute::Endurance => "Endurance",
            Attribute::Intellect => "Intellect",
            Attribute::Perception => "Perception",
            Attribute::Presence => "Presence",
        }
    }

    pub fn all() -> [Attribute; 6] {
        [
            Attribute::Might,
            Attribute::Agility,
            Attribute::Endurance,
            Attribute::Intellect,
            Attribute::Perception,
            Attribute::Presence,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Attribute scores container.
///
/// Values are stored as entered. The form widget advertises a 1-30 range
/// but nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeScores {
    pub might: i32,
    pub agility: i32,
    pub endurance: i32,
    pub intellect: i32,
    pub perception: i32,
    pub presence: i32,
}

impl AttributeScores {
    pub fn new(
        might: i32,
        agility: i32,
        endurance: i32,
        intellect: i32,
        perception: i32,
        presence: i32,
    ) -> Self {
        Self {
            might,
            agility,
            endurance,
            intellect,
            perception,
            presence,
        }
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Might => self.might,
            Attribute::Agility => self.agility,
            Attribute::Endurance => self.endurance,
            Attribute::Intellect => self.intellect,
            Attribute::Perception => self.perception,
            Attribute::Presence => self.presence,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        match attribute {
            Attribute::Might => self.might = value,
            Attribute::Agility => self.agility = value,
            Attribute::Endurance => self.endurance = value,
            Attribute::Intellect => self.intellect = value,
            Attribute::Perception => self.perception = value,
            Attribute::Presence => self.presence = value,
        }
    }

    pub fn modifier(&self, attribute: Attribute) -> i32 {
        modifier(self.get(attribute))
    }
}

impl Default for AttributeScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Modifier derived from an attribute value: `floor((value - 10) / 2)`.
///
/// Floor division, so a score of 9 maps to -1 rather than 0.
pub fn modifier(value: i32) -> i32 {
    (value - 10).div_euclid(2)
}

/// Proficiency bonus for a tier: `ceil(tier / 4) + 1`.
///
/// Computed for any integer tier, including zero and below.
pub fn proficiency_bonus(tier: i32) -> i32 {
    (tier + 3).div_euclid(4) + 1
}

// ============================================================================
// Skills
// ============================================================================

/// The fixed skill catalog, each skill linked to one governing attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Athletics,
    Acrobatics,
    SleightOfHand,
    Stealth,
    ArcaneLore,
    History,
    Investigation,
    Nature,
    Religion,
    AnimalHandling,
    Insight,
    Medicine,
    Alertness,
    Survival,
    Deception,
    Intimidation,
    Performance,
    Diplomacy,
}

impl Skill {
    pub fn attribute(&self) -> Attribute {
        match self {
            Skill::Athletics => Attribute::Might,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Attribute::Agility,
            Skill::ArcaneLore
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Attribute::Intellect,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Alertness
            | Skill::Survival => Attribute::Perception,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Diplomacy => {
                Attribute::Presence
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Athletics => "Athletics",
            Skill::Acrobatics => "Acrobatics",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::ArcaneLore => "Arcane Lore",
            Skill::History => "History",
            Skill::Investigation => "Investigation",
            Skill::Nature => "Nature",
            Skill::Religion => "Religion",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Insight => "Insight",
            Skill::Medicine => "Medicine",
            Skill::Alertness => "Alertness",
            Skill::Survival => "Survival",
            Skill::Deception => "Deception",
            Skill::Intimidation => "Intimidation",
            Skill::Performance => "Performance",
            Skill::Diplomacy => "Diplomacy",
        }
    }

    /// All skills in catalog order. Presentation rows index into this.
    pub fn all() -> [Skill; 18] {
        [
            Skill::Athletics,
            Skill::Acrobatics,
            Skill::SleightOfHand,
            Skill::Stealth,
            Skill::ArcaneLore,
            Skill::History,
            Skill::Investigation,
            Skill::Nature,
            Skill::Religion,
            Skill::AnimalHandling,
            Skill::Insight,
            Skill::Medicine,
            Skill::Alertness,
            Skill::Survival,
            Skill::Deception,
            Skill::Intimidation,
            Skill::Performance,
            Skill::Diplomacy,
        ]
    }

    /// Resolve a catalog index coming from the presentation layer.
    pub fn from_index(index: usize) -> Option<Skill> {
        Skill::all().get(index).copied()
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Character record
// ============================================================================

/// The complete character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub profession: String,
    pub tier: i32,
    pub ancestry: String,

    pub attributes: AttributeScores,

    pub current_life: i32,
    pub max_life: i32,
    pub defense_rating: i32,
    pub movement_rate: i32,

    pub skill_proficiencies: HashSet<Skill>,
    pub possessions: Vec<String>,

    pub notes: String,
    pub log: String,
}

impl CharacterRecord {
    /// A blank record with the fixed defaults.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            profession: String::new(),
            tier: 1,
            ancestry: String::new(),
            attributes: AttributeScores::default(),
            current_life: 0,
            max_life: 0,
            defense_rating: 10,
            movement_rate: 30,
            skill_proficiencies: HashSet::new(),
            possessions: Vec::new(),
            notes: String::new(),
            log: String::new(),
        }
    }

    pub fn proficiency_bonus(&self) -> i32 {
        proficiency_bonus(self.tier)
    }

    pub fn is_proficient(&self, skill: Skill) -> bool {
        self.skill_proficiencies.contains(&skill)
    }

    pub fn skill_bonus(&self, skill: Skill) -> i32 {
        let attribute_mod = self.attributes.modifier(skill.attribute());
        if self.is_proficient(skill) {
            attribute_mod + self.proficiency_bonus()
        } else {
            attribute_mod
        }
    }

    /// Modifiers for all six attributes.
    pub fn attribute_modifiers(&self) -> HashMap<Attribute, i32> {
        Attribute::all()
            .iter()
            .map(|&attribute| (attribute, self.attributes.modifier(attribute)))
            .collect()
    }

    /// Skill bonuses in catalog order, one per entry.
    pub fn skill_bonuses(&self) -> Vec<i32> {
        Skill::all()
            .iter()
            .map(|&skill| self.skill_bonus(skill))
            .collect()
    }

    /// Quickness (initiative) bonus, derived from agility.
    pub fn quickness_bonus(&self) -> i32 {
        self.attributes.modifier(Attribute::Agility)
    }
}

impl Default for CharacterRecord {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier() {
        assert_eq!(modifier(10), 0);
        assert_eq!(modifier(20), 5);
        assert_eq!(modifier(16), 3);
        assert_eq!(modifier(1), -5);

        // Floor division, not truncation, for odd scores below 10
        assert_eq!(modifier(9), -1);
        assert_eq!(modifier(7), -2);
        assert_eq!(modifier(11), 0);
        assert_eq!(modifier(-2), -6);
    }

    #[test]
    fn test_proficiency_bonus() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(8), 3);
        assert_eq!(proficiency_bonus(9), 4);

        // No guard on tier: the formula just keeps going
        assert_eq!(proficiency_bonus(0), 1);
        assert_eq!(proficiency_bonus(-1), 1);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn test_attribute_scores() {
        let mut scores = AttributeScores::new(16, 14, 12, 10, 8, 6);
        assert_eq!(scores.modifier(Attribute::Might), 3);
        assert_eq!(scores.modifier(Attribute::Agility), 2);
        assert_eq!(scores.modifier(Attribute::Endurance), 1);
        assert_eq!(scores.modifier(Attribute::Intellect), 0);
        assert_eq!(scores.modifier(Attribute::Perception), -1);
        assert_eq!(scores.modifier(Attribute::Presence), -2);

        scores.set(Attribute::Intellect, 16);
        assert_eq!(scores.get(Attribute::Intellect), 16);
        assert_eq!(scores.modifier(Attribute::Intellect), 3);
    }

    #[test]
    fn test_blank_defaults() {
        let record = CharacterRecord::blank();
        assert_eq!(record.tier, 1);
        assert_eq!(record.attributes, AttributeScores::default());
        assert_eq!(record.current_life, 0);
        assert_eq!(record.max_life, 0);
        assert_eq!(record.defense_rating, 10);
        assert_eq!(record.movement_rate, 30);
        assert!(record.name.is_empty());
        assert!(record.skill_proficiencies.is_empty());
        assert!(record.possessions.is_empty());
    }

    #[test]
    fn test_skill_catalog() {
        assert_eq!(Skill::all().len(), 18);
        assert_eq!(Skill::from_index(0), Some(Skill::Athletics));
        assert_eq!(Skill::from_index(17), Some(Skill::Diplomacy));
        assert_eq!(Skill::from_index(18), None);
        assert_eq!(Skill::Athletics.attribute(), Attribute::Might);
        assert_eq!(Skill::Stealth.attribute(), Attribute::Agility);
        assert_eq!(Skill::Alertness.attribute(), Attribute::Perception);
        assert_eq!(Skill::Diplomacy.attribute(), Attribute::Presence);
    }

    #[test]
    fn test_skill_bonus() {
        let mut record = CharacterRecord::blank();
        record.tier = 4;
        record.attributes.intellect = 16;

        // Unproficient: just the attribute modifier
        assert_eq!(record.skill_bonus(Skill::ArcaneLore), 3);

        // Proficient: modifier plus proficiency bonus (tier 4 -> +2)
        record.skill_proficiencies.insert(Skill::ArcaneLore);
        assert_eq!(record.skill_bonus(Skill::ArcaneLore), 5);

        // Other intellect skills are unaffected by the proficiency
        assert_eq!(record.skill_bonus(Skill::History), 3);
    }

    #[test]
    fn test_all_derived_values() {
        let mut record = CharacterRecord::blank();
        record.attributes.agility = 14;

        let mods = record.attribute_modifiers();
        assert_eq!(mods.len(), 6);
        assert_eq!(mods[&Attribute::Agility], 2);
        assert_eq!(mods[&Attribute::Might], 0);

        let bonuses = record.skill_bonuses();
        assert_eq!(bonuses.len(), 18);
        assert_eq!(bonuses[1], 2); // Acrobatics follows agility
        assert_eq!(bonuses[0], 0); // Athletics follows might

        assert_eq!(record.quickness_bonus(), 2);
    }
}
