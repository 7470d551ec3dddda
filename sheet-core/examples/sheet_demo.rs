//! Walk a character sheet through its paces without a UI

use sheet_core::record::{Attribute, Skill};
use sheet_core::rules::Field;
use sheet_core::{DieType, MemoryStore, SheetEngine};

fn main() {
    println!("=== Sheet engine demo ===\n");

    let mut engine = SheetEngine::new(MemoryStore::new());

    engine.apply_field_change(Field::Name, "Thistle").unwrap();
    engine.apply_field_change(Field::Profession, "Scout").unwrap();
    engine.apply_field_change(Field::Tier, "5").unwrap();
    engine.apply_attribute_change(Attribute::Agility, "16").unwrap();
    engine.apply_skill_toggle(Skill::Stealth, true).unwrap();
    engine.add_possession("Grappling hook").unwrap();

    let record = engine.record();
    println!("Name:        {}", record.name);
    println!("Profession:  {} (tier {})", record.profession, record.tier);
    println!("Proficiency: +{}", record.proficiency_bonus());
    println!("Quickness:   {:+}", record.quickness_bonus());
    println!();

    println!("Skills:");
    for (skill, bonus) in Skill::all().iter().zip(record.skill_bonuses()) {
        let mark = if record.is_proficient(*skill) { "*" } else { " " };
        println!("  {mark} {:<16} {:+} ({})", skill.name(), bonus, skill.attribute());
    }
    println!();

    for die in [DieType::D20, DieType::D6] {
        let resolution = engine.roll(die);
        if let Some(message) = resolution.message {
            println!("{message}");
        }
    }

    println!("\nPossessions: {:?}", engine.record().possessions);
}
