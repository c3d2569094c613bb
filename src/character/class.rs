//! Character classes and backgrounds.

use super::attributes::{Attributes, StatType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum CharacterClass {
    Ranger,
    Warrior,
    WarriorKing,
    Pirate,
    IceMage,
    Necromancer,
    Dragon,
    Angel,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 8] = [
        CharacterClass::Ranger,
        CharacterClass::Warrior,
        CharacterClass::WarriorKing,
        CharacterClass::Pirate,
        CharacterClass::IceMage,
        CharacterClass::Necromancer,
        CharacterClass::Dragon,
        CharacterClass::Angel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Warrior => "Warrior",
            CharacterClass::WarriorKing => "Warrior King",
            CharacterClass::Pirate => "Pirate",
            CharacterClass::IceMage => "Ice Mage",
            CharacterClass::Necromancer => "Necromancer",
            CharacterClass::Dragon => "Dragon",
            CharacterClass::Angel => "Angel",
        }
    }

    /// Identifier used as the prefix of skill ids.
    pub fn id(&self) -> &'static str {
        match self {
            CharacterClass::Ranger => "ranger",
            CharacterClass::Warrior => "warrior",
            CharacterClass::WarriorKing => "warriorKing",
            CharacterClass::Pirate => "pirate",
            CharacterClass::IceMage => "iceMage",
            CharacterClass::Necromancer => "necromancer",
            CharacterClass::Dragon => "dragon",
            CharacterClass::Angel => "angel",
        }
    }

    /// Flat bonuses on top of the baseline 10, primary stat first.
    pub fn stat_bonuses(&self) -> [(StatType, i32); 3] {
        use StatType::*;
        match self {
            CharacterClass::Ranger => [(Dexterity, 3), (Wisdom, 2), (Strength, 1)],
            CharacterClass::Warrior => [(Strength, 3), (Constitution, 2), (Dexterity, 1)],
            CharacterClass::WarriorKing => [(Strength, 3), (Charisma, 2), (Constitution, 1)],
            CharacterClass::Pirate => [(Charisma, 3), (Dexterity, 2), (Strength, 1)],
            CharacterClass::IceMage => [(Intelligence, 3), (Wisdom, 2), (Constitution, 1)],
            CharacterClass::Necromancer => [(Intelligence, 3), (Constitution, 2), (Wisdom, 1)],
            CharacterClass::Dragon => [(Constitution, 3), (Strength, 2), (Wisdom, 1)],
            CharacterClass::Angel => [(Wisdom, 3), (Charisma, 2), (Dexterity, 1)],
        }
    }

    pub fn primary_stat(&self) -> StatType {
        self.stat_bonuses()[0].0
    }

    /// Baseline stats plus class bonuses. Prestige resets to this.
    pub fn base_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        for (stat, bonus) in self.stat_bonuses() {
            attrs.add(stat, bonus);
        }
        attrs
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Background {
    Student,
    Athlete,
    Artist,
    Leader,
    Explorer,
}

impl Background {
    pub const ALL: [Background; 5] = [
        Background::Student,
        Background::Athlete,
        Background::Artist,
        Background::Leader,
        Background::Explorer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Background::Student => "Student",
            Background::Athlete => "Athlete",
            Background::Artist => "Artist",
            Background::Leader => "Leader",
            Background::Explorer => "Explorer",
        }
    }

    /// Two +1 bonuses applied once at character creation.
    pub fn stat_bonuses(&self) -> [(StatType, i32); 2] {
        use StatType::*;
        match self {
            Background::Student => [(Intelligence, 1), (Wisdom, 1)],
            Background::Athlete => [(Strength, 1), (Constitution, 1)],
            Background::Artist => [(Dexterity, 1), (Charisma, 1)],
            Background::Leader => [(Charisma, 1), (Wisdom, 1)],
            Background::Explorer => [(Dexterity, 1), (Constitution, 1)],
        }
    }
}
