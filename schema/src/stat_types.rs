use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

/// The stats a battle overlay can modify with stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum StatType {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Attack => write!(f, "Attack"),
            StatType::Defense => write!(f, "Defense"),
            StatType::SpecialAttack => write!(f, "Special Attack"),
            StatType::SpecialDefense => write!(f, "Special Defense"),
            StatType::Speed => write!(f, "Speed"),
            StatType::Accuracy => write!(f, "Accuracy"),
            StatType::Evasion => write!(f, "Evasion"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::User => write!(f, "User"),
            Target::Target => write!(f, "Target"),
        }
    }
}

/// One side of a battle. Team 1 always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }

    pub fn to_index(self) -> usize {
        match self {
            Side::Team1 => 0,
            Side::Team2 => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Team1 => write!(f, "Team 1"),
            Side::Team2 => write!(f, "Team 2"),
        }
    }
}

/// Immutable per-creature stats, fixed when the creature is built from catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub max_health: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn new(
        max_health: u16,
        attack: u16,
        defense: u16,
        special_attack: u16,
        special_defense: u16,
        speed: u16,
    ) -> Self {
        Self {
            max_health,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        }
    }

    /// Base value for a stageable stat. Accuracy and evasion have no base value.
    pub fn base_value(&self, stat: StatType) -> Option<u16> {
        match stat {
            StatType::Attack => Some(self.attack),
            StatType::Defense => Some(self.defense),
            StatType::SpecialAttack => Some(self.special_attack),
            StatType::SpecialDefense => Some(self.special_defense),
            StatType::Speed => Some(self.speed),
            StatType::Accuracy | StatType::Evasion => None,
        }
    }

    /// All six values must be positive.
    pub fn is_valid(&self) -> bool {
        [
            self.max_health,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
        .iter()
        .all(|&value| value > 0)
    }
}
