use crate::{BaseStats, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The screen the host application was showing when the snapshot was taken.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    TeamSelection,
    Battle,
    Results,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Screen::TeamSelection => "Team Selection",
            Screen::Battle => "Battle",
            Screen::Results => "Results",
        };
        write!(f, "{}", display_name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoveSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: String,
    #[serde(default)]
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub max_uses: u8,
    pub current_uses: u8,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatureSnapshot {
    pub name: String,
    pub current_health: u16,
    pub base_stats: BaseStats,
    pub types: Vec<String>,
    /// Always four entries; `None` marks an empty slot.
    pub moves: Vec<Option<MoveSnapshot>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamSnapshot {
    pub name: String,
    pub creatures: Vec<CreatureSnapshot>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BattlePhaseSnapshot {
    pub turn: Side,
    pub team1_active_index: usize,
    pub team2_active_index: usize,
    /// Completed rounds plus one. Older saves without it resume at round 1.
    #[serde(default = "first_turn")]
    pub turn_number: u32,
}

fn first_turn() -> u32 {
    1
}

/// Everything needed to resume a game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub screen: Screen,
    pub active_selector: Side,
    pub team1: TeamSnapshot,
    pub team2: TeamSnapshot,
    #[serde(default)]
    pub battle_phase: Option<BattlePhaseSnapshot>,
    pub tower_level: u32,
    pub high_score: u32,
}
