use crate::battle::rng::TurnRng;
use crate::battle::state::{Battle, ReplacementPolicy};
use crate::creature::Creature;
use crate::errors::BattleResult;
use crate::moves::{Move, MoveEffect};
use crate::roster::Roster;
use schema::{BaseStats, CreatureType, MoveCategory, StatType, Target};

/// A builder for creating test creatures with common defaults: Normal type,
/// 100 HP, 50 in every other stat, and Tackle as the only move.
///
/// # Example
/// ```ignore
/// let creature = TestCreatureBuilder::new("Sparky")
///     .with_types(vec![CreatureType::Electric])
///     .with_hp(20)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    name: String,
    types: Vec<CreatureType>,
    stats: BaseStats,
    moves: Option<Vec<Move>>,
    current_hp: Option<u16>,
}

impl TestCreatureBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: vec![CreatureType::Normal],
            stats: BaseStats::new(100, 50, 50, 50, 50, 50),
            moves: None,
            current_hp: None,
        }
    }

    pub fn with_types(mut self, types: Vec<CreatureType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_stats(
        mut self,
        max_health: u16,
        attack: u16,
        defense: u16,
        special_attack: u16,
        special_defense: u16,
        speed: u16,
    ) -> Self {
        self.stats = BaseStats::new(
            max_health,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        );
        self
    }

    pub fn with_max_hp(mut self, max_health: u16) -> Self {
        self.stats.max_health = max_health;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn build(self) -> Creature {
        let moves = self.moves.unwrap_or_else(|| vec![tackle()]);
        let mut creature = match Creature::new(self.name.clone(), self.types, self.stats, moves) {
            Ok(creature) => creature,
            Err(err) => panic!("Failed to build test creature {}: {}", self.name, err),
        };
        if let Some(hp) = self.current_hp {
            creature.set_hp(hp);
        }
        creature
    }
}

pub fn tackle() -> Move {
    Move::new(
        "Tackle",
        CreatureType::Normal,
        MoveCategory::Physical,
        Some(40),
        Some(100),
        35,
        MoveEffect::PhysicalDamage,
    )
}

pub fn swift() -> Move {
    Move::new(
        "Swift",
        CreatureType::Normal,
        MoveCategory::Special,
        Some(60),
        None,
        20,
        MoveEffect::SpecialDamage,
    )
}

pub fn fissure() -> Move {
    Move::new(
        "Fissure",
        CreatureType::Ground,
        MoveCategory::Physical,
        None,
        Some(30),
        5,
        MoveEffect::OneHitKnockout,
    )
}

pub fn recover() -> Move {
    Move::new(
        "Recover",
        CreatureType::Normal,
        MoveCategory::Status,
        None,
        None,
        10,
        MoveEffect::half_heal(),
    )
}

pub fn growl() -> Move {
    Move::new(
        "Growl",
        CreatureType::Normal,
        MoveCategory::Status,
        None,
        Some(100),
        40,
        MoveEffect::StatModify {
            stat: StatType::Attack,
            delta: -1,
            target: Target::Target,
        },
    )
}

pub fn swords_dance() -> Move {
    Move::new(
        "Swords Dance",
        CreatureType::Normal,
        MoveCategory::Status,
        None,
        None,
        20,
        MoveEffect::StatModify {
            stat: StatType::Attack,
            delta: 2,
            target: Target::User,
        },
    )
}

pub fn whirlwind() -> Move {
    Move::new(
        "Whirlwind",
        CreatureType::Normal,
        MoveCategory::Status,
        None,
        None,
        20,
        MoveEffect::ForceSwitch,
    )
}

pub fn create_test_roster(name: &str, creatures: Vec<Creature>) -> Roster {
    match Roster::with_creatures(name, creatures) {
        Ok(roster) => roster,
        Err(err) => panic!("Failed to build test roster {}: {}", name, err),
    }
}

/// Creates a battle between two test rosters, Team 1 to move.
pub fn create_test_battle(team1: Vec<Creature>, team2: Vec<Creature>) -> Battle {
    let team1 = create_test_roster("Red Team", team1);
    let team2 = create_test_roster("Blue Team", team2);
    match Battle::new(team1, team2, ReplacementPolicy::NextLiving) {
        Ok(battle) => battle,
        Err(err) => panic!("Failed to build test battle: {}", err),
    }
}

/// A `TurnRng` whose draws are all 0.0, so every accuracy check hits and
/// every random pick takes the first candidate.
pub fn predictable_rng() -> TurnRng {
    TurnRng::scripted(vec![0.0; 100])
}

/// Assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
