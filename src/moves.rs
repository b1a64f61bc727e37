use schema::{CreatureType, MoveCategory, StatType, Target};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a move does once it connects. The set is closed; dispatch lives in
/// `battle::move_effects`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveEffect {
    PhysicalDamage,
    SpecialDamage,
    OneHitKnockout,
    /// Heals the user by `ceil(max_hp * numerator / denominator)`.
    Heal { numerator: u16, denominator: u16 },
    StatModify {
        stat: StatType,
        delta: i8,
        target: Target,
    },
    /// Replaces the opponent's active creature with a random other member.
    ForceSwitch,
}

impl MoveEffect {
    /// Heal for half of max HP, the common healing move.
    pub const fn half_heal() -> Self {
        MoveEffect::Heal {
            numerator: 1,
            denominator: 2,
        }
    }

    pub fn is_damaging(&self) -> bool {
        matches!(
            self,
            MoveEffect::PhysicalDamage | MoveEffect::SpecialDamage | MoveEffect::OneHitKnockout
        )
    }
}

impl fmt::Display for MoveEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveEffect::PhysicalDamage => write!(f, "Physical damage"),
            MoveEffect::SpecialDamage => write!(f, "Special damage"),
            MoveEffect::OneHitKnockout => write!(f, "One-hit knockout"),
            MoveEffect::Heal {
                numerator,
                denominator,
            } => write!(f, "Heal {}/{}", numerator, denominator),
            MoveEffect::StatModify {
                stat,
                delta,
                target,
            } => write!(f, "{} {:+} ({})", stat, delta, target),
            MoveEffect::ForceSwitch => write!(f, "Force switch"),
        }
    }
}

/// A move slot on a creature: immutable metadata plus the remaining uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    name: String,
    move_type: CreatureType,
    category: MoveCategory,
    power: Option<u16>,
    accuracy: Option<u8>,
    max_uses: u8,
    remaining_uses: u8,
    description: String,
    effect: MoveEffect,
}

impl Move {
    /// Create a move with all of its uses available.
    pub fn new(
        name: impl Into<String>,
        move_type: CreatureType,
        category: MoveCategory,
        power: Option<u16>,
        accuracy: Option<u8>,
        max_uses: u8,
        effect: MoveEffect,
    ) -> Self {
        Self {
            name: name.into(),
            move_type,
            category,
            power,
            accuracy,
            max_uses,
            remaining_uses: max_uses,
            description: String::new(),
            effect,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn move_type(&self) -> CreatureType {
        self.move_type
    }

    pub fn category(&self) -> MoveCategory {
        self.category
    }

    pub fn power(&self) -> Option<u16> {
        self.power
    }

    /// `None` means the move never misses.
    pub fn accuracy(&self) -> Option<u8> {
        self.accuracy
    }

    pub fn max_uses(&self) -> u8 {
        self.max_uses
    }

    pub fn remaining_uses(&self) -> u8 {
        self.remaining_uses
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn effect(&self) -> MoveEffect {
        self.effect
    }

    pub fn has_uses(&self) -> bool {
        self.remaining_uses > 0
    }

    /// Use the move (decrease remaining uses). Returns false if none were left.
    pub fn use_move(&mut self) -> bool {
        if self.remaining_uses > 0 {
            self.remaining_uses -= 1;
            true
        } else {
            false
        }
    }

    /// Set remaining uses, clamped to the move's maximum.
    pub fn set_remaining_uses(&mut self, uses: u8) {
        self.remaining_uses = uses.min(self.max_uses);
    }

    pub fn restore_uses(&mut self) {
        self.remaining_uses = self.max_uses;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tackle(max_uses: u8) -> Move {
        Move::new(
            "Tackle",
            CreatureType::Normal,
            MoveCategory::Physical,
            Some(40),
            Some(100),
            max_uses,
            MoveEffect::PhysicalDamage,
        )
    }

    #[test]
    fn test_uses_run_out_after_max_uses() {
        let mut tackle = tackle(3);
        assert!(tackle.use_move());
        assert!(tackle.use_move());
        assert!(tackle.has_uses());
        assert!(tackle.use_move());
        assert_eq!(tackle.remaining_uses(), 0);
        assert!(!tackle.has_uses());

        // Never drops below zero.
        assert!(!tackle.use_move());
        assert_eq!(tackle.remaining_uses(), 0);
    }

    #[test]
    fn test_set_remaining_uses_is_clamped() {
        let mut tackle = tackle(35);
        tackle.set_remaining_uses(200);
        assert_eq!(tackle.remaining_uses(), 35);
        tackle.set_remaining_uses(4);
        tackle.restore_uses();
        assert_eq!(tackle.remaining_uses(), 35);
    }

    #[test]
    fn test_effect_display() {
        let effect = MoveEffect::StatModify {
            stat: StatType::Attack,
            delta: -1,
            target: Target::Target,
        };
        assert_eq!(effect.to_string(), "Attack -1 (Target)");
        assert_eq!(MoveEffect::half_heal().to_string(), "Heal 1/2");
    }
}
