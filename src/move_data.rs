//! Resolves catalog move entries into battle-ready [`Move`]s.
//!
//! Damaging moves take their effect from their category. Moves without
//! power are looked up by name in a small table of known behaviors.

use crate::errors::{CatalogError, CatalogResult};
use crate::moves::{Move, MoveEffect};
use schema::{CreatureType, MoveCategory, MoveRecord, StatType, Target};
use std::str::FromStr;

/// Canonical lookup key for a move name: lowercase, words joined by `-`.
pub fn normalize_move_name(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn stat_change(stat: StatType, delta: i8, target: Target) -> Option<MoveEffect> {
    Some(MoveEffect::StatModify {
        stat,
        delta,
        target,
    })
}

/// Behaviors for moves whose effect is not plain damage.
fn known_effect(normalized_name: &str) -> Option<MoveEffect> {
    use StatType::*;
    use Target::{Target as Foe, User};

    match normalized_name {
        // Healing
        "recover" | "soft-boiled" | "milk-drink" | "slack-off" | "roost" | "heal-order" => {
            Some(MoveEffect::half_heal())
        }

        // One-hit knockouts
        "fissure" | "guillotine" | "horn-drill" | "sheer-cold" => Some(MoveEffect::OneHitKnockout),

        // Forced switches
        "roar" | "whirlwind" => Some(MoveEffect::ForceSwitch),

        // Self boosts
        "swords-dance" => stat_change(Attack, 2, User),
        "meditate" | "sharpen" | "howl" => stat_change(Attack, 1, User),
        "harden" | "withdraw" | "defense-curl" => stat_change(Defense, 1, User),
        "barrier" | "acid-armor" | "iron-defense" => stat_change(Defense, 2, User),
        "growth" => stat_change(SpecialAttack, 1, User),
        "nasty-plot" => stat_change(SpecialAttack, 2, User),
        "amnesia" => stat_change(SpecialDefense, 2, User),
        "agility" | "rock-polish" => stat_change(Speed, 2, User),
        "double-team" => stat_change(Evasion, 1, User),
        "minimize" => stat_change(Evasion, 2, User),

        // Opponent drops
        "growl" | "baby-doll-eyes" => stat_change(Attack, -1, Foe),
        "charm" | "feather-dance" => stat_change(Attack, -2, Foe),
        "tail-whip" | "leer" => stat_change(Defense, -1, Foe),
        "screech" => stat_change(Defense, -2, Foe),
        "fake-tears" | "metal-sound" => stat_change(SpecialDefense, -2, Foe),
        "string-shot" => stat_change(Speed, -1, Foe),
        "scary-face" | "cotton-spore" => stat_change(Speed, -2, Foe),
        "sand-attack" | "smokescreen" | "flash" | "kinesis" | "mud-slap" => {
            stat_change(Accuracy, -1, Foe)
        }
        "sweet-scent" => stat_change(Evasion, -2, Foe),

        _ => None,
    }
}

/// Decide which effect variant a move uses, if any is supported.
pub fn resolve_effect(name: &str, category: MoveCategory, power: Option<u16>) -> Option<MoveEffect> {
    if let Some(effect) = known_effect(&normalize_move_name(name)) {
        return Some(effect);
    }

    let has_power = power.is_some_and(|power| power > 0);
    match category {
        MoveCategory::Physical if has_power => Some(MoveEffect::PhysicalDamage),
        MoveCategory::Special if has_power => Some(MoveEffect::SpecialDamage),
        _ => None,
    }
}

pub fn parse_type(name: &str) -> CatalogResult<CreatureType> {
    CreatureType::from_str(name.trim()).map_err(|_| CatalogError::UnknownType(name.to_string()))
}

pub fn parse_category(name: &str) -> CatalogResult<MoveCategory> {
    MoveCategory::from_str(name.trim())
        .map_err(|_| CatalogError::UnknownCategory(name.to_string()))
}

/// Build a move from a catalog entry with all of its uses available.
pub fn build_move(record: &MoveRecord) -> CatalogResult<Move> {
    let move_type = parse_type(&record.move_type)?;
    let category = parse_category(&record.category)?;
    let effect = resolve_effect(&record.name, category, record.power)
        .ok_or_else(|| CatalogError::UnsupportedMove(record.name.clone()))?;

    if record.max_uses == 0 {
        return Err(CatalogError::MalformedData(format!(
            "{} has no uses",
            record.name
        )));
    }

    Ok(Move::new(
        record.name.clone(),
        move_type,
        category,
        record.power,
        record.accuracy,
        record.max_uses,
        effect,
    )
    .with_description(record.description.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn record(name: &str, move_type: &str, category: &str, power: Option<u16>) -> MoveRecord {
        MoveRecord {
            name: name.to_string(),
            move_type: move_type.to_string(),
            category: category.to_string(),
            power,
            accuracy: Some(100),
            max_uses: 10,
            description: String::new(),
        }
    }

    #[rstest]
    #[case("Swords Dance", "swords-dance")]
    #[case("  soft_boiled ", "soft-boiled")]
    #[case("HORN-DRILL", "horn-drill")]
    fn test_normalize_move_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_move_name(raw), expected);
    }

    #[rstest]
    #[case("tackle", MoveCategory::Physical, Some(40), Some(MoveEffect::PhysicalDamage))]
    #[case("ember", MoveCategory::Special, Some(40), Some(MoveEffect::SpecialDamage))]
    #[case("Fissure", MoveCategory::Physical, None, Some(MoveEffect::OneHitKnockout))]
    #[case("Roar", MoveCategory::Status, None, Some(MoveEffect::ForceSwitch))]
    #[case("Recover", MoveCategory::Status, None, Some(MoveEffect::half_heal()))]
    #[case("splash", MoveCategory::Status, None, None)]
    #[case("counter", MoveCategory::Physical, None, None)]
    fn test_resolve_effect(
        #[case] name: &str,
        #[case] category: MoveCategory,
        #[case] power: Option<u16>,
        #[case] expected: Option<MoveEffect>,
    ) {
        assert_eq!(resolve_effect(name, category, power), expected);
    }

    #[test]
    fn test_growl_lowers_target_attack() {
        assert_eq!(
            resolve_effect("growl", MoveCategory::Status, None),
            Some(MoveEffect::StatModify {
                stat: StatType::Attack,
                delta: -1,
                target: Target::Target,
            })
        );
    }

    #[test]
    fn test_build_move_parses_catalog_strings() {
        let built = build_move(&record("Water Gun", "WATER", "special", Some(40))).unwrap();
        assert_eq!(built.move_type(), CreatureType::Water);
        assert_eq!(built.category(), MoveCategory::Special);
        assert_eq!(built.remaining_uses(), 10);
        assert_eq!(built.effect(), MoveEffect::SpecialDamage);
    }

    #[test]
    fn test_build_move_rejects_bad_records() {
        assert_eq!(
            build_move(&record("Tackle", "sound", "physical", Some(40))),
            Err(CatalogError::UnknownType("sound".to_string()))
        );
        assert_eq!(
            build_move(&record("Tackle", "normal", "melee", Some(40))),
            Err(CatalogError::UnknownCategory("melee".to_string()))
        );
        assert_eq!(
            build_move(&record("Splash", "normal", "status", None)),
            Err(CatalogError::UnsupportedMove("Splash".to_string()))
        );
    }
}
