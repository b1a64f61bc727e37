use crate::battle::rng::TurnRng;
use crate::battle::stats::StatOverlay;
use crate::moves::Move;
use schema::{CreatureType, StatType};

/// Probability-like value compared against the hit roll. `None` when the move
/// declares no accuracy and therefore never misses.
pub fn hit_chance(
    move_used: &Move,
    attacker_overlay: &StatOverlay,
    defender_overlay: &StatOverlay,
) -> Option<f64> {
    let accuracy = move_used.accuracy()?;
    let accuracy_factor = attacker_overlay.stage_multiplier(StatType::Accuracy);
    let evasion_factor = defender_overlay.stage_multiplier(StatType::Evasion);
    Some((accuracy as f64 / 100.0) * accuracy_factor * evasion_factor)
}

/// Roll to see whether a move connects. Moves without an accuracy value skip
/// the roll entirely and do not consume a draw.
pub fn move_hits(
    move_used: &Move,
    attacker_overlay: &StatOverlay,
    defender_overlay: &StatOverlay,
    rng: &mut TurnRng,
) -> bool {
    let Some(chance) = hit_chance(move_used, attacker_overlay, defender_overlay) else {
        return true;
    };
    let roll = rng.hit_roll("Accuracy Check");
    let hit = chance > roll;
    tracing::debug!(move_name = move_used.name(), chance, roll, hit, "hit check");
    hit
}

/// `floor(2 * power * (attack / defense) / 50) + 2`, before type effectiveness.
pub fn base_damage(power: u16, attack: u16, defense: u16) -> u16 {
    let defense = defense.max(1) as f64;
    let ratio = attack as f64 / defense;
    let raw = (2.0 * power as f64 * ratio / 50.0).floor() + 2.0;
    raw.min(u16::MAX as f64) as u16
}

/// Scale base damage by the type multiplier. Any non-immune hit deals at least 1.
pub fn apply_type_multiplier(base: u16, multiplier: f64) -> u16 {
    if multiplier == 0.0 {
        return 0;
    }
    let scaled = (base as f64 * multiplier).floor();
    (scaled.min(u16::MAX as f64) as u16).max(1)
}

/// Full damage for a damaging move: base formula then type effectiveness
/// against every one of the defender's types.
pub fn calculate_damage(
    power: u16,
    attack: u16,
    defense: u16,
    move_type: CreatureType,
    defender_types: &[CreatureType],
) -> (u16, f64) {
    let multiplier = CreatureType::effectiveness_of(move_type, defender_types);
    let damage = apply_type_multiplier(base_damage(power, attack, defense), multiplier);
    (damage, multiplier)
}

/// `ceil(max_hp * numerator / denominator)` in integer arithmetic, at most
/// `max_hp`. Callers cap the result at the missing HP.
pub fn heal_amount(max_hp: u16, numerator: u16, denominator: u16) -> u16 {
    if denominator == 0 {
        return 0;
    }
    let scaled = max_hp as u32 * numerator as u32;
    let amount = scaled.div_ceil(denominator as u32);
    amount.min(max_hp as u32) as u16
}
