use schema::{BaseStats, StatType};
use std::collections::HashMap;

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Per-creature, per-battle stat stages layered over the creature's base stats.
/// Created at battle start with every stage at 0 and dropped with the battle.
#[derive(Debug, Clone, PartialEq)]
pub struct StatOverlay {
    base_stats: BaseStats,
    // HashMap for stat stage modifications, value is stage (-6 to +6)
    stat_stages: HashMap<StatType, i8>,
}

impl StatOverlay {
    pub fn new(base_stats: BaseStats) -> Self {
        Self {
            base_stats,
            stat_stages: HashMap::new(),
        }
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base_stats
    }

    /// Get the current stage for a stat type (0 if not set)
    pub fn stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    /// Set the stage for a stat type (clamped to -6 to +6)
    pub fn set_stage(&mut self, stat: StatType, stage: i8) {
        let clamped_stage = stage.clamp(MIN_STAGE, MAX_STAGE);
        if clamped_stage == 0 {
            self.stat_stages.remove(&stat);
        } else {
            self.stat_stages.insert(stat, clamped_stage);
        }
    }

    /// Modify the stage for a stat type by a delta. The result is clamped to
    /// -6..=+6, so a change past the limit is a no-op. Returns the change
    /// actually applied.
    pub fn modify_stage(&mut self, stat: StatType, delta: i8) -> i8 {
        let current = self.stage(stat);
        let new_stage = current.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
        self.set_stage(stat, new_stage);
        new_stage - current
    }

    pub fn clear_stages(&mut self) {
        self.stat_stages.clear();
    }

    /// Multiplier currently applied to `stat`. Evasion is inverted so that a
    /// higher evasion stage yields a smaller factor in the hit-chance product.
    pub fn stage_multiplier(&self, stat: StatType) -> f64 {
        match stat {
            StatType::Evasion => stage_multiplier(-self.stage(stat)),
            _ => stage_multiplier(self.stage(stat)),
        }
    }

    /// Base stat with its stage multiplier applied. Accuracy and evasion have
    /// no base value and are reported as a percentage of 100.
    pub fn effective_stat(&self, stat: StatType) -> u16 {
        let base = self.base_stats.base_value(stat).unwrap_or(100);
        apply_stat_stage_multiplier(base, self.stage(stat), stat == StatType::Evasion)
    }
}

/// Stage multiplier table: stage n >= 0 gives (2 + n) / 2, stage n < 0 gives 2 / (2 + |n|).
pub fn stage_multiplier(stage: i8) -> f64 {
    let clamped_stage = stage.clamp(MIN_STAGE, MAX_STAGE);

    if clamped_stage < 0 {
        2.0 / (2.0 + (-clamped_stage) as f64)
    } else {
        (2.0 + clamped_stage as f64) / 2.0
    }
}

fn apply_stat_stage_multiplier(base_stat: u16, stage: i8, inverted: bool) -> u16 {
    if stage == 0 {
        return base_stat;
    }
    let multiplier = if inverted {
        stage_multiplier(-stage)
    } else {
        stage_multiplier(stage)
    };

    ((base_stat as f64) * multiplier).round() as u16
}
