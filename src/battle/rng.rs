use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound (exclusive) of the hit-roll distribution.
pub const HIT_ROLL_CEILING: f64 = 256.0 / 255.0;

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<f64>, index: usize },
}

/// The random source every battle draw comes from. It is always passed in by
/// the caller so runs can be reproduced from a seed or scripted in tests.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_os_entropy() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    /// Replay fixed draws in `[0, 1)`. Running out of values is a test bug and panics.
    pub fn scripted(outcomes: Vec<f64>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// A uniform draw in `[0, 1)`.
    pub fn next_unit(&mut self, reason: &str) -> f64 {
        let outcome = match &mut self.source {
            RngSource::Seeded(rng) => rng.random::<f64>(),
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];
                *index += 1;
                outcome.clamp(0.0, 1.0 - f64::EPSILON)
            }
        };

        tracing::trace!(outcome, reason, "rng draw");
        outcome
    }

    /// A uniform draw in `[0, 256/255)` used by the hit check.
    pub fn hit_roll(&mut self, reason: &str) -> f64 {
        self.next_unit(reason) * HIT_ROLL_CEILING
    }

    /// A uniform index in `0..len`. `len` must be non-zero.
    pub fn pick_index(&mut self, reason: &str, len: usize) -> usize {
        let unit = self.next_unit(reason);
        ((unit * len as f64).floor() as usize).min(len.saturating_sub(1))
    }
}
