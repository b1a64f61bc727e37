pub mod ai;
pub mod calculators;
pub mod commands;
pub mod engine;
pub mod move_effects;
pub mod rng;
pub mod state;
pub mod stats;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod tests;
