// In: src/lib.rs

//! Battle Tower Engine
//!
//! A turn-based creature battle engine: two rosters of up to six creatures
//! trade single-move turns until one side has nobody left standing. The
//! crate holds the battle state machine and move resolution, plus the
//! catalog, persistence and session plumbing a host needs around it.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod catalog;
pub mod config;
pub mod creature;
pub mod errors;
pub mod move_data;
pub mod moves;
pub mod persistence;
pub mod roster;
pub mod session;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `battle-tower` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the shared data definitions and static enums.
pub use schema::{
    // Supporting Types & Enums
    BaseStats,
    // Persistence records
    BattlePhaseSnapshot,
    // Catalog records
    CreatureRecord,
    CreatureSnapshot,
    // Core Enums
    CreatureType,
    GameSnapshot,
    MoveCategory,
    MoveRecord,
    MoveSnapshot,
    Screen,
    Side,
    StatType,
    Target,
    TeamSnapshot,
};

// --- From this crate's modules (`src/`) ---

// Battle use cases and state.
pub use battle::ai::{Behavior, PlayerAction, ScoringAi};
pub use battle::rng::TurnRng;
pub use battle::state::{
    Battle, BattleEvent, BattleOutcome, BattleStatus, EventBus, ReplacementPolicy,
};
pub use battle::use_cases::{
    BattleReport, BattleStart, MoveOutcome, SwitchOutcome, end_battle, start_battle,
    switch_creature, use_move,
};

// Core runtime types.
pub use creature::{Creature, CreatureId};
pub use moves::{Move, MoveEffect};
pub use roster::Roster;

// Catalog, persistence and session plumbing.
pub use catalog::{CreatureCatalog, RonCatalog, build_creature, build_roster};
pub use config::EngineConfig;
pub use persistence::{JsonFileStore, MemoryStore, RestoreMode, SnapshotStore};
pub use session::{GameSession, TowerResult};

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleResult, CatalogError, CatalogResult, ConfigError, ErrorKind,
    InvariantViolation, RuleViolation, SnapshotError, SnapshotResult, ValidationError,
};
