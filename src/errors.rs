use schema::Side;
use thiserror::Error;

/// Main error type for the Battle Tower engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// Malformed or missing input to an operation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// A battle rule forbids the requested action
    #[error("Rule violation: {0}")]
    Rule(#[from] RuleViolation),
    /// The engine reached a state it should never be in
    #[error("Invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
    /// Error related to catalog lookups or catalog data
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// Error related to saving or restoring a snapshot
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    /// Error related to engine configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Coarse classification handed to presentation code alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Rule,
    Invariant,
    Catalog,
    Snapshot,
    Config,
}

impl BattleEngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BattleEngineError::Validation(_) => ErrorKind::Validation,
            BattleEngineError::Rule(_) => ErrorKind::Rule,
            BattleEngineError::Invariant(_) => ErrorKind::Invariant,
            BattleEngineError::Catalog(_) => ErrorKind::Catalog,
            BattleEngineError::Snapshot(_) => ErrorKind::Snapshot,
            BattleEngineError::Config(_) => ErrorKind::Config,
        }
    }
}

/// Errors related to malformed or missing input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} has no roster")]
    MissingRoster(Side),
    #[error("{0} has an empty roster")]
    EmptyRoster(Side),
    #[error("{0} has no creature able to battle")]
    NoLivingCreature(Side),
    #[error("Invalid move slot: {0}")]
    InvalidMoveSlot(usize),
    #[error("Invalid roster index: {0}")]
    InvalidIndex(usize),
    #[error("Roster is full ({capacity} creatures)")]
    RosterFull { capacity: usize },
    #[error("Roster cannot hold {count} creatures (capacity {capacity})")]
    TooManyCreatures { count: usize, capacity: usize },
    #[error("Creature is not a member of this roster")]
    CreatureNotInRoster,
    #[error("Invalid creature definition: {0}")]
    InvalidCreature(String),
    #[error("{0} appears more than once")]
    DuplicateCreature(String),
    #[error("The battle has not ended yet")]
    BattleNotEnded,
}

/// Errors raised when an action breaks a battle rule. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("{move_name} has no uses remaining")]
    NoUsesRemaining { move_name: String },
    #[error("The creature in slot {0} has fainted")]
    FaintedTarget(usize),
    #[error("The creature in slot {0} is already active")]
    AlreadyActive(usize),
    #[error("The battle is already over")]
    BattleAlreadyEnded,
    #[error("No battle is in progress")]
    NoBattleInProgress,
    #[error("A battle is already in progress")]
    BattleInProgress,
}

/// Errors that indicate a defect in the engine itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Both rosters were defeated by the same action")]
    BothRostersDefeated,
    #[error("No stat overlay registered for {0}")]
    MissingOverlay(String),
    #[error("{0} has no active creature")]
    MissingActiveCreature(Side),
}

/// Errors related to catalog data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Creature not found: {0}")]
    CreatureNotFound(String),
    #[error("Unknown type: {0}")]
    UnknownType(String),
    #[error("Unknown move category: {0}")]
    UnknownCategory(String),
    #[error("Move {0} has no supported effect")]
    UnsupportedMove(String),
    #[error("{0} has no usable moves")]
    NoUsableMoves(String),
    #[error("Malformed catalog data: {0}")]
    MalformedData(String),
    #[error("Could not read catalog: {0}")]
    Io(String),
}

/// Errors related to snapshot persistence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("Could not access snapshot store: {0}")]
    Io(String),
    #[error("Could not encode snapshot: {0}")]
    Encode(String),
    #[error("Could not decode snapshot: {0}")]
    Decode(String),
    #[error("Snapshot is inconsistent: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(String),
    #[error("Malformed config: {0}")]
    Malformed(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Type alias for Results using SnapshotError
pub type SnapshotResult<T> = Result<T, SnapshotError>;
