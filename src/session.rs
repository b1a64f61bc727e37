//! Caller-owned game session.
//!
//! A [`GameSession`] holds everything a host application needs between
//! calls: the team selections, the battle in progress, tower progress and
//! the random source. Hosts that run many sessions keep one per player and
//! guard each with its own lock; sessions share nothing.

use crate::battle::rng::TurnRng;
use crate::battle::state::{Battle, BattleOutcome};
use crate::battle::use_cases::{self, BattleReport, MoveOutcome, SwitchOutcome};
use crate::config::EngineConfig;
use crate::errors::{BattleResult, RuleViolation, SnapshotError, SnapshotResult, ValidationError};
use crate::persistence::{
    RestoreMode, SnapshotStore, battle_phase_of, restore_battle, roster_from_snapshot,
    team_to_snapshot,
};
use crate::roster::Roster;
use schema::{GameSnapshot, Screen, Side, TeamSnapshot};

/// Tower progress after a finished battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerResult {
    pub report: BattleReport,
    pub tower_level: u32,
    pub high_score: u32,
}

#[derive(Debug)]
pub struct GameSession {
    screen: Screen,
    active_selector: Side,
    team1: Option<Roster>,
    team2: Option<Roster>,
    battle: Option<Battle>,
    tower_level: u32,
    high_score: u32,
    rng: TurnRng,
    config: EngineConfig,
}

impl GameSession {
    pub fn new(config: EngineConfig) -> Self {
        let rng = config.make_rng();
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: EngineConfig, rng: TurnRng) -> Self {
        Self {
            screen: Screen::TeamSelection,
            active_selector: Side::Team1,
            team1: None,
            team2: None,
            battle: None,
            tower_level: 1,
            high_score: 0,
            rng,
            config,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The side currently picking its team.
    pub fn active_selector(&self) -> Side {
        self.active_selector
    }

    pub fn tower_level(&self) -> u32 {
        self.tower_level
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn selected_team(&self, side: Side) -> Option<&Roster> {
        match side {
            Side::Team1 => self.team1.as_ref(),
            Side::Team2 => self.team2.as_ref(),
        }
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// Assign a freshly built roster to `side`. Selection passes to the other side.
    pub fn select_team(&mut self, side: Side, roster: Roster) -> BattleResult<()> {
        if self.battle.is_some() {
            return Err(RuleViolation::BattleInProgress.into());
        }
        if roster.is_empty() {
            return Err(ValidationError::EmptyRoster(side).into());
        }

        tracing::debug!(%side, roster = roster.name(), size = roster.len(), "team selected");
        match side {
            Side::Team1 => self.team1 = Some(roster),
            Side::Team2 => self.team2 = Some(roster),
        }
        self.screen = Screen::TeamSelection;
        self.active_selector = side.opponent();
        Ok(())
    }

    /// Start a battle with the selected teams. On failure the selections are kept.
    pub fn start_battle(&mut self) -> BattleResult<String> {
        if self.battle.is_some() {
            return Err(RuleViolation::BattleInProgress.into());
        }

        let start = use_cases::start_battle(
            self.team1.clone(),
            self.team2.clone(),
            self.config.replacement_policy,
        )?;

        self.team1 = None;
        self.team2 = None;
        self.battle = Some(start.battle);
        self.screen = Screen::Battle;
        Ok(start.message)
    }

    pub fn use_move(&mut self, slot: usize) -> BattleResult<MoveOutcome> {
        let battle = self
            .battle
            .as_mut()
            .ok_or(RuleViolation::NoBattleInProgress)?;

        let outcome = use_cases::use_move(battle, slot, &mut self.rng)?;
        if outcome.report.is_some() {
            self.screen = Screen::Results;
        }
        Ok(outcome)
    }

    pub fn switch_creature(&mut self, index: usize) -> BattleResult<SwitchOutcome> {
        let battle = self
            .battle
            .as_mut()
            .ok_or(RuleViolation::NoBattleInProgress)?;
        use_cases::switch_creature(battle, index)
    }

    /// Close out an ended battle and advance the tower. Team 1 is the
    /// climbing player: a win raises the level, anything else resets it.
    /// Both rosters are discarded; the next battle needs fresh selections.
    pub fn finish_battle(&mut self) -> BattleResult<TowerResult> {
        let battle = self
            .battle
            .as_ref()
            .ok_or(RuleViolation::NoBattleInProgress)?;
        let report = use_cases::end_battle(battle)?;

        match report.outcome {
            BattleOutcome::Winner(Side::Team1) => {
                self.tower_level += 1;
                self.high_score = self.high_score.max(self.tower_level);
            }
            BattleOutcome::Winner(Side::Team2) | BattleOutcome::Draw => {
                self.tower_level = 1;
            }
        }
        tracing::info!(
            outcome = ?report.outcome,
            tower_level = self.tower_level,
            high_score = self.high_score,
            "battle finished"
        );

        self.battle = None;
        self.screen = Screen::Results;
        self.active_selector = Side::Team1;

        Ok(TowerResult {
            report,
            tower_level: self.tower_level,
            high_score: self.high_score,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let (team1, team2, battle_phase) = match &self.battle {
            Some(battle) => (
                team_to_snapshot(battle.team1()),
                team_to_snapshot(battle.team2()),
                // An ended battle has nothing to resume.
                (!battle.is_over()).then(|| battle_phase_of(battle)),
            ),
            None => (
                self.team1.as_ref().map(team_to_snapshot).unwrap_or_else(empty_team),
                self.team2.as_ref().map(team_to_snapshot).unwrap_or_else(empty_team),
                None,
            ),
        };

        GameSnapshot {
            screen: self.screen,
            active_selector: self.active_selector,
            team1,
            team2,
            battle_phase,
            tower_level: self.tower_level,
            high_score: self.high_score,
        }
    }

    /// Rebuild a session from a snapshot. A saved battle phase resumes the
    /// battle with the saved side to move.
    pub fn restore(snapshot: &GameSnapshot, config: EngineConfig) -> SnapshotResult<Self> {
        let rng = config.make_rng();
        let mode = config.restore_mode;
        let mut session = Self::with_rng(config, rng);

        let team1 = restore_team(&snapshot.team1, mode)?;
        let team2 = restore_team(&snapshot.team2, mode)?;

        match (snapshot.battle_phase, team1, team2) {
            (Some(phase), Some(team1), Some(team2)) => {
                session.battle = Some(restore_battle(
                    team1,
                    team2,
                    &phase,
                    session.config.replacement_policy,
                )?);
            }
            (Some(_), _, _) => {
                return Err(SnapshotError::Inconsistent(
                    "battle phase saved without both teams".to_string(),
                ));
            }
            (None, team1, team2) => {
                session.team1 = team1;
                session.team2 = team2;
            }
        }

        session.screen = snapshot.screen;
        session.active_selector = snapshot.active_selector;
        session.tower_level = snapshot.tower_level.max(1);
        session.high_score = snapshot.high_score;
        tracing::info!(
            tower_level = session.tower_level,
            in_battle = session.battle.is_some(),
            "session restored"
        );
        Ok(session)
    }

    pub fn save<S: SnapshotStore + ?Sized>(&self, store: &mut S) -> SnapshotResult<()> {
        store.save(&self.snapshot())
    }

    /// Restore from a store, or `None` if it holds no snapshot.
    pub fn load<S: SnapshotStore + ?Sized>(
        store: &S,
        config: EngineConfig,
    ) -> SnapshotResult<Option<Self>> {
        store
            .load()?
            .map(|snapshot| Self::restore(&snapshot, config))
            .transpose()
    }
}

fn empty_team() -> TeamSnapshot {
    TeamSnapshot {
        name: String::new(),
        creatures: Vec::new(),
    }
}

fn restore_team(
    snapshot: &TeamSnapshot,
    mode: RestoreMode,
) -> SnapshotResult<Option<Roster>> {
    if snapshot.creatures.is_empty() {
        return Ok(None);
    }
    roster_from_snapshot(snapshot, mode).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{TestCreatureBuilder, fissure, tackle};
    use crate::errors::BattleEngineError;
    use crate::persistence::MemoryStore;
    use pretty_assertions::assert_eq;

    fn team(name: &str, creature: &str) -> Roster {
        let creatures = vec![
            TestCreatureBuilder::new(creature)
                .with_moves(vec![fissure(), tackle()])
                .build(),
            TestCreatureBuilder::new(&format!("{} II", creature)).build(),
        ];
        Roster::with_creatures(name, creatures).unwrap()
    }

    fn session_with_teams() -> GameSession {
        let mut session = GameSession::with_rng(EngineConfig::default(), TurnRng::seeded(0));
        session.select_team(Side::Team1, team("Climbers", "Hero")).unwrap();
        session.select_team(Side::Team2, team("Guards", "Warden")).unwrap();
        session
    }

    /// Team 1 knocks out both guards with Fissure. A zero draw always hits.
    fn win_as_team1(session: &mut GameSession) -> TowerResult {
        session.rng = TurnRng::scripted(vec![0.0; 8]);
        session.start_battle().unwrap();
        session.use_move(0).unwrap();
        // Warden II only knows Tackle.
        session.use_move(0).unwrap();
        let last = session.use_move(0).unwrap();
        assert!(last.report.is_some());
        session.finish_battle().unwrap()
    }

    #[test]
    fn test_selection_alternates_and_blocks_during_battle() {
        let mut session = GameSession::with_rng(EngineConfig::default(), TurnRng::seeded(0));
        assert_eq!(session.active_selector(), Side::Team1);

        session.select_team(Side::Team1, team("Climbers", "Hero")).unwrap();
        assert_eq!(session.active_selector(), Side::Team2);
        assert_eq!(
            session.start_battle().unwrap_err(),
            BattleEngineError::Validation(ValidationError::MissingRoster(Side::Team2))
        );
        assert!(session.selected_team(Side::Team1).is_some());

        session.select_team(Side::Team2, team("Guards", "Warden")).unwrap();
        let message = session.start_battle().unwrap();
        assert_eq!(message, "Climbers and Guards begin the battle!");
        assert_eq!(session.screen(), Screen::Battle);
        assert_eq!(
            session.select_team(Side::Team1, team("Late", "Tardy")),
            Err(BattleEngineError::Rule(RuleViolation::BattleInProgress))
        );
    }

    #[test]
    fn test_actions_without_battle_are_rejected() {
        let mut session = GameSession::with_rng(EngineConfig::default(), TurnRng::seeded(0));
        assert_eq!(
            session.use_move(0).unwrap_err(),
            BattleEngineError::Rule(RuleViolation::NoBattleInProgress)
        );
        assert_eq!(
            session.finish_battle().unwrap_err(),
            BattleEngineError::Rule(RuleViolation::NoBattleInProgress)
        );
    }

    #[test]
    fn test_finish_before_end_is_rejected() {
        let mut session = session_with_teams();
        session.start_battle().unwrap();
        assert_eq!(
            session.finish_battle().unwrap_err(),
            BattleEngineError::Validation(ValidationError::BattleNotEnded)
        );
        assert!(session.battle().is_some());
    }

    #[test]
    fn test_tower_climbs_on_wins_and_resets_on_loss() {
        let mut session = session_with_teams();
        let result = win_as_team1(&mut session);
        assert_eq!(result.report.winner, Some(Side::Team1));
        assert_eq!((result.tower_level, result.high_score), (2, 2));
        assert_eq!(session.screen(), Screen::Results);
        assert!(session.battle().is_none());
        assert!(session.selected_team(Side::Team1).is_none());

        session.select_team(Side::Team1, team("Climbers", "Hero")).unwrap();
        session.select_team(Side::Team2, team("Guards", "Warden")).unwrap();
        let result = win_as_team1(&mut session);
        assert_eq!((result.tower_level, result.high_score), (3, 3));

        // Team 1 switches and then tackles while Team 2 wins with Fissure.
        session.select_team(Side::Team1, team("Climbers", "Hero")).unwrap();
        session.select_team(Side::Team2, team("Guards", "Warden")).unwrap();
        session.rng = TurnRng::scripted(vec![0.0; 8]);
        session.start_battle().unwrap();
        session.switch_creature(1).unwrap();
        session.use_move(0).unwrap();
        session.use_move(1).unwrap();
        let last = session.use_move(0).unwrap();
        assert_eq!(last.report.unwrap().winner, Some(Side::Team2));

        let result = session.finish_battle().unwrap();
        assert_eq!((result.tower_level, result.high_score), (1, 3));
    }

    #[test]
    fn test_snapshot_resumes_battle_mid_flight() {
        let mut session = session_with_teams();
        session.start_battle().unwrap();
        session.rng = TurnRng::scripted(vec![0.0; 4]);
        session.use_move(1).unwrap();

        let snapshot = session.snapshot();
        let phase = snapshot.battle_phase.unwrap();
        assert_eq!(phase.turn, Side::Team2);
        assert_eq!(snapshot.screen, Screen::Battle);

        let mut store = MemoryStore::new();
        session.save(&mut store).unwrap();
        let restored = GameSession::load(&store, EngineConfig::default())
            .unwrap()
            .unwrap();

        let battle = restored.battle().unwrap();
        assert_eq!(battle.turn(), Side::Team2);
        assert_eq!(battle.team2().active().unwrap().name(), "Warden");
        assert_eq!(battle.team2().active().unwrap().current_hp(), 97);
        assert_eq!(battle.turn_number(), phase.turn_number);
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn test_fresh_start_restore_heals_saved_teams() {
        let mut session = session_with_teams();
        session.start_battle().unwrap();
        session.rng = TurnRng::scripted(vec![0.0; 4]);
        session.use_move(1).unwrap();
        let snapshot = session.snapshot();

        let config = EngineConfig {
            restore_mode: RestoreMode::FreshStart,
            ..EngineConfig::default()
        };
        let restored = GameSession::restore(&snapshot, config).unwrap();
        let battle = restored.battle().unwrap();
        assert_eq!(battle.team2().active().unwrap().current_hp(), 100);
        let tackle_uses = battle.team1().active().unwrap().move_at(1).unwrap().remaining_uses();
        assert_eq!(tackle_uses, tackle().max_uses());
    }

    #[test]
    fn test_restore_without_battle_keeps_selections() {
        let mut session = GameSession::with_rng(EngineConfig::default(), TurnRng::seeded(0));
        session.select_team(Side::Team1, team("Climbers", "Hero")).unwrap();

        let restored = GameSession::restore(&session.snapshot(), EngineConfig::default()).unwrap();
        assert!(restored.battle().is_none());
        assert_eq!(restored.selected_team(Side::Team1).unwrap().name(), "Climbers");
        assert!(restored.selected_team(Side::Team2).is_none());
        assert_eq!(restored.active_selector(), Side::Team2);
        assert_eq!(restored.tower_level(), 1);
    }
}
