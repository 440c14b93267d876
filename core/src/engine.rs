use alloc::collections::{BTreeMap, BTreeSet};
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Start -> Showing
/// - Showing -> Playing
/// - Playing -> LevelComplete -> Showing
/// - Playing -> Showing (life lost, retry)
/// - Playing -> GameOver
/// - any -> Start (reset) or Showing (new game)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Welcome screen, nothing on the board
    #[default]
    Start,
    /// Targets are being revealed
    Showing,
    /// Player is selecting cells
    Playing,
    /// Every target found, waiting to advance
    LevelComplete,
    /// No lives left
    GameOver,
}

impl GameState {
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Whether a board is on screen at all.
    pub const fn shows_board(self) -> bool {
        matches!(self, Self::Showing | Self::Playing | Self::LevelComplete)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LeadIn {
    FirstLevel,
    Regular,
}

/// Delayed effects owned by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Task {
    Reveal(RevealStep),
    ClearSelecting(CellIndex),
    ClearErrorFlash,
    Retry,
    Advance,
}

/// Short-lived visual markers, never consulted for game rules.
#[derive(Clone, Debug, Default, PartialEq)]
struct Transient {
    flashing: BTreeSet<CellIndex>,
    reveal_phase: RevealPhase,
    selecting: BTreeMap<CellIndex, TaskId>,
    error_flash: BTreeSet<CellIndex>,
}

impl Transient {
    fn clear(&mut self) {
        self.flashing.clear();
        self.reveal_phase = RevealPhase::Hidden;
        self.selecting.clear();
        self.error_flash.clear();
    }
}

/// The whole game: state machine, round generation and timers.
///
/// Time only moves through [`PlayEngine::advance`]. Starting an attempt or
/// resetting cancels every pending task first, so nothing scheduled for an
/// older attempt can touch a newer one.
#[derive(Clone, Debug)]
pub struct PlayEngine<G = RandomTargetGenerator> {
    config: EngineConfig,
    generator: G,
    state: GameState,
    level: Level,
    lives: Lives,
    grid_size: GridSize,
    targets: TargetSet,
    selected: BTreeSet<CellIndex>,
    mistakes: u8,
    transient: Transient,
    schedule: Schedule<Task>,
}

impl PlayEngine<RandomTargetGenerator> {
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomTargetGenerator::new(seed))
    }
}

impl<G: TargetGenerator> PlayEngine<G> {
    pub fn with_generator(config: EngineConfig, generator: G) -> Self {
        Self {
            config,
            generator,
            state: GameState::Start,
            level: 1,
            lives: MAX_LIVES,
            grid_size: MIN_GRID_SIZE,
            targets: TargetSet::new(),
            selected: BTreeSet::new(),
            mistakes: 0,
            transient: Transient::default(),
            schedule: Schedule::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn lives(&self) -> Lives {
        self.lives
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn total_cells(&self) -> CellCount {
        cell_count(self.grid_size)
    }

    pub fn mistakes(&self) -> u8 {
        self.mistakes
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn selected(&self) -> &BTreeSet<CellIndex> {
        &self.selected
    }

    pub fn flashing(&self) -> &BTreeSet<CellIndex> {
        &self.transient.flashing
    }

    pub fn reveal_phase(&self) -> RevealPhase {
        self.transient.reveal_phase
    }

    pub fn is_selecting(&self, index: CellIndex) -> bool {
        self.transient.selecting.contains_key(&index)
    }

    pub fn error_flash(&self) -> &BTreeSet<CellIndex> {
        &self.transient.error_flash
    }

    /// Ids of every task still waiting to run.
    pub fn pending_tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.schedule.pending_ids()
    }

    pub fn has_pending(&self, task: Task) -> bool {
        self.schedule.pending_tasks().any(|&pending| pending == task)
    }

    /// How long until the next scheduled task is due, if any.
    pub fn time_to_next_task(&self) -> Option<Duration> {
        self.schedule.time_to_next()
    }

    /// Position of the engine clock.
    pub fn now(&self) -> Duration {
        self.schedule.now()
    }

    /// Fresh game from level 1, revealing the first board straight away.
    pub fn start_new_game(&mut self) {
        log::debug!("new game");
        self.reinitialize();
        self.start_level(LeadIn::FirstLevel);
    }

    /// Back to the welcome screen with nothing pending.
    pub fn reset_game(&mut self) {
        log::debug!("reset game");
        self.reinitialize();
        self.state = GameState::Start;
    }

    /// Drops every pending task, for when the owner goes away.
    pub fn teardown(&mut self) {
        self.schedule.cancel_all();
    }

    pub fn select_square(&mut self, index: CellIndex) -> Result<SelectOutcome> {
        if !self.state.accepts_input() {
            return Err(GameError::NotAccepting);
        }
        if index >= self.total_cells() {
            return Err(GameError::InvalidIndex);
        }

        let toggled = if self.selected.remove(&index) {
            SelectOutcome::Deselected
        } else {
            self.selected.insert(index);
            if self.targets.contains(&index) {
                SelectOutcome::Selected
            } else {
                self.mistakes = self.mistakes.saturating_add(1);
                SelectOutcome::Mistake
            }
        };
        self.flag_selecting(index);

        Ok(self.evaluate().unwrap_or(toggled))
    }

    /// Runs every task that becomes due within `elapsed`, in deadline order.
    pub fn advance(&mut self, elapsed: Duration) -> TickOutcome {
        let until = self.schedule.now().saturating_add(elapsed);
        let mut outcome = TickOutcome::NoChange;
        while let Some((id, task)) = self.schedule.pop_due(until) {
            log::trace!("run {:?}: {:?}", id, task);
            self.run(id, task);
            outcome = TickOutcome::Changed;
        }
        self.schedule.settle(until);
        outcome
    }

    pub fn snapshot(&self) -> Snapshot {
        let targets_visible = self.config.reveal_targets
            || (self.state == GameState::Showing && !self.has_pending(Task::Retry));
        Snapshot {
            state: self.state,
            level: self.level,
            lives: self.lives,
            grid_size: self.grid_size,
            target_count: CellCount::try_from(self.targets.len()).unwrap_or(CellCount::MAX),
            targets: targets_visible.then(|| self.targets.clone()),
            selected: self.selected.clone(),
            wrong_selected: self.wrong_selected().collect(),
            mistakes: self.mistakes,
            flashing: self.transient.flashing.clone(),
            reveal_phase: self.transient.reveal_phase,
            selecting: self.transient.selecting.keys().copied().collect(),
            error_flash: self.transient.error_flash.clone(),
        }
    }

    fn wrong_selected(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.selected.difference(&self.targets).copied()
    }

    fn reinitialize(&mut self) {
        self.schedule.cancel_all();
        self.level = 1;
        self.lives = MAX_LIVES;
        self.grid_size = MIN_GRID_SIZE;
        self.targets.clear();
        self.selected.clear();
        self.mistakes = 0;
        self.transient.clear();
    }

    fn start_level(&mut self, lead_in: LeadIn) {
        self.schedule.cancel_all();
        self.selected.clear();
        self.mistakes = 0;
        self.transient.clear();

        let count = target_count(self.level, self.grid_size);
        self.targets = self.generator.generate(self.grid_size, count);
        debug_assert!(!self.targets.is_empty());
        debug_assert!(self.targets.len() < usize::from(self.total_cells()));

        self.state = GameState::Showing;
        log::debug!(
            "level {} on {}x{}, {} targets, {} lives",
            self.level,
            self.grid_size,
            self.grid_size,
            self.targets.len(),
            self.lives
        );

        let first_level = lead_in == LeadIn::FirstLevel;
        for (offset, step) in reveal_plan(&self.config.timings, first_level) {
            self.schedule.schedule_in(offset, Task::Reveal(step));
        }
    }

    /// Lose is checked before win, three mistakes always end the attempt.
    fn evaluate(&mut self) -> Option<SelectOutcome> {
        if self.state != GameState::Playing {
            return None;
        }

        if self.mistakes >= MAX_MISTAKES {
            return Some(self.lose_attempt());
        }

        if !self.selected.is_empty() && self.targets.is_subset(&self.selected) {
            return Some(self.complete_level());
        }

        None
    }

    fn lose_attempt(&mut self) -> SelectOutcome {
        self.transient.error_flash = self.wrong_selected().collect();
        if !self.transient.error_flash.is_empty() {
            self.schedule
                .schedule_in(self.config.timings.error_flash, Task::ClearErrorFlash);
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            log::debug!("game over at level {}", self.level);
            self.state = GameState::GameOver;
            SelectOutcome::GameOver
        } else {
            log::debug!("life lost, {} left", self.lives);
            self.state = GameState::Showing;
            self.schedule
                .schedule_in(self.config.timings.retry_delay, Task::Retry);
            SelectOutcome::LifeLost
        }
    }

    fn complete_level(&mut self) -> SelectOutcome {
        log::debug!("level {} complete", self.level);
        self.state = GameState::LevelComplete;
        self.schedule
            .schedule_in(self.config.timings.advance_delay, Task::Advance);
        SelectOutcome::LevelComplete
    }

    fn flag_selecting(&mut self, index: CellIndex) {
        let id = self
            .schedule
            .schedule_in(self.config.timings.select_flash, Task::ClearSelecting(index));
        if let Some(previous) = self.transient.selecting.insert(index, id) {
            self.schedule.cancel(previous);
        }
    }

    fn run(&mut self, id: TaskId, task: Task) {
        match task {
            Task::Reveal(step) => self.reveal(step),
            Task::ClearSelecting(index) => {
                if self.transient.selecting.get(&index) == Some(&id) {
                    self.transient.selecting.remove(&index);
                }
            }
            Task::ClearErrorFlash => self.transient.error_flash.clear(),
            Task::Retry => self.start_level(LeadIn::Regular),
            Task::Advance => {
                self.level = self.level.saturating_add(1);
                // never shrink mid-game
                self.grid_size = grid_size_for_level(self.level).max(self.grid_size);
                self.start_level(LeadIn::Regular);
            }
        }
    }

    fn reveal(&mut self, step: RevealStep) {
        debug_assert_eq!(self.state, GameState::Showing);
        match step {
            RevealStep::Phase(RevealPhase::Hidden) => {
                self.transient.flashing.clear();
                self.transient.reveal_phase = RevealPhase::Hidden;
            }
            RevealStep::Phase(phase) => {
                self.transient.flashing = self.targets.clone();
                self.transient.reveal_phase = phase;
            }
            RevealStep::Finish => {
                self.transient.flashing.clear();
                self.transient.reveal_phase = RevealPhase::Hidden;
                self.state = GameState::Playing;
                log::trace!("board open for selection");
            }
        }
    }
}
