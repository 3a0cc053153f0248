use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::api::config::{ConfigError, MatchConfig};
use crate::api::snapshot::Snapshot;
use crate::api::types::{GoalType, MatchEvent, PlayerId, Side};
use crate::components::ball::Ball;
use crate::components::player::Player;
use crate::components::post::GoalPost;
use crate::core::field::Field;
use crate::core::time::{Clock, ManualClock, Millis};
use crate::input::aim::Aim;
use crate::input::queue::{custom_kinds, InputEvent};
use crate::systems::bot::{self, BotBrain};
use crate::systems::collision::{self, CooldownTable};
use crate::systems::relocation;

/// Players per team.
pub const TEAM_SIZE: usize = 5;

/// Where the match is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Everything is at rest; the side to play may shoot.
    Aiming,
    /// A shot is running.
    Simulating,
    /// The turn has passed but players are still being moved out of a net.
    Relocating,
}

/// What one call to [`Match::tick`] produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Events in the order they happened, including any raised by input
    /// calls since the previous tick.
    pub events: Vec<MatchEvent>,
    /// Set on the tick a goal (or foul) is awarded.
    pub goal: Option<GoalType>,
}

/// The whole game: every body, the score and the turn state.
///
/// Nothing else mutates match state. Callers feed input through
/// `begin_aim`/`update_aim`/`commit_shot` (or `handle_input`), advance the
/// clock, and call `tick` once per simulation step.
pub struct Match<C: Clock = ManualClock> {
    config: MatchConfig,
    field: Field,
    clock: C,
    rng: ChaCha8Rng,
    ball: Ball,
    /// Humans first (ids 0..5), then bots (ids 5..10).
    players: Vec<Player>,
    posts: Vec<GoalPost>,
    cooldowns: CooldownTable,
    bot: BotBrain,
    turn: Side,
    turn_complete: bool,
    player_score: u32,
    bot_score: u32,
    aim: Option<Aim>,
    /// Goal awarded by the latest tick. The ball has already been reset, so
    /// this keeps the overlay visible in that tick's snapshot.
    awarded: Option<GoalType>,
    tick_count: u64,
    /// Events raised outside `tick`, flushed into the next report.
    pending: Vec<MatchEvent>,
}

impl Match<ManualClock> {
    /// A match driven by a `ManualClock` starting at zero.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, ManualClock::new())
    }
}

impl<C: Clock> Match<C> {
    pub fn with_clock(config: MatchConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = Field::from_config(&config);

        let mut players = Vec::with_capacity(TEAM_SIZE * 2);
        for side in [Side::Player, Side::Bot] {
            for pos in field.kickoff_positions(side) {
                let id = PlayerId(players.len() as u8);
                players.push(Player::new(id, side, pos, &config));
            }
        }

        log::info!(
            "Match created: {}x{} field, seed {:#x}",
            field.width,
            field.height,
            config.seed
        );

        Ok(Self {
            ball: Ball::new(field.center(), &config),
            posts: GoalPost::for_field(&field),
            cooldowns: CooldownTable::new(config.collision_cooldown_ms),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            bot: BotBrain::new(),
            turn: Side::Player,
            turn_complete: true,
            player_score: 0,
            bot_score: 0,
            aim: None,
            awarded: None,
            tick_count: 0,
            pending: Vec::new(),
            players,
            field,
            clock,
            config,
        })
    }

    // ---- Accessors ----

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn posts(&self) -> &[GoalPost] {
        &self.posts
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn is_turn_complete(&self) -> bool {
        self.turn_complete
    }

    /// (human score, bot score)
    pub fn score(&self) -> (u32, u32) {
        (self.player_score, self.bot_score)
    }

    pub fn aim(&self) -> Option<&Aim> {
        self.aim.as_ref()
    }

    /// The goal awarded by the most recent tick, if any.
    pub fn awarded_goal(&self) -> Option<GoalType> {
        self.awarded
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn bot_is_thinking(&self) -> bool {
        self.bot.is_thinking()
    }

    /// Ball and every player at rest, nobody being relocated.
    pub fn is_everything_stopped(&self) -> bool {
        !self.ball.body.moving && self.players.iter().all(Player::is_settled)
    }

    pub fn is_relocating(&self) -> bool {
        self.players.iter().any(Player::is_relocating)
    }

    pub fn phase(&self) -> Phase {
        if !self.turn_complete {
            Phase::Simulating
        } else if self.is_relocating() {
            Phase::Relocating
        } else {
            Phase::Aiming
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    // ---- Input ----

    fn human_may_shoot(&self) -> bool {
        self.turn == Side::Player && self.turn_complete && !self.is_relocating()
    }

    /// The human player under `point`, if any.
    pub fn player_at(&self, point: Vec2) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| !p.is_bot() && p.contains_point(point))
            .map(|p| p.id)
    }

    /// Select a human player to drag. Refused outside the human's aiming phase.
    pub fn begin_aim(&mut self, id: PlayerId) -> bool {
        if !self.human_may_shoot() {
            log::warn!("Aim refused: {:?} to play, phase {:?}", self.turn, self.phase());
            return false;
        }
        let Some(index) = self.players.iter().position(|p| p.id == id) else {
            log::warn!("Aim refused: no player {:?}", id);
            return false;
        };
        if self.players[index].is_bot() {
            log::warn!("Aim refused: {:?} belongs to the bot", id);
            return false;
        }
        self.clear_selection();
        let player = &mut self.players[index];
        player.selected = true;
        self.aim = Some(Aim::new(id, player.body.pos));
        true
    }

    pub fn update_aim(&mut self, point: Vec2) {
        if let Some(aim) = self.aim.as_mut() {
            aim.current = point;
        }
    }

    /// Release the drag. Drags shorter than `min_drag` cancel the aim.
    /// Returns whether a shot was fired.
    pub fn commit_shot(&mut self, drag: Vec2) -> bool {
        let Some(aim) = self.aim.take() else {
            log::debug!("Shot ignored: nothing selected");
            return false;
        };
        self.clear_selection();

        if !self.human_may_shoot() {
            log::warn!("Shot refused: {:?} to play, phase {:?}", self.turn, self.phase());
            return false;
        }
        if drag.length() < self.config.min_drag {
            log::debug!("Drag of {:.1} too small, cancelling", drag.length());
            self.pending.push(MatchEvent::AimCancelled { player: aim.player });
            return false;
        }

        let (max_speed, max_drag) = (self.config.max_speed, self.config.max_drag_distance);
        let Some(player) = self.players.iter_mut().find(|p| p.id == aim.player) else {
            return false;
        };
        let velocity = player.shoot(drag, max_speed, max_drag);
        self.turn_complete = false;
        log::debug!("{:?} shoots with velocity {}", aim.player, velocity);
        self.pending.push(MatchEvent::ShotFired {
            player: aim.player,
            side: Side::Player,
            velocity,
        });
        true
    }

    /// Drop the current aim without shooting.
    pub fn cancel_aim(&mut self) {
        if let Some(aim) = self.aim.take() {
            self.clear_selection();
            self.pending.push(MatchEvent::AimCancelled { player: aim.player });
        }
    }

    /// Map a pointer or UI event onto the aim operations.
    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                if let Some(id) = self.player_at(Vec2::new(x, y)) {
                    self.begin_aim(id);
                }
            }
            InputEvent::PointerMove { x, y } => self.update_aim(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => {
                self.update_aim(Vec2::new(x, y));
                if let Some(drag) = self.aim.map(|aim| aim.drag()) {
                    self.commit_shot(drag);
                }
            }
            InputEvent::Custom { kind: custom_kinds::RESET, .. } => self.reset_match(),
            InputEvent::Custom { kind, .. } => log::debug!("Ignoring custom event {}", kind),
        }
    }

    fn clear_selection(&mut self) {
        for player in self.players.iter_mut() {
            player.selected = false;
        }
    }

    // ---- Simulation ----

    /// Advance the match by one step at the clock's current time.
    pub fn tick(&mut self) -> TickReport {
        self.tick_count += 1;
        let now = self.clock.now();
        let mut events = std::mem::take(&mut self.pending);
        self.awarded = None;

        let was_in_goal = self.ball.in_goal;
        let awarded = self.ball.update(&self.field, &self.config, now);
        if !was_in_goal {
            if let Some(goal) = self.ball.goal {
                events.push(MatchEvent::BallInNet { goal });
            }
        }
        if let Some(goal) = awarded {
            self.award(goal, &mut events);
            return TickReport {
                events,
                goal: Some(goal),
            };
        }

        for player in self.players.iter_mut() {
            player.update(&self.field, &self.config, now);
        }
        collision::resolve_all(
            &mut self.ball,
            &mut self.players,
            &self.posts,
            &mut self.cooldowns,
            now,
            &self.config,
        );

        if !self.turn_complete && self.is_everything_stopped() {
            self.complete_turn(now, &mut events);
        }

        if self.turn == Side::Bot && self.turn_complete {
            self.play_bot(now, &mut events);
        }

        TickReport { events, goal: None }
    }

    fn complete_turn(&mut self, now: Millis, events: &mut Vec<MatchEvent>) {
        self.turn_complete = true;
        let moved = relocation::relocate_lodged(
            &mut self.players,
            &self.field,
            &self.config,
            &mut self.rng,
            now,
        );
        events.extend(
            moved
                .into_iter()
                .map(|(player, target)| MatchEvent::PlayerRelocated { player, target }),
        );
        self.turn = self.turn.opponent();
        log::info!("Turn complete, {:?} to play", self.turn);
        events.push(MatchEvent::TurnChanged { turn: self.turn });
    }

    fn play_bot(&mut self, now: Millis, events: &mut Vec<MatchEvent>) {
        if self.is_relocating() {
            return;
        }
        if !self.bot.poll(now, self.config.bot_think_ms) {
            return;
        }
        let Some(shot) = bot::plan_shot(
            &self.players,
            self.ball.body.pos,
            &self.field,
            &self.config,
            &mut self.rng,
        ) else {
            log::warn!("Bot has nobody to shoot with");
            return;
        };

        let (max_speed, max_drag) = (self.config.max_speed, self.config.max_drag_distance);
        let Some(player) = self.players.iter_mut().find(|p| p.id == shot.player) else {
            return;
        };
        let velocity = player.shoot(shot.drag, max_speed, max_drag);
        self.turn_complete = false;
        log::debug!("Bot {:?} shoots with velocity {}", shot.player, velocity);
        events.push(MatchEvent::ShotFired {
            player: shot.player,
            side: Side::Bot,
            velocity,
        });
    }

    fn award(&mut self, goal: GoalType, events: &mut Vec<MatchEvent>) {
        match goal.scorer() {
            Some(Side::Player) => self.player_score += 1,
            Some(Side::Bot) => self.bot_score += 1,
            None => {}
        }
        if goal.is_foul() {
            log::info!("Foul ({:?}): no score", goal);
            events.push(MatchEvent::Foul { goal });
        } else {
            log::info!(
                "Goal ({:?}): {} - {}",
                goal,
                self.player_score,
                self.bot_score
            );
            events.push(MatchEvent::GoalScored {
                goal,
                player_score: self.player_score,
                bot_score: self.bot_score,
            });
        }

        self.reset_positions();
        self.awarded = Some(goal);
        let previous = self.turn;
        self.turn = Side::Player;
        self.turn_complete = true;
        if previous != Side::Player {
            events.push(MatchEvent::TurnChanged { turn: Side::Player });
        }
    }

    /// Every body back to kick-off, at rest. Scores and turn are untouched.
    pub fn reset_positions(&mut self) {
        for player in self.players.iter_mut() {
            player.reset();
        }
        self.ball.reset();
        self.cooldowns.clear();
        self.bot.reset();
        self.aim = None;
    }

    /// New game: zero scores, kick-off positions, humans to play.
    pub fn reset_match(&mut self) {
        self.reset_positions();
        self.player_score = 0;
        self.bot_score = 0;
        self.awarded = None;
        self.turn = Side::Player;
        self.turn_complete = true;
        log::info!("Match reset");
        self.pending.push(MatchEvent::MatchReset);
    }
}
