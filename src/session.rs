#![cfg(feature = "std")]
//! Game session: owns the canonical [`GameState`], publishes every new
//! snapshot on a watch channel and drives the automated opponent.
//!
//! All transitions run inside a single task that drains a command queue, so
//! the state is never mutated from two places. Delayed opponent shots are
//! separate timer tasks that post back into the same queue, tagged with the
//! generation they were scheduled in; a reset bumps the generation, so a
//! stale timer is dropped on arrival. Each timer also carries the ticket of
//! the snapshot it answers, so a shot already queued when a newer state was
//! published is dropped as well.

use log::{debug, info, trace, warn};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::GameConfig;
use crate::error::{FleetError, SessionError, ShotError};
use crate::fleet::FleetGenerator;
use crate::resolver::resolve;
use crate::state::{Coordinate, GameState, PlayerData, ShotCommand, Side};

enum Command {
    Shoot {
        command: ShotCommand,
        reply: oneshot::Sender<Result<(), ShotError>>,
    },
    Reset {
        turn: Side,
        reply: oneshot::Sender<Result<(), FleetError>>,
    },
    OpponentFire {
        generation: u64,
        ticket: u64,
        at: Coordinate,
    },
    Shutdown,
}

/// Handle to a running game session.
///
/// Must be created from within a tokio runtime. Dropping the handle stops
/// the session task; [`GameSession::shutdown`] does the same and waits for
/// it to finish.
pub struct GameSession {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<GameState>,
    task: Option<JoinHandle<()>>,
}

impl GameSession {
    /// Start a session with two freshly generated fleets and
    /// `config.first_turn` to move.
    pub fn new(config: GameConfig) -> Result<Self, FleetError> {
        let mut rng = session_rng(&config);
        let turn = config.first_turn;
        let initial = fresh_state(&config, &mut rng, turn)?;
        Ok(Self::spawn(config, rng, initial))
    }

    /// Resume a session from an existing snapshot.
    pub fn from_state(config: GameConfig, state: GameState) -> Self {
        let rng = session_rng(&config);
        Self::spawn(config, rng, state)
    }

    fn spawn(config: GameConfig, rng: SmallRng, initial: GameState) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (publisher, state) = watch::channel(initial.clone());
        let mut actor = SessionActor {
            config,
            rng,
            state: initial,
            publisher,
            commands: tx.clone(),
            generation: 0,
            ticket: 0,
            pending: None,
        };
        info!("new game session, {} to move", actor.state.turn);
        actor.after_publish();
        let task = tokio::spawn(actor.run(rx));
        Self {
            commands: tx,
            state,
            task: Some(task),
        }
    }

    /// Submit a shot. Rejected with [`ShotError::TurnViolation`] when
    /// `command.order_from` does not hold the turn; the published state is
    /// then unchanged.
    pub async fn shoot(&self, command: ShotCommand) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Shoot { command, reply })
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)??;
        Ok(())
    }

    /// Start a new game with fresh fleets and `turn` to move. Any pending
    /// opponent shot from the previous game is discarded.
    pub async fn reset(&self, turn: Side) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Reset { turn, reply })
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)??;
        Ok(())
    }

    /// Live view of the state. The receiver is marked changed, so the
    /// current snapshot is delivered first, then every later one.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        let mut rx = self.state.clone();
        rx.mark_changed();
        rx
    }

    /// Latest published snapshot.
    pub fn state(&self) -> GameState {
        self.state.borrow().clone()
    }

    /// Stop the session task, cancelling pending opponent shots. Subscribers
    /// see the stream close.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn session_rng(config: &GameConfig) -> SmallRng {
    match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn fresh_state(config: &GameConfig, rng: &mut SmallRng, turn: Side) -> Result<GameState, FleetError> {
    let generator = FleetGenerator::from_config(config);
    let player = generator.generate(rng)?;
    let opponent = generator.generate(rng)?;
    Ok(GameState::new(
        turn,
        config.board_size,
        PlayerData::new(player),
        PlayerData::new(opponent),
    ))
}

struct SessionActor {
    config: GameConfig,
    rng: SmallRng,
    state: GameState,
    publisher: watch::Sender<GameState>,
    commands: mpsc::UnboundedSender<Command>,
    generation: u64,
    /// Bumped on every publish; identifies the snapshot a timer answers.
    ticket: u64,
    pending: Option<JoinHandle<()>>,
}

impl SessionActor {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = commands.recv().await {
            match command {
                Command::Shoot { command, reply } => {
                    let _ = reply.send(self.shoot(command));
                }
                Command::Reset { turn, reply } => {
                    let _ = reply.send(self.reset(turn));
                }
                Command::OpponentFire {
                    generation,
                    ticket,
                    at,
                } => {
                    if generation != self.generation || ticket != self.ticket {
                        trace!(
                            "dropping opponent shot at {} from generation {} ticket {} (now {}/{})",
                            at,
                            generation,
                            ticket,
                            self.generation,
                            self.ticket
                        );
                        continue;
                    }
                    self.pending = None;
                    debug!("opponent fires at {}", at);
                    if let Err(e) = self.shoot(ShotCommand::new(Side::Opponent, at)) {
                        debug!("automated opponent shot rejected: {}", e);
                    }
                }
                Command::Shutdown => break,
            }
        }
        self.cancel_pending();
        info!("game session stopped");
    }

    fn shoot(&mut self, command: ShotCommand) -> Result<(), ShotError> {
        match resolve(&self.state, command) {
            Ok(next) => {
                debug!("{} fires at {}", command.order_from, command.at);
                self.publish(next);
                Ok(())
            }
            Err(e) => {
                warn!("shot at {} rejected: {}", command.at, e);
                Err(e)
            }
        }
    }

    fn reset(&mut self, turn: Side) -> Result<(), FleetError> {
        let next = fresh_state(&self.config, &mut self.rng, turn)?;
        self.cancel_pending();
        self.generation += 1;
        info!("reset to generation {}, {} to move", self.generation, turn);
        self.publish(next);
        Ok(())
    }

    fn publish(&mut self, state: GameState) {
        self.cancel_pending();
        self.ticket += 1;
        self.state = state;
        self.publisher.send_replace(self.state.clone());
        self.after_publish();
    }

    /// Schedule the automated opponent when the new state hands it the turn.
    fn after_publish(&mut self) {
        if !self.config.auto_opponent || self.state.turn != Side::Opponent {
            return;
        }
        let targets: Vec<Coordinate> = self.state.targets_for(Side::Opponent).collect();
        let Some(&at) = targets.choose(&mut self.rng) else {
            debug!("no unshot cell left on the player board, opponent holds");
            return;
        };
        self.cancel_pending();
        let generation = self.generation;
        let ticket = self.ticket;
        let delay = self.config.opponent_delay;
        let commands = self.commands.clone();
        trace!("opponent shot at {} scheduled in {:?}", at, delay);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = commands.send(Command::OpponentFire {
                generation,
                ticket,
                at,
            });
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}

impl Drop for SessionActor {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
