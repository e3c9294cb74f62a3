use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use super::config::Palette;
use super::session::{GameSession, GameStatus, GameSummary};
use crate::input::{Agent, InputSource};
use crate::render::{draw_scene, Renderer};

/// Who steers the snake
pub enum Driver<'a> {
    /// Keyboard or any other polled source; may also ask to quit
    Player(&'a mut dyn InputSource),
    /// Policy consuming the sensor readings
    Agent(&'a mut dyn Agent),
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Finished(GameSummary),
    /// The player asked to leave; the game was abandoned mid-tick.
    Quit,
}

/// Fixed-step loop: input, move, food, collisions, draw, wait.
pub struct GameLoop<'a, R> {
    session: GameSession<R>,
    driver: Driver<'a>,
    renderer: Option<&'a mut dyn Renderer>,
    /// Polled for quit only while an agent steers
    interrupt: Option<&'a mut dyn InputSource>,
    palette: Palette,
    tick_interval: Option<Duration>,
}

impl<'a, R: Rng> GameLoop<'a, R> {
    /// Loop with no renderer and no frame pacing.
    pub fn headless(session: GameSession<R>, driver: Driver<'a>) -> Self {
        Self {
            session,
            driver,
            renderer: None,
            interrupt: None,
            palette: Palette::default(),
            tick_interval: None,
        }
    }

    /// Loop that draws every tick and paces itself to `tick_interval`.
    pub fn visual(
        session: GameSession<R>,
        driver: Driver<'a>,
        renderer: &'a mut dyn Renderer,
        palette: Palette,
        tick_interval: Duration,
    ) -> Self {
        Self {
            session,
            driver,
            renderer: Some(renderer),
            interrupt: None,
            palette,
            tick_interval: Some(tick_interval),
        }
    }

    /// Lets `source` end an agent-driven run; its direction requests are
    /// ignored.
    pub fn with_interrupt(mut self, source: &'a mut dyn InputSource) -> Self {
        self.interrupt = Some(source);
        self
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    /// Runs until the game ends or the player quits.
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.render()?;

        loop {
            let started = Instant::now();

            if !self.steer()? {
                info!("Quit requested after {} ticks", self.session.ticks());
                return Ok(RunOutcome::Quit);
            }

            if let GameStatus::Terminated(reason) = self.session.advance() {
                info!(
                    "Game over ({:?}) - final score: {}",
                    reason,
                    self.session.score()
                );
                if let Some(summary) = self.session.summary() {
                    return Ok(RunOutcome::Finished(summary));
                }
            }

            self.render()?;
            self.pace(started);
        }
    }

    /// Applies this tick's steering. Returns `false` when the player quit.
    fn steer(&mut self) -> Result<bool> {
        match &mut self.driver {
            Driver::Player(source) => {
                let input = source.poll()?;
                if input.quit {
                    return Ok(false);
                }
                if !input.directions.is_empty() {
                    debug!("Direction requests {:?}", input.directions);
                }
                self.session.apply_requests(input.directions);
            }
            Driver::Agent(agent) => {
                if let Some(source) = self.interrupt.as_deref_mut() {
                    if source.poll()?.quit {
                        return Ok(false);
                    }
                }
                let sensors = self.session.sensors();
                if let Some(direction) = agent.decide(&sensors) {
                    self.session.apply_requests([direction]);
                }
            }
        }
        Ok(true)
    }

    fn render(&mut self) -> Result<()> {
        if let Some(renderer) = self.renderer.as_deref_mut() {
            draw_scene(
                renderer,
                self.session.snake(),
                self.session.food(),
                &self.palette,
            )?;
        }
        Ok(())
    }

    fn pace(&self, started: Instant) {
        if let Some(interval) = self.tick_interval {
            let elapsed = started.elapsed();
            if elapsed < interval {
                thread::sleep(interval - elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::game::{
        BoardSize, CollisionKind, Direction, Food, FoodSpawner, GameConfig, GridPosition,
        SensorReadings, Snake, Termination,
    };
    use crate::input::{IdleAgent, TickInput};
    use crate::render::testing::RecordingRenderer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays canned per-tick input, then reports nothing.
    struct ScriptedInput {
        ticks: VecDeque<TickInput>,
        polls: usize,
    }

    impl ScriptedInput {
        fn new(ticks: Vec<TickInput>) -> Self {
            Self {
                ticks: ticks.into(),
                polls: 0,
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn poll(&mut self) -> Result<TickInput> {
            self.polls += 1;
            Ok(self.ticks.pop_front().unwrap_or_default())
        }
    }

    fn turn(dir: Direction) -> TickInput {
        TickInput {
            directions: vec![dir],
            quit: false,
        }
    }

    fn quit() -> TickInput {
        TickInput {
            directions: Vec::new(),
            quit: true,
        }
    }

    fn session(board: BoardSize, snake: Snake, food: GridPosition) -> GameSession<StdRng> {
        GameSession::with_state(
            board,
            snake,
            Food::new(food),
            FoodSpawner::new(StdRng::seed_from_u64(5)),
        )
    }

    #[test]
    fn test_headless_agent_runs_into_wall() {
        let config = GameConfig::headless(30, 30);
        let session = GameSession::new(&config, StdRng::seed_from_u64(1)).unwrap();
        let mut agent = IdleAgent;
        let mut game = GameLoop::headless(session, Driver::Agent(&mut agent));

        let outcome = game.run().unwrap();

        let RunOutcome::Finished(summary) = outcome else {
            panic!("expected a finished game, got {outcome:?}");
        };
        assert_eq!(
            summary.reason,
            Termination::Collision(CollisionKind::Wall)
        );
        // Head starts at x=15 and leaves the board at x=30
        assert_eq!(summary.ticks, 15);
    }

    #[test]
    fn test_agent_sees_sensors_each_tick() {
        let board = BoardSize::new(10, 10);
        let snake = Snake::new(GridPosition::new(2, 5), Direction::Right, 1);
        let mut seen: Vec<SensorReadings> = Vec::new();
        let mut agent = |s: &SensorReadings| -> Option<Direction> {
            seen.push(*s);
            None
        };
        let mut game = GameLoop::headless(
            session(board, snake, GridPosition::new(0, 0)),
            Driver::Agent(&mut agent),
        );

        game.run().unwrap();
        drop(game);

        // x = 2..=9 gives eight ticks, the eighth one leaves the board
        assert_eq!(seen.len(), 8);
        assert_eq!(seen[0].wall_front, 8);
        assert_eq!(seen[7].wall_front, 1);
    }

    #[test]
    fn test_agent_steering_is_applied() {
        let board = BoardSize::new(10, 10);
        let snake = Snake::new(GridPosition::new(5, 5), Direction::Right, 1);
        let mut agent = |_: &SensorReadings| Some(Direction::Down);
        let mut game = GameLoop::headless(
            session(board, snake, GridPosition::new(0, 0)),
            Driver::Agent(&mut agent),
        );

        let outcome = game.run().unwrap();

        assert_eq!(game.session().snake().head(), GridPosition::new(5, 10));
        assert!(matches!(outcome, RunOutcome::Finished(_)));
    }

    #[test]
    fn test_player_eats_and_scores() {
        let board = BoardSize::new(30, 30);
        let snake = Snake::new(GridPosition::new(15, 15), Direction::Right, 5);
        let mut input = ScriptedInput::new(vec![TickInput::default(), quit()]);
        let mut game = GameLoop::headless(
            session(board, snake, GridPosition::new(16, 15)),
            Driver::Player(&mut input),
        );

        let outcome = game.run().unwrap();

        assert_eq!(outcome, RunOutcome::Quit);
        let session = game.session();
        assert_eq!(session.score(), 1);
        assert_eq!(session.snake().length(), 6);
        assert!(!session.snake().occupies(session.food().position()));
    }

    #[test]
    fn test_quit_stops_before_moving() {
        let board = BoardSize::new(30, 30);
        let snake = Snake::new(GridPosition::new(15, 15), Direction::Right, 5);
        let mut input = ScriptedInput::new(vec![quit()]);
        let mut game = GameLoop::headless(
            session(board, snake, GridPosition::new(0, 0)),
            Driver::Player(&mut input),
        );

        assert_eq!(game.run().unwrap(), RunOutcome::Quit);
        assert_eq!(game.session().snake().head(), GridPosition::new(15, 15));
        assert_eq!(game.session().ticks(), 0);
    }

    #[test]
    fn test_player_turns_into_itself() {
        let board = BoardSize::new(10, 10);
        let snake = Snake::new(GridPosition::new(5, 5), Direction::Right, 5);
        let mut input = ScriptedInput::new(vec![
            turn(Direction::Down),
            turn(Direction::Left),
            turn(Direction::Up),
        ]);
        let mut game = GameLoop::headless(
            session(board, snake, GridPosition::new(9, 9)),
            Driver::Player(&mut input),
        );

        let outcome = game.run().unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Finished(GameSummary {
                score: 0,
                reason: Termination::Collision(CollisionKind::SelfBody),
                ticks: 3,
                length: 5,
            })
        );
    }

    #[test]
    fn test_win_reports_score() {
        let board = BoardSize::new(2, 1);
        let mut snake = Snake::new(GridPosition::new(0, 0), Direction::Right, 1);
        snake.grow();
        let mut input = ScriptedInput::new(Vec::new());
        let mut game = GameLoop::headless(
            session(board, snake, GridPosition::new(1, 0)),
            Driver::Player(&mut input),
        );

        let outcome = game.run().unwrap();

        let RunOutcome::Finished(summary) = outcome else {
            panic!("expected a finished game, got {outcome:?}");
        };
        assert_eq!(summary.reason, Termination::Win);
        assert_eq!(summary.score, 1);
    }

    #[test]
    fn test_visual_renders_every_running_tick() {
        let board = BoardSize::new(5, 5);
        let snake = Snake::new(GridPosition::new(2, 2), Direction::Right, 1);
        let mut input = ScriptedInput::new(Vec::new());
        let mut renderer = RecordingRenderer::default();
        let mut game = GameLoop::visual(
            session(board, snake, GridPosition::new(0, 4)),
            Driver::Player(&mut input),
            &mut renderer,
            Palette::default(),
            Duration::from_millis(1),
        );

        let outcome = game.run().unwrap();
        drop(game);

        // Initial frame plus (3,2) and (4,2); the move off the board is not drawn
        assert!(matches!(outcome, RunOutcome::Finished(_)));
        assert_eq!(renderer.frames(), 3);
    }

    #[test]
    fn test_headless_polls_once_per_tick() {
        let board = BoardSize::new(5, 5);
        let snake = Snake::new(GridPosition::new(2, 2), Direction::Right, 1);
        let mut input = ScriptedInput::new(Vec::new());
        let mut game = GameLoop::headless(
            session(board, snake, GridPosition::new(0, 4)),
            Driver::Player(&mut input),
        );

        game.run().unwrap();
        drop(game);

        assert_eq!(input.polls, 3);
    }

    #[test]
    fn test_interrupt_quits_agent_run() {
        let board = BoardSize::new(10, 10);
        let snake = Snake::new(GridPosition::new(2, 5), Direction::Right, 1);
        let mut agent = |_: &SensorReadings| Some(Direction::Up);
        let mut keys = ScriptedInput::new(vec![turn(Direction::Down), quit()]);
        let mut game = GameLoop::headless(
            session(board, snake, GridPosition::new(0, 0)),
            Driver::Agent(&mut agent),
        )
        .with_interrupt(&mut keys);

        let outcome = game.run().unwrap();

        assert_eq!(outcome, RunOutcome::Quit);
        assert_eq!(game.session().ticks(), 1);
        // The agent steered; the key press was ignored
        assert_eq!(game.session().snake().head(), GridPosition::new(2, 4));
        drop(game);
        assert_eq!(keys.polls, 2);
    }
}
