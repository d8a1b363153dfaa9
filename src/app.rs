use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::game::Game;
use crate::snake::Direction;

#[derive(Debug, PartialEq, Eq)]
pub enum AppCommand {
    Turn(Direction),
    TogglePause,
    Reset,
    Quit,
}

/// Owns the current game and replaces it wholesale on reset.
pub struct App {
    game: Game,
    seeds: StdRng,
    test_mode: bool,
}

impl App {
    pub fn new(seed: u64, test_mode: bool) -> Self {
        let mut seeds = StdRng::seed_from_u64(seed);
        let game = Game::new(seeds.gen(), test_mode);
        App { game, seeds, test_mode }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn handle_input(key: &KeyEvent) -> Option<AppCommand> {
        match key {
            KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL } => Some(AppCommand::Quit),
            KeyEvent { code, modifiers: _ } => match code {
                KeyCode::Char('w') | KeyCode::Up => Some(AppCommand::Turn(Direction::Up)),
                KeyCode::Char('a') | KeyCode::Left => Some(AppCommand::Turn(Direction::Left)),
                KeyCode::Char('s') | KeyCode::Down => Some(AppCommand::Turn(Direction::Down)),
                KeyCode::Char('d') | KeyCode::Right => Some(AppCommand::Turn(Direction::Right)),
                KeyCode::Char(' ') => Some(AppCommand::TogglePause),
                KeyCode::Enter => Some(AppCommand::Reset),
                KeyCode::Char('q') => Some(AppCommand::Quit),
                _ => None,
            }
        }
    }

    /// Applies a command and returns whether the screen needs a redraw.
    pub fn handle_command(&mut self, command: AppCommand) -> bool {
        match command {
            AppCommand::Turn(direction) => {
                self.game.turn(direction);
                false
            },
            AppCommand::TogglePause => {
                if self.game.is_over() {
                    return false;
                }
                self.game.toggle_pause();
                debug!(state = ?self.game.state(), "Toggled pause");
                true
            },
            AppCommand::Reset => {
                if !self.game.is_over() {
                    return false;
                }
                info!(
                    score = self.game.score(),
                    length = self.game.snake().len(),
                    "Starting a new game"
                );
                self.game = Game::new(self.seeds.gen(), self.test_mode);
                true
            },
            AppCommand::Quit => false, // Handled in the main loop
        }
    }

    pub fn update(&mut self) {
        self.game.tick();
    }

    pub fn render(&mut self) -> String {
        self.game.draw()
    }

    pub fn redraw(&self) -> String {
        self.game.redraw()
    }
}
