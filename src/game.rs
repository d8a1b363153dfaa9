use crate::field::Field;
use crate::snake::{Direction, MoveResult, Snake};
use crate::{Coords, HEIGHT, WIDTH};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, trace};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    Running,
    Paused,
    Over,
    Won,
}

pub struct Game {
    frame_id: u64,
    score: u64,
    state: State,
    test_mode: bool,
    field: Field,
    snake: Snake,
    apple: Option<Coords>,
    rng: StdRng,
}

impl Game {
    pub fn new(seed: u64, test_mode: bool) -> Self {
        let mut game = Game {
            frame_id: 0,
            score: 0,
            state: State::Idle,
            test_mode,
            field: Field::new(),
            snake: Snake::new(),
            apple: None,
            rng: StdRng::seed_from_u64(seed),
        };

        game.drop_apple();
        game
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, State::Over | State::Won)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn status(&self) -> &'static str {
        match self.state {
            State::Idle => "Press SPACE to start",
            State::Running => "Running | Press SPACE to pause",
            State::Paused => "Paused | Press SPACE to continue",
            State::Over => "Game Over! | Press ENTER to reset",
            State::Won => "You won! | Press ENTER to reset",
        }
    }

    /// Advances the game by one frame. Does nothing unless running.
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }

        if let MoveResult::Moved(head) = self.snake.move_step() {
            trace!(?head, frame = self.frame_id, "Snake moved");
        }

        if let Some(apple) = self.apple {
            if self.snake.eat_apple(apple) {
                self.score += 1;
                debug!(score = self.score, length = self.snake.len(), ?apple, "Apple eaten");
                self.drop_apple();
            }
        }

        if self.snake.is_stunned() {
            self.state = State::Over;
            info!(score = self.score, frame = self.frame_id, "Game over");
        } else if self.apple.is_none() {
            self.state = State::Won;
            info!(score = self.score, frame = self.frame_id, "No room left for apples, game won");
        } else {
            self.frame_id += 1;
            self.snake.update_frame_id(self.frame_id);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            State::Over | State::Won => {},
            State::Running => {
                self.snake.block_direction_change();
                self.state = State::Paused;
                info!(frame = self.frame_id, "Paused");
            },
            State::Idle | State::Paused => {
                self.state = State::Running;
                info!(frame = self.frame_id, "Running");
            },
        }
    }

    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.is_over() {
            return false;
        }

        let heading = self.snake.direction();
        let accepted = self.snake.turn(direction);
        debug!(?heading, ?direction, accepted, frame = self.frame_id, "Turn requested");
        accepted
    }

    /// The header line followed by the field.
    pub fn draw(&mut self) -> String {
        let field = self.field.render_incremental(&self.snake, self.apple);
        format!("{}\n{}", self.header(), field)
    }

    /// Like `draw`, but rebuilds the field from scratch.
    pub fn redraw(&self) -> String {
        let field = self.field.render(&self.snake, self.apple);
        format!("{}\n{}", self.header(), field)
    }

    fn header(&self) -> String {
        let frame = if self.test_mode {
            format!("Frame: {} | ", self.frame_id)
        } else {
            String::new()
        };

        format!("{}Score: {} | {}", frame, self.score, self.status())
    }

    fn drop_apple(&mut self) {
        let body = self.snake.body();
        let choices: Vec<Coords> = (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|pos| !body.contains(pos))
            .collect();

        self.apple = choices.choose(&mut self.rng).copied();
        debug!(apple = ?self.apple, "Apple dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    fn running_game() -> Game {
        let mut game = Game::new(7, false);
        game.toggle_pause();
        game
    }

    // Every cell but (0, 0), head at (1, 0), rows alternating direction
    fn serpentine_body() -> Vec<Coords> {
        let mut body = vec![];
        for y in 0..HEIGHT {
            let row: Vec<Coords> = (0..WIDTH).map(|x| (x, y)).collect();
            if y % 2 == 0 {
                body.extend(row);
            } else {
                body.extend(row.into_iter().rev());
            }
        }
        body.remove(0);
        body
    }

    #[test]
    fn starts_idle_with_an_apple_off_the_snake() {
        let game = Game::new(1, false);

        assert_eq!(game.state(), State::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.frame_id(), 0);
        let apple = game.apple.unwrap();
        assert!(!game.snake().body().contains(&apple));
    }

    #[test]
    fn tick_does_nothing_unless_running() {
        let mut game = Game::new(1, false);
        let body = game.snake().body().to_vec();

        game.tick();
        assert_eq!(game.snake().body(), body.as_slice());
        assert_eq!(game.frame_id(), 0);

        game.toggle_pause();
        game.tick();
        assert_eq!(game.frame_id(), 1);
        assert_eq!(game.snake().head(), (23, 10));

        game.toggle_pause();
        assert_eq!(game.state(), State::Paused);
        game.tick();
        assert_eq!(game.frame_id(), 1);
    }

    #[test]
    fn eating_adds_one_point_and_one_segment() {
        let mut game = running_game();
        game.apple = Some((23, 10));

        game.tick();

        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 6);
        assert_eq!(game.state(), State::Running);
        let apple = game.apple.unwrap();
        assert_ne!(apple, (23, 10));
        assert!(!game.snake().body().contains(&apple));
    }

    #[test]
    fn apple_respawns_on_the_only_free_cell() {
        let mut game = running_game();
        game.snake = Snake::with_body(serpentine_body(), Left);
        game.apple = Some((0, 0));

        game.tick();

        assert_eq!(game.state(), State::Running);
        assert_eq!(game.score(), 1);
        // The old tail cell is the one left behind
        assert_eq!(game.apple, Some((0, HEIGHT - 1)));
    }

    #[test]
    fn filling_the_grid_wins() {
        let mut game = running_game();
        let mut body = serpentine_body();
        body.push((0, HEIGHT - 1));
        game.snake = Snake::with_body(body, Left);
        game.apple = Some((0, 0));

        game.tick();

        assert_eq!(game.state(), State::Won);
        assert!(game.is_over());
        assert_eq!(game.apple, None);
        // Every cell covered, the fresh tail segment doubling up on the last one
        assert_eq!(game.snake().len(), (WIDTH * HEIGHT) as usize + 1);
        assert!(game.draw().contains("You won!"));
    }

    #[test]
    fn self_collision_ends_the_game() {
        let mut game = running_game();
        game.snake = Snake::with_body(vec![(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)], Down);
        game.apple = Some((0, 0));

        game.tick();

        assert_eq!(game.state(), State::Over);
        assert!(game.is_over());
        assert!(!game.is_running());
        assert_eq!(game.frame_id(), 0);

        let body = game.snake().body().to_vec();
        game.tick();
        game.toggle_pause();
        assert_eq!(game.state(), State::Over);
        assert_eq!(game.snake().body(), body.as_slice());
        assert!(!game.turn(Left));
    }

    #[test]
    fn pausing_blocks_the_current_frame_turn() {
        let mut game = running_game();
        game.apple = Some((0, 0));
        game.tick();

        game.toggle_pause();
        assert!(!game.turn(Up));

        game.toggle_pause();
        assert!(!game.turn(Up));
        game.tick();
        assert!(game.turn(Up));
        assert_eq!(game.snake().direction(), Up);
    }

    #[test]
    fn same_seed_same_apples() {
        let mut a = running_game();
        let mut b = running_game();
        assert_eq!(a.apple, b.apple);

        a.drop_apple();
        b.drop_apple();
        assert_eq!(a.apple, b.apple);
    }

    #[test]
    fn header_shows_score_and_status() {
        let mut game = Game::new(3, false);
        let frame = game.draw();
        let mut lines = frame.lines();

        assert_eq!(lines.next(), Some("Score: 0 | Press SPACE to start"));
        assert_eq!(lines.next(), Some("#".repeat(42).as_str()));
        assert_eq!(frame.lines().count(), 1 + HEIGHT as usize + 2);

        let mut game = Game::new(3, true);
        game.toggle_pause();
        game.apple = Some((0, 0));
        game.tick();
        assert!(game.draw().starts_with("Frame: 1 | Score: 0 | Running | Press SPACE to pause\n"));
        assert_eq!(game.redraw(), game.draw());
    }
}
