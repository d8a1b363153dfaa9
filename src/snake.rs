use crate::{Coords, TermInt, HEIGHT, WIDTH};
use Direction::*;
use MoveResult::*;

const INITIAL_SNAKE_LENGTH: TermInt = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Left => Right,
            Up => Down,
            Right => Left,
            Down => Up,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved(Coords),
    Stunned,
}

/// A snake living on a `WIDTH` x `HEIGHT` torus. The head is `body[0]`.
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    stunned: bool,
    frame_id: u64,
    last_turn_frame_id: u64,
}

impl Snake {
    pub fn new() -> Self {
        let (mid_x, mid_y) = (WIDTH / 2, HEIGHT / 2);
        let body = (0..INITIAL_SNAKE_LENGTH)
            .map(|i| (mid_x + 2 - i, mid_y))
            .collect();

        Snake::with_body(body, Right)
    }

    pub fn with_body(body: Vec<Coords>, direction: Direction) -> Self {
        Snake { body, direction, stunned: false, frame_id: 0, last_turn_frame_id: 0 }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn tail(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned
    }

    pub fn move_step(&mut self) -> MoveResult {
        if self.stunned {
            return Stunned;
        }

        let old_tail = self.tail();
        let new_head = self.next_head();

        // Every segment takes its predecessor's place, then the head moves on
        self.body.rotate_right(1);
        self.body[0] = new_head;

        // body[1..] now holds the pre-move positions of all segments but the old tail
        if self.body.len() > 1 && (self.body[1..].contains(&new_head) || new_head == old_tail) {
            self.stunned = true;
            return Stunned;
        }

        Moved(new_head)
    }

    pub fn eat_apple(&mut self, apple: Coords) -> bool {
        if self.head() != apple {
            return false;
        }

        self.body.push(self.tail());
        true
    }

    /// Changes the heading for the next `move_step`. At most one change is
    /// accepted per frame, and never a reversal.
    pub fn turn(&mut self, new_direction: Direction) -> bool {
        if self.last_turn_frame_id >= self.frame_id
            || new_direction == self.direction
            || new_direction == self.direction.opposite()
        {
            return false;
        }

        self.direction = new_direction;
        self.last_turn_frame_id = self.frame_id;
        true
    }

    pub fn block_direction_change(&mut self) {
        self.last_turn_frame_id = self.frame_id;
    }

    pub fn update_frame_id(&mut self, frame_id: u64) {
        self.frame_id = frame_id;
    }

    fn next_head(&self) -> Coords {
        let (x, y) = self.head();

        match self.direction {
            Left => ((x + WIDTH - 1) % WIDTH, y),
            Up => (x, (y + HEIGHT - 1) % HEIGHT),
            Right => ((x + 1) % WIDTH, y),
            Down => (x, (y + 1) % HEIGHT),
        }
    }
}
