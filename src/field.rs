use crate::snake::Snake;
use crate::{Coords, WIDTH, HEIGHT};

const BORDER_CHAR: char = '#';
const EMPTY_CHAR: char = ' ';
const SNAKE_CHAR: char = '@';
const APPLE_CHAR: char = '$';

/// The bordered play area as text, `HEIGHT + 2` lines of `WIDTH + 2` cells.
pub struct Field {
    base: Vec<char>,
    text: Vec<char>,
    last_tail: Option<Coords>,
}

impl Field {
    pub fn new() -> Self {
        let border = BORDER_CHAR.to_string().repeat(WIDTH as usize + 2);
        let line = format!("{b}{empty}{b}", b = BORDER_CHAR, empty = EMPTY_CHAR.to_string().repeat(WIDTH as usize));

        let mut lines = vec![border.clone()];
        lines.extend((0..HEIGHT).map(|_| line.clone()));
        lines.push(border);

        let base: Vec<char> = lines.join("\n").chars().collect();
        Field { text: base.clone(), base, last_tail: None }
    }

    /// Draws everything from scratch on top of the empty field.
    pub fn render(&self, snake: &Snake, apple: Option<Coords>) -> String {
        let mut text = self.base.clone();

        for pos in snake.body() {
            text[text_index(*pos)] = SNAKE_CHAR;
        }
        if let Some(apple) = apple {
            text[text_index(apple)] = APPLE_CHAR;
        }

        text.iter().collect()
    }

    /// Same output as `render`, but after the first frame only the old tail and
    /// the new head are touched.
    pub fn render_incremental(&mut self, snake: &Snake, apple: Option<Coords>) -> String {
        match self.last_tail {
            None => {
                for pos in snake.body() {
                    self.put(*pos, SNAKE_CHAR);
                }
            },
            Some(old_tail) => {
                if old_tail != snake.tail() {
                    self.put(old_tail, EMPTY_CHAR);
                }
                self.put(snake.head(), SNAKE_CHAR);
            },
        }

        self.last_tail = Some(snake.tail());

        if let Some(apple) = apple {
            self.put(apple, APPLE_CHAR);
        }

        self.text.iter().collect()
    }

    fn put(&mut self, pos: Coords, ch: char) {
        self.text[text_index(pos)] = ch;
    }
}

// Each text line is WIDTH + 2 cells plus the newline
fn text_index((x, y): Coords) -> usize {
    (WIDTH as usize + 3) * (y as usize + 1) + x as usize + 1
}
