use super::direction::Direction;

/// State of a single playfield position
///
/// Body variants record the direction the snake was heading when the segment
/// was laid down, so the tail can follow the same path later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    BodyRight = 1,
    BodyUp = 2,
    BodyLeft = 3,
    BodyDown = 4,
    Food = 5,
}

impl Cell {
    /// Number of bits a cell occupies in the packed playfield
    pub const BITS: usize = 3;

    /// Body segment heading in `direction`
    pub fn body(direction: Direction) -> Cell {
        match direction {
            Direction::Right => Cell::BodyRight,
            Direction::Up => Cell::BodyUp,
            Direction::Left => Cell::BodyLeft,
            Direction::Down => Cell::BodyDown,
        }
    }

    /// Direction encoded by a body segment, `None` for empty and food cells
    pub fn direction(self) -> Option<Direction> {
        match self {
            Cell::BodyRight => Some(Direction::Right),
            Cell::BodyUp => Some(Direction::Up),
            Cell::BodyLeft => Some(Direction::Left),
            Cell::BodyDown => Some(Direction::Down),
            Cell::Empty | Cell::Food => None,
        }
    }

    pub fn is_body(self) -> bool {
        self.direction().is_some()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a 3-bit code. Codes 6 and 7 are reserved.
    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::BodyRight),
            2 => Some(Cell::BodyUp),
            3 => Some(Cell::BodyLeft),
            4 => Some(Cell::BodyDown),
            5 => Some(Cell::Food),
            _ => None,
        }
    }
}
