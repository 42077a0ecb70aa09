use super::cell::Cell;
use super::direction::Direction;

const CELL_MASK: u16 = 0b111;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Fixed-size grid of cells, packed three bits per cell
///
/// The backing buffer is sized once at construction and carries one spare
/// byte so every cell can be read and written through a two-byte window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    width: usize,
    height: usize,
    bits: Vec<u8>,
}

impl Playfield {
    /// Create an all-empty playfield
    pub fn new(width: usize, height: usize) -> Self {
        let bytes = (width * height * Cell::BITS).div_ceil(8) + 1;
        Self {
            width,
            height,
            bits: vec![0; bytes],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Map any position back onto the grid, treating both axes as a torus
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.x.rem_euclid(self.width as i32),
            pos.y.rem_euclid(self.height as i32),
        )
    }

    /// Read the cell at `pos`
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid. Callers wrap first.
    pub fn get(&self, pos: Position) -> Cell {
        let (byte, shift) = self.locate(pos);
        let window = u16::from_le_bytes([self.bits[byte], self.bits[byte + 1]]);
        let code = ((window >> shift) & CELL_MASK) as u8;
        match Cell::from_code(code) {
            Some(cell) => cell,
            None => unreachable!("reserved cell code {code} at {pos:?}"),
        }
    }

    /// Overwrite the cell at `pos`
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let (byte, shift) = self.locate(pos);
        let mut window = u16::from_le_bytes([self.bits[byte], self.bits[byte + 1]]);
        window &= !(CELL_MASK << shift);
        window |= (cell.code() as u16 & CELL_MASK) << shift;
        let [lo, hi] = window.to_le_bytes();
        self.bits[byte] = lo;
        self.bits[byte + 1] = hi;
    }

    /// Reset every cell to `Cell::Empty`
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Iterate all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Number of cells currently holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.positions().filter(|&pos| self.get(pos) == cell).count()
    }

    fn locate(&self, pos: Position) -> (usize, u32) {
        assert!(
            self.contains(pos),
            "position {pos:?} outside {}x{} playfield",
            self.width,
            self.height
        );
        let bit = (pos.x as usize + pos.y as usize * self.width) * Cell::BITS;
        (bit / 8, (bit % 8) as u32)
    }
}
