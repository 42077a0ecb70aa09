use super::{
    cell::Cell,
    config::GameConfig,
    direction::Direction,
    playfield::{Playfield, Position},
};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Steps the tail is held after a reset before it starts to follow the head
const INITIAL_TAIL_HOLD: u32 = 4;

/// What a single step did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Head advanced onto an empty cell
    Moved,
    /// Head ate food; a new item was placed and the snake will grow by one
    Ate,
    /// Head ran into the body; the game was reinitialized
    Collided,
    /// Food was eaten with no room left on the board; the game was reinitialized
    Won,
}

/// Why the board was rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    Start,
    Restart,
    Collision,
    Win,
}

/// The snake state machine
///
/// The snake is not stored as a list of segments. It is the path through the
/// playfield that starts at `tail` and follows each body cell's direction
/// until it reaches `head`.
pub struct SnakeGame<R = StdRng> {
    config: GameConfig,
    playfield: Playfield,
    head: Position,
    tail: Position,
    next_direction: Direction,
    /// Counts down every step; the tail only advances when it hits zero
    inhibit_tail_step: u32,
    occupied_cells: usize,
    rng: R,
}

impl SnakeGame<StdRng> {
    /// Create a game seeded from `config.seed`, or from the OS when unset
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Replace the random source, e.g. to replay a game from a known seed
    pub fn reseed(&mut self, seed: u64) {
        debug!("Reseeding food placement with {seed}");
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl<R: Rng> SnakeGame<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let playfield = Playfield::new(config.grid_width, config.grid_height);
        let mut game = Self {
            config,
            playfield,
            head: Position::new(0, 0),
            tail: Position::new(0, 0),
            next_direction: Direction::Right,
            inhibit_tail_step: INITIAL_TAIL_HOLD,
            occupied_cells: 0,
            rng,
        };
        game.reset(ResetReason::Start);
        game
    }

    /// Throw away the current board and start over
    pub fn initialize(&mut self) {
        self.reset(ResetReason::Restart);
    }

    /// Queue a turn for the next step
    ///
    /// A turn straight back into the segment behind the head is ignored.
    /// Returns whether the turn was accepted. Only the last accepted turn
    /// before a step takes effect.
    pub fn redirect(&mut self, direction: Direction) -> bool {
        let facing = self.playfield.get(self.head).direction();
        if facing.is_some_and(|facing| facing.is_opposite(direction)) {
            trace!("Ignoring reversal to {direction:?}");
            return false;
        }
        self.next_direction = direction;
        true
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> StepOutcome {
        let body = Cell::body(self.next_direction);

        self.inhibit_tail_step -= 1;
        if self.inhibit_tail_step == 0 {
            self.inhibit_tail_step = 1;
            let trailing = self.playfield.get(self.tail);
            self.playfield.set(self.tail, Cell::Empty);
            if let Some(direction) = trailing.direction() {
                self.tail = self.playfield.wrap(self.tail.moved_in_direction(direction));
            }
        }

        let previous_head = self.head;
        self.head = self
            .playfield
            .wrap(self.head.moved_in_direction(self.next_direction));

        let target = self.playfield.get(self.head);
        if target.is_body() {
            self.reset(ResetReason::Collision);
            return StepOutcome::Collided;
        }

        self.playfield.set(previous_head, body);
        self.playfield.set(self.head, body);
        trace!("Head moved {:?} to {:?}", self.next_direction, self.head);

        if target != Cell::Food {
            return StepOutcome::Moved;
        }

        if self.occupied_cells == self.playfield.len() || !self.place_food() {
            self.reset(ResetReason::Win);
            return StepOutcome::Won;
        }
        self.inhibit_tail_step += 1;
        self.occupied_cells += 1;
        StepOutcome::Ate
    }

    /// Put a food item on a uniformly random empty cell
    ///
    /// Returns false only when the board has no empty cell left.
    pub fn place_food(&mut self) -> bool {
        let (width, height) = (self.playfield.width(), self.playfield.height());

        for _ in 0..self.playfield.len() * 4 {
            let pos = Position::new(
                self.rng.gen_range(0..width) as i32,
                self.rng.gen_range(0..height) as i32,
            );
            if self.playfield.get(pos) == Cell::Empty {
                self.playfield.set(pos, Cell::Food);
                trace!("Food placed at {pos:?}");
                return true;
            }
        }

        // Sampling kept missing; pick among the remaining empty cells directly.
        let empty: Vec<Position> = self
            .playfield
            .positions()
            .filter(|&pos| self.playfield.get(pos) == Cell::Empty)
            .collect();
        match empty.choose(&mut self.rng) {
            Some(&pos) => {
                self.playfield.set(pos, Cell::Food);
                trace!("Food placed at {pos:?} after exhausting samples");
                true
            }
            None => false,
        }
    }

    fn reset(&mut self, reason: ResetReason) {
        info!("Resetting board ({reason:?})");

        self.playfield.clear();
        let center = Position::new(
            (self.playfield.width() / 2) as i32,
            (self.playfield.height() / 2) as i32,
        );
        self.head = center;
        self.tail = center;
        self.next_direction = Direction::Right;
        self.inhibit_tail_step = INITIAL_TAIL_HOLD;
        // One short of the INITIAL_TAIL_HOLD cells the held tail stretches to.
        self.occupied_cells = INITIAL_TAIL_HOLD as usize - 1;
        self.playfield.set(center, Cell::body(Direction::Right));

        for _ in 0..self.config.initial_food {
            if !self.place_food() {
                break;
            }
            self.occupied_cells += 1;
        }
    }
}

impl<R> SnakeGame<R> {
    pub fn cell_at(&self, pos: Position) -> Cell {
        self.playfield.get(pos)
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn tail(&self) -> Position {
        self.tail
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Snake length plus food on the board, as tracked incrementally
    pub fn occupied_cells(&self) -> usize {
        self.occupied_cells
    }

    pub fn width(&self) -> usize {
        self.playfield.width()
    }

    pub fn height(&self) -> usize {
        self.playfield.height()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(config: GameConfig) -> SnakeGame {
        SnakeGame::new(config.with_seed(42))
    }

    fn clear_food(game: &mut SnakeGame) {
        for pos in game.playfield.positions() {
            if game.playfield.get(pos) == Cell::Food {
                game.playfield.set(pos, Cell::Empty);
            }
        }
    }

    fn without_food(field: &Playfield) -> Playfield {
        let mut field = field.clone();
        for pos in field.positions() {
            if field.get(pos) == Cell::Food {
                field.set(pos, Cell::Empty);
            }
        }
        field
    }

    fn assert_canonical(game: &SnakeGame) {
        let center = Position::new((game.width() / 2) as i32, (game.height() / 2) as i32);
        assert_eq!(game.head(), center);
        assert_eq!(game.tail(), center);
        assert_eq!(game.cell_at(center), Cell::BodyRight);
        assert_eq!(game.next_direction(), Direction::Right);
        assert_eq!(game.inhibit_tail_step, INITIAL_TAIL_HOLD);
        assert_eq!(game.occupied_cells(), 3 + game.config().initial_food);
        assert_eq!(game.playfield.count(Cell::Food), game.config().initial_food);

        let fresh = seeded(GameConfig::new(game.width(), game.height()));
        assert_eq!(without_food(&game.playfield), without_food(&fresh.playfield));
    }

    #[test]
    fn test_initialize() {
        let game = seeded(GameConfig::default());

        assert_eq!(game.head(), Position::new(12, 9));
        assert_eq!(game.tail(), Position::new(12, 9));
        assert_eq!(game.cell_at(Position::new(12, 9)), Cell::BodyRight);
        assert_eq!(game.occupied_cells(), 7);
        assert_eq!(game.playfield.count(Cell::Food), 4);
        assert_eq!(game.playfield.count(Cell::BodyRight), 1);
        assert_canonical(&game);
    }

    #[test]
    fn test_turn_up_and_step() {
        let mut game = seeded(GameConfig::default());

        assert!(game.redirect(Direction::Up));
        game.step();

        assert_eq!(game.head(), Position::new(12, 8));
        assert_eq!(game.cell_at(Position::new(12, 9)), Cell::BodyUp);
        assert_eq!(game.cell_at(Position::new(12, 8)), Cell::BodyUp);
        assert_eq!(game.tail(), Position::new(12, 9));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut game = seeded(GameConfig::default());

        for _ in 0..3 {
            assert!(!game.redirect(Direction::Left));
        }
        assert_eq!(game.next_direction(), Direction::Right);

        game.step();
        assert_eq!(game.head(), Position::new(13, 9));
    }

    #[test]
    fn test_reversal_checked_against_head_cell() {
        let mut game = seeded(GameConfig::default());
        clear_food(&mut game);

        game.redirect(Direction::Up);
        game.step();

        assert!(!game.redirect(Direction::Down));
        assert_eq!(game.next_direction(), Direction::Up);
        assert!(game.redirect(Direction::Left));
        assert_eq!(game.next_direction(), Direction::Left);
    }

    #[test]
    fn test_last_redirect_wins() {
        let mut game = seeded(GameConfig::default());
        clear_food(&mut game);

        assert!(game.redirect(Direction::Up));
        // Down is judged against the head cell (still facing right), not the queued turn
        assert!(game.redirect(Direction::Down));
        game.step();

        assert_eq!(game.head(), Position::new(12, 10));
    }

    #[test]
    fn test_tail_held_during_bootstrap() {
        let mut game = seeded(GameConfig::default());
        clear_food(&mut game);

        for _ in 0..3 {
            assert_eq!(game.step(), StepOutcome::Moved);
            assert_eq!(game.tail(), Position::new(12, 9));
        }
        assert_eq!(game.playfield.count(Cell::BodyRight), 4);

        game.step();
        assert_eq!(game.tail(), Position::new(13, 9));
        assert_eq!(game.head(), Position::new(16, 9));
        assert_eq!(game.cell_at(Position::new(12, 9)), Cell::Empty);
        assert_eq!(game.playfield.count(Cell::BodyRight), 4);
    }

    #[test]
    fn test_wraps_across_edges() {
        let mut game = seeded(GameConfig::small());
        clear_food(&mut game);

        for _ in 0..5 {
            game.step();
        }
        assert_eq!(game.head(), Position::new(0, 5));

        game.redirect(Direction::Up);
        for _ in 0..6 {
            game.step();
        }
        assert_eq!(game.head(), Position::new(0, 9));
        assert!(game.cell_at(Position::new(0, 0)).is_body());
    }

    #[test]
    fn test_eating_food_grows_by_one() {
        let mut game = seeded(GameConfig::default());
        clear_food(&mut game);
        for _ in 0..4 {
            game.step();
        }
        let body_cells = |game: &SnakeGame| {
            game.playfield
                .positions()
                .filter(|&pos| game.cell_at(pos).is_body())
                .count()
        };
        assert_eq!(body_cells(&game), 4);

        let occupied = game.occupied_cells();
        game.playfield.set(Position::new(17, 9), Cell::Food);

        assert_eq!(game.step(), StepOutcome::Ate);
        assert_eq!(game.occupied_cells(), occupied + 1);
        assert_eq!(game.playfield.count(Cell::Food), 1);
        assert_eq!(body_cells(&game), 4);

        clear_food(&mut game);
        let tail = game.tail();
        game.step();
        assert_eq!(game.tail(), tail);
        assert_eq!(body_cells(&game), 5);

        game.step();
        assert_ne!(game.tail(), tail);
        assert_eq!(body_cells(&game), 5);
    }

    #[test]
    fn test_self_collision_resets() {
        let mut game = seeded(GameConfig::default());
        clear_food(&mut game);
        game.inhibit_tail_step = 10;

        assert_eq!(game.step(), StepOutcome::Moved);
        game.redirect(Direction::Down);
        assert_eq!(game.step(), StepOutcome::Moved);
        game.redirect(Direction::Left);
        assert_eq!(game.step(), StepOutcome::Moved);
        game.redirect(Direction::Up);
        assert_eq!(game.step(), StepOutcome::Collided);

        assert_canonical(&game);
    }

    #[test]
    fn test_win_resets() {
        let mut game = seeded(GameConfig::default());
        clear_food(&mut game);
        game.occupied_cells = game.playfield.len();
        game.playfield.set(Position::new(13, 9), Cell::Food);

        assert_eq!(game.step(), StepOutcome::Won);
        assert_canonical(&game);
    }

    #[test]
    fn test_no_room_for_food_is_a_win() {
        let mut config = GameConfig::new(4, 4);
        config.initial_food = 1;
        let mut game = seeded(config);
        for pos in game.playfield.positions() {
            if game.playfield.get(pos) == Cell::Empty {
                game.playfield.set(pos, Cell::Food);
            }
        }

        assert_eq!(game.step(), StepOutcome::Won);
        assert_canonical(&game);
    }

    #[test]
    fn test_place_food_finds_last_empty_cell() {
        let mut game = seeded(GameConfig::small());
        let hole = Position::new(9, 0);
        game.playfield.set(hole, Cell::Empty);
        for pos in game.playfield.positions() {
            if pos != hole && game.playfield.get(pos) == Cell::Empty {
                game.playfield.set(pos, Cell::Food);
            }
        }

        assert!(game.place_food());
        assert_eq!(game.cell_at(hole), Cell::Food);
        assert!(!game.place_food());
    }

    #[test]
    fn test_restart_and_reseed() {
        let mut a = seeded(GameConfig::default());
        let mut b = seeded(GameConfig::default());
        assert_eq!(a.playfield, b.playfield);

        a.step();
        a.reseed(9);
        a.initialize();
        b.reseed(9);
        b.initialize();

        assert_eq!(a.playfield, b.playfield);
        assert_canonical(&a);
    }
}
