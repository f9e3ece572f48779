//! Snake entity with movement and growth rules

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use tracing::debug;

use super::collision::{check_self_collision, CollisionEvent};
use super::direction::Direction;
use super::grid::{Cell, Grid};

/// Length of a freshly spawned snake
pub const DEFAULT_LENGTH: usize = 1;

/// What a single [`Snake::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Head advanced; `grew` is true when the tail was kept
    Moved { grew: bool },
    /// Head hit the body; the snake has already been reset
    Collided(CollisionEvent),
}

/// The snake
#[derive(Debug, Clone)]
pub struct Snake {
    /// Segments, head is front, tail is back
    body: VecDeque<Cell>,
    /// Current movement direction
    direction: Direction,
    /// Direction to adopt at the start of the next move
    next_direction: Option<Direction>,
    /// Length the body converges to
    length_target: usize,
    /// Cell released by the last move, if the tail moved
    last_removed: Option<Cell>,
    /// Spawn cell used on reset
    home: Cell,
}

impl Snake {
    /// Spawn a one-cell snake at `home`, heading right
    pub fn new(home: Cell) -> Self {
        let mut body = VecDeque::with_capacity(16);
        body.push_front(home);

        Self {
            body,
            direction: Direction::Right,
            next_direction: None,
            length_target: DEFAULT_LENGTH,
            last_removed: None,
            home,
        }
    }

    /// Build a snake from explicit segments (head first).
    ///
    /// The length target equals the number of segments, so the next move
    /// keeps the length constant. An empty list spawns at `home`.
    pub fn from_segments(home: Cell, segments: &[Cell], direction: Direction) -> Self {
        let mut snake = Self::new(home);
        if !segments.is_empty() {
            snake.body = segments.iter().copied().collect();
            snake.length_target = segments.len();
        }
        snake.direction = direction;
        snake
    }

    /// Get the snake's head location
    pub fn head(&self) -> Cell {
        // Body is never empty: every mutation leaves at least one segment.
        self.body.front().copied().unwrap_or(self.home)
    }

    /// Segments, head first
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction waiting to be applied by the next move
    pub fn pending_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    pub fn length_target(&self) -> usize {
        self.length_target
    }

    /// Cell vacated by the last move, for incremental erase
    pub fn last_removed(&self) -> Option<Cell> {
        self.last_removed
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if a cell is covered by any segment
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Occupied cells as a set, for food exclusion
    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Queue a direction change for the next move.
    ///
    /// A request for the exact reverse of the current heading is dropped.
    /// Later requests overwrite earlier ones.
    pub fn update_direction(&mut self, requested: Direction) {
        if self.direction.is_opposite(&requested) {
            debug!("Ignoring reversal from {:?} to {:?}", self.direction, requested);
            return;
        }
        self.next_direction = Some(requested);
    }

    /// Raise the length target by one; the body catches up on the next move
    pub fn grow(&mut self) {
        self.length_target += 1;
    }

    /// Advance one cell in the current direction.
    ///
    /// On self-collision the snake resets itself and reports the impact.
    pub fn advance<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> MoveOutcome {
        if let Some(direction) = self.next_direction.take() {
            self.direction = direction;
        }

        let new_head = grid.step(self.head(), self.direction);
        let tail_vacates = self.body.len() >= self.length_target;

        if let Some(event) = check_self_collision(&self.body, new_head, tail_vacates) {
            self.reset(rng);
            return MoveOutcome::Collided(event);
        }

        self.body.push_front(new_head);

        if self.body.len() > self.length_target {
            self.last_removed = self.body.pop_back();
            MoveOutcome::Moved { grew: false }
        } else {
            self.last_removed = None;
            MoveOutcome::Moved { grew: true }
        }
    }

    /// Back to a single cell at home with a random heading
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.body.clear();
        self.body.push_front(self.home);
        self.length_target = DEFAULT_LENGTH;
        self.direction = Direction::random(rng);
        self.next_direction = None;
        self.last_removed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (Grid, StdRng) {
        (Grid::new(20, 32, 24), StdRng::seed_from_u64(42))
    }

    fn cells(list: &[(i32, i32)]) -> Vec<Cell> {
        list.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn test_new_snake() {
        let (grid, _) = setup();
        let snake = Snake::new(grid.center());
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(16, 12));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.length_target(), 1);
        assert_eq!(snake.last_removed(), None);
    }

    #[test]
    fn test_move_right() {
        let (grid, mut rng) = setup();
        let mut snake = Snake::new(grid.center());

        let outcome = snake.advance(&grid, &mut rng);
        assert_eq!(outcome, MoveOutcome::Moved { grew: false });
        assert_eq!(snake.head(), Cell::new(17, 12));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.last_removed(), Some(Cell::new(16, 12)));
    }

    #[test]
    fn test_direction_applies_on_next_move() {
        let (grid, mut rng) = setup();
        let mut snake = Snake::new(grid.center());

        snake.update_direction(Direction::Down);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), Some(Direction::Down));

        snake.advance(&grid, &mut rng);
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.head(), Cell::new(16, 13));
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_no_instant_reversal() {
        let (grid, mut rng) = setup();
        let mut snake = Snake::new(grid.center());

        snake.update_direction(Direction::Left);
        snake.advance(&grid, &mut rng);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Cell::new(17, 12));
    }

    #[test]
    fn test_last_request_wins() {
        let (grid, mut rng) = setup();
        let mut snake = Snake::new(grid.center());

        snake.update_direction(Direction::Up);
        snake.update_direction(Direction::Left); // reverse of Right, dropped
        assert_eq!(snake.pending_direction(), Some(Direction::Up));

        snake.update_direction(Direction::Down);
        snake.advance(&grid, &mut rng);
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn test_growth_takes_one_move() {
        let (grid, mut rng) = setup();
        let mut snake = Snake::new(grid.center());

        snake.grow();
        assert_eq!(snake.length_target(), 2);
        assert_eq!(snake.len(), 1);

        let outcome = snake.advance(&grid, &mut rng);
        assert_eq!(outcome, MoveOutcome::Moved { grew: true });
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.last_removed(), None);

        let outcome = snake.advance(&grid, &mut rng);
        assert_eq!(outcome, MoveOutcome::Moved { grew: false });
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_wraps_at_edge() {
        let (grid, mut rng) = setup();
        let mut snake = Snake::from_segments(grid.center(), &cells(&[(31, 4)]), Direction::Right);

        snake.advance(&grid, &mut rng);
        assert_eq!(snake.head(), Cell::new(0, 4));
    }

    #[test]
    fn test_collision_resets() {
        let (grid, mut rng) = setup();
        // Hook shape: heading up from (5,6) into (5,5), which stays occupied.
        let body = cells(&[(5, 6), (6, 6), (6, 5), (5, 5), (4, 5)]);
        let mut snake = Snake::from_segments(grid.center(), &body, Direction::Left);
        snake.update_direction(Direction::Up);

        let outcome = snake.advance(&grid, &mut rng);
        assert!(matches!(outcome, MoveOutcome::Collided(e) if e.cell == Cell::new(5, 5)));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), grid.center());
        assert_eq!(snake.length_target(), 1);
        assert_eq!(snake.last_removed(), None);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_chasing_tail_in_a_square() {
        let (grid, mut rng) = setup();
        let body = cells(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let mut snake = Snake::from_segments(grid.center(), &body, Direction::Left);
        snake.update_direction(Direction::Down);

        let outcome = snake.advance(&grid, &mut rng);
        assert_eq!(outcome, MoveOutcome::Moved { grew: false });
        assert_eq!(snake.head(), Cell::new(0, 1));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.last_removed(), Some(Cell::new(0, 1)));
    }

    #[test]
    fn test_growing_into_tail_collides() {
        let (grid, mut rng) = setup();
        let body = cells(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let mut snake = Snake::from_segments(grid.center(), &body, Direction::Left);
        snake.update_direction(Direction::Down);
        snake.grow();

        let outcome = snake.advance(&grid, &mut rng);
        assert!(matches!(outcome, MoveOutcome::Collided(_)));
    }

    #[test]
    fn test_reset_invariants() {
        let (grid, mut rng) = setup();
        let mut snake = Snake::from_segments(
            grid.center(),
            &cells(&[(3, 3), (3, 4), (3, 5)]),
            Direction::Up,
        );
        snake.grow();

        snake.reset(&mut rng);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![grid.center()]);
        assert_eq!(snake.length_target(), 1);
        assert!(Direction::ALL.contains(&snake.direction()));
    }
}
