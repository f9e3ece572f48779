use std::collections::HashSet;

use grid_snake::game::{Food, Grid};
use grid_snake::{Cell, Command, Direction, GameConfig, RoundController, RoundState, TickOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn round(config: GameConfig, seed: u64) -> RoundController {
    RoundController::with_rng(config, StdRng::seed_from_u64(seed)).unwrap()
}

/// Put the food right where the head goes next
fn bait(round: &mut RoundController) {
    let next = round.grid().step(round.snake().head(), round.snake().direction());
    round.place_food(Food::at(next));
}

#[test]
fn test_right_down_down_from_center() {
    let mut round = round(GameConfig::new(32, 24), 1);
    let center = round.grid().center();
    round.place_food(Food::at(Cell::new(0, 0)));

    for command in [Command::MoveRight, Command::MoveDown, Command::MoveDown] {
        round.apply_input(command);
        assert_eq!(round.tick(), TickOutcome::Moved);
    }

    assert_eq!(round.snake().head(), Cell::new(center.x + 1, center.y + 2));
    assert_eq!(round.snake().len(), 1);
}

#[test]
fn test_reverse_request_is_ignored_for_the_tick() {
    let mut round = round(GameConfig::default(), 2);
    round.place_food(Food::at(Cell::new(0, 0)));

    round.apply_input(Command::MoveLeft);
    round.tick();
    assert_eq!(round.snake().direction(), Direction::Right);
}

#[test]
fn test_growth_lands_within_one_move() {
    let mut round = round(GameConfig::default(), 3);

    for expected in 2..=6 {
        bait(&mut round);
        assert_eq!(round.tick(), TickOutcome::Ate);
        assert_eq!(round.snake().length_target(), expected);
        assert_eq!(round.snake().len(), expected - 1);

        round.place_food(Food::at(Cell::new(0, 0)));
        assert_eq!(round.tick(), TickOutcome::Moved);
        assert_eq!(round.snake().len(), expected);
    }
}

#[test]
fn test_feeding_until_won_then_restart() {
    let mut round = round(GameConfig::default().with_win_length(8), 4);

    let mut outcome = TickOutcome::Moved;
    for _ in 0..7 {
        bait(&mut round);
        outcome = round.tick();
    }
    assert_eq!(outcome, TickOutcome::Won);
    assert_eq!(round.state(), RoundState::Won);
    assert_eq!(round.frame().state, RoundState::Won);
    assert_eq!(round.snake().length_target(), 8);

    assert_eq!(round.tick(), TickOutcome::Frozen);

    round.apply_input(Command::Restart);
    assert_eq!(round.tick(), TickOutcome::Restarted);
    assert_eq!(round.state(), RoundState::Running);
    assert_eq!(round.snake().body().len(), 1);
    assert_eq!(round.snake().head(), round.grid().center());
    assert!(!round.snake().contains(round.food().position()));
}

#[test]
fn test_small_board_can_be_filled() {
    // 2x2 board, win at 4: the last food lands on the only free cell.
    let mut round = round(GameConfig::new(2, 2).with_win_length(4), 5);

    let mut outcome = TickOutcome::Moved;
    let mut ticks = 0;
    while round.state() == RoundState::Running && ticks < 10_000 {
        let food = round.food().position();
        let head = round.snake().head();
        let toward = Direction::ALL
            .into_iter()
            .find(|d| round.grid().step(head, *d) == food);
        let direction = toward.unwrap_or(match round.snake().direction() {
            // Food sits diagonally: turn so it becomes adjacent
            Direction::Left | Direction::Right => Direction::Down,
            Direction::Up | Direction::Down => Direction::Right,
        });
        round.apply_input(direction.into());
        outcome = round.tick();
        ticks += 1;
    }

    assert_eq!(outcome, TickOutcome::Won);
}

#[test]
fn test_random_play_keeps_invariants() {
    let config = GameConfig::new(6, 5).with_win_length(30);
    let grid = Grid::from_config(&config);
    let mut round = round(config, 6);
    let mut rng = StdRng::seed_from_u64(99);

    let moves = [
        Command::MoveUp,
        Command::MoveDown,
        Command::MoveLeft,
        Command::MoveRight,
    ];

    for _ in 0..3_000 {
        if rng.gen_bool(0.4) {
            round.apply_input(moves[rng.gen_range(0..moves.len())]);
        }
        if round.state() == RoundState::Won {
            round.apply_input(Command::Restart);
        }
        round.tick();

        let snake = round.snake();
        let body: Vec<Cell> = snake.body().iter().copied().collect();
        let unique: HashSet<Cell> = body.iter().copied().collect();

        assert!(body.iter().all(|c| grid.contains(*c)));
        assert_eq!(unique.len(), body.len());
        assert!(!body.contains(&round.food().position()));
        assert!(grid.contains(round.food().position()));
        assert!(body.len() <= snake.length_target());
        assert!(snake.length_target() - body.len() <= 1);
    }
}
