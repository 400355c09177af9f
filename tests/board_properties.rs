//! Randomized checks of generated layouts and of counter bookkeeping under
//! arbitrary move sequences.

use minegrid::*;
use proptest::prelude::*;

fn arb_config() -> impl Strategy<Value = BoardConfig> {
    (1..=9u8, 1..=9u8)
        .prop_flat_map(|(rows, cols)| {
            let cells = u16::from(rows) * u16::from(cols);
            (Just(rows), Just(cols), 0..cells)
        })
        .prop_map(|(rows, cols, hazards)| BoardConfig::new_unchecked(rows, cols, hazards))
}

// Play sessions draw positions from 0..=dim so a sliver of each axis lands
// out of bounds and exercises the rejection paths.
fn arb_session() -> impl Strategy<Value = (BoardConfig, u64, Vec<(Coord, Coord, bool)>)> {
    (arb_config(), any::<u64>()).prop_flat_map(|(config, seed)| {
        let moves = proptest::collection::vec(
            (0..=config.rows, 0..=config.cols, any::<bool>()),
            0..40,
        );
        (Just(config), Just(seed), moves)
    })
}

fn count_cells(board: &Board, predicate: impl Fn(Cell) -> bool) -> CellCount {
    let (rows, cols) = board.size();
    let mut count = 0;
    for row in 0..rows {
        for col in 0..cols {
            if predicate(board.cell_at((row, col)).unwrap()) {
                count += 1;
            }
        }
    }
    count
}

// Independent neighbor enumeration, deliberately not sharing code with the
// crate's iterator.
fn neighbors(pos: Coord2, size: Coord2) -> Vec<Coord2> {
    let mut result = Vec::new();
    for d_row in -1i16..=1 {
        for d_col in -1i16..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            let row = i16::from(pos.0) + d_row;
            let col = i16::from(pos.1) + d_col;
            if (0..i16::from(size.0)).contains(&row) && (0..i16::from(size.1)).contains(&col) {
                result.push((row as Coord, col as Coord));
            }
        }
    }
    result
}

fn first_hazard(board: &Board) -> Option<Coord2> {
    let (rows, cols) = board.size();
    for row in 0..rows {
        for col in 0..cols {
            if board.cell_at((row, col)).unwrap().is_hazard() {
                return Some((row, col));
            }
        }
    }
    None
}

proptest! {
    #[test]
    fn generated_layout_matches_config((config, seed) in (arb_config(), any::<u64>())) {
        let board = Board::generate(config, seed).unwrap();
        prop_assert_eq!(board.config(), config);

        let (rows, cols) = board.size();
        let mut hazards: CellCount = 0;
        for row in 0..rows {
            for col in 0..cols {
                let cell = board.cell_at((row, col)).unwrap();
                if cell.is_hazard() {
                    hazards += 1;
                }
                let recounted = neighbors((row, col), (rows, cols))
                    .into_iter()
                    .filter(|&pos| board.cell_at(pos).unwrap().is_hazard())
                    .count() as u8;
                prop_assert_eq!(cell.adjacent_hazards(), recounted);
            }
        }
        prop_assert_eq!(hazards, config.hazards);
    }

    #[test]
    fn generation_is_deterministic((config, seed) in (arb_config(), any::<u64>())) {
        let first = Board::generate(config, seed).unwrap();
        let second = Board::generate(config, seed).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn counters_match_grid_over_random_play((config, seed, moves) in arb_session()) {
        let mut board = Board::generate(config, seed).unwrap();
        let mut last_revealed = 0;

        for (row, col, flag) in moves {
            let before = board.clone();
            let pos = (row, col);

            let has_update = if flag {
                board.toggle_flag(pos).has_update()
            } else {
                board.reveal(pos).has_update()
            };
            if !has_update {
                prop_assert_eq!(&board, &before);
            }
            if before.is_finished() {
                prop_assert_eq!(&board, &before);
            }

            prop_assert_eq!(board.revealed_count(), count_cells(&board, Cell::is_revealed));
            prop_assert_eq!(board.flagged_count(), count_cells(&board, Cell::is_flagged));
            prop_assert!(board.revealed_count() >= last_revealed);
            last_revealed = board.revealed_count();
        }
    }

    // With no flags in play, a revealed zero-adjacency cell implies all its
    // neighbors are revealed too.
    #[test]
    fn flood_leaves_no_hidden_neighbor_of_a_blank((config, seed, moves) in arb_session()) {
        let mut board = Board::generate(config, seed).unwrap();
        for (row, col, _) in moves {
            board.reveal((row, col));
        }

        let (rows, cols) = board.size();
        for row in 0..rows {
            for col in 0..cols {
                let cell = board.cell_at((row, col)).unwrap();
                if cell.is_revealed() && !cell.is_hazard() && cell.adjacent_hazards() == 0 {
                    for neighbor in neighbors((row, col), (rows, cols)) {
                        prop_assert!(board.cell_at(neighbor).unwrap().is_revealed());
                    }
                }
            }
        }
    }

    #[test]
    fn striking_a_hazard_exposes_every_hazard(
        (config, seed) in (
            arb_config().prop_filter("needs a hazard", |config| config.hazards >= 1),
            any::<u64>(),
        ),
    ) {
        let mut board = Board::generate(config, seed).unwrap();
        let struck = first_hazard(&board).unwrap();

        let outcome = board.reveal(struck);

        prop_assert!(
            matches!(outcome, RevealOutcome::HitHazard { .. }),
            "expected HitHazard, got {:?}",
            outcome
        );
        prop_assert_eq!(board.status(), GameStatus::Lost);
        prop_assert_eq!(board.triggered_hazard(), Some(struck));
        prop_assert_eq!(
            count_cells(&board, |cell| cell.is_hazard() && cell.is_revealed()),
            board.hazard_count()
        );
        prop_assert_eq!(board.revealed_count(), count_cells(&board, Cell::is_revealed));
    }

    #[test]
    fn zero_hazard_board_wins_on_any_first_reveal(
        (rows, cols, seed) in (1..=9u8, 1..=9u8, any::<u64>()),
    ) {
        let config = BoardConfig::new(rows, cols, 0).unwrap();
        let mut board = Board::generate(config, seed).unwrap();

        let outcome = board.reveal((0, 0));

        prop_assert!(matches!(outcome, RevealOutcome::Won(_)));
        prop_assert_eq!(board.status(), GameStatus::Won);
        prop_assert_eq!(board.revealed_count(), board.total_cells());
    }
}
