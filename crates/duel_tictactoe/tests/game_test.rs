//! Tests for the tic-tac-toe engine.

use duel_tictactoe::{
    evaluate_outcome, is_full, Board, Cell, Coord, Game, Outcome, PlaceRejection, Role, LINES,
};

fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col).unwrap()
}

/// Every one of the 3^9 possible cell assignments.
fn all_boards() -> impl Iterator<Item = Board> {
    (0..3usize.pow(9)).map(|mut n| {
        let mut board = Board::new();
        for coord in Coord::ALL {
            let cell = match n % 3 {
                0 => Cell::Empty,
                1 => Cell::Mark(Role::First),
                _ => Cell::Mark(Role::Second),
            };
            board.set(coord, cell);
            n /= 3;
        }
        board
    })
}

#[test]
fn test_evaluate_outcome_matches_line_definition_on_every_board() {
    for board in all_boards() {
        for role in [Role::First, Role::Second] {
            let complete: Vec<_> = LINES
                .into_iter()
                .filter(|line| line.iter().all(|c| board.get(*c) == Cell::Mark(role)))
                .collect();
            assert_eq!(
                evaluate_outcome(&board, role),
                complete.first().copied(),
                "board:\n{}",
                board.display()
            );
        }
    }
}

#[test]
fn test_is_full_matches_cell_scan_on_every_board() {
    for board in all_boards() {
        let expected = Coord::ALL.iter().all(|c| !board.is_empty(*c));
        assert_eq!(is_full(&board), expected);
    }
}

#[test]
fn test_scenario_no_outcome_after_four_moves() {
    let mut game = Game::new();
    for (role, cell) in [
        (Role::First, at(0, 0)),
        (Role::Second, at(1, 1)),
        (Role::First, at(0, 1)),
        (Role::Second, at(2, 2)),
    ] {
        assert_eq!(game.place(role, cell), Ok(Outcome::Undecided));
    }
    assert_eq!(game.outcome(), Outcome::Undecided);
    assert!(!is_full(game.board()));
    assert_eq!(game.turn(), Role::First);
}

#[test]
fn test_scenario_first_wins_top_row() {
    let mut game = Game::new();
    game.place(Role::First, at(0, 0)).unwrap();
    game.place(Role::Second, at(1, 0)).unwrap();
    game.place(Role::First, at(0, 1)).unwrap();
    game.place(Role::Second, at(1, 1)).unwrap();
    let outcome = game.place(Role::First, at(0, 2)).unwrap();

    assert_eq!(outcome, Outcome::Won(Role::First));
    assert_eq!(game.winning_line(), Some([at(0, 0), at(0, 1), at(0, 2)]));
}

#[test]
fn test_scenario_full_board_is_drawn() {
    // Final board: X O X / X O O / O X X
    let mut game = Game::new();
    let moves = [
        (Role::First, at(0, 0)),
        (Role::Second, at(0, 1)),
        (Role::First, at(0, 2)),
        (Role::Second, at(1, 1)),
        (Role::First, at(1, 0)),
        (Role::Second, at(2, 0)),
        (Role::First, at(2, 1)),
        (Role::Second, at(1, 2)),
        (Role::First, at(2, 2)),
    ];
    for (i, (role, cell)) in moves.into_iter().enumerate() {
        let outcome = game.place(role, cell).unwrap();
        if i < moves.len() - 1 {
            assert_eq!(outcome, Outcome::Undecided);
        }
    }
    assert_eq!(game.outcome(), Outcome::Drawn);
    assert_eq!(game.winning_line(), None);
    assert!(is_full(game.board()));
}

#[test]
fn test_scenario_second_cannot_move_first() {
    let mut game = Game::new();
    let before = game.clone();
    assert_eq!(
        game.place(Role::Second, Coord::CENTER),
        Err(PlaceRejection::NotYourTurn)
    );
    assert_eq!(game, before);
}

#[test]
fn test_win_on_last_cell_is_not_a_draw() {
    // X O X / O X O / O X _ : X completes the main diagonal on the ninth cell.
    let mut game = Game::new();
    for (role, cell) in [
        (Role::First, at(0, 0)),
        (Role::Second, at(0, 1)),
        (Role::First, at(0, 2)),
        (Role::Second, at(1, 0)),
        (Role::First, at(1, 1)),
        (Role::Second, at(1, 2)),
        (Role::First, at(2, 1)),
        (Role::Second, at(2, 0)),
    ] {
        game.place(role, cell).unwrap();
    }
    let outcome = game.place(Role::First, at(2, 2)).unwrap();
    assert_eq!(outcome, Outcome::Won(Role::First));
    assert!(is_full(game.board()));
}

#[test]
fn test_turn_alternates_and_rejections_do_not_mutate() {
    let mut game = Game::new();
    let mut mover = Role::First;
    for cell in [at(1, 1), at(0, 0), at(2, 2), at(0, 2)] {
        let snapshot = game.clone();
        assert!(game.place(mover.opponent(), cell).is_err());
        assert_eq!(game, snapshot);

        game.place(mover, cell).unwrap();
        assert_eq!(game.turn(), mover.opponent());

        let snapshot = game.clone();
        assert_eq!(
            game.place(mover.opponent(), cell),
            Err(PlaceRejection::CellOccupied)
        );
        assert_eq!(game, snapshot);

        mover = mover.opponent();
    }
}
