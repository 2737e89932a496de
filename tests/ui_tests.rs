use broadside::ui::{render_board, render_probability_board, sunk_summary};
use broadside::{calc_probability, Board, Coordinate, Orientation, ShipCode};

fn sample_board() -> Board {
    let mut board = Board::new();
    board
        .place(ShipCode::PatrolBoat, Coordinate::new(0, 0), Orientation::Horizontal)
        .unwrap();
    board
        .place(ShipCode::Destroyer, Coordinate::new(9, 7), Orientation::Vertical)
        .unwrap();
    board.apply_shot(Coordinate::new(0, 0)).unwrap();
    board.apply_shot(Coordinate::new(5, 5)).unwrap();
    board
}

#[test]
fn test_render_own_board_reveals_ships() {
    let text = render_board(&sample_board(), true);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "     A B C D E F G H I J");
    assert_eq!(lines[2], " 1 | X P - - - - - - - -");
    assert_eq!(lines[7], " 6 | - - - - - O - - - -");
    assert_eq!(lines[11], "10 | - - - - - - - - - D");
}

#[test]
fn test_render_opponent_board_hides_ships() {
    let text = render_board(&sample_board(), false);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[2], " 1 | X - - - - - - - - -");
    assert_eq!(lines[11], "10 | - - - - - - - - - -");
    // skip the column header, which spells out A to J
    for line in &lines[2..] {
        assert!(!line[4..].contains('P'), "ship shown in {:?}", line);
        assert!(!line[4..].contains('D'), "ship shown in {:?}", line);
    }
}

#[test]
fn test_sunk_summary() {
    let mut board = sample_board();
    assert_eq!(sunk_summary(&board), "Ships sunk: 0/5");
    board.apply_shot(Coordinate::new(1, 0)).unwrap();
    assert_eq!(sunk_summary(&board), "Ships sunk: 1/5");
}

#[test]
fn test_render_probability_board() {
    let board = sample_board();
    let text = render_probability_board(&calc_probability(&board.target_view()));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Probability board:");
    assert_eq!(lines.len(), 12);
    assert!(lines[2].starts_with(" 1 |   0"));
}
