use broadside::{Ship, ShipCode, FLEET, TOTAL_SHIP_CELLS};

#[test]
fn test_fleet_roster() {
    let roster: Vec<_> = FLEET
        .iter()
        .map(|c| (c.symbol(), c.name(), c.length()))
        .collect();
    assert_eq!(
        roster,
        vec![
            ('C', "Carrier", 5),
            ('B', "Battleship", 4),
            ('D', "Destroyer", 3),
            ('S', "Submarine", 3),
            ('P', "Patrol Boat", 2),
        ]
    );
    let total: usize = FLEET.iter().map(|c| c.length()).sum();
    assert_eq!(total, TOTAL_SHIP_CELLS);
    assert_eq!(TOTAL_SHIP_CELLS, 17);
}

#[test]
fn test_from_symbol() {
    for code in ShipCode::ALL {
        assert_eq!(ShipCode::from_symbol(code.symbol()), Some(code));
        assert_eq!(
            ShipCode::from_symbol(code.symbol().to_ascii_lowercase()),
            Some(code)
        );
    }
    assert_eq!(ShipCode::from_symbol('X'), None);
    assert_eq!(ShipCode::from_symbol('-'), None);
}

#[test]
fn test_index_is_stable() {
    for (i, code) in FLEET.iter().enumerate() {
        assert_eq!(code.index(), i);
    }
}

#[test]
fn test_new_ship_is_undamaged() {
    let ship = Ship::new(ShipCode::Destroyer);
    assert_eq!(ship.code(), ShipCode::Destroyer);
    assert_eq!(ship.length(), 3);
    assert_eq!(ship.health(), 3);
    assert!(!ship.is_sunk());
    assert_eq!(ship.name(), "Destroyer");
}

#[test]
fn test_display_uses_name() {
    assert_eq!(ShipCode::PatrolBoat.to_string(), "Patrol Boat");
    assert_eq!(format!("[{:<8}]", ShipCode::Carrier), "[Carrier ]");
}
