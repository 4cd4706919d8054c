use std::collections::HashSet;

use naval_duel::{
    Coordinate, FleetGenerator, GameConfig, BOARD_SIZE, FLEET_SIZES, NUM_SHIPS,
    TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_fleet_is_valid(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = FleetGenerator::default().generate(&mut rng).unwrap();

        prop_assert_eq!(fleet.len(), NUM_SHIPS);
        let mut sizes: Vec<usize> = fleet.ships().iter().map(|s| s.len()).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(sizes, FLEET_SIZES.to_vec());

        let mut seen = HashSet::new();
        for ship in fleet.ships() {
            let ul = ship.upper_left();
            let lr = ship.lower_right();
            prop_assert!(ul.row == lr.row || ul.col == lr.col);
            prop_assert!(ul.row <= lr.row && ul.col <= lr.col);
            for cell in ship.cells() {
                prop_assert!(cell.in_bounds(BOARD_SIZE));
                prop_assert!(seen.insert(cell), "cell {} shared by two ships", cell);
            }
        }
        prop_assert_eq!(seen.len(), TOTAL_SHIP_CELLS);
        prop_assert_eq!(fleet.total_cells(), TOTAL_SHIP_CELLS);
    }

    #[test]
    fn same_seed_same_fleet(seed in any::<u64>()) {
        let generator = FleetGenerator::default();
        let a = generator.generate(&mut SmallRng::seed_from_u64(seed)).unwrap();
        let b = generator.generate(&mut SmallRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn default_fleet_covers_26_cells() {
    assert_eq!(NUM_SHIPS, 10);
    assert_eq!(TOTAL_SHIP_CELLS, FLEET_SIZES.iter().sum::<usize>());
    assert_eq!(TOTAL_SHIP_CELLS, 26);
}

#[test]
fn custom_board_and_sizes() {
    let config = GameConfig::default()
        .with_board_size(6)
        .with_fleet_sizes(vec![3, 2, 2, 1]);
    let generator = FleetGenerator::from_config(&config);
    assert_eq!(generator.board_size(), 6);
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..50 {
        let fleet = generator.generate(&mut rng).unwrap();
        assert_eq!(fleet.total_cells(), 8);
        for cell in fleet.ships().iter().flat_map(|s| s.cells()) {
            assert!(cell.in_bounds(6));
        }
        assert!(fleet.ship_at(Coordinate::new(6, 0)).is_none());
    }
}
