/// Asserts that a living bumble with the given id has more than `min` energy.
#[macro_export]
macro_rules! assert_energy_above {
    ($world:expr, $id:expr, $min_energy:expr) => {
        let bumble = $world
            .select_agent($id)
            .expect("Bumble not found in world");
        assert!(
            bumble.vitals.energy > $min_energy,
            "Bumble {} energy {} is not above {}",
            $id,
            bumble.vitals.energy,
            $min_energy
        );
    };
}

/// Asserts that no living bumble has the given id.
#[macro_export]
macro_rules! assert_bumble_dead {
    ($world:expr, $id:expr) => {
        assert!(
            $world.select_agent($id).is_none(),
            "Bumble {} should be dead but was found alive",
            $id
        );
    };
}

/// Asserts the living population count.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.alive_count(), $count, "Population count mismatch");
    };
}
