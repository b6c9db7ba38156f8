mod tests {
    use myrtio_light_router::{CapacityError, UNASSIGNED_UNIVERSE, UniverseSet};

    #[test]
    fn test_insert_keeps_first_seen_order() {
        let mut set = UniverseSet::<8>::new();
        assert_eq!(set.insert(5), Ok(true));
        assert_eq!(set.insert(1), Ok(true));
        assert_eq!(set.insert(5), Ok(false));
        assert_eq!(set.insert(3), Ok(true));
        assert_eq!(set.insert(1), Ok(false));
        assert_eq!(set.as_slice(), &[5, 1, 3]);
        assert!(!set.saturated());
    }

    #[test]
    fn test_unassigned_universe_is_ignored() {
        let mut set = UniverseSet::<4>::new();
        assert_eq!(set.insert(UNASSIGNED_UNIVERSE), Ok(false));
        assert!(set.is_empty());
    }

    #[test]
    fn test_full_set_drops_new_universes() {
        let mut set = UniverseSet::<3>::new();
        for universe in [10, 11, 12] {
            assert_eq!(set.insert(universe), Ok(true));
        }
        assert_eq!(set.insert(13), Err(CapacityError(13)));
        assert_eq!(set.insert(14), Err(CapacityError(14)));
        // Known universes are still recognised once full
        assert_eq!(set.insert(11), Ok(false));

        assert_eq!(set.as_slice(), &[10, 11, 12]);
        assert_eq!(set.len(), set.capacity());
        assert!(set.saturated());
        assert_eq!(set.dropped(), 2);
    }

    #[test]
    fn test_pseudo_random_sequences_stay_unique_and_bounded() {
        let mut seed: u32 = 0x1234_5678;
        for _ in 0..64 {
            let mut set = UniverseSet::<6>::new();
            let mut expected: Vec<u16> = Vec::new();
            for _ in 0..40 {
                seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let universe = ((seed >> 16) % 12) as u16;
                let _ = set.insert(universe);
                if !expected.contains(&universe) && expected.len() < 6 {
                    expected.push(universe);
                }
            }
            assert_eq!(set.as_slice(), expected.as_slice());
            assert!(set.len() <= 6);
            let mut sorted = set.as_slice().to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), set.len());
        }
    }
}
