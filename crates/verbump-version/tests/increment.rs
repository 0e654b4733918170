use proptest::prelude::*;
use verbump_version::{Version, increment};

proptest! {
    #[test]
    fn increment_bumps_only_minor(
        components in prop::collection::vec(0u64..1_000_000, 2..6)
    ) {
        let version = Version::from_components(components.clone()).unwrap();
        let bumped = increment(&version).unwrap();

        prop_assert_eq!(bumped.components().len(), components.len());
        for (i, (before, after)) in components.iter().zip(bumped.components()).enumerate() {
            if i == Version::MINOR {
                prop_assert_eq!(*after, before + 1);
            } else {
                prop_assert_eq!(after, before);
            }
        }
        prop_assert!(bumped > version);
    }
}
