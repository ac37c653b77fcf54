//! # Location Conversion
//!
//! Absolute locations are written from a sibling's point of view:
//! `{parents: 1, interior: [Parachain(p), ...]}`. Relative locations are
//! written from inside parachain `p`: `{parents: 0, interior: [...]}`.

use crate::domain::AdapterError;
use shared_types::{Junction, Location};

/// Convert an absolute location to one relative to its own parachain.
///
/// A location that is already relative is returned unchanged.
pub fn to_relative(absolute: &Location) -> Result<Location, AdapterError> {
    match (absolute.parents, absolute.interior.first()) {
        (0, _) => Ok(absolute.clone()),
        (1, Some(Junction::Parachain(_))) => {
            Ok(Location::new(0, absolute.interior.without_first()))
        }
        _ => Err(AdapterError::MalformedLocation(format!(
            "{} is not a one-hop parachain location",
            absolute
        ))),
    }
}

/// Convert a location relative to parachain `para_id` to its absolute form.
pub fn to_absolute(relative: &Location, para_id: u32) -> Result<Location, AdapterError> {
    if relative.parents != 0 {
        return Err(AdapterError::MalformedLocation(format!(
            "{} is not relative to a parachain",
            relative
        )));
    }
    let interior = relative.interior.pushed_front(Junction::Parachain(para_id))?;
    Ok(Location::new(1, interior))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::Junctions;

    #[test]
    fn test_sibling_becomes_here() {
        assert_eq!(to_relative(&Location::sibling(2114)).unwrap(), Location::here());
    }

    #[test]
    fn test_strips_parachain_keeps_rest() {
        let junctions = vec![Junction::Parachain(1000), Junction::PalletInstance(3)];
        let absolute = Location::with_junctions(1, junctions).unwrap();
        let relative = to_relative(&absolute).unwrap();
        assert_eq!(relative.parents, 0);
        assert_eq!(relative.interior.as_slice(), &[Junction::PalletInstance(3)]);
    }

    #[test]
    fn test_relative_is_unchanged() {
        let relative = Location::with_junctions(0, vec![Junction::GeneralIndex(5)]).unwrap();
        assert_eq!(to_relative(&relative).unwrap(), relative);
    }

    #[test]
    fn test_relay_location_is_malformed() {
        assert!(matches!(
            to_relative(&Location::parent()),
            Err(AdapterError::MalformedLocation(_))
        ));
        let two_hops = Location::new(2, Junctions::here());
        assert!(matches!(
            to_relative(&two_hops),
            Err(AdapterError::MalformedLocation(_))
        ));
    }

    #[test]
    fn test_to_absolute_rejects_ninth_junction() {
        let full = Location::with_junctions(0, vec![Junction::PalletInstance(1); 8]).unwrap();
        assert_eq!(to_absolute(&full, 1), Err(AdapterError::TooManyJunctions(9)));
    }

    #[test]
    fn test_to_absolute_rejects_absolute() {
        assert!(to_absolute(&Location::sibling(1), 2).is_err());
    }

    proptest! {
        #[test]
        fn prop_round_trip_through_absolute(
            para_id in any::<u32>(),
            indices in proptest::collection::vec(any::<u128>(), 0..8),
        ) {
            let junctions = indices.into_iter().map(Junction::GeneralIndex).collect();
            let relative = Location::with_junctions(0, junctions).unwrap();
            let absolute = to_absolute(&relative, para_id).unwrap();
            prop_assert_eq!(absolute.para_id(), Some(para_id));
            prop_assert_eq!(to_relative(&absolute).unwrap(), relative);
        }
    }
}
