//! Blood-type donation compatibility rules.
//!
//! Encodes the universal donor/universal recipient lattice: which donor
//! types may give to which recipient types. Pure functions, total over
//! the 8x8 type grid.

use lifelink_entity::blood::BloodType;

/// Whether a donor of type `donor` can give to a recipient of type
/// `recipient`.
pub fn can_donate(donor: BloodType, recipient: BloodType) -> bool {
    use BloodType::*;
    matches!(
        (donor, recipient),
        (ONegative, _)
            | (OPositive, OPositive | APositive | BPositive | AbPositive)
            | (ANegative, ANegative | APositive | AbNegative | AbPositive)
            | (APositive, APositive | AbPositive)
            | (BNegative, BNegative | BPositive | AbNegative | AbPositive)
            | (BPositive, BPositive | AbPositive)
            | (AbNegative, AbNegative | AbPositive)
            | (AbPositive, AbPositive)
    )
}

/// Fail-closed label form of [`can_donate`].
///
/// Any label outside the eight-type domain, on either side, yields
/// `false`. Used at boundaries where blood types arrive as raw strings
/// (feed events, imported records).
pub fn can_donate_labels(donor: &str, recipient: &str) -> bool {
    match (donor.parse::<BloodType>(), recipient.parse::<BloodType>()) {
        (Ok(d), Ok(r)) => can_donate(d, r),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BloodType::*;

    /// The donor -> compatible recipients table.
    fn recipients_for(donor: BloodType) -> Vec<BloodType> {
        match donor {
            ONegative => BloodType::ALL.to_vec(),
            OPositive => vec![OPositive, APositive, BPositive, AbPositive],
            ANegative => vec![ANegative, APositive, AbNegative, AbPositive],
            APositive => vec![APositive, AbPositive],
            BNegative => vec![BNegative, BPositive, AbNegative, AbPositive],
            BPositive => vec![BPositive, AbPositive],
            AbNegative => vec![AbNegative, AbPositive],
            AbPositive => vec![AbPositive],
        }
    }

    #[test]
    fn test_all_64_pairs_match_table() {
        for donor in BloodType::ALL {
            let allowed = recipients_for(donor);
            for recipient in BloodType::ALL {
                assert_eq!(
                    can_donate(donor, recipient),
                    allowed.contains(&recipient),
                    "donor {donor} -> recipient {recipient}"
                );
            }
        }
    }

    #[test]
    fn test_universal_donor_and_recipient() {
        for recipient in BloodType::ALL {
            assert!(can_donate(ONegative, recipient));
        }
        for donor in BloodType::ALL {
            assert!(can_donate(donor, AbPositive));
        }
    }

    #[test]
    fn test_labels_fail_closed() {
        assert!(can_donate_labels("O-", "A+"));
        assert!(!can_donate_labels("A+", "O-"));
        assert!(!can_donate_labels("X+", "A+"));
        assert!(!can_donate_labels("O-", "unknown"));
        assert!(!can_donate_labels("", ""));
    }
}
