//! Turning a page's form fields into one of the two card layouts.
//!
//! The deck mixes two physical templates: a filler card with a single
//! free-text name line (`PName_`), and a full card with separate `Name_`,
//! `School_` and `Level_` fields. [`PageVariant`] keeps them apart so a
//! name-only card has no school or level slot that could be filled with
//! stale data from an earlier page.

use crate::error::PageError;
use crate::pipeline::fields::{resolve_field, FormEntry};
use serde::{Deserialize, Serialize};

/// School recorded when a full card leaves the `School_` field blank.
pub const UNKNOWN_SCHOOL: &str = "Unknown";

pub const NAME_PREFIX: &str = "Name_";
pub const PNAME_PREFIX: &str = "PName_";
pub const SCHOOL_PREFIX: &str = "School_";
pub const LEVEL_PREFIX: &str = "Level_";

/// The card layout a page turned out to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageVariant {
    /// A `PName_` card: only the name is on the page.
    NameOnly { name: String },
    /// A card with its own name, school and level fields.
    Full {
        name: String,
        school: String,
        level: u32,
    },
}

impl PageVariant {
    pub fn name(&self) -> &str {
        match self {
            PageVariant::NameOnly { name } | PageVariant::Full { name, .. } => name,
        }
    }
}

/// Decide which layout a page carries.
///
/// A non-empty `PName_` wins and makes the page name-only. Otherwise the
/// page is a full card named by `Name_`, with `School_` defaulting to
/// [`UNKNOWN_SCHOOL`] and `Level_` required to be a non-negative integer.
///
/// # Errors
/// * [`PageError::MissingName`] — neither name field has a value
/// * [`PageError::InvalidLevel`] — a full card with a missing or non-numeric level
pub fn reconcile<E: FormEntry>(entries: &[E]) -> Result<PageVariant, PageError> {
    let non_empty = |prefix: &str| resolve_field(entries, prefix).filter(|v| !v.is_empty());

    if let Some(name) = non_empty(PNAME_PREFIX) {
        return Ok(PageVariant::NameOnly { name });
    }

    let name = non_empty(NAME_PREFIX).ok_or(PageError::MissingName)?;
    let school = non_empty(SCHOOL_PREFIX).unwrap_or_else(|| UNKNOWN_SCHOOL.to_string());
    let raw_level = non_empty(LEVEL_PREFIX);
    let level = raw_level
        .as_deref()
        .and_then(|raw| raw.parse::<u32>().ok())
        .ok_or_else(|| PageError::InvalidLevel {
            raw: raw_level.clone(),
        })?;

    Ok(PageVariant::Full {
        name,
        school,
        level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fields::FieldEntry;

    fn page(fields: &[(&str, &str)]) -> Vec<FieldEntry> {
        fields.iter().map(|(n, v)| FieldEntry::new(*n, *v)).collect()
    }

    #[test]
    fn pname_makes_name_only() {
        let p = page(&[("PName_Q1", "Fireball")]);
        assert_eq!(
            reconcile(&p),
            Ok(PageVariant::NameOnly {
                name: "Fireball".into()
            })
        );
    }

    #[test]
    fn pname_wins_over_name_and_ignores_level() {
        let p = page(&[
            ("Name_A", "Other"),
            ("PName_B", "Light"),
            ("Level_C", "not a number"),
        ]);
        assert_eq!(
            reconcile(&p),
            Ok(PageVariant::NameOnly {
                name: "Light".into()
            })
        );
    }

    #[test]
    fn full_card() {
        let p = page(&[
            ("Name_F00", "Cure Wounds"),
            ("School_F01", "Evocation"),
            ("Level_F02", "1"),
        ]);
        assert_eq!(
            reconcile(&p),
            Ok(PageVariant::Full {
                name: "Cure Wounds".into(),
                school: "Evocation".into(),
                level: 1,
            })
        );
    }

    #[test]
    fn missing_school_is_unknown() {
        let p = page(&[("Name_x", "Counterspell"), ("Level_x", "3")]);
        match reconcile(&p).unwrap() {
            PageVariant::Full { school, level, .. } => {
                assert_eq!(school, "Unknown");
                assert_eq!(level, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_school_is_unknown() {
        let p = page(&[("Name_x", "Shield"), ("School_x", "  "), ("Level_x", "1")]);
        match reconcile(&p).unwrap() {
            PageVariant::Full { school, .. } => assert_eq!(school, "Unknown"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn no_name_fields_is_missing_name() {
        let p = page(&[("School_x", "Evocation"), ("Level_x", "2")]);
        assert_eq!(reconcile(&p), Err(PageError::MissingName));
    }

    #[test]
    fn empty_names_are_missing_name() {
        let p = page(&[("Name_x", ""), ("PName_x", "")]);
        assert_eq!(reconcile(&p), Err(PageError::MissingName));
    }

    #[test]
    fn non_numeric_level_is_invalid() {
        let p = page(&[("Name_x", "Wish"), ("Level_x", "ninth")]);
        assert_eq!(
            reconcile(&p),
            Err(PageError::InvalidLevel {
                raw: Some("ninth".into())
            })
        );
    }

    #[test]
    fn missing_level_is_invalid() {
        let p = page(&[("Name_x", "Wish")]);
        assert_eq!(reconcile(&p), Err(PageError::InvalidLevel { raw: None }));
    }

    #[test]
    fn negative_level_is_invalid() {
        let p = page(&[("Name_x", "Wish"), ("Level_x", "-1")]);
        assert!(matches!(
            reconcile(&p),
            Err(PageError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn cantrip_level_zero() {
        let p = page(&[("Name_x", "Mage Hand"), ("Level_x", "0")]);
        assert!(matches!(
            reconcile(&p),
            Ok(PageVariant::Full { level: 0, .. })
        ));
    }
}
