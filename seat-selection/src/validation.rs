//! Passenger field validation.
//!
//! Three pure validators, a sparse per-passenger error map that is updated
//! one cell at a time as fields are edited, and the submit-time check that
//! decides whether the form may be handed off.

#![allow(clippy::module_name_repetitions)]

use crate::passenger::PassengerForm;
use crate::types::PassengerField;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Shown when a name contains anything but letters and spaces
pub const NAME_MESSAGE: &str = "Name must contain only letters and spaces";
/// Shown when an email is malformed
pub const EMAIL_MESSAGE: &str = "Invalid email format";
/// Shown when a phone number is not ten digits
pub const PHONE_MESSAGE: &str = "Phone number must be 10 digits";

#[allow(clippy::expect_used)] // literal patterns
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("name pattern compiles"));

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[allow(clippy::expect_used)]
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));

// ============================================================================
// Validators
// ============================================================================

/// Letters and whitespace only, judged after trimming
#[must_use]
pub fn validate_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name.trim())
}

/// `local@domain.tld` with no whitespace and a single `@`
#[must_use]
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Exactly ten ASCII digits, not starting with `00`
#[must_use]
pub fn validate_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone) && !phone.starts_with("00")
}

impl PassengerField {
    /// Run this field's validator
    #[must_use]
    pub fn is_valid(self, value: &str) -> bool {
        match self {
            Self::Name => validate_name(value),
            Self::Email => validate_email(value),
            Self::Phone => validate_phone(value),
        }
    }

    /// Message recorded when this field's validator fails
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Name => NAME_MESSAGE,
            Self::Email => EMAIL_MESSAGE,
            Self::Phone => PHONE_MESSAGE,
        }
    }
}

// ============================================================================
// Error map
// ============================================================================

/// Errors recorded against one passenger record
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<PassengerField, &'static str>);

impl FieldErrors {
    /// Message for one field, if it is in error
    #[must_use]
    pub fn get(&self, field: PassengerField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Fields in error, with their messages
    pub fn iter(&self) -> impl Iterator<Item = (PassengerField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    /// Number of fields in error
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is in error
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sparse map from passenger index to that record's field errors
///
/// Only indices with at least one field in error are present; an entry is
/// pruned the moment its last field is corrected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: BTreeMap<usize, FieldErrors>,
}

impl ErrorMap {
    /// Creates an empty map
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Re-validate one edited cell and update only that cell
    ///
    /// Returns whether the value passed.
    pub fn on_field_edit(&mut self, index: usize, field: PassengerField, value: &str) -> bool {
        let valid = field.is_valid(value);

        if valid {
            if let Some(errors) = self.entries.get_mut(&index) {
                errors.0.remove(&field);
                if errors.is_empty() {
                    self.entries.remove(&index);
                }
            }
        } else {
            self.entries
                .entry(index)
                .or_default()
                .0
                .insert(field, field.failure_message());
        }

        valid
    }

    /// Errors for one passenger
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FieldErrors> {
        self.entries.get(&index)
    }

    /// Message for one cell
    #[must_use]
    pub fn message(&self, index: usize, field: PassengerField) -> Option<&'static str> {
        self.get(index).and_then(|errors| errors.get(field))
    }

    /// Indices with at least one field in error, ascending
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }

    /// Forget entries at or beyond `len`
    pub fn truncate(&mut self, len: usize) {
        self.entries.retain(|index, _| *index < len);
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of passengers with errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no passenger has errors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Submit-time check
// ============================================================================

/// Why a submit attempt did not produce a booking
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    /// No seat is selected
    #[error("No seats selected")]
    NothingSelected,

    /// Some passenger field is empty
    #[error("Please fill out all passenger information!")]
    Incomplete,

    /// Edits left format errors that were never corrected
    #[error("Please correct the highlighted passenger details")]
    UncorrectedErrors {
        /// Passenger indices still in error
        indices: Vec<usize>,
    },
}

/// Decide whether the form may be submitted
///
/// Runs two independent sweeps. Every field must be non-empty (untrimmed),
/// then the error map must hold no leftover entries. Formats are not
/// re-validated here; fields never edited are caught by the first sweep.
///
/// # Errors
///
/// Returns [`SubmitRejection::Incomplete`] from the first sweep and
/// [`SubmitRejection::UncorrectedErrors`] from the second.
pub fn validate_all(form: &PassengerForm, errors: &ErrorMap) -> Result<(), SubmitRejection> {
    if !form.records().iter().all(crate::types::PassengerRecord::is_complete) {
        return Err(SubmitRejection::Incomplete);
    }

    if !errors.is_empty() {
        return Err(SubmitRejection::UncorrectedErrors {
            indices: errors.indices(),
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn name_examples() {
        assert!(validate_name("John Smith"));
        assert!(validate_name("  Jane Roe "));
        assert!(!validate_name("John3"));
        assert!(!validate_name(""));
        assert!(!validate_name("   "));
        assert!(!validate_name("O'Brien"));
    }

    #[test]
    fn email_examples() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("Jane.Roe@Example.COM"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a b@c.de"));
        assert!(!validate_email("a@@b.co"));
        assert!(!validate_email(""));
    }

    #[test]
    fn phone_examples() {
        assert!(validate_phone("9876543210"));
        assert!(validate_phone("0123456789"));
        assert!(!validate_phone("0012345678"));
        assert!(!validate_phone("0000000000"));
        assert!(!validate_phone("12345"));
        assert!(!validate_phone("98765432101"));
        assert!(!validate_phone("98765-4321"));
    }

    #[test]
    fn invalid_edit_records_fixed_message() {
        let mut errors = ErrorMap::new();

        assert!(!errors.on_field_edit(0, PassengerField::Name, "John3"));
        assert!(!errors.on_field_edit(0, PassengerField::Phone, "12345"));

        assert_eq!(errors.message(0, PassengerField::Name), Some(NAME_MESSAGE));
        assert_eq!(errors.message(0, PassengerField::Phone), Some(PHONE_MESSAGE));
        assert_eq!(errors.message(0, PassengerField::Email), None);
    }

    #[test]
    fn correcting_last_field_prunes_the_entry() {
        let mut errors = ErrorMap::new();
        errors.on_field_edit(1, PassengerField::Name, "John3");
        errors.on_field_edit(1, PassengerField::Email, "nope");

        assert!(errors.on_field_edit(1, PassengerField::Name, "John"));
        assert_eq!(errors.get(1).unwrap().len(), 1);
        assert_eq!(errors.message(1, PassengerField::Email), Some(EMAIL_MESSAGE));

        assert!(errors.on_field_edit(1, PassengerField::Email, "john@x.com"));
        assert!(errors.get(1).is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn edit_touches_only_its_cell() {
        let mut errors = ErrorMap::new();
        errors.on_field_edit(0, PassengerField::Email, "bad");
        errors.on_field_edit(1, PassengerField::Email, "bad");

        errors.on_field_edit(0, PassengerField::Email, "ok@x.io");

        assert_eq!(errors.indices(), vec![1]);
    }

    #[test]
    fn valid_edit_on_clean_index_is_a_no_op() {
        let mut errors = ErrorMap::new();
        errors.on_field_edit(2, PassengerField::Phone, "9876543210");
        assert!(errors.is_empty());
    }

    #[test]
    fn truncate_drops_indices_beyond_the_form() {
        let mut errors = ErrorMap::new();
        errors.on_field_edit(0, PassengerField::Name, "1");
        errors.on_field_edit(2, PassengerField::Name, "1");

        errors.truncate(1);

        assert_eq!(errors.indices(), vec![0]);
    }

    fn filled_form(phone: &str) -> PassengerForm {
        let mut form = PassengerForm::new();
        form.reprovision(1);
        form.set_field(0, PassengerField::Name, "Jane Roe".into()).unwrap();
        form.set_field(0, PassengerField::Email, "jane@x.com".into()).unwrap();
        form.set_field(0, PassengerField::Phone, phone.into()).unwrap();
        form
    }

    #[test]
    fn validate_all_requires_every_field() {
        let mut form = PassengerForm::new();
        form.reprovision(2);

        assert_eq!(
            validate_all(&form, &ErrorMap::new()),
            Err(SubmitRejection::Incomplete)
        );
    }

    #[test]
    fn validate_all_checks_required_before_stale_errors() {
        let mut form = PassengerForm::new();
        form.reprovision(1);
        let mut errors = ErrorMap::new();
        errors.on_field_edit(0, PassengerField::Name, "John3");

        assert_eq!(validate_all(&form, &errors), Err(SubmitRejection::Incomplete));
    }

    #[test]
    fn validate_all_blocks_on_leftover_errors() {
        let form = filled_form("0099999999");
        let mut errors = ErrorMap::new();
        errors.on_field_edit(0, PassengerField::Phone, "0099999999");

        assert_eq!(
            validate_all(&form, &errors),
            Err(SubmitRejection::UncorrectedErrors { indices: vec![0] })
        );
    }

    #[test]
    fn validate_all_trusts_accumulated_errors() {
        // Never edited through on_field_edit, so no error was recorded
        let form = filled_form("0099999999");
        assert_eq!(validate_all(&form, &ErrorMap::new()), Ok(()));
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(
            SubmitRejection::Incomplete.to_string(),
            "Please fill out all passenger information!"
        );
        assert_eq!(
            SubmitRejection::UncorrectedErrors { indices: vec![0] }.to_string(),
            "Please correct the highlighted passenger details"
        );
    }
}
