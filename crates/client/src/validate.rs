//! Synchronous validation for the pickup-scheduling form.
//!
//! Pure field checks, no I/O: the result is a field-keyed message map and
//! an empty map means the form may be submitted. Contact fields defer to
//! the parsers in [`fresh_fold_core::contact`]; the date check is a
//! format gate plus a not-in-the-past range check.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use fresh_fold_core::{Email, PhoneNumber};

/// `YYYY-MM-DD`, the only accepted pickup-date format.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Field-keyed validation messages; empty means valid.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Raw input from the pickup-scheduling form.
#[derive(Debug, Clone, Default)]
pub struct PickupRequestForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// `YYYY-MM-DD`.
    pub pickup_date: String,
}

/// Validate a pickup request against `today`.
///
/// `today` is a parameter rather than read from the clock so that callers
/// (and tests) control the boundary.
#[must_use]
pub fn validate_pickup_request(form: &PickupRequestForm, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert("name", "Name is required".to_owned());
    } else if name.len() < 2 {
        errors.insert("name", "Name must be at least 2 characters".to_owned());
    }

    if form.phone.trim().is_empty() {
        errors.insert("phone", "Phone number is required".to_owned());
    } else if let Err(e) = PhoneNumber::parse(&form.phone) {
        errors.insert("phone", e.to_string());
    }

    if form.email.trim().is_empty() {
        errors.insert("email", "Email is required".to_owned());
    } else if let Err(e) = Email::parse(form.email.trim()) {
        errors.insert("email", e.to_string());
    }

    if form.address.trim().is_empty() {
        errors.insert("address", "Pickup address is required".to_owned());
    } else if form.address.trim().len() < 5 {
        errors.insert(
            "address",
            "Address looks too short to deliver to".to_owned(),
        );
    }

    validate_pickup_date(&form.pickup_date, today, &mut errors);

    errors
}

fn validate_pickup_date(raw: &str, today: NaiveDate, errors: &mut FieldErrors) {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert("pickup_date", "Pickup date is required".to_owned());
        return;
    }
    if !DATE_RE.is_match(raw) {
        errors.insert(
            "pickup_date",
            "Pickup date must be in YYYY-MM-DD format".to_owned(),
        );
        return;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) if date < today => {
            errors.insert("pickup_date", "Pickup date cannot be in the past".to_owned());
        }
        Ok(_) => {}
        Err(_) => {
            errors.insert("pickup_date", "Pickup date is not a real date".to_owned());
        }
    }
}
