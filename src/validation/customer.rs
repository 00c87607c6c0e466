// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Customer form checks.
//!
//! Every field is checked and all failures are reported together, keyed by
//! the wire field name, so a form can highlight each offending input.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::FieldErrors;
use crate::models::{CreateCustomerRequest, UpdateCustomerRequest};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const ADDRESS_MIN: usize = 5;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Cameroon mobile numbers, with or without the `237` country code.
fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^(237)?6[0-9]{8}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

pub fn check_name(value: &str, label: &str) -> Option<String> {
    let length = value.trim().chars().count();
    if length == 0 {
        Some(format!("{label} is required"))
    } else if length < NAME_MIN {
        Some(format!("{label} must be at least {NAME_MIN} characters"))
    } else if length > NAME_MAX {
        Some(format!("{label} cannot exceed {NAME_MAX} characters"))
    } else {
        None
    }
}

pub fn check_email(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some("Email is required".to_string())
    } else if !email_regex().is_match(value.trim()) {
        Some("Invalid email format".to_string())
    } else {
        None
    }
}

/// Whitespace is ignored, so `6 99 12 34 56` is accepted.
pub fn check_phone(value: &str) -> Option<String> {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        Some("Phone number is required".to_string())
    } else if !phone_regex().is_match(&cleaned) {
        Some("Invalid phone format (e.g. 699123456)".to_string())
    } else {
        None
    }
}

pub fn check_address(value: &str) -> Option<String> {
    let length = value.trim().chars().count();
    if length == 0 {
        Some("Address is required".to_string())
    } else if length < ADDRESS_MIN {
        Some(format!("Address must be at least {ADDRESS_MIN} characters"))
    } else {
        None
    }
}

/// Check a complete customer form.
pub fn validate_new_customer(request: &CreateCustomerRequest) -> Result<(), FieldErrors> {
    collect([
        ("firstName", check_name(&request.first_name, "First name")),
        ("lastName", check_name(&request.last_name, "Last name")),
        ("email", check_email(&request.email)),
        ("phone", check_phone(&request.phone)),
        ("address", check_address(&request.address)),
    ])
}

/// Check only the fields present in a partial update.
pub fn validate_customer_update(request: &UpdateCustomerRequest) -> Result<(), FieldErrors> {
    collect([
        (
            "firstName",
            request
                .first_name
                .as_deref()
                .and_then(|v| check_name(v, "First name")),
        ),
        (
            "lastName",
            request
                .last_name
                .as_deref()
                .and_then(|v| check_name(v, "Last name")),
        ),
        ("email", request.email.as_deref().and_then(check_email)),
        ("phone", request.phone.as_deref().and_then(check_phone)),
        ("address", request.address.as_deref().and_then(check_address)),
    ])
}

fn collect<const N: usize>(checks: [(&str, Option<String>); N]) -> Result<(), FieldErrors> {
    let errors: FieldErrors = checks
        .into_iter()
        .filter_map(|(field, error)| error.map(|message| (field.to_string(), vec![message])))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
