//! Per-step validation rules
//!
//! Validators are pure: they read the state and a reference date and return
//! the first rule that fails. They never mutate the state.

use chrono::{Datelike, NaiveDate};

use super::types::{Branch, FlowKind, Role, StaffIdKind, StepError, StepKind, StudentIdKind, WizardState};
use crate::utils::{is_valid_email, only_digits};

/// Minimum password score accepted by the security step
pub const MIN_PASSWORD_SCORE: u8 = 4;

/// Age below which a guardian is required
pub const ADULT_AGE: i32 = 18;

/// Score a password from 0 to 5: one point each for length >= 8, a
/// lowercase letter, an uppercase letter, a digit, and a symbol (anything
/// that is not a word character or whitespace).
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace())),
    ];

    checks.iter().filter(|&&passed| passed).count().min(5) as u8
}

/// Whole years between `birth` and `today`
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

impl WizardState {
    /// The identification branch in effect. `Auto` follows the staff branch,
    /// and recovery always identifies staff by e-mail.
    pub fn branch(&self) -> Branch {
        match (self.role, self.flow) {
            (Role::Student, _) => Branch::Student(self.student_id_kind),
            (_, FlowKind::Recovery) => Branch::Staff(StaffIdKind::Email),
            _ => Branch::Staff(self.staff_id_kind),
        }
    }
}

/// Validate numbered step `n` of the state's flow
pub fn validate_step(n: u8, state: &WizardState, today: NaiveDate) -> Result<(), StepError> {
    match state.flow.step_kind(n) {
        Some(StepKind::Identification) => validate_identification(state),
        Some(StepKind::Profile) => validate_profile(state, today),
        Some(StepKind::Verification) => validate_verification(state),
        Some(StepKind::Security) | Some(StepKind::NewPassword) => validate_password(state),
        None => Err(StepError::new(format!("No step {} in this flow.", n))),
    }
}

fn has_institutional_domain(state: &WizardState, email: &str) -> bool {
    match state.options.institutional_domain.as_deref() {
        Some(domain) if !domain.is_empty() => email.trim().ends_with(domain),
        _ => true,
    }
}

fn validate_identification(state: &WizardState) -> Result<(), StepError> {
    let identifier = state.identifier.as_str();

    match state.branch() {
        Branch::Student(StudentIdKind::NationalId) => {
            if only_digits(identifier).len() != 11 {
                return Err(StepError::new("Enter a valid national id (11 digits)."));
            }
        }
        Branch::Student(StudentIdKind::RegistrationNumber) => {
            if identifier.trim().chars().count() < 5 {
                return Err(StepError::new(
                    "Enter your registration number (min. 5 characters).",
                ));
            }
        }
        Branch::Staff(StaffIdKind::Email) => {
            if !is_valid_email(identifier) {
                return Err(StepError::new("Enter a valid institutional e-mail."));
            }
            if matches!(state.flow, FlowKind::Signup { .. })
                && !has_institutional_domain(state, identifier)
            {
                return Err(StepError::new(
                    "Use your institutional e-mail (invalid domain).",
                ));
            }
        }
        Branch::Staff(StaffIdKind::StaffRecord) => {
            if identifier.trim().chars().count() < 4 {
                return Err(StepError::new("Enter your staff record."));
            }
        }
    }

    Ok(())
}

fn validate_profile(state: &WizardState, today: NaiveDate) -> Result<(), StepError> {
    let p = &state.profile;

    if p.full_name.trim().is_empty() {
        return Err(StepError::new("Enter your full name."));
    }
    if p.birth_date.trim().is_empty() {
        return Err(StepError::new("Enter your birth date."));
    }
    let birth = match parse_birth_date(&p.birth_date) {
        Some(date) if date <= today => date,
        _ => return Err(StepError::new("Invalid birth date.")),
    };

    // A staff e-mail identifier already is the contact e-mail
    let needs_email = !matches!(state.branch(), Branch::Staff(StaffIdKind::Email));
    if needs_email {
        if !is_valid_email(&p.email) {
            return Err(StepError::new("Enter a valid e-mail."));
        }
        if state.role != Role::Student && !has_institutional_domain(state, &p.email) {
            return Err(StepError::new("Use your institutional e-mail."));
        }
    }

    if !p.phone.trim().is_empty() && only_digits(&p.phone).len() < 10 {
        return Err(StepError::new("Incomplete phone number."));
    }

    match state.role {
        Role::Student => {
            if p.class_name.trim().is_empty() {
                return Err(StepError::new("Select your class."));
            }
            if p.shift.trim().is_empty() {
                return Err(StepError::new("Select your shift."));
            }
            if age_in_years(birth, today) < ADULT_AGE
                && (p.guardian_name.trim().is_empty() || !is_valid_email(&p.guardian_email))
            {
                return Err(StepError::new("Enter the guardian's name and e-mail."));
            }
        }
        Role::Teacher => {
            if p.department.trim().is_empty() {
                return Err(StepError::new("Enter your department."));
            }
        }
        Role::Manager => {
            if p.org_unit.trim().is_empty() {
                return Err(StepError::new("Enter your unit or organization."));
            }
        }
        Role::Auto => {}
    }

    if !p.consent {
        return Err(StepError::new(
            "You must agree to the Privacy Policy and Terms.",
        ));
    }

    Ok(())
}

fn validate_verification(state: &WizardState) -> Result<(), StepError> {
    if !state.otp.sent {
        return Err(StepError::new("Send the code before verifying."));
    }
    let code = state.otp.code.as_str();
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(StepError::new("Enter the 6-digit code."));
    }
    Ok(())
}

fn validate_password(state: &WizardState) -> Result<(), StepError> {
    if password_strength(&state.password) < MIN_PASSWORD_SCORE {
        return Err(StepError::new(
            "Weak password: use 8+ characters with upper and lower case, a number and a symbol.",
        ));
    }
    if state.password != state.password_confirmation {
        return Err(StepError::new("Passwords do not match."));
    }
    Ok(())
}
