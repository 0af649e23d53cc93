//! Wizard data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::DEFAULT_OTP_COOLDOWN_SECS;

// ============================================================================
// Flow variants and steps
// ============================================================================

/// How a completed sign-up is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupPolicy {
    /// The account is usable immediately
    #[default]
    Auto,
    /// The account waits for school approval
    Request,
}

impl SignupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupPolicy::Auto => "auto",
            SignupPolicy::Request => "request",
        }
    }
}

impl FromStr for SignupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(SignupPolicy::Auto),
            "request" => Ok(SignupPolicy::Request),
            _ => Err(format!("Invalid signup policy: {}. Use 'auto' or 'request'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "lowercase")]
pub enum FlowKind {
    Signup { policy: SignupPolicy },
    Recovery,
}

/// What a numbered step collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    Identification,
    Profile,
    Verification,
    Security,
    NewPassword,
}

impl FlowKind {
    pub fn steps(&self) -> &'static [StepKind] {
        match self {
            FlowKind::Signup { .. } => &[
                StepKind::Identification,
                StepKind::Profile,
                StepKind::Verification,
                StepKind::Security,
            ],
            FlowKind::Recovery => &[
                StepKind::Identification,
                StepKind::Verification,
                StepKind::NewPassword,
            ],
        }
    }

    /// Number of numbered steps before the terminal state
    pub fn step_count(&self) -> u8 {
        self.steps().len() as u8
    }

    /// The kind of numbered step `n` (1-based)
    pub fn step_kind(&self, n: u8) -> Option<StepKind> {
        let index = usize::from(n).checked_sub(1)?;
        self.steps().get(index).copied()
    }

    /// Message shown once the flow completes
    pub fn success_message(&self) -> &'static str {
        match self {
            FlowKind::Signup {
                policy: SignupPolicy::Auto,
            } => super::MSG_ACCOUNT_CREATED,
            FlowKind::Signup {
                policy: SignupPolicy::Request,
            } => super::MSG_REQUEST_SENT,
            FlowKind::Recovery => super::MSG_PASSWORD_UPDATED,
        }
    }
}

/// Position in a flow: a numbered step or the terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    At(u8),
    Done,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::At(n) => write!(f, "{}", n),
            Step::Done => f.write_str("done"),
        }
    }
}

// ============================================================================
// Role and identification branch
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Not chosen; treated as staff
    #[default]
    Auto,
    Student,
    Teacher,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Auto => "auto",
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Role::Auto),
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "manager" => Ok(Role::Manager),
            _ => Err(format!(
                "Invalid role: {}. Use auto, student, teacher or manager",
                s
            )),
        }
    }
}

/// How a student identifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudentIdKind {
    /// 11-digit national id number
    NationalId,
    #[default]
    RegistrationNumber,
}

/// How staff identify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffIdKind {
    #[default]
    Email,
    StaffRecord,
}

impl FromStr for StudentIdKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "national-id" | "id-number" => Ok(StudentIdKind::NationalId),
            "registration" | "registration-number" => Ok(StudentIdKind::RegistrationNumber),
            _ => Err(format!(
                "Invalid student id type: {}. Use 'national-id' or 'registration'",
                s
            )),
        }
    }
}

impl FromStr for StaffIdKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(StaffIdKind::Email),
            "staff-record" | "record" => Ok(StaffIdKind::StaffRecord),
            _ => Err(format!(
                "Invalid staff id type: {}. Use 'email' or 'staff-record'",
                s
            )),
        }
    }
}

/// The identification branch in effect, derived from role and flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Student(StudentIdKind),
    Staff(StaffIdKind),
}

// ============================================================================
// Collected fields
// ============================================================================

/// Step-2 fields of the sign-up flow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub full_name: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub email: String,
    pub phone: String,
    // Student
    pub class_name: String,
    pub shift: String,
    pub guardian_name: String,
    pub guardian_email: String,
    // Teacher
    pub department: String,
    pub subject_area: String,
    pub staff_record: String,
    // Manager
    pub org_unit: String,
    pub consent: bool,
}

/// Where the one-time code is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyChannel {
    #[default]
    Email,
    Sms,
}

impl FromStr for VerifyChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(VerifyChannel::Email),
            "sms" => Ok(VerifyChannel::Sms),
            _ => Err(format!("Invalid channel: {}. Use 'email' or 'sms'", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpState {
    pub sent: bool,
    pub code: String,
    pub resend_cooldown_secs: u32,
    pub channel: VerifyChannel,
}

/// Settings a flow needs from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardOptions {
    pub institutional_domain: Option<String>,
    pub otp_cooldown_secs: u32,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            institutional_domain: None,
            otp_cooldown_secs: DEFAULT_OTP_COOLDOWN_SECS,
        }
    }
}

/// All state of one flow instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub flow: FlowKind,
    pub step: Step,
    pub role: Role,
    pub student_id_kind: StudentIdKind,
    pub staff_id_kind: StaffIdKind,
    pub identifier: String,
    pub profile: Profile,
    pub otp: OtpState,
    #[serde(skip_serializing, default)]
    pub password: String,
    #[serde(skip_serializing, default)]
    pub password_confirmation: String,
    pub two_factor: bool,
    /// Current validation message
    pub error: Option<String>,
    /// Completion message, set on reaching `Done`
    pub message: Option<String>,
    pub submitting: bool,
    pub options: WizardOptions,
}

// ============================================================================
// Errors and outcomes
// ============================================================================

/// A step validation failure with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StepError {
    pub message: String,
}

impl StepError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<StepError> for crate::error::Error {
    fn from(e: StepError) -> Self {
        crate::error::Error::Validation(e.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountStatus {
    Active,
    PendingApproval,
}

/// A completed sign-up
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub role: Role,
    pub identifier: String,
    pub full_name: String,
    pub email: Option<String>,
    pub status: AccountStatus,
    pub verify_channel: VerifyChannel,
    pub two_factor: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A completed password recovery
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub identifier: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutcomeRecord {
    Registration(Registration),
    PasswordReset(PasswordReset),
}

/// Result of a completed flow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowOutcome {
    pub message: String,
    pub record: OutcomeRecord,
}
