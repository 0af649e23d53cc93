//! Multi-step account flows (sign-up and password recovery)
//!
//! A flow is a [`WizardState`] moved through numbered steps by
//! [`WizardState::advance`] and [`WizardState::retreat`], each forward move
//! gated by [`validate_step`]. [`FlowSession`] adds the timers: the OTP
//! resend cooldown and the delayed submission.
//!
//! ```text
//! signup:   1 Identification -> 2 Profile -> 3 Verification -> 4 Security -> Done
//! recovery: 1 Identification -> 2 Verification -> 3 NewPassword -> Done
//! ```

pub mod engine;
pub mod session;
pub mod types;
pub mod validate;

pub use session::{FlowSession, SharedWizardState};
pub use types::{
    AccountStatus, Branch, FlowKind, FlowOutcome, OtpState, OutcomeRecord, PasswordReset, Profile,
    Registration, Role, SignupPolicy, StaffIdKind, Step, StepError, StepKind, StudentIdKind,
    VerifyChannel, WizardOptions, WizardState,
};
pub use validate::{age_in_years, password_strength, validate_step, MIN_PASSWORD_SCORE};

pub const MSG_ACCOUNT_CREATED: &str = "Account created! You can sign in now.";
pub const MSG_REQUEST_SENT: &str = "Request sent! You will receive an e-mail once it is approved.";
pub const MSG_PASSWORD_UPDATED: &str = "Password updated! You can sign in now.";
