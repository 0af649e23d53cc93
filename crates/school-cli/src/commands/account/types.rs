//! Account command types

use clap::{Args, Subcommand};
use school_core::wizard::{StaffIdKind, StudentIdKind, VerifyChannel};
use school_core::{Role, SignupPolicy};
use serde::Serialize;
use tabled::Tabled;

#[derive(Subcommand)]
pub enum AccountAction {
    /// Create an account through the sign-up flow
    Signup(SignupArgs),

    /// Reset a password through the recovery flow
    Recover(RecoverArgs),

    /// Sign in
    Login {
        /// Registration number, national id or e-mail
        #[arg(short, long)]
        identifier: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// auto, student, teacher or manager
        #[arg(short, long, default_value = "auto")]
        role: Role,

        /// Keep the session
        #[arg(long)]
        remember: bool,
    },
}

/// Identification and verification fields shared by both flows
#[derive(Args, Debug, Clone)]
pub struct IdentityArgs {
    /// auto, student, teacher or manager
    #[arg(short, long, default_value = "auto")]
    pub role: Role,

    /// How a student identifies: registration or national-id
    #[arg(long, default_value = "registration")]
    pub student_id_type: StudentIdKind,

    /// How staff identify: email or staff-record
    #[arg(long, default_value = "email")]
    pub staff_id_type: StaffIdKind,

    /// Registration number, national id, e-mail or staff record
    #[arg(short, long)]
    pub identifier: String,

    /// Where the one-time code goes: email or sms
    #[arg(long, default_value = "email")]
    pub channel: VerifyChannel,

    /// The 6-digit code received
    #[arg(long)]
    pub code: String,

    /// New password
    #[arg(short, long)]
    pub password: String,

    /// Password confirmation (defaults to --password)
    #[arg(long)]
    pub confirm_password: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SignupArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    /// auto or request (defaults to SCHOOL_SIGNUP_POLICY)
    #[arg(long)]
    pub policy: Option<SignupPolicy>,

    /// Full name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Contact e-mail
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Class (students)
    #[arg(long)]
    pub class_name: Option<String>,

    /// Shift (students)
    #[arg(long)]
    pub shift: Option<String>,

    /// Guardian name (required under 18)
    #[arg(long)]
    pub guardian_name: Option<String>,

    /// Guardian e-mail (required under 18)
    #[arg(long)]
    pub guardian_email: Option<String>,

    /// Department (teachers)
    #[arg(long)]
    pub department: Option<String>,

    /// Subject area (teachers)
    #[arg(long)]
    pub subject_area: Option<String>,

    /// Staff record (teachers)
    #[arg(long)]
    pub staff_record: Option<String>,

    /// Unit or organization (managers)
    #[arg(long)]
    pub org_unit: Option<String>,

    /// Agree to the Privacy Policy and Terms
    #[arg(long)]
    pub consent: bool,

    /// Enable two-factor authentication
    #[arg(long)]
    pub two_factor: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RecoverArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,
}

#[derive(Debug, Serialize, Tabled)]
pub struct OutcomeRow {
    #[tabled(rename = "Record")]
    pub record: String,
    #[tabled(rename = "Identifier")]
    pub identifier: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "E-mail")]
    pub email: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct SessionRow {
    #[tabled(rename = "Identifier")]
    pub identifier: String,
    #[tabled(rename = "Role")]
    pub role: String,
    #[tabled(rename = "Remember")]
    pub remember: String,
    #[tabled(rename = "Signed in")]
    pub signed_in_at: String,
}
