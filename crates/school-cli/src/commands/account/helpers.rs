//! Account helper functions

use school_core::auth::Session;
use school_core::wizard::{AccountStatus, OutcomeRecord, StepKind, WizardState};

use super::types::{IdentityArgs, OutcomeRow, SessionRow};

pub fn step_label(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Identification => "identification",
        StepKind::Profile => "profile",
        StepKind::Verification => "verification",
        StepKind::Security => "security",
        StepKind::NewPassword => "new password",
    }
}

/// Copy the identity fields into a fresh flow state
pub fn apply_identity(state: &mut WizardState, identity: IdentityArgs) {
    state.role = identity.role;
    state.student_id_kind = identity.student_id_type;
    state.staff_id_kind = identity.staff_id_type;
    state.identifier = identity.identifier;
    state.otp.channel = identity.channel;
    state.otp.code = identity.code;
    state.password_confirmation = identity
        .confirm_password
        .unwrap_or_else(|| identity.password.clone());
    state.password = identity.password;
}

impl From<&OutcomeRecord> for OutcomeRow {
    fn from(record: &OutcomeRecord) -> Self {
        match record {
            OutcomeRecord::Registration(r) => Self {
                record: "registration".to_string(),
                identifier: r.identifier.clone(),
                name: r.full_name.clone(),
                email: r.email.clone().unwrap_or_default(),
                status: match r.status {
                    AccountStatus::Active => "active",
                    AccountStatus::PendingApproval => "pending approval",
                }
                .to_string(),
            },
            OutcomeRecord::PasswordReset(p) => Self {
                record: "password reset".to_string(),
                identifier: p.identifier.clone(),
                name: String::new(),
                email: String::new(),
                status: "updated".to_string(),
            },
        }
    }
}

impl From<&Session> for SessionRow {
    fn from(session: &Session) -> Self {
        Self {
            identifier: session.identifier.clone(),
            role: session.role.to_string(),
            remember: if session.remember { "yes" } else { "no" }.to_string(),
            signed_in_at: session
                .signed_in_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use school_core::wizard::{
        FlowKind, PasswordReset, Registration, StaffIdKind, StudentIdKind, VerifyChannel,
        WizardOptions,
    };
    use school_core::Role;

    fn identity() -> IdentityArgs {
        IdentityArgs {
            role: Role::Student,
            student_id_type: StudentIdKind::NationalId,
            staff_id_type: StaffIdKind::Email,
            identifier: "12345678901".to_string(),
            channel: VerifyChannel::Sms,
            code: "123456".to_string(),
            password: "Abcdef1!".to_string(),
            confirm_password: None,
        }
    }

    #[test]
    fn test_apply_identity_defaults_confirmation() {
        let mut state = WizardState::new(FlowKind::Recovery, WizardOptions::default());
        apply_identity(&mut state, identity());

        assert_eq!(state.role, Role::Student);
        assert_eq!(state.student_id_kind, StudentIdKind::NationalId);
        assert_eq!(state.otp.channel, VerifyChannel::Sms);
        assert_eq!(state.password, state.password_confirmation);
    }

    #[test]
    fn test_apply_identity_keeps_explicit_confirmation() {
        let mut state = WizardState::new(FlowKind::Recovery, WizardOptions::default());
        let mut args = identity();
        args.confirm_password = Some("Different1!".to_string());
        apply_identity(&mut state, args);
        assert_eq!(state.password_confirmation, "Different1!");
    }

    #[test]
    fn test_outcome_rows() {
        let registration = OutcomeRecord::Registration(Registration {
            role: Role::Teacher,
            identifier: "ana@school.edu".to_string(),
            full_name: "Ana".to_string(),
            email: Some("ana@school.edu".to_string()),
            status: AccountStatus::PendingApproval,
            verify_channel: VerifyChannel::Email,
            two_factor: false,
            password_hash: String::new(),
            created_at: Utc::now(),
        });
        let row = OutcomeRow::from(&registration);
        assert_eq!(row.record, "registration");
        assert_eq!(row.status, "pending approval");

        let reset = OutcomeRecord::PasswordReset(PasswordReset {
            identifier: "ana@school.edu".to_string(),
            password_hash: String::new(),
            reset_at: Utc::now(),
        });
        assert_eq!(OutcomeRow::from(&reset).status, "updated");
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(step_label(StepKind::NewPassword), "new password");
        assert_eq!(step_label(StepKind::Identification), "identification");
    }
}
