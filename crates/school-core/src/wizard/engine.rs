//! Step transitions
//!
//! All transitions are synchronous and act on a `WizardState` the caller
//! owns. Timers live in [`super::session`].

use chrono::{NaiveDate, Utc};

use super::types::{
    AccountStatus, Branch, FlowKind, FlowOutcome, OtpState, OutcomeRecord, PasswordReset, Profile,
    Registration, Role, SignupPolicy, StaffIdKind, Step, StepError, StepKind, StudentIdKind,
    WizardOptions, WizardState,
};
use super::validate::validate_step;
use crate::auth::hash_password;
use crate::error::Result;
use crate::utils::mask_national_id;

impl WizardState {
    /// A fresh flow at step 1
    pub fn new(flow: FlowKind, options: WizardOptions) -> Self {
        Self {
            flow,
            step: Step::At(1),
            role: Role::Auto,
            student_id_kind: StudentIdKind::default(),
            staff_id_kind: StaffIdKind::default(),
            identifier: String::new(),
            profile: Profile::default(),
            otp: OtpState::default(),
            password: String::new(),
            password_confirmation: String::new(),
            two_factor: false,
            error: None,
            message: None,
            submitting: false,
            options,
        }
    }

    pub fn is_done(&self) -> bool {
        self.step == Step::Done
    }

    /// Kind of the current numbered step; `None` once done
    pub fn current_kind(&self) -> Option<StepKind> {
        match self.step {
            Step::At(n) => self.flow.step_kind(n),
            Step::Done => None,
        }
    }

    pub fn is_final_step(&self) -> bool {
        self.step == Step::At(self.flow.step_count())
    }

    /// Validate the current step without changing anything
    pub fn validate_current(&self, today: NaiveDate) -> std::result::Result<(), StepError> {
        match self.step {
            Step::At(n) => validate_step(n, self, today),
            Step::Done => Ok(()),
        }
    }

    /// Move forward one step if the current step validates; otherwise keep
    /// the step and record the message. On the final step this completes the
    /// flow immediately (see [`FlowSession::submit`] for the delayed path).
    ///
    /// [`FlowSession::submit`]: super::session::FlowSession::submit
    pub fn advance(&mut self, today: NaiveDate) -> Result<Step> {
        let Step::At(n) = self.step else {
            return Ok(Step::Done);
        };

        if let Err(e) = validate_step(n, self, today) {
            log::debug!("[wizard:step] Step {} rejected: {}", n, e);
            self.error = Some(e.message.clone());
            return Err(e.into());
        }

        self.error = None;
        if n >= self.flow.step_count() {
            self.complete()?;
        } else {
            self.step = Step::At(n + 1);
        }
        Ok(self.step)
    }

    /// Move back one step; no-op on step 1 and once done
    pub fn retreat(&mut self) {
        if let Step::At(n) = self.step {
            if n > 1 {
                self.step = Step::At(n - 1);
                self.error = None;
            }
        }
    }

    /// Send a one-time code unless the resend cooldown is still running.
    /// Returns whether a code was sent.
    pub fn request_otp(&mut self) -> bool {
        if self.otp.resend_cooldown_secs > 0 {
            log::debug!(
                "[wizard:otp] Resend blocked, {}s left",
                self.otp.resend_cooldown_secs
            );
            return false;
        }

        self.otp.sent = true;
        self.otp.resend_cooldown_secs = self.options.otp_cooldown_secs;
        log::info!("[wizard:otp] Code sent via {:?}", self.otp.channel);
        true
    }

    /// One second of cooldown elapsed; returns the seconds left
    pub fn tick(&mut self) -> u32 {
        self.otp.resend_cooldown_secs = self.otp.resend_cooldown_secs.saturating_sub(1);
        self.otp.resend_cooldown_secs
    }

    /// Validate the final step and mark the flow as submitting
    pub fn begin_submit(&mut self, today: NaiveDate) -> std::result::Result<(), StepError> {
        if !self.is_final_step() {
            return Err(StepError::new("Finish the previous steps first."));
        }
        if let Err(e) = self.validate_current(today) {
            self.error = Some(e.message.clone());
            return Err(e);
        }
        self.error = None;
        self.submitting = true;
        Ok(())
    }

    /// Drop a pending submission: the flow stays on its step and the
    /// passwords are wiped.
    pub fn abort_submit(&mut self) {
        self.password.clear();
        self.password_confirmation.clear();
        self.submitting = false;
    }

    /// Reach the terminal state and build the outcome record
    pub fn complete(&mut self) -> Result<FlowOutcome> {
        let password_hash = hash_password(&self.password)?;
        let message = self.flow.success_message().to_string();

        let record = match self.flow {
            FlowKind::Signup { policy } => OutcomeRecord::Registration(Registration {
                role: self.role,
                identifier: self.display_identifier(),
                full_name: self.profile.full_name.trim().to_string(),
                email: self.contact_email(),
                status: match policy {
                    SignupPolicy::Auto => AccountStatus::Active,
                    SignupPolicy::Request => AccountStatus::PendingApproval,
                },
                verify_channel: self.otp.channel,
                two_factor: self.two_factor,
                password_hash,
                created_at: Utc::now(),
            }),
            FlowKind::Recovery => OutcomeRecord::PasswordReset(PasswordReset {
                identifier: self.display_identifier(),
                password_hash,
                reset_at: Utc::now(),
            }),
        };

        self.password.clear();
        self.password_confirmation.clear();
        self.submitting = false;
        self.error = None;
        self.step = Step::Done;
        self.message = Some(message.clone());

        log::info!("[wizard:submit] Flow completed: {}", message);
        Ok(FlowOutcome { message, record })
    }

    /// Identifier as it should be displayed: national ids get their mask
    pub fn display_identifier(&self) -> String {
        match self.branch() {
            Branch::Student(StudentIdKind::NationalId) => mask_national_id(&self.identifier),
            _ => self.identifier.trim().to_string(),
        }
    }

    fn contact_email(&self) -> Option<String> {
        let email = match self.branch() {
            Branch::Staff(StaffIdKind::Email) => self.identifier.trim(),
            _ => self.profile.email.trim(),
        };
        (!email.is_empty()).then(|| email.to_string())
    }
}
