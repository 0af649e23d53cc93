//! Timer-driven flow session
//!
//! [`FlowSession`] wraps a shared [`WizardState`] and owns the two background
//! tasks a flow can have in flight:
//!
//! - the OTP resend cooldown, ticking once per second until it reaches zero
//! - the delayed submission that moves the flow to `Done`
//!
//! Both tasks listen on a shutdown channel. Closing or dropping the session
//! signals them; a cancelled submission rolls back its `submitting` flag and
//! wipes the passwords instead of completing.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};

use super::types::{FlowKind, FlowOutcome, SignupPolicy, Step, WizardOptions, WizardState};
use crate::config::SchoolConfig;
use crate::error::{Error, Result};

/// Flow state shared between the session and its timers
pub type SharedWizardState = Arc<RwLock<WizardState>>;

// ============================================================================
// Scheduled task handle
// ============================================================================

/// A spawned timer task and the channel that stops it
struct ScheduledTask {
    label: &'static str,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }

    fn cancel(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            if self.is_pending() {
                log::debug!("[wizard:{}] Cancelling pending task", self.label);
            }
            let _ = tx.send(());
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ============================================================================
// Session
// ============================================================================

pub struct FlowSession {
    state: SharedWizardState,
    submit_delay: Duration,
    cooldown: Option<ScheduledTask>,
    submission: Option<ScheduledTask>,
    outcome_rx: Option<oneshot::Receiver<Result<FlowOutcome>>>,
}

impl FlowSession {
    pub fn new(state: WizardState, submit_delay: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            submit_delay,
            cooldown: None,
            submission: None,
            outcome_rx: None,
        }
    }

    /// Sign-up session using the configured policy, domain and timings
    pub fn signup(config: &SchoolConfig) -> Self {
        Self::with_config(
            FlowKind::Signup {
                policy: config.signup_policy,
            },
            config,
        )
    }

    /// Sign-up session with an explicit policy
    pub fn signup_with_policy(config: &SchoolConfig, policy: SignupPolicy) -> Self {
        Self::with_config(FlowKind::Signup { policy }, config)
    }

    /// Password recovery session
    pub fn recovery(config: &SchoolConfig) -> Self {
        Self::with_config(FlowKind::Recovery, config)
    }

    fn with_config(flow: FlowKind, config: &SchoolConfig) -> Self {
        let options = WizardOptions {
            institutional_domain: config.institutional_domain.clone(),
            otp_cooldown_secs: config.otp_cooldown_secs,
        };
        Self::new(WizardState::new(flow, options), config.submit_delay)
    }

    /// Handle to the shared state
    pub fn state(&self) -> SharedWizardState {
        Arc::clone(&self.state)
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> WizardState {
        self.state.read().await.clone()
    }

    /// Mutate the state (field edits from the caller)
    pub async fn edit<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut WizardState) -> R,
    {
        let mut state = self.state.write().await;
        f(&mut state)
    }

    /// Advance one step. On the final step this schedules the delayed
    /// submission instead and returns the unchanged step.
    pub async fn advance(&mut self, today: NaiveDate) -> Result<Step> {
        let final_step = self.state.read().await.is_final_step();
        if final_step {
            self.submit(today).await?;
            return Ok(self.state.read().await.step);
        }
        self.state.write().await.advance(today)
    }

    pub async fn retreat(&self) {
        self.state.write().await.retreat();
    }

    /// Send a code and start the resend cooldown. Does nothing while the
    /// cooldown is running.
    pub async fn request_otp(&mut self) -> bool {
        let sent = self.state.write().await.request_otp();
        if sent {
            self.start_cooldown();
        }
        sent
    }

    fn start_cooldown(&mut self) {
        if let Some(mut previous) = self.cooldown.take() {
            previous.cancel();
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            let mut timer = interval(Duration::from_secs(1));
            // Skip the first tick (immediate)
            timer.tick().await;

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        let left = state.write().await.tick();
                        if left == 0 {
                            log::debug!("[wizard:otp] Resend available");
                            break;
                        }
                    }
                    _ = &mut shutdown_rx => {
                        log::debug!("[wizard:otp] Cooldown ticker stopped");
                        break;
                    }
                }
            }
        });

        self.cooldown = Some(ScheduledTask {
            label: "otp",
            shutdown_tx: Some(shutdown_tx),
            handle,
        });
    }

    /// Validate the final step and schedule completion after the configured
    /// delay. Calling again while a submission is pending has no effect.
    pub async fn submit(&mut self, today: NaiveDate) -> Result<()> {
        if self.is_submitting() {
            log::debug!("[wizard:submit] Submission already pending");
            return Ok(());
        }

        self.state.write().await.begin_submit(today)?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let (outcome_tx, outcome_rx) = oneshot::channel::<Result<FlowOutcome>>();
        let state = Arc::clone(&self.state);
        let delay = self.submit_delay;

        log::info!("[wizard:submit] Submitting in {}ms", delay.as_millis());

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = sleep(delay) => {
                    let mut guard = state.write().await;
                    // close() may have landed while we waited for the lock
                    if matches!(shutdown_rx.try_recv(), Err(TryRecvError::Empty)) {
                        let result = guard.complete();
                        let _ = outcome_tx.send(result);
                    } else {
                        log::warn!("[wizard:submit] Flow torn down before submission completed");
                        guard.abort_submit();
                    }
                }
                _ = &mut shutdown_rx => {
                    log::warn!("[wizard:submit] Flow torn down before submission completed");
                    state.write().await.abort_submit();
                }
            }
        });

        self.submission = Some(ScheduledTask {
            label: "submit",
            shutdown_tx: Some(shutdown_tx),
            handle,
        });
        self.outcome_rx = Some(outcome_rx);
        Ok(())
    }

    /// Wait for the pending submission to finish
    pub async fn wait_outcome(&mut self) -> Result<FlowOutcome> {
        let rx = self
            .outcome_rx
            .take()
            .ok_or_else(|| Error::internal("No submission pending"))?;
        let outcome = rx
            .await
            .map_err(|_| Error::internal("Submission was cancelled"))?;
        self.submission = None;
        outcome
    }

    /// Submit and wait for the outcome
    pub async fn submit_and_wait(&mut self, today: NaiveDate) -> Result<FlowOutcome> {
        self.submit(today).await?;
        self.wait_outcome().await
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.as_ref().is_some_and(ScheduledTask::is_pending)
    }

    pub fn cooldown_running(&self) -> bool {
        self.cooldown.as_ref().is_some_and(ScheduledTask::is_pending)
    }

    /// Stop every timer. The state stays readable through handles taken
    /// earlier. A cancelled submission clears `submitting` and the passwords;
    /// nothing else touches the state afterwards.
    pub fn close(&mut self) {
        if let Some(mut task) = self.cooldown.take() {
            task.cancel();
        }
        if let Some(mut task) = self.submission.take() {
            task.cancel();
        }
        self.outcome_rx = None;
    }
}

impl Drop for FlowSession {
    fn drop(&mut self) {
        self.close();
    }
}
