//! Sign-up and recovery commands
//!
//! Fill a flow from command-line fields, then walk it step by step the way
//! the form would: request the code when verification comes up, advance on
//! each valid step, submit on the last one.

use anyhow::Result;
use chrono::Local;
use school_core::wizard::{FlowOutcome, FlowSession, StepKind};
use school_core::Error;

use super::helpers::{apply_identity, step_label};
use super::types::{OutcomeRow, RecoverArgs, SignupArgs};
use crate::commands::Context;
use crate::output::{print_info, print_json, print_single, print_success, OutputFormat};

pub async fn signup(ctx: &Context, args: SignupArgs) -> Result<()> {
    let session = match args.policy {
        Some(policy) => FlowSession::signup_with_policy(&ctx.config, policy),
        None => FlowSession::signup(&ctx.config),
    };

    session
        .edit(|s| {
            apply_identity(s, args.identity);
            let p = &mut s.profile;
            p.full_name = args.name.unwrap_or_default();
            p.birth_date = args.birth_date.unwrap_or_default();
            p.email = args.email.unwrap_or_default();
            p.phone = args.phone.unwrap_or_default();
            p.class_name = args.class_name.unwrap_or_default();
            p.shift = args.shift.unwrap_or_default();
            p.guardian_name = args.guardian_name.unwrap_or_default();
            p.guardian_email = args.guardian_email.unwrap_or_default();
            p.department = args.department.unwrap_or_default();
            p.subject_area = args.subject_area.unwrap_or_default();
            p.staff_record = args.staff_record.unwrap_or_default();
            p.org_unit = args.org_unit.unwrap_or_default();
            p.consent = args.consent;
            s.two_factor = args.two_factor;
        })
        .await;

    let outcome = run_flow(ctx, session).await?;
    print_outcome(ctx, &outcome)
}

pub async fn recover(ctx: &Context, args: RecoverArgs) -> Result<()> {
    let session = FlowSession::recovery(&ctx.config);
    session.edit(|s| apply_identity(s, args.identity)).await;

    let outcome = run_flow(ctx, session).await?;
    print_outcome(ctx, &outcome)
}

async fn run_flow(ctx: &Context, mut session: FlowSession) -> Result<FlowOutcome> {
    let today = Local::now().date_naive();

    loop {
        let state = session.snapshot().await;
        let Some(kind) = state.current_kind() else {
            anyhow::bail!("Flow already finished");
        };
        let position = format!(
            "Step {} of {} ({})",
            state.step,
            state.flow.step_count(),
            step_label(kind)
        );

        if kind == StepKind::Verification && !state.otp.sent && session.request_otp().await {
            print_info(&format!("Code sent via {:?}", state.otp.channel), ctx.quiet);
        }

        if state.is_final_step() {
            print_info("Submitting...", ctx.quiet);
            return session
                .submit_and_wait(today)
                .await
                .map_err(|e| step_failure(&position, e));
        }

        session
            .advance(today)
            .await
            .map_err(|e| step_failure(&position, e))?;
        log::debug!("[account] {} passed", position);
    }
}

fn step_failure(position: &str, err: Error) -> anyhow::Error {
    match err {
        Error::Validation(message) => anyhow::anyhow!("{}: {}", position, message),
        other => other.into(),
    }
}

fn print_outcome(ctx: &Context, outcome: &FlowOutcome) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        return print_json(outcome);
    }

    print_success(&outcome.message, ctx.quiet);
    if !ctx.quiet {
        print_single(&OutcomeRow::from(&outcome.record), ctx.format)?;
    }
    Ok(())
}
