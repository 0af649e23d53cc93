//! Account commands
//!
//! Sign-up, password recovery and sign-in.

mod flows;
mod helpers;
mod types;

use anyhow::Result;
use school_core::auth::{self, LoginRequest};
use school_core::Error;

use crate::commands::Context;
use crate::output::{print_json, print_single, print_success, OutputFormat};

// Re-export public types
pub use types::AccountAction;
use types::SessionRow;

pub async fn execute(ctx: &Context, action: AccountAction) -> Result<()> {
    match action {
        AccountAction::Signup(args) => flows::signup(ctx, args).await,
        AccountAction::Recover(args) => flows::recover(ctx, args).await,
        AccountAction::Login { identifier, password, role, remember } => {
            login(ctx, identifier, password, role, remember).await
        }
    }
}

async fn login(
    ctx: &Context,
    identifier: String,
    password: String,
    role: school_core::Role,
    remember: bool,
) -> Result<()> {
    let request = LoginRequest { identifier, password, role, remember };

    let session = match auth::login(&request).await {
        Ok(session) => session,
        Err(Error::Validation(message)) => anyhow::bail!(message),
        Err(e) => return Err(e.into()),
    };

    if ctx.format == OutputFormat::Json {
        return print_json(&session);
    }

    print_success(&format!("Signed in as {}", session.identifier), ctx.quiet);
    if !ctx.quiet {
        print_single(&SessionRow::from(&session), ctx.format)?;
    }
    Ok(())
}
