//! Profile command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::commands::ProfileCommand;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Show => {
            let profile = ctx.playground().user_profile().await.map_err(CliError::from)?;
            println!("{profile}");
        }
        ProfileCommand::Set { profile } => {
            ctx.playground()
                .set_user_profile(profile)
                .await
                .map_err(CliError::from)?;
            println!("✓ Profile set to {profile}");
        }
    }
    Ok(())
}
