//! Config command handler.

use anyhow::Result;

use assetdeck_core::{Settings, SettingsUpdate};

use crate::bootstrap::CliContext;
use crate::commands::ConfigCommand;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let settings = ctx.settings_store().load().await.map_err(CliError::from)?;
            print_settings(&settings);
            Ok(())
        }
        ConfigCommand::Set {
            step_delay_ms,
            settle_delay_ms,
            page_size,
        } => {
            if step_delay_ms.is_none() && settle_delay_ms.is_none() && page_size.is_none() {
                println!("No settings to update. Use --help to see available options.");
                return Ok(());
            }

            let update = SettingsUpdate {
                step_delay_ms: step_delay_ms.map(Some),
                settle_delay_ms: settle_delay_ms.map(Some),
                page_size: page_size.map(Some),
            };
            let settings = ctx
                .settings_store()
                .update(&update)
                .await
                .map_err(CliError::from)?;

            println!("✓ Settings updated.\n");
            print_settings(&settings);
            Ok(())
        }
    }
}

fn print_settings(settings: &Settings) {
    println!("Current settings:");
    println!("  step_delay_ms:   {}", settings.effective_step_delay_ms());
    println!("  settle_delay_ms: {}", settings.effective_settle_delay_ms());
    println!("  page_size:       {}", settings.effective_page_size());
}
