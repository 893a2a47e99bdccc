//! `calbook config` -- print the effective configuration.

use anyhow::Result;
use comfy_table::{presets, Table};

use calbook_types::config::FrontendConfig;

use crate::state::AppState;

pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state.config.as_ref())?);
        return Ok(());
    }

    println!();
    println!("{}", config_table(&state.config));
    println!();
    Ok(())
}

fn config_table(config: &FrontendConfig) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["backend_url".to_string(), config.backend_url.clone()]);
    table.add_row(vec![
        "chat_timeout_secs".to_string(),
        config.chat_timeout_secs.to_string(),
    ]);
    table.add_row(vec![
        "health_timeout_secs".to_string(),
        config.health_timeout_secs.to_string(),
    ]);
    table.add_row(vec![
        "session_idle_timeout_secs".to_string(),
        config.session_idle_timeout_secs.to_string(),
    ]);
    table.add_row(vec!["page_title".to_string(), config.page_title.clone()]);
    table
}
