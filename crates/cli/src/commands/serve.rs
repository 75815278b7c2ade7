//! `beacon serve` — Start the HTTP chat gateway.

use anyhow::Context;
use beacon_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: &Path, port_override: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::load(config_path).context("Failed to load config")?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🔆 Beacon");
    println!(
        "   Listening: {}:{}",
        config.gateway.host, config.gateway.port
    );
    println!("   Model: {}", config.llm.model);
    println!("   Guardrails: {}", config.guardrails.mode);

    beacon_gateway::start(config)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}
