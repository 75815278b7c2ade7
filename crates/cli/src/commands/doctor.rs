//! `beacon doctor` — Diagnose configuration problems.

use beacon_config::AppConfig;
use std::path::Path;

pub fn run(config_path: &Path) -> anyhow::Result<()> {
    println!("🩺 Beacon Doctor");
    println!("================\n");

    let mut issues = 0;

    if config_path.exists() {
        println!("  ✅ Config file found: {}", config_path.display());
    } else {
        println!(
            "  ⚠️  No config file at {} — built-in defaults will be used",
            config_path.display()
        );
    }

    match AppConfig::load(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid");

            if config.llm.api_key.is_some() {
                println!("  ✅ LLM API key configured");
            } else {
                println!("  ⚠️  No LLM API key — set BEACON_LLM_API_KEY or llm.api_key");
                issues += 1;
            }

            match config.guardrails.mode.as_str() {
                "remote" => println!(
                    "  ✅ Remote guardrails: {}",
                    config.guardrails.url.as_deref().unwrap_or("-")
                ),
                _ => println!("  ✅ Built-in guardrails"),
            }

            println!("  ✅ Forecast source: {}", config.tools.forecast_base_url);
            println!(
                "  ✅ Sessions: {} turns max, {}h expiry",
                config.session.max_turns, config.session.ttl_hours
            );
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
