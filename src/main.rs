// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use chainline::config::{ModuleRegistry, Runtime};
use chainline::modules::{register_builtin_modules, register_collect_sink, CollectedText};

/// Demo driver: load a chain configuration, enable every chain, trigger each
/// one a few times, and print what reached the collecting sink.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <chains.yaml> [trigger_count]", args[0]);
        eprintln!("Example: {} demos/pipeline.yaml 5", args[0]);
        std::process::exit(1);
    }
    let config_path = &args[1];
    let triggers: usize = match args.get(2) {
        Some(raw) => raw.parse().context("trigger_count must be a number")?,
        None => 3,
    };

    let mut registry = ModuleRegistry::new();
    register_builtin_modules(&mut registry)?;
    let collected = CollectedText::new();
    register_collect_sink(&mut registry, collected.clone())?;

    let mut runtime = Runtime::new(registry);
    let names = runtime
        .load_chains(config_path)
        .with_context(|| format!("loading {}", config_path))?;
    println!("Loaded {} chain(s) from {}", names.len(), config_path);

    for name in &names {
        let chain = runtime
            .chain(name)
            .context("chain disappeared after loading")?;
        chain.enable().await?;
        println!(
            "Chain '{}': {} modules, id_increase {}",
            chain.name(),
            chain.len(),
            chain.id_increase()
        );

        for _ in 0..triggers {
            let id = chain.exec().await?;
            println!("  run id {} completed", id);
        }
    }

    for (id, text) in collected.snapshot() {
        println!("collected id({}): {}", id, text);
    }

    runtime.disable_all().await;
    Ok(())
}
