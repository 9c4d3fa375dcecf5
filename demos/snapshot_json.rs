use padmeter::backends::probe_source;
use padmeter::{DeviceRegistry, PadmeterConfig, RegistryConfig};
use tracing_subscriber::EnvFilter;

/// Usage: `cargo run --example snapshot_json -- [config.toml]`
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match PadmeterConfig::load(&path) {
            Ok(cfg) => cfg.registry,
            Err(e) => {
                eprintln!("{e}; using defaults");
                RegistryConfig::default()
            }
        },
        None => RegistryConfig::default(),
    };

    let registry = DeviceRegistry::new(probe_source(), config);
    registry.refresh_all();

    match registry.snapshot().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize snapshot: {e}"),
    }
}
