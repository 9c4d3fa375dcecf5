use padmeter::backends::probe_source;
use padmeter::{ConsumerHandle, DeviceRegistry, MeasureOptions, RegistryConfig, ALL_CHANNELS};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Usage: `cargo run --example poll -- [device]`
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let device: i64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    let registry = DeviceRegistry::new(probe_source(), RegistryConfig::default().with_battery(true));

    // One handle per channel, the way a host would create one measure each.
    let handles: Vec<ConsumerHandle> = ALL_CHANNELS
        .iter()
        .map(|c| ConsumerHandle::from_options(&MeasureOptions::new(device, c.name())))
        .collect();

    loop {
        let line: Vec<String> = handles
            .iter()
            .map(|h| format!("{}={:.3}", h.channel(), h.query(&registry)))
            .collect();
        println!("{}", line.join(" "));

        // Faster than the poll interval, so most queries hit the cached slot.
        std::thread::sleep(Duration::from_millis(4));
    }
}
