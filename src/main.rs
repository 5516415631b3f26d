use std::time::Instant;

use hyperlogix_routes::{FleetSnapshot, RouteVisibilityEngine};
use log::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hyperlogix_routes=info,route_replay=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: route-replay <snapshot.json> [iterations]");
        std::process::exit(2);
    };
    let iterations = args
        .next()
        .and_then(|n| n.parse::<u32>().ok())
        .unwrap_or(1000)
        .max(1);

    let snapshot = match FleetSnapshot::from_file(&path) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            error!("could not load {path}: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "loaded {} trucks and {} blockages from {path}",
        snapshot.trucks.len(),
        snapshot.blockages.len()
    );

    let mut engine = RouteVisibilityEngine::new();
    let start = Instant::now();
    for _ in 0..iterations {
        engine.evaluate(&snapshot);
    }
    info!("avg. evaluation: {:?}", start.elapsed() / iterations);

    let frame = engine.evaluate(&snapshot);
    match serde_json::to_string_pretty(&frame) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            error!("could not serialise frame: {err}");
            std::process::exit(1);
        }
    }
}
