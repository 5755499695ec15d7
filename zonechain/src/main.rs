// src/main.rs
//
// Minimal demo node that wires up the zonechain library:
//
// - freshly generated RSA identity
// - time-sliced PoAh leader election, no persistence hook
// - a loop that authors a demo zone grant and runs the shared mining
//   trigger once per block interval.
//
// There is no transport attached here, so broadcasts are logged and
// dropped; a real deployment hands them to its mesh layer.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use zonechain::{
    Broadcast, ConsensusEngine, DefaultNode, KeyPair, NodeConfig, NullSink, Payload,
    TimeSlicedPoah,
};

#[tokio::main]
async fn main() {
    // Basic tracing setup.
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "zonechain=info".to_string()),
        )
        .init();

    if let Err(err) = run_node().await {
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn run_node() -> Result<(), String> {
    // For now, just use defaults. Later this can load from a file/CLI/env.
    let cfg = NodeConfig::default();
    let block_interval = cfg.consensus.block_time_secs;

    tracing::info!("generating node identity (2048-bit RSA)");
    let keys = KeyPair::generate().map_err(|e| format!("failed to generate identity: {e}"))?;
    tracing::info!(peer = keys.peer_id().short(), "identity ready");

    let engine = ConsensusEngine::new(cfg, keys, TimeSlicedPoah, NullSink);
    let mut node = DefaultNode::new(engine);

    tracing::info!(block_interval, "starting node");

    loop {
        let now = current_unix_timestamp();

        // Author a demo zone grant so every interval has something to seal.
        if let Err(err) = node.submit(Payload::grant("446176000983", &["door1"]), now) {
            tracing::warn!(error = %err, "failed to author transaction");
        }

        match node.trigger_mine(now) {
            Ok(broadcasts) => {
                for broadcast in &broadcasts {
                    match broadcast {
                        Broadcast::NewBlock(block) => tracing::info!(
                            block_id = block.block_id,
                            hash = %block.hash_hex(),
                            "sealed block"
                        ),
                        other => tracing::debug!(kind = %other.kind(), "broadcast"),
                    }
                }
            }
            Err(err) => tracing::warn!(error = %err, "mining trigger failed"),
        }

        tokio::time::sleep(Duration::from_secs(block_interval)).await;
    }
}

/// Returns the current wall-clock time as seconds since Unix epoch.
///
/// On error (system clock before epoch) this falls back to 0.
fn current_unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_secs()
}
