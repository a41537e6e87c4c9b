pub mod data;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info, warn};

use crate::devices::Arduino;
use crate::store::DocumentSink;
use data::parse_line;

/// Counters reported once when the bridge stops.
#[derive(Debug, Default)]
pub struct BridgeStats {
    pub lines_received: u64,
    pub records_forwarded: u64,
    pub lines_rejected: u64,
    pub write_failures: u64,
}

/// Forward serial telemetry to the sink until `shutdown` is set.
///
/// Parse rejects and write failures drop the current line and keep the
/// loop running; a failed serial read ends it.
pub fn run_bridge(
    arduino: &mut Arduino,
    sink: &mut dyn DocumentSink,
    shutdown: &AtomicBool,
) -> Result<BridgeStats, String> {
    let mut stats = BridgeStats::default();
    info!("Forwarding serial records");

    while !shutdown.load(Ordering::SeqCst) {
        match arduino.read_line() {
            Ok(Some(line)) => forward_line(&line, sink, &mut stats),
            Ok(None) => {}
            Err(e) => {
                error!("Serial read failed: {}", e);
                return Err(format!("serial read failed: {e}"));
            }
        }
    }

    info!("Shutdown requested, leaving forwarding loop");
    Ok(stats)
}

/// Handle one raw line: skip blanks silently, reject anything that does
/// not parse, forward the rest. Each line stands alone.
fn forward_line(line: &str, sink: &mut dyn DocumentSink, stats: &mut BridgeStats) {
    if line.is_empty() {
        return;
    }
    stats.lines_received += 1;

    match parse_line(line) {
        Ok(status) => {
            println!(
                "Received: [{} / {}] -> {}%  stolen: {}",
                status.location_id, status.stall_id, status.remaining_percentage, status.is_stolen
            );
            match sink.write_status(&status) {
                Ok(()) => stats.records_forwarded += 1,
                Err(e) => {
                    stats.write_failures += 1;
                    error!("Write failed for line {:?}: {}", line, e);
                }
            }
        }
        Err(e) => {
            stats.lines_rejected += 1;
            warn!("Ignoring line {:?}: {}", line, e);
        }
    }
}
