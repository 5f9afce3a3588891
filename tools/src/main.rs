//! flow-runner: headless driver for the RentQuad rental engine.
//!
//! Usage:
//!   flow-runner                 interactive REPL on stdin
//!   flow-runner --demo          scripted full rental flow
//!   flow-runner --json          REPL, print full snapshot JSON
//!
//! REPL commands:
//!   begin <id> [title..]   start the reserve-first flow
//!   direct <id> [title..]  start the QR flow (skips reservation)
//!   reserve | scan | find | end | reset
//!   wait <ms>              keep polling for a while (watch GPS/stats)
//!   state                  print the current snapshot
//!   quit

use anyhow::Result;
use rentquad_core::clock::SystemClock;
use rentquad_core::config::FlowConfig;
use rentquad_core::engine::RentalEngine;
use rentquad_core::gateway::NoopGateway;
use rentquad_core::types::Vehicle;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let demo = args.iter().any(|a| a == "--demo");
    let json = args.iter().any(|a| a == "--json");

    let mut engine = RentalEngine::new(
        FlowConfig::default(),
        Box::new(SystemClock),
        Arc::new(NoopGateway),
    );

    if demo {
        run_demo(&mut engine)
    } else {
        run_repl(&mut engine, json)
    }
}

fn run_repl(engine: &mut RentalEngine, json: bool) -> Result<()> {
    println!("RentQuad flow-runner — type 'quit' to exit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else { continue };

        match cmd {
            "quit" | "exit" => break,
            "begin" | "direct" => {
                let Some(&id) = parts.get(1) else {
                    println!("usage: {cmd} <id> [title..]");
                    continue;
                };
                let vehicle = parse_vehicle(id, &parts[2..]);
                if cmd == "begin" {
                    engine.begin_rental(vehicle);
                } else {
                    engine.start_direct_rental(vehicle);
                }
                settle(engine);
            }
            "reserve" => {
                engine.reserve_vehicle();
                settle(engine);
            }
            "scan" => {
                engine.scan_vehicle();
                settle(engine);
            }
            "find" => {
                engine.find_vehicle();
                settle(engine);
            }
            "end" => {
                engine.end_ride();
                settle(engine);
            }
            "reset" => {
                engine.reset_flow();
            }
            "wait" => {
                let ms = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1000u64);
                poll_for(engine, Duration::from_millis(ms));
            }
            "state" => {}
            other => {
                log::warn!("unknown command: {other}");
                println!("unknown command: {other}");
                continue;
            }
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        } else {
            print_state(engine, 4);
        }
    }
    Ok(())
}

/// Scripted end-to-end rental against the real clock.
fn run_demo(engine: &mut RentalEngine) -> Result<()> {
    println!("RentQuad flow-runner — demo flow");

    let vehicle = Vehicle {
        id: uuid::Uuid::new_v4().to_string(),
        title: "Demo Quad".to_string(),
    };

    engine.begin_rental(vehicle);
    print_state(engine, 2);

    engine.reserve_vehicle();
    settle(engine);
    print_state(engine, 2);

    engine.scan_vehicle();
    settle(engine);
    print_state(engine, 2);

    println!("riding for 5s ...");
    poll_for(engine, Duration::from_secs(5));
    print_state(engine, 2);

    engine.find_vehicle();
    settle(engine);
    print_state(engine, 2);

    engine.end_ride();
    settle(engine);
    // Wait out the completed -> idle return as well.
    poll_for(engine, Duration::from_millis(3200));
    print_state(engine, 4);

    Ok(())
}

/// Poll until every pending one-shot transition has fired. Repeating
/// GPS/metrics ticks keep running, so only transitions are awaited.
fn settle(engine: &mut RentalEngine) {
    while engine.pending_transitions() > 0 {
        thread::sleep(POLL_INTERVAL);
        engine.poll();
    }
}

fn poll_for(engine: &mut RentalEngine, duration: Duration) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        thread::sleep(POLL_INTERVAL);
        engine.poll();
    }
}

fn print_state(engine: &RentalEngine, log_lines: usize) {
    let snap = engine.snapshot();
    let vehicle = snap
        .active_vehicle
        .as_ref()
        .map(|v| format!("{} ({})", v.title, v.id))
        .unwrap_or_else(|| "-".to_string());

    println!(
        "phase: {} | vehicle: {vehicle} | in progress: {}",
        snap.phase.as_str(),
        snap.flow_in_progress
    );
    println!(
        "stats: {}s, {:.2} km, est. {:.2}",
        snap.ride_stats.duration_seconds, snap.ride_stats.distance_km, snap.ride_stats.estimated_cost
    );
    for entry in snap.logs.iter().take(log_lines) {
        println!("  [{:?}] {}", entry.source, entry.message);
    }
}

fn parse_vehicle(id: &str, title_parts: &[&str]) -> Vehicle {
    let title = if title_parts.is_empty() {
        format!("Vehicle #{id}")
    } else {
        title_parts.join(" ")
    };
    Vehicle {
        id: id.to_string(),
        title,
    }
}
