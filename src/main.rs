//! CPU Scheduling Simulator CLI
//!
//! Replays a JSON workload under FCFS, SJF, priority, or round-robin
//! scheduling and prints the run report.
//!
//! The input is either a scenario object (processes plus policy) or a bare
//! array of processes; `--policy` and `--quantum` override whatever the file
//! carries. A bare array with no `--policy` runs under FCFS.
//!
//! # Output Format
//!
//! The final report is written to stdout as JSON: completed process records
//! with waiting and turnaround, the run-length-encoded occupancy timeline,
//! and the workload averages. With `--snapshots`, one JSON state snapshot
//! per executed tick precedes the report, one object per line.
//!
//! A summary is written to stderr upon completion:
//! `processes=N policy=P makespan=N avg_waiting=N avg_turnaround=N elapsed_ms=N`
//!
//! # Exit Codes
//!
//! - `0`: Success
//! - `2`: Invalid arguments or scenario (bad JSON, validation failure)

use schedsim_rs::{Engine, PolicyKind, ProcessSpec, Scenario, StepOutcome, SCHEMA_VERSION};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} [OPTIONS] <scenario.json | ->

Reads a workload (a scenario object or a bare process array, `-` for stdin)
and replays it under the selected scheduling policy.

OPTIONS:
    --policy=<fcfs|sjf|priority|rr>   Scheduling policy (overrides the scenario file)
    --quantum=<N>                     Round-robin time slice in ticks
    --snapshots                       Stream one JSON snapshot per executed tick
    --pretty                          Pretty-print the final report
    --help, -h                        Show this help message",
        exe.to_string_lossy()
    );
}

/// Accept either a full scenario object or a bare process array.
fn parse_input(text: &str) -> Result<(Vec<ProcessSpec>, Option<PolicyKind>, Option<u64>), String> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| format!("invalid scenario JSON: {e}"))?;
    if value.is_array() {
        let processes: Vec<ProcessSpec> =
            serde_json::from_value(value).map_err(|e| format!("invalid process list: {e}"))?;
        Ok((processes, None, None))
    } else {
        let scenario: Scenario =
            serde_json::from_value(value).map_err(|e| format!("invalid scenario: {e}"))?;
        Ok((scenario.processes, Some(scenario.policy), scenario.quantum))
    }
}

fn main() -> io::Result<()> {
    let mut args = env::args_os();
    let exe = args.next().unwrap_or_else(|| "schedsim-rs".into());
    let mut input: Option<PathBuf> = None;
    let mut cli_policy: Option<PolicyKind> = None;
    let mut cli_quantum: Option<u64> = None;
    let mut snapshots = false;
    let mut pretty = false;

    for arg in args {
        if let Some(flag) = arg.to_str() {
            if let Some(value) = flag.strip_prefix("--policy=") {
                let Some(kind) = PolicyKind::parse(value) else {
                    eprintln!(
                        "invalid --policy value: {} (expected fcfs, sjf, priority, or rr)",
                        value
                    );
                    std::process::exit(2);
                };
                cli_policy = Some(kind);
                continue;
            }
            if let Some(value) = flag.strip_prefix("--quantum=") {
                let n: u64 = value.parse().unwrap_or_else(|_| {
                    eprintln!("invalid --quantum value: {}", value);
                    std::process::exit(2);
                });
                cli_quantum = Some(n);
                continue;
            }
            match flag {
                "--snapshots" => {
                    snapshots = true;
                    continue;
                }
                "--pretty" => {
                    pretty = true;
                    continue;
                }
                "--help" | "-h" => {
                    print_usage(&exe);
                    std::process::exit(0);
                }
                _ if flag.starts_with("--") => {
                    eprintln!("unknown flag: {}", flag);
                    print_usage(&exe);
                    std::process::exit(2);
                }
                _ => {}
            }
        }

        if input.is_some() {
            print_usage(&exe);
            std::process::exit(2);
        }
        input = Some(PathBuf::from(arg));
    }

    let Some(input) = input else {
        print_usage(&exe);
        std::process::exit(2);
    };

    let text = if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&input)?
    };

    let (processes, file_policy, file_quantum) = parse_input(&text).unwrap_or_else(|msg| {
        eprintln!("{msg}");
        std::process::exit(2);
    });

    let scenario = Scenario {
        schema_version: SCHEMA_VERSION,
        processes,
        policy: cli_policy.or(file_policy).unwrap_or(PolicyKind::Fcfs),
        quantum: cli_quantum.or(file_quantum),
    };

    let mut engine = Engine::new(&scenario).unwrap_or_else(|err| {
        eprintln!("invalid scenario: {err}");
        std::process::exit(2);
    });

    let start = Instant::now();
    let report = if snapshots {
        loop {
            match engine.step().map_err(io::Error::other)? {
                StepOutcome::Ran { .. } => {
                    println!("{}", serde_json::to_string(&engine.snapshot())?);
                }
                StepOutcome::Done => break engine.report(),
            }
        }
    } else {
        engine.run_to_completion().map_err(io::Error::other)?
    };
    let elapsed = start.elapsed();

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    eprintln!(
        "processes={} policy={} makespan={} avg_waiting={:.2} avg_turnaround={:.2} elapsed_ms={}",
        scenario.processes.len(),
        engine.policy_kind(),
        report.makespan(),
        report.metrics.avg_waiting,
        report.metrics.avg_turnaround,
        elapsed.as_millis()
    );

    Ok(())
}
