use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sensa_cli::{MenuChoice, MenuSession};
use sensa_connectivity::{ConnectivityRuntime, EnvironmentReport, LocationContext};
use shared_telemetry::TelemetryHandle;

const MENU_TITLE: &str = "INTELLIGENT CONNECTIVITY WORKLOAD TEST";
const MENU_OPTIONS: [&str; 7] = [
    "Test Home Environment",
    "Test Office Environment",
    "Test Public Environment",
    "Test Multiple Scenarios",
    "Test Battery Optimization",
    "Show Workload Information",
    "Exit",
];

#[derive(Parser, Debug)]
#[command(
    name = "connectivity-sim",
    version,
    about = "Context-aware connectivity workload demo"
)]
struct Cli {
    /// Seed for reproducible simulated scans.
    #[arg(long)]
    seed: Option<u64>,
    /// Optional JSONL telemetry log.
    #[arg(long)]
    log_path: Option<PathBuf>,
    /// Scripted menu selections; runs them in order and exits.
    #[arg(long = "choice")]
    choices: Vec<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut builder = ConnectivityRuntime::builder();
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    if let Some(path) = &cli.log_path {
        builder = builder.telemetry(
            TelemetryHandle::builder("connectivity")
                .log_path(path)
                .build()?,
        );
    }
    let runtime = builder.build();

    println!("Initializing Intelligent Connectivity Simulator...");
    println!("Focus: Context-aware network decisions for African markets");
    println!("Initializing Security Policies...");
    println!("• {} security levels configured", runtime.policies().len());
    println!("• Context-aware rules active");

    if !cli.choices.is_empty() {
        for choice in cli.choices {
            let parsed = MenuChoice::from_scripted(choice, MENU_OPTIONS.len());
            if parsed.exits(MENU_OPTIONS.len()) {
                break;
            }
            match parsed {
                MenuChoice::Selected(choice) => run_option(&runtime, choice).await?,
                _ => println!("Invalid option! Please choose 1-7."),
            }
        }
        return Ok(());
    }

    let mut session = MenuSession::new();
    loop {
        MenuSession::display(MENU_TITLE, &MENU_OPTIONS)?;
        let choice = session.next_choice(MENU_OPTIONS.len()).await?;
        if choice.exits(MENU_OPTIONS.len()) {
            println!("Exiting Intelligent Connectivity Simulator. Goodbye!");
            break;
        }
        match choice {
            MenuChoice::Selected(choice) => run_option(&runtime, choice).await?,
            _ => println!("Invalid option! Please choose 1-7."),
        }
    }
    Ok(())
}

async fn run_option(runtime: &ConnectivityRuntime, choice: usize) -> Result<()> {
    match choice {
        1 => print_report(&runtime.evaluate_environment(LocationContext::Home)),
        2 => print_report(&runtime.evaluate_environment(LocationContext::Office)),
        3 => print_report(&runtime.evaluate_environment(LocationContext::PublicCafe)),
        4 => {
            println!("\n=== Multiple Scenario Test ===");
            println!("Testing connectivity across different environments...");
            for report in runtime.run_scenarios().await? {
                print_report(&report);
            }
        }
        5 => battery_test(runtime),
        6 => workload_info(),
        _ => println!("Invalid option! Please choose 1-7."),
    }
    Ok(())
}

fn print_report(report: &EnvironmentReport) {
    println!("\n=== Testing Environment: {} ===", report.location.label());
    println!("Available networks: {}", report.networks.join(" "));
    println!("Nearby devices: {}", report.devices.join(" "));
    println!("🔒 Security Policy Applied: ");
    println!("   • Level: {}", report.policy.security_level.label());
    println!(
        "   • PIN Required: {}",
        if report.policy.require_secondary {
            "YES"
        } else {
            "NO"
        }
    );
    println!("   • Data Limit: {}MB", report.policy.data_limit_mb);
    println!("   • Connection: {}", report.policy.access_mode.label());
    println!("📡 Connectivity Decisions:");
    for decision in &report.decisions {
        println!(
            "   {} {}: {} ({})",
            decision.verdict.glyph(),
            decision.verdict.label(),
            decision.network,
            decision.reason
        );
    }
    println!(
        "⏱️  Context decision time: {}μs",
        report.elapsed.as_micros()
    );
    if report.warning.is_some() {
        println!("⚠️  Slow decision making detected");
    }
}

fn battery_test(runtime: &ConnectivityRuntime) {
    println!("\n=== Battery Optimization Test ===");
    println!("Testing power-efficient scanning strategies...");
    for report in runtime.battery_profile() {
        println!("\n--- Power Mode: {} ---", report.mode.label());
        println!("Networks found: {}", report.networks_found);
        println!("Devices found: {}", report.devices_found);
        println!("Scan time: {}ms", report.scan_elapsed.as_millis());
        println!(
            "Estimated battery impact: {}%",
            report.battery_impact_percent
        );
    }
}

fn workload_info() {
    println!("\n=== Intelligent Connectivity Workload Characteristics ===");
    for line in ConnectivityRuntime::workload_profile() {
        println!("• {line}");
    }
}
