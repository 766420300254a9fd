use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sensa_biometric::{AuthDecision, AuthOutcome, BiometricRuntime, CheckThresholds};
use sensa_core::RandomCheck;
use sensa_cli::{MenuChoice, MenuSession};
use shared_telemetry::TelemetryHandle;

const MENU_TITLE: &str = "BIOMETRIC SECURITY WORKLOAD TEST";
const MENU_OPTIONS: [&str; 5] = [
    "Test User Authentication",
    "Test Context Awareness",
    "Stress Test",
    "Show Workload Information",
    "Exit",
];
const STRESS_ATTEMPTS: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "biometric-sim", version, about = "Biometric security workload demo")]
struct Cli {
    /// Seed for reproducible simulated sensor outcomes.
    #[arg(long)]
    seed: Option<u64>,
    /// Override for the voice-check failure threshold.
    #[arg(long)]
    voice_threshold: Option<f32>,
    /// Override for the PIN-check failure threshold.
    #[arg(long)]
    pin_threshold: Option<f32>,
    /// Override for the stress-test failure threshold.
    #[arg(long)]
    quick_threshold: Option<f32>,
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
    let mut builder = BiometricRuntime::builder().thresholds(resolve_thresholds(&cli)?);
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    if let Some(path) = &cli.log_path {
        builder = builder.telemetry(TelemetryHandle::builder("biometric").log_path(path).build()?);
    }
    let runtime = builder.build();

    println!("Initializing Biometric Security Simulator...");
    println!("Focus: Multi-factor authentication with context awareness");
    println!("Initializing User Database...");
    println!("• {} user profiles loaded", runtime.profiles().len());
    println!("• Multi-factor authentication enabled");

    if !cli.choices.is_empty() {
        for choice in cli.choices {
            let parsed = MenuChoice::from_scripted(choice, MENU_OPTIONS.len());
            if parsed.exits(MENU_OPTIONS.len()) {
                break;
            }
            match parsed {
                MenuChoice::Selected(choice) => run_option(&runtime, choice).await?,
                _ => println!("Invalid option! Please choose 1-5."),
            }
        }
        return Ok(());
    }

    let mut session = MenuSession::new();
    loop {
        MenuSession::display(MENU_TITLE, &MENU_OPTIONS)?;
        let choice = session.next_choice(MENU_OPTIONS.len()).await?;
        if choice.exits(MENU_OPTIONS.len()) {
            println!("Exiting Biometric Security Simulator. Goodbye!");
            break;
        }
        match choice {
            MenuChoice::Selected(choice) => run_option(&runtime, choice).await?,
            _ => println!("Invalid option! Please choose 1-5."),
        }
    }
    Ok(())
}

fn resolve_thresholds(cli: &Cli) -> Result<CheckThresholds> {
    let defaults = CheckThresholds::default();
    let thresholds = CheckThresholds {
        voice: cli.voice_threshold.unwrap_or(defaults.voice),
        pin: cli.pin_threshold.unwrap_or(defaults.pin),
        quick: cli.quick_threshold.unwrap_or(defaults.quick),
    };
    for value in [thresholds.voice, thresholds.pin, thresholds.quick] {
        RandomCheck::try_new(value)?;
    }
    Ok(thresholds)
}

async fn run_option(runtime: &BiometricRuntime, choice: usize) -> Result<()> {
    match choice {
        1 => authentication_test(runtime),
        2 => context_test(runtime),
        3 => stress_test(runtime).await?,
        4 => workload_info(),
        _ => println!("Invalid option! Please choose 1-5."),
    }
    Ok(())
}

fn authentication_test(runtime: &BiometricRuntime) {
    println!("\n=== User Authentication Test ===");
    let nearby = BiometricRuntime::scan_nearby();
    println!("Scanning nearby devices... Found: {}", nearby.join(" "));
    println!();
    for decision in runtime.authentication_sweep() {
        print_decision(&decision);
    }
}

fn context_test(runtime: &BiometricRuntime) {
    println!("\n=== Context-Aware Security Test ===");
    println!("Testing security policy adaptation...");
    for report in runtime.context_sweep() {
        println!("\n--- Testing {} Environment ---", report.environment);
        println!("Nearby devices: {}", report.devices.join(" "));
        print_decision(&report.decision);
    }
}

async fn stress_test(runtime: &BiometricRuntime) -> Result<()> {
    println!("\n=== Stress Test: Multiple Authentication Attempts ===");
    println!("Testing system under load...");
    let nearby = BiometricRuntime::scan_nearby();
    println!("Scanning nearby devices... Found: {}", nearby.join(" "));
    let report = runtime.stress_test(STRESS_ATTEMPTS).await?;
    println!("\nStress Test Results:");
    println!("• Attempts: {}", report.attempts);
    println!("• Successful: {}", report.successes);
    println!("• Total time: {}ms", report.total_elapsed.as_millis());
    println!("• Average time per auth: {}ms", report.average.as_millis());
    Ok(())
}

fn workload_info() {
    println!("\n=== Biometric Security Workload Characteristics ===");
    for line in BiometricRuntime::workload_profile() {
        println!("• {line}");
    }
}

fn print_decision(decision: &AuthDecision) {
    match &decision.outcome {
        AuthOutcome::UnknownUser => {
            println!("❌ User '{}' not found in database!", decision.user_id);
        }
        AuthOutcome::Granted { method, .. } => {
            println!(
                "👤 {}: ✅ AUTH_SUCCESS via {}{} [{}ms]",
                decision.user_id,
                method.label(),
                decision.context_note(),
                decision.elapsed.as_millis()
            );
            print_warning(decision);
        }
        AuthOutcome::Denied { method } => {
            println!(
                "👤 {}: ❌ AUTH_FAILED via {} [{}ms]",
                decision.user_id,
                method.label(),
                decision.elapsed.as_millis()
            );
            print_warning(decision);
        }
    }
}

fn print_warning(decision: &AuthDecision) {
    if decision.warning.is_some() {
        println!("   ⚠️  Slow authentication (>2s)");
    }
}
