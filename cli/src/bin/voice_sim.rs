use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sensa_cli::{MenuChoice, MenuSession};
use sensa_voice::VoiceRuntime;
use shared_telemetry::TelemetryHandle;

const MENU_TITLE: &str = "VOICE RECOGNITION WORKLOAD TEST";
const MENU_OPTIONS: [&str; 4] = [
    "Test Real-time Processing",
    "Test Keyword Detection",
    "Show Workload Information",
    "Exit",
];
const REALTIME_FRAMES: usize = 8;
const DETECTION_TRIALS: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "voice-sim", version, about = "Voice recognition workload demo")]
struct Cli {
    /// Seed for reproducible simulated audio.
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
    let mut builder = VoiceRuntime::builder();
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    if let Some(path) = &cli.log_path {
        builder = builder.telemetry(TelemetryHandle::builder("voice").log_path(path).build()?);
    }
    let runtime = builder.build();

    println!("Initializing Voice Recognition Simulator...");
    println!("Focus: Low-latency Sesotho speech processing");
    println!("Initializing Sesotho keyword models...");
    for (idx, model) in runtime.detector().models().iter().enumerate() {
        println!("  - Model {}: {}", idx + 1, model.keyword);
    }

    if !cli.choices.is_empty() {
        for choice in cli.choices {
            let parsed = MenuChoice::from_scripted(choice, MENU_OPTIONS.len());
            if parsed.exits(MENU_OPTIONS.len()) {
                break;
            }
            match parsed {
                MenuChoice::Selected(choice) => run_option(&runtime, choice).await?,
                _ => println!("Invalid option! Please choose 1-4."),
            }
        }
        return Ok(());
    }

    let mut session = MenuSession::new();
    loop {
        MenuSession::display(MENU_TITLE, &MENU_OPTIONS)?;
        let choice = session.next_choice(MENU_OPTIONS.len()).await?;
        if choice.exits(MENU_OPTIONS.len()) {
            println!("Exiting Voice Recognition Simulator. Goodbye!");
            break;
        }
        match choice {
            MenuChoice::Selected(choice) => run_option(&runtime, choice).await?,
            _ => println!("Invalid option! Please choose 1-4."),
        }
    }
    Ok(())
}

async fn run_option(runtime: &VoiceRuntime, choice: usize) -> Result<()> {
    match choice {
        1 => realtime_test(runtime).await?,
        2 => detection_test(runtime).await?,
        3 => workload_info(),
        _ => println!("Invalid option! Please choose 1-4."),
    }
    Ok(())
}

async fn realtime_test(runtime: &VoiceRuntime) -> Result<()> {
    println!("\n=== Real-time Audio Processing Test ===");
    println!("Testing latency requirements (<100ms)...");
    let report = runtime.realtime_test(REALTIME_FRAMES).await?;
    for frame in &report.frames {
        print!(
            "Frame {}: {}ms, Keyword: {}",
            frame.index,
            frame.elapsed.as_millis(),
            frame
                .detection
                .as_ref()
                .map_or("none", |_| "DETECTED")
        );
        if frame.warning.is_some() {
            print!(" ⚠️ LATENCY WARNING");
        }
        println!();
    }
    println!(
        "\nResults: {}/{} frames exceeded 100ms limit",
        report.latency_violations,
        report.frames.len()
    );
    Ok(())
}

async fn detection_test(runtime: &VoiceRuntime) -> Result<()> {
    println!("\n=== Keyword Detection Accuracy Test ===");
    println!("Testing Sesotho command recognition...");
    let report = runtime.detection_test(DETECTION_TRIALS).await?;
    for frame in &report.frames {
        if frame.detected() {
            println!("Test {}: ✅ Keyword detected", frame.index);
        } else {
            println!("Test {}: ❌ No keyword", frame.index);
        }
    }
    println!(
        "\nDetection Rate: {}/{} ({}%)",
        report.detections,
        report.trials,
        report.rate_percent()
    );
    Ok(())
}

fn workload_info() {
    println!("\n=== Voice Recognition Workload Characteristics ===");
    for line in VoiceRuntime::workload_profile() {
        println!("• {line}");
    }
}
