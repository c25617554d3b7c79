//! Build automation tasks for the clock-menu project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// The only firmware target: Raspberry Pi Pico (RP2040, Cortex-M0+).
const FIRMWARE_TARGET: &str = "thumbv6m-none-eabi";
/// Features every firmware build needs.
const FIRMWARE_FEATURES: &str = "pico1,arm,defmt";
/// Firmware demos under `demos/`.
const DEMOS: [&str; 1] = ["menu_clock"];

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for clock-menu project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: host tests, firmware library and demos, docs
    CheckAll,
    /// Build the library for the Pico
    Build,
    /// Build a firmware demo
    Demo {
        /// Demo name (e.g., menu_clock)
        #[arg(default_value = "menu_clock")]
        name: String,
    },
    /// Build UF2 firmware file for flashing to Pico
    Uf2 {
        /// Demo name (e.g., menu_clock)
        #[arg(default_value = "menu_clock")]
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Build => exit_code(build_lib()),
        Commands::Demo { name } => exit_code(build_demo(&name, false)),
        Commands::Uf2 { name } => build_uf2(&name),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Running host tests...".cyan());
    let mut test_cmd = Command::new("cargo");
    test_cmd.current_dir(&workspace_root).arg("test");
    match host_target() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
            test_cmd.arg("--target").arg(target);
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }
    if !run_command(&mut test_cmd) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building library for the Pico...".cyan());
    if !build_lib() {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> Building demos...".cyan());
    for demo in DEMOS {
        println!("  {}", format!("- {demo}").bright_black());
        if !build_demo(demo, false) {
            return ExitCode::FAILURE;
        }
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "doc",
        "--target",
        FIRMWARE_TARGET,
        "--no-deps",
        "--features",
        FIRMWARE_FEATURES,
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed!".green().bold());
    ExitCode::SUCCESS
}

fn build_lib() -> bool {
    println!(
        "{}",
        format!("Building library with features: {FIRMWARE_FEATURES}").cyan()
    );
    if run_command(Command::new("cargo").current_dir(workspace_root()).args([
        "build",
        "--lib",
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
    ])) {
        println!("{}", "Build successful!".green());
        true
    } else {
        false
    }
}

fn build_demo(name: &str, release: bool) -> bool {
    println!(
        "{}",
        format!("Building demo '{name}' with features: {FIRMWARE_FEATURES}").cyan()
    );
    let mut cmd = Command::new("cargo");
    cmd.current_dir(workspace_root()).args([
        "build",
        "--example",
        name,
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
    ]);
    if release {
        cmd.arg("--release");
    }
    if run_command(&mut cmd) {
        println!("{}", "Build successful!".green());
        true
    } else {
        false
    }
}

fn build_uf2(name: &str) -> ExitCode {
    println!("{}", format!("Building UF2 for demo '{name}'").cyan());
    println!("  Target: {}", FIRMWARE_TARGET.bright_black());

    // Build in release mode for UF2
    if !build_demo(name, true) {
        return ExitCode::FAILURE;
    }

    // Convert to UF2 using elf2uf2-rs
    let elf_path = format!("target/{FIRMWARE_TARGET}/release/examples/{name}");
    let uf2_path = format!("{name}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(workspace_root())
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path}").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn workspace_root() -> std::path::PathBuf {
    // `cargo xtask` runs from the workspace root
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(|host| host.trim().to_string())
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
