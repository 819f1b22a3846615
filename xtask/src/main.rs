//! Custom cargo commands for docsearch.
//!
//! Usage:
//!   cargo xtask check     - cargo check, tests, clippy and the wasm32 build
//!   cargo xtask test      - Run all tests (default and wasm features)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask wasm      - Build the wasm32 text helpers
//!   cargo xtask fuzz <t>  - Run a fuzz target for a minute

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("check") => check()?,
        Some("test") => test()?,
        Some("bench") => bench()?,
        Some("wasm") => wasm()?,
        Some("fuzz") => fuzz(args.next().as_deref())?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  check         cargo check + test + clippy + wasm32 build
  test          Run all Rust tests, with and without the wasm feature
  bench         Run benchmarks
  wasm          Build the library for wasm32-unknown-unknown
  fuzz <target> Run a fuzz target (highlight, url_normalize) for 60s
"#
    );
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/4] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/4] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/4] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;

    // The bin and the on-disk index are native only; the library must still build.
    println!("[4/4] cargo build --target wasm32-unknown-unknown...");
    run_cargo(&WASM_BUILD)?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

fn test() -> Result<()> {
    run_cargo(&["test"])?;
    run_cargo(&["test", "--features", "wasm", "--lib"])
}

fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

const WASM_BUILD: [&str; 7] = [
    "build",
    "--lib",
    "--target",
    "wasm32-unknown-unknown",
    "--features",
    "wasm",
    "--release",
];

fn wasm() -> Result<()> {
    run_cargo(&WASM_BUILD)?;
    println!("\n✓ target/wasm32-unknown-unknown/release/docsearch.wasm");
    println!("  run wasm-bindgen --target web on it to generate the JS glue");
    Ok(())
}

fn fuzz(target: Option<&str>) -> Result<()> {
    let Some(target) = target else {
        bail!("usage: cargo xtask fuzz <highlight|url_normalize>");
    };
    let root = project_root()?;
    let status = Command::new("cargo")
        .args(["+nightly", "fuzz", "run", target, "--", "-max_total_time=60"])
        .current_dir(root.join("fuzz"))
        .status()
        .context("Failed to run cargo fuzz (is cargo-fuzz installed?)")?;

    if !status.success() {
        bail!("fuzz target {} failed", target);
    }
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
