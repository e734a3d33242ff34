use clap::Parser;
use diem_thi::cli::Args;
use diem_thi::commands;
use std::process;

fn main() {
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, exiting...");
                process::exit(130);
            }
        }
    });

    match result {
        // Notices for missing identifiers are already printed
        Ok(summary) => process::exit(summary.exit_code()),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
