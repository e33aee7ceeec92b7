//! Args command - print the cargo fuzz command line for a target.

use firequery_harness::{cargo_fuzz_command, FuzzTarget, LaunchOptions};
use tracing::debug;

pub fn run(
    target: FuzzTarget,
    resource_root: &str,
    options: &LaunchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(%target, ?options, "building launch command");
    let command = cargo_fuzz_command(target, resource_root, options);
    println!("{}", command.join(" "));
    Ok(())
}
