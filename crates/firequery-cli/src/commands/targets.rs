//! Targets command - list targets and resource owners.

use colored::Colorize;
use firequery_harness::FuzzTarget;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Fuzz targets:".yellow().bold());
    for target in FuzzTarget::ALL {
        let owner = target.resource_owner();
        let resources = if owner == target {
            "own resources".green()
        } else {
            format!("uses {} resources", owner).blue()
        };
        println!(
            "  {:<22} {:<28} {}",
            target.to_string().white().bold(),
            target.fuzz_binary(),
            resources
        );
    }
    Ok(())
}
