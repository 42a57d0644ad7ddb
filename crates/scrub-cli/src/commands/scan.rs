use anyhow::Result;
use scrub_config::Config;
use scrub_engine::Scrubber;

use crate::cli::ScanArgs;
use crate::commands::read_input;

pub fn handle(args: ScanArgs, config: &Config) -> Result<()> {
    let text = read_input(args.input.as_ref())?;

    let mut config = config.clone();
    config.scan.allowlist.extend(args.allow);

    let scrubber = Scrubber::from_config(&config);
    let report = scrubber.sanitize(&text, args.redact);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.safe {
        println!("✓ No sensitive content found");
    } else {
        println!("Findings:");
        for finding in &report.findings {
            println!("  {} ({})", finding.category, finding.matches.len());
            for m in &finding.matches {
                println!("    {}", m);
            }
        }
    }

    if let Some(redacted) = &report.text {
        println!("\n{}", redacted);
    }

    Ok(())
}
