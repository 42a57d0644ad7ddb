use anyhow::Result;
use scrub_config::Config;
use scrub_engine::Scrubber;

use crate::cli::RepairArgs;
use crate::commands::read_input;

pub fn handle(args: RepairArgs, config: &Config) -> Result<()> {
    let text = read_input(args.input.as_ref())?;

    let mut config = config.clone();
    if args.no_extract {
        config.repair.extract_first = false;
    }

    let scrubber = Scrubber::from_config(&config);
    let outcome = scrubber.normalize(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.repair)?);
        return Ok(());
    }

    println!("{}", outcome.repair.fixed_text);
    if outcome.repair.is_partial {
        eprintln!(
            "✓ Repaired with {} patch(es); the stream may not be finished",
            outcome.repair.patches.len()
        );
    }
    if outcome.repair.parsed_value.is_none() {
        eprintln!("⚠ Repaired text still does not parse");
    }

    Ok(())
}
