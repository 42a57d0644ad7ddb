use anyhow::Result;
use scrub_config::Config;
use scrub_scan::merge_rules;
use scrub_vault::Vault;

use crate::cli::MaskArgs;
use crate::commands::read_input;

pub fn handle(args: MaskArgs, config: &Config) -> Result<()> {
    let text = read_input(args.input.as_ref())?;

    // One-shot vault: the mapping lives only for this invocation.
    let mut vault = Vault::with_rules(merge_rules(&config.scan.custom_rules));
    let masked = vault.mask(&text);

    println!("{}", masked);
    eprintln!("✓ Tokenized {} value(s)", vault.len());

    Ok(())
}
