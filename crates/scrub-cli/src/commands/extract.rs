use anyhow::Result;
use scrub_config::Config;
use scrub_extract::Extractor;

use crate::cli::ExtractArgs;
use crate::commands::read_input;

pub fn handle(args: ExtractArgs, config: &Config) -> Result<()> {
    let text = read_input(args.input.as_ref())?;

    let prefer_last = if args.first {
        false
    } else {
        config.extract.prefer_last
    };
    let extractor = Extractor::new().with_prefer_last(prefer_last);

    println!("{}", extractor.extract(&text));
    Ok(())
}
