use tabjoint::{init_logging, run, CliOptions, Config};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let options = CliOptions::parse(std::env::args().skip(1))?;
    let mut config = Config::load_or_default(options.config.as_deref())?;
    if let Some(unit) = options.unit {
        config.intersection.unit = unit;
    }
    let output = options.output.unwrap_or(config.output);

    info!(
        %output,
        unit = %config.intersection.unit,
        version = tabjoint::VERSION,
        "Generating intersection"
    );
    print!("{}", run(&config, output)?);

    Ok(())
}
