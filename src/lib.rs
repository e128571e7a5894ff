//! # TabJoint
//!
//! Tab-and-slot intersections for laser-cut sheet material, with edges
//! compensated for the kerf of the beam and the clearance of the fit.
//!
//! ## Architecture
//!
//! 1. **tabjoint-core** - Point and vector types, errors, length units
//! 2. **tabjoint-camtools** - Edge path generator, tab count resolver,
//!    intersection maker, SVG and G-code output
//! 3. **tabjoint-settings** - Configuration files
//! 4. **tabjoint** - Command line binary

use std::path::PathBuf;

pub use tabjoint_camtools::{
    generate_edge, resolve_tabs, EdgePath, EdgePathGenerator, EdgeSpec, IntersectionMaker,
    IntersectionParameters, JointPiece, JointSides, PiecePath, TabCountResolver,
    TabResolutionInput, TabResolutionResult,
};
pub use tabjoint_core::{JointError, JointResult, LengthUnit, Point};
pub use tabjoint_settings::{Config, OutputFormat, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Output goes to stderr so generated paths on stdout stay clean.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Command line options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub output: Option<OutputFormat>,
    /// Unit of the configured lengths, overriding the file
    pub unit: Option<LengthUnit>,
}

impl CliOptions {
    /// `tabjoint [--format svg|gcode] [--unit mm|cm|in|pt|px] [CONFIG]`
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-f" | "--format" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("{} requires a value", arg))?;
                    options.output = Some(value.parse::<OutputFormat>()?);
                }
                "-u" | "--unit" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("{} requires a value", arg))?;
                    let unit = value.parse::<LengthUnit>().map_err(anyhow::Error::msg)?;
                    options.unit = Some(unit);
                }
                _ if arg.starts_with('-') => anyhow::bail!("Unknown option '{}'", arg),
                _ if options.config.is_none() => options.config = Some(PathBuf::from(arg)),
                _ => anyhow::bail!("Unexpected argument '{}'", arg),
            }
        }
        Ok(options)
    }
}

/// Generate the two-piece intersection described by `config` and render it.
///
/// Piece B is laid out below piece A with one length of spacing.
pub fn run(config: &Config, output: OutputFormat) -> anyhow::Result<String> {
    let maker = IntersectionMaker::new(config.intersection.clone())?;
    let spacing = maker.params().length;
    let pieces = IntersectionMaker::mating_pair(Point::origin(), Point::new(0.0, spacing));
    let paths = maker.generate(&pieces)?;

    Ok(match output {
        OutputFormat::Svg => tabjoint_camtools::render::to_svg(&paths),
        OutputFormat::Gcode => tabjoint_camtools::render::to_gcode(&paths, &maker.params().laser),
    })
}
