use antennacore::record::bounds::{DISTANCE, FREQUENCY, WALLS};
use antennacore::record::parse_finite;
use antennacore::{EnvType, InputRecord, MetalObstruction, SelectorConfig};
use clap::Parser;
use log::debug;
use std::path::PathBuf;
use workflow::runner::Runner;

mod workflow;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Predicts the best antenna type for the given environment and signal conditions"
)]
struct Args {
    /// Load model and asset locations from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Model artifact, overrides the config file
    #[arg(long)]
    model: Option<PathBuf>,
    /// Directory containing designs/*.png, overrides the config file
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Environment type: urban, rural or indoor
    #[arg(long, default_value = "urban")]
    env: EnvType,
    /// Distance in meters
    #[arg(
        long,
        default_value_t = DISTANCE.default,
        allow_negative_numbers = true,
        value_parser = parse_finite
    )]
    distance: f64,
    /// Number of walls between the endpoints
    #[arg(long, default_value_t = WALLS.default as i64, allow_negative_numbers = true)]
    walls: i64,
    /// Metal obstructions present: yes or no
    #[arg(long, default_value = "no")]
    metal: MetalObstruction,
    /// Carrier frequency in MHz
    #[arg(
        long,
        default_value_t = FREQUENCY.default,
        allow_negative_numbers = true,
        value_parser = parse_finite
    )]
    frequency: f64,
    /// Append the prediction as a JSON line to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Print the prediction as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SelectorConfig::resolve(args.config.as_deref())?
        .with_overrides(args.model, args.assets);
    debug!("resolved config {:?}", config);
    let runner = Runner::new(&config)?;

    let record = InputRecord::new(
        args.env,
        args.distance,
        args.walls,
        args.metal.is_present(),
        args.frequency,
    );
    let view = runner.execute(&record)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{view}");
    }

    if let Some(path) = args.report {
        runner.append_report(&view, &path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_measurements_are_refused_at_parse_time() {
        for (flag, value) in [("--distance", "NaN"), ("--frequency", "inf")] {
            let err = Args::try_parse_from(["selector", flag, value])
                .err()
                .expect("non-finite value should be refused");
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn out_of_range_but_finite_values_still_parse() {
        let args =
            Args::try_parse_from(["selector", "--distance", "-5", "--frequency", "9000"]).unwrap();
        assert_eq!(args.distance, -5.0);
        assert_eq!(args.frequency, 9000.0);
        assert_eq!(args.env, EnvType::Urban);
    }
}
