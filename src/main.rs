use std::fs;
use std::fs::File;

use anyhow::Context;
use clap::parser::ValueSource;
use clap::{arg, command, value_parser, ArgAction, ArgMatches, Command};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};

use quad_index_lib::survey::{run_survey, SurveyConfig, SurveyReport, UniformSource};
use quad_index_lib::Rectangle;


fn cli() -> Command {
    command!()
        .next_line_help(true)
        .arg(
            arg!(--config <FILE>)
                .required(false)
                .help("JSON file with survey settings, the options below override it")
        )
        .arg(arg!(--width <WIDTH>).required(false).value_parser(value_parser!(f64)))
        .arg(arg!(--height <HEIGHT>).required(false).value_parser(value_parser!(f64)))
        .arg(
            arg!(--points <COUNT>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Points sampled per round")
        )
        .arg(
            arg!(--capacity <COUNT>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Points a leaf holds before it splits")
        )
        .arg(arg!(--"max-depth" <DEPTH>).required(false).value_parser(value_parser!(u32)))
        .arg(arg!(--rounds <COUNT>).required(false).value_parser(value_parser!(usize)))
        .arg(
            arg!(--seed <SEED>)
                .required(false)
                .value_parser(value_parser!(u64))
                .help("Seed for reproducible runs, random when absent")
        )
        .arg(
            arg!(--window <HALF_EXTENT>)
                .required(false)
                .value_parser(value_parser!(f64))
                .help("Half-extent of the window queried around every point")
        )
        .arg(
            arg!(--radius <DISTANCE>)
                .required(false)
                .value_parser(value_parser!(f64))
                .help("Points closer than this are counted as overlapping")
        )
        .arg(
            arg!(--query <RECT>)
                .required(false)
                .value_parser(parse_rectangle)
                .help("Range query run every round, given as CX,CY,HALF_WIDTH,HALF_HEIGHT")
        )
        .arg(
            arg!(--json)
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Prints the report as JSON")
        )
        .arg(
            arg!(--loglevel <LEVEL>)
                .required(false)
                .default_value("info")
                .value_parser(["trace", "debug", "info", "warn", "error", "off" ])
                .action(ArgAction::Set)
        )
        .arg(
            arg!(--logfile [FILE_NAME])
                .required(false)
                .default_value("quad_index.log")
                .action(ArgAction::Set)
                .help("Enables logging to a file. Disabled by default")
        )
        .arg(
            arg!(-q --quiet)
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Disables log output to the terminal")
        )
}


fn parse_rectangle(value: &str) -> Result<Rectangle, String> {
    let parts = value.split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|e| format!("{part:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [cx, cy, hw, hh] => Ok(Rectangle::new(*cx, *cy, *hw, *hh)),
        _ => Err(format!("expected 4 comma separated numbers, got {}", parts.len())),
    }
}


fn initialize_logging(matches: &ArgMatches) -> anyhow::Result<()> {
    let loglevel = match matches.get_one::<String>("loglevel").map(String::as_str) {
        Some("trace") => LevelFilter::Trace,
        Some("debug") => LevelFilter::Debug,
        Some("info") => LevelFilter::Info,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        _ => LevelFilter::Off,
    };
    let quiet = matches.get_flag("quiet");
    let term_loglevel = if quiet { LevelFilter::Off } else { loglevel };

    let logfile = match (matches.value_source("logfile"), matches.get_one::<String>("logfile")) {
        (Some(ValueSource::CommandLine), Some(file_name)) => {
            Some(file_name)
        },
        _ => None,
    };

    if let Some(logfile) = logfile {
        let file = File::create(logfile).with_context(|| format!("cannot create log file {logfile}"))?;
        CombinedLogger::init(
            vec![
                TermLogger::new(term_loglevel, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
                WriteLogger::new(loglevel, Config::default(), file)
            ]
        )?;
    } else {
        TermLogger::init(term_loglevel, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;
    }

    Ok(())
}


fn survey_config(matches: &ArgMatches) -> anyhow::Result<SurveyConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("cannot read config file {path}"))?;
            SurveyConfig::from_json(&text).with_context(|| format!("cannot parse config file {path}"))?
        }
        None => SurveyConfig::default(),
    };

    if let Some(width) = matches.get_one::<f64>("width") {
        config.width = *width;
    }
    if let Some(height) = matches.get_one::<f64>("height") {
        config.height = *height;
    }
    if let Some(points) = matches.get_one::<usize>("points") {
        config.points = *points;
    }
    if let Some(capacity) = matches.get_one::<usize>("capacity") {
        config.capacity = *capacity;
    }
    if let Some(max_depth) = matches.get_one::<u32>("max-depth") {
        config.max_depth = *max_depth;
    }
    if let Some(rounds) = matches.get_one::<usize>("rounds") {
        config.rounds = *rounds;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    if let Some(window) = matches.get_one::<f64>("window") {
        config.window = *window;
    }
    if let Some(radius) = matches.get_one::<f64>("radius") {
        config.radius = *radius;
    }
    if let Some(query) = matches.get_one::<Rectangle>("query") {
        config.query = Some(*query);
    }

    config.validate()?;
    Ok(config)
}


fn print_report(report: &SurveyReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for round in &report.rounds {
        println!("Round {}: Found {} overlapping points", round.round, round.overlaps);
        if let Some(query) = &report.config.query {
            println!("{} points in {query}", round.found.len());
            for point in &round.found {
                println!("{point}");
            }
        }
    }

    Ok(())
}


fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    initialize_logging(&matches)?;

    let config = survey_config(&matches)?;
    info!("surveying {}x{} with {} points per round, capacity {}", config.width, config.height, config.points, config.capacity);

    let mut source = UniformSource::seeded(config.domain(), config.seed);
    let report = run_survey(&config, &mut source)?;
    print_report(&report, matches.get_flag("json"))?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rectangle() {
        assert_eq!(parse_rectangle("61, 95.5, 30, 15.25"), Ok(Rectangle::new(61.0, 95.5, 30.0, 15.25)));
        assert!(parse_rectangle("1,2,3").is_err());
        assert!(parse_rectangle("1,2,x,4").is_err());
    }

    #[test]
    fn test_command_line_overrides_defaults() {
        let matches = cli().get_matches_from([
            "quad_index", "--points", "100", "--capacity", "8", "--max-depth", "6", "--seed", "1", "--query", "5,5,1,1",
        ]);
        let config = survey_config(&matches).unwrap();

        assert_eq!(config.points, 100);
        assert_eq!(config.capacity, 8);
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.query, Some(Rectangle::new(5.0, 5.0, 1.0, 1.0)));
        assert_eq!(config.rounds, SurveyConfig::default().rounds);
    }

    #[test]
    fn test_zero_capacity_is_refused() {
        let matches = cli().get_matches_from(["quad_index", "--capacity", "0"]);
        assert!(survey_config(&matches).is_err());
    }

    #[test]
    fn test_cli_is_consistent() {
        cli().debug_assert();
    }
}
