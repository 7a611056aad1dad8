use anyhow::{anyhow, Context, Error};
use clap::{App, Arg, ArgMatches};
use config::Config;
use controller::Controller;
use engine::Engine;
use indicatif::ProgressBar;
use ratings_file::RatingsFileController;
use simplelog::{LevelFilter, SimpleLogger, TermLogger, TerminalMode};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn app() -> App<'static, 'static> {
    App::new("collab-filter")
        .version(VERSION)
        .about("Predicts held-out ratings with user based collaborative filtering")
        .arg(
            Arg::with_name("train")
                .long("train")
                .value_name("FILE")
                .takes_value(true)
                .required(true)
                .help("Ratings (item, user, score) used to learn user similarities"),
        )
        .arg(
            Arg::with_name("test")
                .long("test")
                .value_name("FILE")
                .takes_value(true)
                .required(true)
                .help("Ratings (item, user, score) to predict and evaluate"),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("TOML configuration file"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .takes_value(true)
                .help("Where to write the predictions [default: predictions.txt]"),
        )
        .arg(
            Arg::with_name("progress")
                .long("progress")
                .help("Show a progress bar while predicting"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .conflicts_with("quiet")
                .help("Log debug messages"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Only log errors"),
        )
}

fn log_level(matches: &ArgMatches, config: &Config) -> Result<LevelFilter, Error> {
    if matches.is_present("quiet") {
        return Ok(LevelFilter::Error);
    }

    if matches.is_present("verbose") {
        return Ok(LevelFilter::Debug);
    }

    config
        .log
        .level
        .parse()
        .map_err(|_| anyhow!("Invalid log level '{}'", config.log.level))
}

fn init_logger(level: LevelFilter) -> Result<(), Error> {
    let log_config = simplelog::Config::default();

    // Not every output is a terminal
    if TermLogger::init(level, log_config.clone(), TerminalMode::Mixed).is_err() {
        SimpleLogger::init(level, log_config)?;
    }

    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<Config, Error> {
    let mut config = match matches.value_of("config") {
        Some(path) => {
            Config::load(path).with_context(|| format!("Couldn't load config from {}", path))?
        }
        None => Config::default(),
    };

    if let Some(output) = matches.value_of("output") {
        config.output.predictions_path = PathBuf::from(output);
    }

    Ok(config)
}

fn main() -> Result<(), Error> {
    let matches = app().get_matches();

    let config = load_config(&matches)?;
    init_logger(log_level(&matches, &config)?)?;

    let train_path = matches
        .value_of("train")
        .ok_or_else(|| anyhow!("Missing training file"))?;
    let test_path = matches
        .value_of("test")
        .ok_or_else(|| anyhow!("Missing test file"))?;

    let training = RatingsFileController::from_config(train_path, &config.data)?;
    let test = RatingsFileController::from_config(test_path, &config.data)?;

    let predictions_path = &config.output.predictions_path;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(ratings_file::delimiter(&config.data)?)
        .from_path(predictions_path)
        .with_context(|| {
            format!(
                "Couldn't create predictions file {}",
                predictions_path.display()
            )
        })?;

    let progress = if matches.is_present("progress") {
        ProgressBar::new(test.ratings_count() as u64)
    } else {
        ProgressBar::hidden()
    };

    let mut engine = Engine::with_controller(&training)?;
    let evaluation = engine.evaluate(&test, |prediction| {
        writer.write_record(&[
            prediction.item_id.to_string(),
            prediction.user_id.to_string(),
            prediction.score.to_string(),
            prediction.predicted.to_string(),
        ])?;

        progress.inc(1);
        Ok(())
    });

    progress.finish_and_clear();

    // Keep whatever was predicted before a failure
    writer.flush()?;
    let reporter = evaluation?;

    log::info!("Predictions written to {}", predictions_path.display());
    println!("{}", reporter.summary(config.output.precision)?);

    Ok(())
}
