use cidr_algebra::{cli, config};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// Console logging on stderr, used when no log4rs file is present.
fn fallback_log_config() -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {t} - {m}{n}")))
        .build();
    Ok(Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?)
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    let log_file = config::log_config_file();
    if Path::new(&log_file).exists() {
        log4rs::init_file(&log_file, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {log_file}: {e}"))?;
    } else {
        log4rs::init_config(fallback_log_config()?)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging()?;
    log::info!("#Start main()");

    let output = cli::run_from(std::env::args_os())?;
    print!("{output}");

    Ok(())
}
