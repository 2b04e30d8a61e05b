mod cli;
mod logging;

use clap::Parser;
use cli::{Args, is_config_operation};
use fotboll_tv::config::Config;
use fotboll_tv::error::AppError;
use fotboll_tv::schedule::{CacheSettings, HtmlFetcher, HttpFetcher, ScheduleCache};
use fotboll_tv::server;
use logging::setup_logging;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Applies `--set-*` / `--clear-*` flags to the stored config file, or lists it.
async fn handle_config_operation(args: Args) -> Result<(), AppError> {
    if args.list_config {
        return Config::display().await;
    }

    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(new_url) = args.new_source_url {
        config.source_url = new_url;
    }

    if let Some(new_log_path) = args.new_log_file_path {
        config.log_file_path = Some(new_log_path);
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");
    Ok(())
}

/// Fetches the schedule once and prints it to stdout.
async fn print_schedule_once<F: HtmlFetcher>(
    cache: &ScheduleCache<F>,
    as_json: bool,
) -> Result<(), AppError> {
    let snapshot = cache.get_schedule().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(snapshot.schedule.as_ref())?);
        return Ok(());
    }

    println!("Fotboll på TV:n.");
    for (day, matches) in snapshot.schedule.iter() {
        println!();
        println!("{day}");
        if matches.is_empty() {
            println!("  Inga matcher");
        }
        for game in matches {
            println!("{game}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if is_config_operation(&args) {
        return handle_config_operation(args).await;
    }

    let mut config = Config::load().await?;
    if let Some(bind) = &args.bind {
        config.bind_address = bind.clone();
        config.validate()?;
    }

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    info!("Logs are being written to: {log_file_path}");

    let fetcher = HttpFetcher::with_timeout(config.http_timeout_seconds)?;
    let cache = Arc::new(ScheduleCache::new(
        fetcher,
        CacheSettings::from_config(&config),
    ));

    if args.once {
        return print_schedule_once(&cache, args.json).await;
    }

    info!(
        "Serving {} for leagues [{}], cache TTL {} hours",
        config.source_url,
        config.leagues.join(", "),
        config.cache_ttl_hours
    );
    server::serve(cache, &config.bind_address).await
}
