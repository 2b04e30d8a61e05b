use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// True when the arguments ask for a config change rather than a run
pub fn is_config_operation(args: &Args) -> bool {
    args.new_source_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Football on Swedish TV
///
/// Scrapes the tvmatchen.nu schedule and serves the upcoming matches of the
/// configured leagues.
///
/// By default an HTTP server is started:
/// - `/` shows the schedule as a web page
/// - `/schedule.json` returns the schedule as JSON
/// - `POST /refresh` refetches the schedule immediately
///
/// The schedule is refetched on the first request after the cache TTL
/// (10 hours by default) has passed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Fetch the schedule once, print it and exit.
    #[arg(short, long)]
    pub once: bool,

    /// With --once, print the schedule as JSON instead of text.
    #[arg(long, requires = "once", help_heading = "Display Options")]
    pub json: bool,

    /// Address for the HTTP server, overriding the config file (e.g. 0.0.0.0:8080).
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Update the schedule page URL in config.
    #[arg(long = "set-source-url", value_name = "URL", help_heading = "Configuration")]
    pub new_source_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", value_name = "PATH", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also log to the terminal in --once mode.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", value_name = "PATH", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_runs_server() {
        let args = Args::parse_from(["fotboll_tv"]);
        assert!(!args.once);
        assert!(args.bind.is_none());
        assert!(!is_config_operation(&args));
    }

    #[test]
    fn test_json_requires_once() {
        assert!(Args::try_parse_from(["fotboll_tv", "--json"]).is_err());
        let args = Args::parse_from(["fotboll_tv", "--once", "--json"]);
        assert!(args.once && args.json);
    }

    #[test]
    fn test_config_operations() {
        let args = Args::parse_from(["fotboll_tv", "--set-source-url", "https://example.com/"]);
        assert!(is_config_operation(&args));
        assert_eq!(args.new_source_url.as_deref(), Some("https://example.com/"));

        let args = Args::parse_from(["fotboll_tv", "-l"]);
        assert!(is_config_operation(&args));
    }
}
