use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use mawaqeet::config::Config;
use mawaqeet::prayer::{resolve, segment, Coordinates, Prayer, PrayerTimes};
use mawaqeet::scheduler;

#[derive(Parser)]
#[command(name = "mawaqeet")]
#[command(about = "Prayer time calculation and event scheduling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print prayer times for a date
    Times {
        config: String,
        /// Civil date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate a configuration file
    Validate { config: String },
    /// Run the scheduling daemon
    Run { config: String },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Times { config, date, json } => times(&config, date, json),
        Commands::Validate { config } => validate(&config),
        Commands::Run { config } => run(&config),
    }
}

fn load_config(path: &str) -> Option<Config> {
    match Config::from_file(path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            None
        }
    }
}

fn times(path: &str, date: Option<NaiveDate>, json: bool) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let coordinates = match Coordinates::new(config.location.latitude, config.location.longitude) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let params = resolve(config.calculation.method, &config.overrides());
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let tomorrow = date.succ_opt().unwrap_or(date);

    let today_times = PrayerTimes::new(coordinates, date, &params);
    let tomorrow_times = PrayerTimes::new(coordinates, tomorrow, &params);

    let night = match segment(today_times.maghrib, tomorrow_times.fajr) {
        Ok(night) => night,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut instants: Vec<(Prayer, DateTime<Utc>)> = today_times.entries().to_vec();
    instants.push((Prayer::Midnight, night.midnight));
    instants.push((Prayer::LastThird, night.last_third));

    if json {
        let map: serde_json::Map<String, serde_json::Value> = instants
            .iter()
            .map(|(prayer, at)| (prayer.to_string(), serde_json::Value::from(at.to_rfc3339())))
            .collect();
        match serde_json::to_string_pretty(&map) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!(
            "Prayer times for {} at ({:.4}, {:.4}), method {}",
            date, coordinates.latitude, coordinates.longitude, config.calculation.method
        );
        for (prayer, at) in &instants {
            println!(
                "  {:<10} {}",
                prayer.to_string(),
                at.with_timezone(&Local).format("%Y-%m-%d %H:%M %Z")
            );
        }
        let night_secs = std::time::Duration::from_secs(night.duration.num_seconds().max(0) as u64);
        println!("  night duration: {}", humantime::format_duration(night_secs));
    }

    ExitCode::SUCCESS
}

fn validate(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let params = resolve(config.calculation.method, &config.overrides());
    println!("Configuration is valid");
    println!("  device:             {}", config.device.id);
    println!(
        "  location:           ({:.4}, {:.4})",
        config.location.latitude, config.location.longitude
    );
    println!("  method:             {}", config.calculation.method);
    println!("  fajr angle:         {}", params.fajr_angle);
    if params.ishaa_interval != 0 {
        println!("  ishaa interval:     {} min", params.ishaa_interval);
    } else {
        println!("  ishaa angle:        {}", params.ishaa_angle);
    }
    println!("  madhab:             {}", params.madhab);
    println!("  high latitude rule: {}", params.high_latitude_rule);

    ExitCode::SUCCESS
}

fn run(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(scheduler::runner::run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
