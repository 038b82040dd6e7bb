use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use moji_core::{Condition, ConditionData, Config, ForecastData, MojiClient};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "moji", version, about = "Moji weather CLI")]
pub struct Cli {
    /// Fail when the service reports a non-zero status code.
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the market app code in the config file.
    Configure,

    /// Show current conditions at a coordinate.
    Condition {
        #[arg(allow_negative_numbers = true)]
        lat: String,
        #[arg(allow_negative_numbers = true)]
        lon: String,

        /// Print the decoded result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the day/night forecast at a coordinate.
    Forecast {
        #[arg(allow_negative_numbers = true)]
        lat: String,
        #[arg(allow_negative_numbers = true)]
        lon: String,

        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config)?,
            Command::Condition { lat, lon, json } => {
                let client = build_client(config, self.strict)?;
                let data = client.condition_by_lat_long(&lat, &lon).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    print_condition(&data);
                }
            }
            Command::Forecast { lat, lon, json } => {
                let client = build_client(config, self.strict)?;
                let data = client.forecast_by_lat_long(&lat, &lon).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    print_forecast(&data);
                }
            }
        }

        Ok(())
    }
}

/// The environment wins over the config file; `--strict` wins over both.
fn build_client(config: Config, strict: bool) -> anyhow::Result<MojiClient> {
    let mut config = config.with_process_env();
    if strict {
        config.strict_status = true;
    }

    Ok(MojiClient::new(&config)?)
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let app_code = Password::new("Moji app code:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read app code")?;

    config.set_app_code(app_code.trim().to_string());
    config.app_code()?;
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_condition(data: &ConditionData) {
    let city = &data.city;
    println!("{} {} {}", city.province, city.county, city.name);
    println!(
        "  {}  (updated {})",
        describe(&data.condition),
        data.condition.update_time.format("%Y-%m-%d %H:%M")
    );
    println!("  humidity {}%", data.condition.humidity);
}

fn print_forecast(data: &ForecastData) {
    let city = &data.city;
    println!("{} {} {}", city.province, city.county, city.name);
    for forecast in &data.forecasts {
        println!(
            "  {}  day: {}  night: {}",
            forecast.predict_date.format("%Y-%m-%d %a"),
            describe(&forecast.day),
            describe(&forecast.night),
        );
    }
}

fn describe(cond: &Condition) -> String {
    format!(
        "{} {}°C {} {}级",
        cond.name, cond.temp, cond.wind_direction, cond.wind_level
    )
}
