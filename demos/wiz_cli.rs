//! Command-line client that talks to a Wiz bulb without the HTTP server.
//!
//! Run with: cargo run --example wiz_cli -- --ip 192.168.1.100 --help

use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::time::Duration;
use wiz_bridge::{Bulb, DEFAULT_PORT};

#[derive(Parser)]
#[command(name = "wiz-cli")]
#[command(about = "Send single commands to a Wiz bulb", long_about = None)]
struct Cli {
    /// IP address of the Wiz bulb
    #[arg(short, long)]
    ip: IpAddr,

    /// UDP port of the Wiz bulb
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Reply timeout in milliseconds
    #[arg(short, long, default_value = "3000")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the current state of the bulb
    State,

    /// Turn the bulb on
    On,

    /// Turn the bulb off
    Off,

    /// Set brightness (the bulb accepts 10-100)
    Brightness { level: i64 },

    /// Set RGB color (0-255 for each component)
    Color { red: i64, green: i64, blue: i64 },

    /// Set color temperature in Kelvin (the bulb accepts 2200-6500)
    Temperature { kelvin: i64 },

    /// Set a preset scene by id (the bulb accepts 1-32)
    Scene { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let bulb = Bulb::new(cli.ip)
        .with_port(cli.port)
        .with_timeout(Duration::from_millis(cli.timeout));

    let reply = match cli.command {
        Commands::State => bulb.get_state().await,
        Commands::On => bulb.set_power(true).await,
        Commands::Off => bulb.set_power(false).await,
        Commands::Brightness { level } => bulb.set_brightness(level).await,
        Commands::Color { red, green, blue } => bulb.set_color(red, green, blue).await,
        Commands::Temperature { kelvin } => bulb.set_temperature(kelvin).await,
        Commands::Scene { id } => bulb.set_scene(id).await,
    };

    match reply {
        Ok(reply) => println!("{}", serde_json::to_string_pretty(reply.as_value())?),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
