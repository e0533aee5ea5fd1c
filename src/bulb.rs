//! Client for the single bulb the bridge controls.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::command::Command;
use crate::errors::Error;
use crate::exchange::{self, DEFAULT_PORT, DEFAULT_TIMEOUT};
use crate::reply::Reply;

type Result<T> = std::result::Result<T, Error>;

/// A Wiz bulb reachable at a fixed address.
///
/// A `Bulb` holds no connection state: every method performs one
/// independent [`exchange`](crate::exchange()) with its own socket.
///
/// # Example
///
/// ```
/// use std::net::{IpAddr, Ipv4Addr};
/// use std::time::Duration;
/// use wiz_bridge::Bulb;
///
/// let bulb = Bulb::new(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 100)))
///     .with_timeout(Duration::from_secs(1));
/// assert_eq!(bulb.target().to_string(), "192.168.0.100:38899");
/// ```
#[derive(Debug, Clone)]
pub struct Bulb {
    target: SocketAddr,
    timeout: Duration,
}

impl Bulb {
    pub fn new(ip: IpAddr) -> Self {
        Bulb {
            target: SocketAddr::new(ip, DEFAULT_PORT),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.target.set_port(port);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends an arbitrary command and returns the bulb's reply.
    pub async fn send(&self, command: &Command) -> Result<Reply> {
        exchange::exchange(command, self.target, self.timeout).await
    }

    pub async fn set_power(&self, on: bool) -> Result<Reply> {
        self.send(&Command::power(on)).await
    }

    pub async fn set_brightness(&self, dimming: i64) -> Result<Reply> {
        self.send(&Command::brightness(dimming)).await
    }

    pub async fn set_color(&self, red: i64, green: i64, blue: i64) -> Result<Reply> {
        self.send(&Command::color(red, green, blue)).await
    }

    pub async fn set_temperature(&self, kelvin: i64) -> Result<Reply> {
        self.send(&Command::temperature(kelvin)).await
    }

    pub async fn set_scene(&self, scene_id: i64) -> Result<Reply> {
        self.send(&Command::scene(scene_id)).await
    }

    /// Queries the bulb for its current state (live network call).
    pub async fn get_state(&self) -> Result<Reply> {
        self.send(&Command::get_pilot()).await
    }
}
