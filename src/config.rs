//! Bridge configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::bulb::Bulb;
use crate::exchange::{DEFAULT_PORT, DEFAULT_TIMEOUT};

/// Process-wide settings: which bulb to talk to and where to serve HTTP.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub bulb_ip: IpAddr,
    pub bulb_port: u16,
    pub listen: SocketAddr,
    /// Directory served for every path outside `/api`
    pub static_dir: PathBuf,
    pub timeout: Duration,
}

impl BridgeConfig {
    pub const DEFAULT_BULB_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 0, 100));
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
    pub const DEFAULT_STATIC_DIR: &'static str = "public";

    /// The bulb client described by this configuration.
    pub fn bulb(&self) -> Bulb {
        Bulb::new(self.bulb_ip)
            .with_port(self.bulb_port)
            .with_timeout(self.timeout)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            bulb_ip: Self::DEFAULT_BULB_IP,
            bulb_port: DEFAULT_PORT,
            listen: SocketAddr::from((Ipv4Addr::UNSPECIFIED, Self::DEFAULT_HTTP_PORT)),
            static_dir: PathBuf::from(Self::DEFAULT_STATIC_DIR),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
