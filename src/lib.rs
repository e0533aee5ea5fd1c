//! # wiz_bridge
//!
//! A thin HTTP-to-UDP bridge for a single Philips Wiz smart bulb.
//!
//! REST calls are translated into JSON datagrams sent to the bulb, and the
//! bulb's reply is relayed back as the HTTP response. The interesting part
//! is the [`exchange`]: one datagram out, at most one datagram back, bounded
//! by a timeout, with the socket released on every path.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::net::IpAddr;
//! use wiz_bridge::Bulb;
//!
//! async fn warm_light() -> Result<(), Box<dyn std::error::Error>> {
//!     let bulb = Bulb::new("192.168.1.100".parse::<IpAddr>()?);
//!     bulb.set_temperature(2700).await?;
//!     let state = bulb.get_state().await?;
//!     println!("{:?}", state.result());
//!     Ok(())
//! }
//! ```
//!
//! ## Communication
//!
//! Bulbs listen for UDP on port 38899 and answer each datagram with one
//! datagram of their own. Every exchange is independent: there is no
//! session, no retry, and no discovery. A bulb that does not answer within
//! the timeout (3 seconds by default) yields [`Error::Timeout`].
//!
//! ## HTTP API
//!
//! | Route                   | Body                       |
//! |-------------------------|----------------------------|
//! | `POST /api/power`       | `{"state": true}`          |
//! | `POST /api/brightness`  | `{"brightness": 80}`       |
//! | `POST /api/color`       | `{"r": 255, "g": 0, "b": 0}` |
//! | `POST /api/temperature` | `{"temp": 4000}`           |
//! | `POST /api/scene`       | `{"sceneId": 4}`           |
//! | `GET /api/state`        |                            |
//!
//! See [`http::router`].

mod bulb;
mod command;
mod config;
mod errors;
mod exchange;
pub mod http;
mod reply;
pub mod runtime;

// Re-export public API
pub use bulb::Bulb;
pub use command::{Command, Method, NoParams, PilotParams};
pub use config::BridgeConfig;
pub use errors::{Error, ErrorKind};
pub use exchange::{DEFAULT_PORT, DEFAULT_TIMEOUT, Exchange, exchange};
pub use reply::Reply;
