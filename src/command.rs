//! Commands sent to a Wiz bulb.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Methods understood by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Method {
    /// Change one or more lighting attributes
    SetPilot,
    /// Query the current lighting state
    GetPilot,
}

/// Parameters of a `setPilot` command.
///
/// Values are forwarded to the bulb as-is; the bulb is responsible for
/// rejecting out-of-range brightness, temperature or scene values.
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PilotParams {
    pub state: Option<bool>,
    pub dimming: Option<i64>,
    #[serde(rename = "r")]
    pub red: Option<i64>,
    #[serde(rename = "g")]
    pub green: Option<i64>,
    #[serde(rename = "b")]
    pub blue: Option<i64>,
    pub temp: Option<i64>,
    #[serde(rename = "sceneId")]
    pub scene: Option<i64>,
}

/// Empty parameter object, serialized as `{}`.
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NoParams {}

/// A command for a Wiz bulb.
///
/// Serializes to the JSON shape the bulb expects:
///
/// ```
/// use wiz_bridge::Command;
///
/// let json = serde_json::to_string(&Command::power(true)).unwrap();
/// assert_eq!(json, r#"{"method":"setPilot","params":{"state":true}}"#);
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
pub enum Command {
    SetPilot(PilotParams),
    GetPilot(NoParams),
}

impl Command {
    /// Turn the bulb on or off.
    pub fn power(state: bool) -> Self {
        Command::SetPilot(PilotParams {
            state: Some(state),
            ..Default::default()
        })
    }

    /// Turn the bulb on at the given brightness (the bulb accepts 10-100).
    pub fn brightness(dimming: i64) -> Self {
        Command::SetPilot(PilotParams {
            state: Some(true),
            dimming: Some(dimming),
            ..Default::default()
        })
    }

    /// Turn the bulb on with an RGB color.
    pub fn color(red: i64, green: i64, blue: i64) -> Self {
        Command::SetPilot(PilotParams {
            state: Some(true),
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
            ..Default::default()
        })
    }

    /// Turn the bulb on with a white color temperature in Kelvin (the bulb
    /// accepts 2200-6500).
    pub fn temperature(kelvin: i64) -> Self {
        Command::SetPilot(PilotParams {
            state: Some(true),
            temp: Some(kelvin),
            ..Default::default()
        })
    }

    /// Turn the bulb on with a preset scene (the bulb accepts 1-32).
    pub fn scene(scene_id: i64) -> Self {
        Command::SetPilot(PilotParams {
            state: Some(true),
            scene: Some(scene_id),
            ..Default::default()
        })
    }

    /// Query the current state.
    pub fn get_pilot() -> Self {
        Command::GetPilot(NoParams::default())
    }

    pub fn method(&self) -> Method {
        match self {
            Command::SetPilot(_) => Method::SetPilot,
            Command::GetPilot(_) => Method::GetPilot,
        }
    }

    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
