use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{LansendError, Result};

/// Version of the LocalSend protocol these shapes describe.
pub const PROTOCOL_VERSION: &str = "2.1";

/// Identity and capabilities of one peer taking part in a file exchange.
///
/// Every field is required and kept exactly as received: `device_type`
/// and `protocol` are plain strings on the wire, use
/// [`DeviceMessage::parsed_device_type`] and
/// [`DeviceMessage::parsed_protocol`] for a typed view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMessage {
    /// Display name chosen by the peer.
    pub alias: String,
    pub device_model: String,
    pub device_type: String,
    /// Whether the peer serves files for download.
    pub download: bool,
    /// Opaque identity token of the peer.
    pub fingerprint: String,
    pub port: u16,
    pub protocol: String,
    /// Protocol version spoken by the peer, `major.minor`.
    pub version: String,
}

impl DeviceMessage {
    pub fn parsed_device_type(&self) -> Option<DeviceType> {
        self.device_type.parse().ok()
    }

    pub fn parsed_protocol(&self) -> Option<Protocol> {
        self.protocol.parse().ok()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Web,
    Headless,
    Server,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Desktop => "desktop",
            DeviceType::Web => "web",
            DeviceType::Headless => "headless",
            DeviceType::Server => "server",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = LansendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mobile" => Ok(DeviceType::Mobile),
            "desktop" => Ok(DeviceType::Desktop),
            "web" => Ok(DeviceType::Web),
            "headless" => Ok(DeviceType::Headless),
            "server" => Ok(DeviceType::Server),
            _ => Err(LansendError::InvalidArgument(format!(
                "unknown device type: {}",
                s
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = LansendError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            _ => Err(LansendError::InvalidArgument(format!(
                "unknown protocol: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn device() -> DeviceMessage {
        DeviceMessage {
            alias: "Nice Orange".to_string(),
            device_model: "Samsung".to_string(),
            device_type: "mobile".to_string(),
            download: false,
            fingerprint: "random-string".to_string(),
            port: 53317,
            protocol: "https".to_string(),
            version: PROTOCOL_VERSION.to_string(),
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(device()).unwrap();
        assert_eq!(
            value,
            json!({
                "alias": "Nice Orange",
                "deviceModel": "Samsung",
                "deviceType": "mobile",
                "download": false,
                "fingerprint": "random-string",
                "port": 53317,
                "protocol": "https",
                "version": "2.1",
            })
        );
    }

    #[test]
    fn every_field_is_required() {
        let mut value = serde_json::to_value(device()).unwrap();
        value.as_object_mut().unwrap().remove("port");
        assert!(serde_json::from_value::<DeviceMessage>(value).is_err());
    }

    #[test]
    fn unknown_strings_are_kept() {
        let mut message = device();
        message.device_type = "toaster".to_string();
        message.protocol = "quic".to_string();

        let text = serde_json::to_string(&message).unwrap();
        let back: DeviceMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(back.device_type, "toaster");
        assert_eq!(back.parsed_device_type(), None);
        assert_eq!(back.parsed_protocol(), None);
    }

    #[rstest]
    #[case("mobile", DeviceType::Mobile)]
    #[case("Desktop", DeviceType::Desktop)]
    #[case("WEB", DeviceType::Web)]
    #[case("headless", DeviceType::Headless)]
    #[case("server", DeviceType::Server)]
    fn parses_device_types(#[case] raw: &str, #[case] expected: DeviceType) {
        assert_eq!(raw.parse::<DeviceType>().unwrap(), expected);
        assert_eq!(expected.to_string(), raw.to_lowercase());
    }

    #[test]
    fn typed_view_of_known_values() {
        let message = device();
        assert_eq!(message.parsed_device_type(), Some(DeviceType::Mobile));
        assert_eq!(message.parsed_protocol(), Some(Protocol::Https));
        assert!("ftp".parse::<Protocol>().is_err());
    }
}
