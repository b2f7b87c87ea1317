use std::fmt;

/// Which way the operator connects to the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    Serial,
    Bluetooth,
    Tcp,
    Skip,
}

impl ConnectionKind {
    /// Menu order; index 0 is the default.
    pub const ALL: [ConnectionKind; 4] = [
        ConnectionKind::Serial,
        ConnectionKind::Bluetooth,
        ConnectionKind::Tcp,
        ConnectionKind::Skip,
    ];

    /// Human-readable label shown to the user.
    pub fn display_name(self) -> &'static str {
        match self {
            ConnectionKind::Serial => "Serial (USB)",
            ConnectionKind::Bluetooth => "Bluetooth LE",
            ConnectionKind::Tcp => "TCP/IP",
            ConnectionKind::Skip => "Skip configuration",
        }
    }
}

/// A resolved connection, carrying only the endpoint its kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    /// Device path, e.g. `/dev/ttyUSB0` or `COM3`.
    Serial { port: String },
    /// Meshtastic BLE name or address, e.g. `short_1234`.
    Bluetooth { device: String },
    /// `host:port`, e.g. `127.0.0.1:4403`.
    Tcp { endpoint: String },
}

impl Connection {
    pub fn kind(&self) -> ConnectionKind {
        match self {
            Connection::Serial { .. } => ConnectionKind::Serial,
            Connection::Bluetooth { .. } => ConnectionKind::Bluetooth,
            Connection::Tcp { .. } => ConnectionKind::Tcp,
        }
    }

    /// The interface key this connection writes, and its value.
    pub fn parameter(&self) -> (&'static str, &str) {
        match self {
            Connection::Serial { port } => ("port", port),
            Connection::Bluetooth { device } => ("ble_port", device),
            Connection::Tcp { endpoint } => ("tcp_port", endpoint),
        }
    }
}

/// LoRa modem preset, written as `data_speed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSpeed {
    #[default]
    ShortTurbo,
    ShortFast,
    ShortSlow,
    MediumFast,
    LongFast,
}

impl DataSpeed {
    /// Fastest first, as presented to the operator.
    pub const ALL: [DataSpeed; 5] = [
        DataSpeed::ShortTurbo,
        DataSpeed::ShortFast,
        DataSpeed::ShortSlow,
        DataSpeed::MediumFast,
        DataSpeed::LongFast,
    ];

    pub fn code(self) -> u8 {
        match self {
            DataSpeed::ShortTurbo => 8,
            DataSpeed::ShortFast => 6,
            DataSpeed::ShortSlow => 5,
            DataSpeed::MediumFast => 4,
            DataSpeed::LongFast => 0,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Anything that is not one of the preset codes selects the default.
    /// Only plain digits count; signs and decimals do not.
    pub fn parse_or_default(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Self::default();
        }
        input
            .parse::<u8>()
            .ok()
            .and_then(Self::from_code)
            .unwrap_or_default()
    }

    pub fn preset_name(self) -> &'static str {
        match self {
            DataSpeed::ShortTurbo => "SHORT_TURBO",
            DataSpeed::ShortFast => "SHORT_FAST",
            DataSpeed::ShortSlow => "SHORT_SLOW",
            DataSpeed::MediumFast => "MEDIUM_FAST",
            DataSpeed::LongFast => "LONG_FAST",
        }
    }

    /// Approximate airtime per packet plus a usage hint.
    pub fn description(self) -> &'static str {
        match self {
            DataSpeed::ShortTurbo => "SHORT_TURBO (0.4s) - recommended for RNS",
            DataSpeed::ShortFast => "SHORT_FAST (1s)",
            DataSpeed::ShortSlow => "SHORT_SLOW (3s)",
            DataSpeed::MediumFast => "MEDIUM_FAST (4s)",
            DataSpeed::LongFast => "LONG_FAST (8s) - Meshtastic default",
        }
    }
}

impl fmt::Display for DataSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The operator's resolved intent once every connection prompt is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallationChoice {
    Configure {
        connection: Connection,
        speed: DataSpeed,
    },
    Skip,
}

impl InstallationChoice {
    pub fn kind(&self) -> ConnectionKind {
        match self {
            InstallationChoice::Configure { connection, .. } => connection.kind(),
            InstallationChoice::Skip => ConnectionKind::Skip,
        }
    }

    pub fn connection(&self) -> Option<&Connection> {
        match self {
            InstallationChoice::Configure { connection, .. } => Some(connection),
            InstallationChoice::Skip => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_codes_parse_verbatim() {
        for code in [0u8, 4, 5, 6, 8] {
            assert_eq!(DataSpeed::parse_or_default(&code.to_string()).code(), code);
        }
    }

    #[test]
    fn invalid_speed_falls_back_to_turbo() {
        for input in ["", "   ", "3", "7", "9", "255", "fast", "-1", "8.0", "+5", "+8", "+0"] {
            assert_eq!(
                DataSpeed::parse_or_default(input),
                DataSpeed::ShortTurbo,
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn leading_zeros_are_still_digits() {
        assert_eq!(DataSpeed::parse_or_default("05"), DataSpeed::ShortSlow);
        assert_eq!(DataSpeed::parse_or_default(" 4 "), DataSpeed::MediumFast);
    }

    #[test]
    fn connection_parameters_use_distinct_keys() {
        let serial = Connection::Serial { port: "/dev/ttyUSB0".into() };
        let ble = Connection::Bluetooth { device: "short_1234".into() };
        let tcp = Connection::Tcp { endpoint: "127.0.0.1:4403".into() };

        assert_eq!(serial.parameter(), ("port", "/dev/ttyUSB0"));
        assert_eq!(ble.parameter(), ("ble_port", "short_1234"));
        assert_eq!(tcp.parameter(), ("tcp_port", "127.0.0.1:4403"));
    }

    #[test]
    fn skip_has_no_connection() {
        assert_eq!(InstallationChoice::Skip.kind(), ConnectionKind::Skip);
        assert!(InstallationChoice::Skip.connection().is_none());
    }
}
