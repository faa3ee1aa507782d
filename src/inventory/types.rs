use serde::Serialize;
use std::fmt;

/// Placeholder written for any attribute the controller did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// One controller to visit, as read from the input CSV.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ServerRecord {
    pub name: String,
    pub ip: String,
    pub username: String,
    pub password: String,
}

impl ServerRecord {
    /// ip, username and password must all be present to attempt a login.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.ip.is_empty() {
            missing.push("ip");
        }
        if self.username.is_empty() {
            missing.push("username");
        }
        if self.password.is_empty() {
            missing.push("password");
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// `name (ip)`, or just the ip when the row has no name.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.ip.clone()
        } else {
            format!("{} ({})", self.name, self.ip)
        }
    }
}

impl fmt::Debug for ServerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "********" };
        f.debug_struct("ServerRecord")
            .field("server_name", &self.name)
            .field("ip", &self.ip)
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

/// One physical disk, flattened for the report. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskRecord {
    pub server_name: String,
    pub cimc_ip: String,
    pub id: String,
    pub vendor: String,
    pub model: String,
    pub serial: String,
    pub size: String,
    pub interface_type: String,
    pub media_type: String,
    pub health: String,
    pub firmware: String,
    pub pd_status: String,
}

impl DiskRecord {
    pub const FIELD_NAMES: [&'static str; 12] = [
        "server_name",
        "cimc_ip",
        "id",
        "vendor",
        "model",
        "serial",
        "size",
        "interface_type",
        "media_type",
        "health",
        "firmware",
        "pd_status",
    ];

    /// `(field name, value)` pairs in column order.
    pub fn fields(&self) -> [(&'static str, &str); 12] {
        let n = Self::FIELD_NAMES;
        [
            (n[0], self.server_name.as_str()),
            (n[1], self.cimc_ip.as_str()),
            (n[2], self.id.as_str()),
            (n[3], self.vendor.as_str()),
            (n[4], self.model.as_str()),
            (n[5], self.serial.as_str()),
            (n[6], self.size.as_str()),
            (n[7], self.interface_type.as_str()),
            (n[8], self.media_type.as_str()),
            (n[9], self.health.as_str()),
            (n[10], self.firmware.as_str()),
            (n[11], self.pd_status.as_str()),
        ]
    }
}
