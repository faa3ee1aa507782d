use std::collections::BTreeMap;

/// One object returned by a class-id query.
///
/// Attributes are kept under their wire names (`productId`, `pdStatus`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedObject {
    pub class_id: String,
    pub attributes: BTreeMap<String, String>,
}

impl ManagedObject {
    pub fn new(class_id: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Fields of a successful `aaaLogin` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub cookie: String,
    pub refresh_period: Option<u64>,
    pub version: Option<String>,
    pub privilege: Option<String>,
}

/// Where a controller's XML API lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointOptions {
    pub secure: bool,
    pub port: Option<u16>,
    pub timeout_secs: u64,
    pub verify_tls: bool,
}

impl Default for EndpointOptions {
    fn default() -> Self {
        Self {
            secure: true,
            port: None,
            timeout_secs: 30,
            verify_tls: false,
        }
    }
}

impl EndpointOptions {
    /// Full URL of the `/nuova` endpoint for `host`.
    pub fn url_for(&self, host: &str) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        // IPv6 literals need brackets in a URL authority.
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };
        match self.port {
            Some(port) => format!("{}://{}:{}/nuova", scheme, host, port),
            None => format!("{}://{}/nuova", scheme, host),
        }
    }
}
