use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::imc::error::{ImcError, Result};
use crate::imc::types::{EndpointOptions, ManagedObject};
use crate::imc::xml;

/// A logged-in controller session.
pub trait ImcSession {
    /// Return every object of `class_id` the controller knows about.
    fn query_classid(&mut self, class_id: &str) -> Result<Vec<ManagedObject>>;

    fn logout(&mut self) -> Result<()>;
}

/// Opens sessions against controllers.
pub trait Connector {
    fn connect(&self, ip: &str, username: &str, password: &str) -> Result<Box<dyn ImcSession>>;
}

/// Session against one controller's `/nuova` endpoint.
pub struct ImcHandle {
    client: Client,
    ip: String,
    url: String,
    username: String,
    password: String,
    cookie: Option<String>,
}

impl ImcHandle {
    pub fn new(ip: &str, username: &str, password: &str, options: &EndpointOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .danger_accept_invalid_certs(!options.verify_tls)
            .build()?;

        Ok(Self {
            client,
            ip: ip.to_string(),
            url: options.url_for(ip),
            username: username.to_string(),
            password: password.to_string(),
            cookie: None,
        })
    }

    pub fn login(&mut self) -> Result<()> {
        let body = xml::login_request(&self.username, &self.password);
        let text = self.post(body)?;
        let login = xml::parse_login(&text)?;

        debug!(
            ip = %self.ip,
            version = login.version.as_deref().unwrap_or("unknown"),
            refresh_period = ?login.refresh_period,
            privilege = login.privilege.as_deref().unwrap_or("unknown"),
            "logged in"
        );
        self.cookie = Some(login.cookie);
        Ok(())
    }

    fn post(&self, body: String) -> Result<String> {
        debug!(url = %self.url, "POST");
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/xml")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImcError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let text = response.text()?;
        debug!(ip = %self.ip, bytes = text.len(), "response received");
        Ok(text)
    }
}

impl ImcSession for ImcHandle {
    fn query_classid(&mut self, class_id: &str) -> Result<Vec<ManagedObject>> {
        let cookie = self.cookie.as_deref().ok_or(ImcError::NotLoggedIn)?;
        let body = xml::resolve_class_request(cookie, class_id);
        let text = self.post(body)?;
        let objects = xml::parse_resolve_class(&text)?;
        debug!(ip = %self.ip, class_id, count = objects.len(), "class query");
        Ok(objects)
    }

    fn logout(&mut self) -> Result<()> {
        let cookie = self.cookie.take().ok_or(ImcError::NotLoggedIn)?;
        let text = self.post(xml::logout_request(&cookie))?;
        xml::parse_response(&text)?.check()?;
        debug!(ip = %self.ip, "logged out");
        Ok(())
    }
}

/// Connects over HTTP(S) with one set of endpoint options for every server.
pub struct HttpConnector {
    options: EndpointOptions,
}

impl HttpConnector {
    pub fn new(options: EndpointOptions) -> Self {
        Self { options }
    }
}

impl Connector for HttpConnector {
    fn connect(&self, ip: &str, username: &str, password: &str) -> Result<Box<dyn ImcSession>> {
        let mut handle = ImcHandle::new(ip, username, password, &self.options)?;
        handle.login()?;
        Ok(Box::new(handle))
    }
}

/// Logs the session out when dropped. Logout failures are only traced.
pub struct SessionGuard {
    ip: String,
    session: Box<dyn ImcSession>,
}

impl SessionGuard {
    pub fn new(ip: &str, session: Box<dyn ImcSession>) -> Self {
        Self {
            ip: ip.to_string(),
            session,
        }
    }

    pub fn session(&mut self) -> &mut dyn ImcSession {
        self.session.as_mut()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        match self.session.logout() {
            Ok(()) => println!("Disconnected from CIMC server {}.\n", self.ip),
            Err(e) => debug!(ip = %self.ip, error = %e, "logout failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned XML reply per incoming request, returning the request bodies.
    fn serve(replies: Vec<String>) -> (u16, thread::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let mut bodies = Vec::new();
            for reply in replies {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut content_length = 0usize;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap();
                        }
                    }
                }
                let mut body = vec![0u8; content_length];
                reader.read_exact(&mut body).unwrap();
                bodies.push(String::from_utf8(body).unwrap());

                let mut stream = stream;
                write!(
                    stream,
                    "HTTP/1.1 200 OK\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reply.len(),
                    reply
                )
                .unwrap();
                stream.flush().unwrap();
            }
            bodies
        });

        (port, handle)
    }

    fn plain_http(port: u16) -> EndpointOptions {
        EndpointOptions {
            secure: false,
            port: Some(port),
            timeout_secs: 5,
            verify_tls: false,
        }
    }

    #[test]
    fn login_query_logout_round() {
        let (port, server) = serve(vec![
            r#"<aaaLogin response="yes" outCookie="1700000000/abcd" outRefreshPeriod="600" outVersion="4.2(2a)"> </aaaLogin>"#.to_string(),
            r#"<configResolveClass cookie="1700000000/abcd" response="yes" classId="storageLocalDisk"><outConfigs><storageLocalDisk id="1" vendor="SEAGATE"/><storageLocalDisk id="2" vendor="MICRON"/></outConfigs></configResolveClass>"#.to_string(),
            r#"<aaaLogout cookie="1700000000/abcd" response="yes" outStatus="success"> </aaaLogout>"#.to_string(),
        ]);

        let mut handle = ImcHandle::new("127.0.0.1", "admin", "secret", &plain_http(port)).unwrap();
        handle.login().unwrap();

        let disks = handle.query_classid("storageLocalDisk").unwrap();
        assert_eq!(disks.len(), 2);
        assert_eq!(disks[1].get("vendor"), Some("MICRON"));

        handle.logout().unwrap();
        assert!(matches!(handle.logout(), Err(ImcError::NotLoggedIn)));

        let bodies = server.join().unwrap();
        assert!(bodies[0].contains(r#"inName="admin""#));
        assert!(bodies[1].contains(r#"classId="storageLocalDisk""#));
        assert!(bodies[1].contains(r#"cookie="1700000000/abcd""#));
        assert!(bodies[2].starts_with("<aaaLogout"));
    }

    #[test]
    fn rejected_login_surfaces_api_error() {
        let (port, server) = serve(vec![
            r#"<aaaLogin response="yes" errorCode="551" errorDescr="Authorization required"> </aaaLogin>"#.to_string(),
        ]);

        let connector = HttpConnector::new(plain_http(port));
        let result = connector.connect("127.0.0.1", "admin", "wrong");
        assert!(matches!(result, Err(ImcError::Api { .. })));
        server.join().unwrap();
    }

    #[test]
    fn query_before_login_fails() {
        let mut handle =
            ImcHandle::new("127.0.0.1", "admin", "secret", &EndpointOptions::default()).unwrap();
        assert!(matches!(
            handle.query_classid("storageLocalDisk"),
            Err(ImcError::NotLoggedIn)
        ));
    }

    #[test]
    fn unreachable_controller_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let connector = HttpConnector::new(plain_http(port));
        assert!(matches!(
            connector.connect("127.0.0.1", "admin", "secret"),
            Err(ImcError::Http(_))
        ));
    }
}
