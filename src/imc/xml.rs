//! Request bodies and response parsing for the CIMC XML API.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::imc::error::{ImcError, Result};
use crate::imc::types::{LoginResponse, ManagedObject};

pub fn login_request(username: &str, password: &str) -> String {
    format!(
        r#"<aaaLogin inName="{}" inPassword="{}"></aaaLogin>"#,
        escape(username),
        escape(password)
    )
}

pub fn resolve_class_request(cookie: &str, class_id: &str) -> String {
    format!(
        r#"<configResolveClass cookie="{}" inHierarchical="false" classId="{}"/>"#,
        escape(cookie),
        escape(class_id)
    )
}

pub fn logout_request(cookie: &str) -> String {
    let cookie = escape(cookie);
    format!(
        r#"<aaaLogout cookie="{}" inCookie="{}"></aaaLogout>"#,
        cookie, cookie
    )
}

/// A parsed response: the root element and any objects under `<outConfigs>`.
#[derive(Debug, Default)]
pub struct Response {
    pub root: ManagedObject,
    pub out_configs: Vec<ManagedObject>,
}

impl Response {
    /// Turn an `errorCode` on the root element into an error.
    pub fn check(self) -> Result<Self> {
        match self.root.get("errorCode") {
            None | Some("") | Some("0") => Ok(self),
            Some(code) => Err(ImcError::Api {
                code: code.to_string(),
                description: self
                    .root
                    .get("errorDescr")
                    .unwrap_or("no description")
                    .to_string(),
            }),
        }
    }
}

pub fn parse_response(xml: &str) -> Result<Response> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut response = Response::default();
    let mut seen_root = false;
    let mut depth = 0usize;
    let mut in_out_configs = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                visit(&e, depth, &mut seen_root, &mut in_out_configs, &mut response)?;
                depth += 1;
            }
            Event::Empty(e) => {
                visit(&e, depth, &mut seen_root, &mut in_out_configs, &mut response)?;
                if depth == 1 && e.name().as_ref() == b"outConfigs" {
                    in_out_configs = false;
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if depth == 1 && e.name().as_ref() == b"outConfigs" {
                    in_out_configs = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(ImcError::InvalidResponse("empty response body".to_string()));
    }
    Ok(response)
}

fn visit(
    e: &BytesStart<'_>,
    depth: usize,
    seen_root: &mut bool,
    in_out_configs: &mut bool,
    response: &mut Response,
) -> Result<()> {
    match depth {
        0 if !*seen_root => {
            response.root = to_object(e)?;
            *seen_root = true;
        }
        1 if e.name().as_ref() == b"outConfigs" => *in_out_configs = true,
        2 if *in_out_configs => response.out_configs.push(to_object(e)?),
        _ => {}
    }
    Ok(())
}

fn to_object(e: &BytesStart<'_>) -> Result<ManagedObject> {
    let mut object = ManagedObject::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        object = object.with_attr(key, attr.unescape_value()?);
    }
    Ok(object)
}

pub fn parse_login(xml: &str) -> Result<LoginResponse> {
    let response = parse_response(xml)?.check()?;
    let root = response.root;

    let cookie = match root.get("outCookie") {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => {
            return Err(ImcError::InvalidResponse(
                "login response carried no session cookie".to_string(),
            ))
        }
    };

    Ok(LoginResponse {
        cookie,
        refresh_period: root.get("outRefreshPeriod").and_then(|p| p.parse().ok()),
        version: root.get("outVersion").map(str::to_string),
        privilege: root.get("outPriv").map(str::to_string),
    })
}

pub fn parse_resolve_class(xml: &str) -> Result<Vec<ManagedObject>> {
    Ok(parse_response(xml)?.check()?.out_configs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_escapes_credentials() {
        let body = login_request("admin", r#"p<a"ss&"#);
        assert_eq!(
            body,
            r#"<aaaLogin inName="admin" inPassword="p&lt;a&quot;ss&amp;"></aaaLogin>"#
        );
    }

    #[test]
    fn logout_request_repeats_cookie() {
        assert_eq!(
            logout_request("1700000000/abc"),
            r#"<aaaLogout cookie="1700000000/abc" inCookie="1700000000/abc"></aaaLogout>"#
        );
    }

    #[test]
    fn parses_successful_login() {
        let xml = r#"<aaaLogin cookie="" response="yes" outCookie="1612345678/7b1c" outRefreshPeriod="600" outPriv="admin" outSessionId="17" outVersion="4.1(3b)"> </aaaLogin>"#;
        let login = parse_login(xml).unwrap();
        assert_eq!(login.cookie, "1612345678/7b1c");
        assert_eq!(login.refresh_period, Some(600));
        assert_eq!(login.version.as_deref(), Some("4.1(3b)"));
        assert_eq!(login.privilege.as_deref(), Some("admin"));
    }

    #[test]
    fn failed_login_is_api_error() {
        let xml = r#"<aaaLogin cookie="" response="yes" errorCode="551" invocationResult="unidentified-fail" errorDescr="Authorization required"> </aaaLogin>"#;
        match parse_login(xml) {
            Err(ImcError::Api { code, description }) => {
                assert_eq!(code, "551");
                assert_eq!(description, "Authorization required");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn login_without_cookie_is_rejected() {
        let xml = r#"<aaaLogin cookie="" response="yes" outCookie=""/>"#;
        assert!(matches!(parse_login(xml), Err(ImcError::InvalidResponse(_))));
    }

    #[test]
    fn resolve_class_returns_out_configs_children() {
        let xml = r#"<configResolveClass cookie="c" response="yes" classId="storageLocalDisk">
  <outConfigs>
    <storageLocalDisk id="1" vendor="SEAGATE" productId="ST1200MM0009" dn="sys/rack-unit-1/board/storage-SAS-SLOT-HBA/pd-1"/>
    <storageLocalDisk id="2" vendor="TOSHIBA" productId="AL15SEB120N" driveState="Online">
      <storageLocalDiskProps physicalDrive="2"/>
    </storageLocalDisk>
  </outConfigs>
</configResolveClass>"#;
        let objects = parse_resolve_class(xml).unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].class_id, "storageLocalDisk");
        assert_eq!(objects[0].get("productId"), Some("ST1200MM0009"));
        assert_eq!(objects[1].get("driveState"), Some("Online"));
    }

    #[test]
    fn resolve_class_with_empty_out_configs() {
        let xml = r#"<configResolveClass cookie="c" response="yes" classId="storageLocalDisk"><outConfigs/></configResolveClass>"#;
        assert!(parse_resolve_class(xml).unwrap().is_empty());
    }

    #[test]
    fn attribute_values_are_unescaped() {
        let xml = r#"<configResolveClass response="yes"><outConfigs><storageLocalDisk vendor="A&amp;B"/></outConfigs></configResolveClass>"#;
        let objects = parse_resolve_class(xml).unwrap();
        assert_eq!(objects[0].get("vendor"), Some("A&B"));
    }

    #[test]
    fn empty_body_is_invalid() {
        assert!(matches!(
            parse_response(""),
            Err(ImcError::InvalidResponse(_))
        ));
    }
}
