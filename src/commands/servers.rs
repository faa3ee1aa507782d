use std::path::Path;

use crate::commands::disks::load_servers;
use crate::inventory::ServerRecord;
use crate::output::print_info;

pub fn handle_servers_command(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let servers = load_servers(input)?;

    for line in describe_servers(&servers) {
        println!("{}", line);
    }

    let valid = servers.iter().filter(|s| s.is_valid()).count();
    print_info(&format!(
        "{} of {} CIMC server(s) in {} are ready to query.",
        valid,
        servers.len(),
        input.display()
    ));
    Ok(())
}

/// One status line per server. Passwords are never shown.
pub fn describe_servers(servers: &[ServerRecord]) -> Vec<String> {
    servers
        .iter()
        .enumerate()
        .map(|(idx, server)| {
            let target = if server.ip.is_empty() && !server.name.is_empty() {
                server.name.clone()
            } else {
                server.display_name()
            };
            let status = match server.missing_fields().as_slice() {
                [] => "ok".to_string(),
                missing => format!("missing {}", missing.join(", ")),
            };
            format!(
                "[{}/{}] {} user={} {}",
                idx + 1,
                servers.len(),
                target,
                server.username,
                status
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_status_without_password() {
        let servers = vec![
            ServerRecord {
                name: "rack1".into(),
                ip: "10.0.0.1".into(),
                username: "admin".into(),
                password: "hunter2".into(),
            },
            ServerRecord {
                name: "rack2".into(),
                ip: "".into(),
                username: "admin".into(),
                password: "".into(),
            },
        ];

        let lines = describe_servers(&servers);
        assert_eq!(lines[0], "[1/2] rack1 (10.0.0.1) user=admin ok");
        assert_eq!(lines[1], "[2/2] rack2 user=admin missing ip, password");
        assert!(lines.iter().all(|l| !l.contains("hunter2")));
    }
}
