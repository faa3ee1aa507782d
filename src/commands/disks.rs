use std::path::Path;

use tracing::{info, warn};

use crate::cli::DisksArgs;
use crate::imc::{Connector, HttpConnector, ImcSession, SessionGuard};
use crate::inventory::{
    format_disk_info, get_physical_disks, read_server_list, InputError, ServerRecord, INPUT_COLUMNS,
};
use crate::output::{print_error, print_info, print_success, print_warning};
use crate::report::{print_storage_info, save_to_csv, separator};

/// Running state carried from one server to the next.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunTotals {
    pub servers: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_disks: usize,
    pub header_written: bool,
}

pub fn handle_disks_command(args: &DisksArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("Reading CIMC server list from {}...", args.input.display());
    let servers = load_servers(&args.input)?;
    println!("Found {} CIMC server(s) to process.\n", servers.len());

    let connector = HttpConnector::new(args.endpoint_options());
    let totals = collect_all(&servers, &connector, &args.output, &args.format);
    print_summary(&totals, &args.output);
    Ok(())
}

/// Read the input list, adding the expected-columns hint when the file is absent.
pub fn load_servers(path: &Path) -> Result<Vec<ServerRecord>, InputError> {
    read_server_list(path).map_err(|e| {
        if let InputError::NotFound(_) = e {
            print_info(&format!("Please create a CSV file with columns: {}", INPUT_COLUMNS));
        }
        e
    })
}

/// Visit every server in order. One server's failure never stops the run.
pub fn collect_all(
    servers: &[ServerRecord],
    connector: &dyn Connector,
    output: &Path,
    format: &str,
) -> RunTotals {
    let mut totals = RunTotals {
        servers: servers.len(),
        ..Default::default()
    };

    for (idx, server) in servers.iter().enumerate() {
        let position = format!("[{}/{}]", idx + 1, servers.len());

        if !server.is_valid() {
            print_warning(&format!("{} Skipping invalid entry: {:?}", position, server));
            warn!(missing = ?server.missing_fields(), "skipping server");
            totals.skipped += 1;
            continue;
        }

        let display_name = server.display_name();
        println!("{} Processing CIMC: {}", position, display_name);

        let session = match connect_to_cimc(connector, server) {
            Some(session) => session,
            None => {
                println!("Failed to connect to CIMC server {}. Skipping.\n", display_name);
                totals.failed += 1;
                continue;
            }
        };

        let mut guard = SessionGuard::new(&server.ip, session);
        collect_server(guard.session(), server, output, format, &mut totals);
    }

    totals
}

fn connect_to_cimc(connector: &dyn Connector, server: &ServerRecord) -> Option<Box<dyn ImcSession>> {
    match connector.connect(&server.ip, &server.username, &server.password) {
        Ok(session) => {
            println!("Successfully connected to CIMC server: {}", server.ip);
            Some(session)
        }
        Err(e) => {
            println!("Error connecting to CIMC server: {}", e);
            warn!(ip = %server.ip, error = %e, "connect failed");
            None
        }
    }
}

fn collect_server(
    session: &mut dyn ImcSession,
    server: &ServerRecord,
    output: &Path,
    format: &str,
    totals: &mut RunTotals,
) {
    let disks = get_physical_disks(session);
    println!("Found {} physical disk(s)", disks.len());

    if disks.is_empty() {
        println!("No disks found on this server.");
        return;
    }

    let records = format_disk_info(&disks, &server.ip, &server.name);

    if let Err(e) = print_storage_info(&records, format) {
        print_error(&format!("Error printing disk information: {}", e));
    }

    // The flag flips even when the write fails; later batches append.
    if let Err(e) = save_to_csv(&records, output, !totals.header_written) {
        println!("Error saving to CSV file: {}", e);
        warn!(path = %output.display(), error = %e, "csv write failed");
    }
    totals.header_written = true;
    totals.total_disks += records.len();
    info!(ip = %server.ip, disks = records.len(), "server collected");
}

fn print_summary(totals: &RunTotals, output: &Path) {
    println!("{}", separator());
    print_success("Processing complete!");
    println!("Total CIMC servers processed: {}", totals.servers);
    if totals.skipped > 0 {
        println!("Skipped invalid entries: {}", totals.skipped);
    }
    if totals.failed > 0 {
        println!("Failed connections: {}", totals.failed);
    }
    println!("Total disks collected: {}", totals.total_disks);
    if totals.total_disks > 0 {
        println!("Results saved to: {}", output.display());
    }
    println!("Finished at: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("{}", separator());
}
