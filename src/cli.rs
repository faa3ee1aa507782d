use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::imc::EndpointOptions;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "cimc-inventory")]
#[command(about = "Collect physical disk inventory from Cisco IMC controllers")]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to every controller in the input file and report its physical disks
    Disks(DisksArgs),

    /// List the controllers in the input file without contacting them
    Servers {
        /// CSV with columns server_name,ip,username,password
        #[arg(short, long, default_value = "cimcip.csv")]
        input: PathBuf,
    },
}

#[derive(Args)]
pub struct DisksArgs {
    /// CSV with columns server_name,ip,username,password
    #[arg(short, long, default_value = "cimcip.csv")]
    pub input: PathBuf,

    /// CSV report to write
    #[arg(short, long, default_value = "storagediskinfo.csv")]
    pub output: PathBuf,

    /// Console format (pretty, json, or yaml)
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Controller port (defaults to 443, or 80 with --http)
    #[arg(long)]
    pub port: Option<u16>,

    /// Use plain HTTP instead of HTTPS
    #[arg(long)]
    pub http: bool,

    /// Verify the controller's TLS certificate
    #[arg(long)]
    pub verify_tls: bool,
}

impl DisksArgs {
    pub fn endpoint_options(&self) -> EndpointOptions {
        EndpointOptions {
            secure: !self.http,
            port: self.port,
            timeout_secs: self.timeout,
            verify_tls: self.verify_tls,
        }
    }
}
