use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::inventory::types::ServerRecord;

/// Columns the input file is expected to carry.
pub const INPUT_COLUMNS: &str = "server_name,ip,username,password";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input file '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("Error reading input file: {0}")]
    Io(#[from] io::Error),

    #[error("Error reading input file: {0}")]
    Csv(#[from] csv::Error),

    #[error("No CIMC servers found in the input file.")]
    Empty,
}

/// Read the server list. Missing cells become empty strings; every cell is trimmed.
pub fn read_server_list(path: &Path) -> Result<Vec<ServerRecord>, InputError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
        _ => InputError::Io(e),
    })?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file);

    let columns = ColumnIndex::from_headers(reader.headers()?);

    let mut servers = Vec::new();
    for row in reader.records() {
        servers.push(columns.server(&row?));
    }

    if servers.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(servers)
}

/// Positions of the named columns; a column absent from the header reads as empty.
struct ColumnIndex {
    name: Option<usize>,
    ip: Option<usize>,
    username: Option<usize>,
    password: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |column: &str| headers.iter().position(|h| h == column);
        Self {
            name: find("server_name"),
            ip: find("ip"),
            username: find("username"),
            password: find("password"),
        }
    }

    fn server(&self, row: &StringRecord) -> ServerRecord {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .unwrap_or("")
                .to_string()
        };
        ServerRecord {
            name: cell(self.name),
            ip: cell(self.ip),
            username: cell(self.username),
            password: cell(self.password),
        }
    }
}
