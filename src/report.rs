//! Console and CSV sinks for disk records.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use thiserror::Error;

use crate::inventory::DiskRecord;
use crate::output::output_data;

pub const SEPARATOR_WIDTH: usize = 80;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),
}

pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// `pd_status` -> `Pd Status`
pub fn field_label(field: &str) -> String {
    field
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Render the framed, numbered listing shown for each server.
pub fn render_storage_info(disks: &[DiskRecord]) -> String {
    let rule = separator();
    let mut out = format!("\n{}\n\n{}\nPHYSICAL DISKS\n{}\n", rule, rule, rule);

    if disks.is_empty() {
        out.push_str("No physical disks found.\n");
        return out;
    }

    for (idx, disk) in disks.iter().enumerate() {
        out.push_str(&format!("\nDisk {}:\n", idx + 1));
        for (name, value) in disk.fields() {
            out.push_str(&format!("  {}: {}\n", field_label(name), value));
        }
    }
    out
}

/// Print disks to stdout in `pretty`, `json` or `yaml` form.
pub fn print_storage_info(disks: &[DiskRecord], format: &str) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" | "yaml" => output_data(&disks, format),
        _ => {
            print!("{}", render_storage_info(disks));
            Ok(())
        }
    }
}

/// Write disks to `path`. With `write_header` the file is truncated and a header
/// row goes first; otherwise rows are appended. Empty input leaves the file alone.
pub fn save_to_csv(disks: &[DiskRecord], path: &Path, write_header: bool) -> Result<(), ReportError> {
    if disks.is_empty() {
        return Ok(());
    }

    let file = if write_header {
        OpenOptions::new().write(true).create(true).truncate(true).open(path)?
    } else {
        OpenOptions::new().append(true).create(true).open(path)?
    };

    let mut writer = WriterBuilder::new()
        .has_headers(write_header)
        .terminator(Terminator::CRLF)
        .from_writer(file);

    for disk in disks {
        writer.serialize(disk)?;
    }
    writer.flush()?;
    Ok(())
}
