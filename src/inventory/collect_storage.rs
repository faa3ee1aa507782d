use tracing::warn;

use crate::imc::{ImcSession, ManagedObject};
use crate::inventory::types::{DiskRecord, NOT_AVAILABLE};

/// Class id of a controller-attached physical drive.
pub const DISK_CLASS_ID: &str = "storageLocalDisk";

/// Query every physical disk behind the session.
///
/// A failed query is reported and treated as "no disks".
pub fn get_physical_disks(session: &mut dyn ImcSession) -> Vec<ManagedObject> {
    match session.query_classid(DISK_CLASS_ID) {
        Ok(disks) => disks,
        Err(e) => {
            println!("Error retrieving physical disks: {}", e);
            warn!(error = %e, class_id = DISK_CLASS_ID, "disk query failed");
            Vec::new()
        }
    }
}

/// Flatten raw disk objects into report rows tagged with the server they came from.
pub fn format_disk_info(disks: &[ManagedObject], cimc_ip: &str, server_name: &str) -> Vec<DiskRecord> {
    disks
        .iter()
        .map(|disk| {
            let attr = |name: &str| disk.get(name).unwrap_or(NOT_AVAILABLE).to_string();

            DiskRecord {
                server_name: server_name.to_string(),
                cimc_ip: cimc_ip.to_string(),
                id: attr("id"),
                vendor: attr("vendor"),
                model: attr("productId"),
                serial: attr("driveSerialNumber"),
                size: attr("coercedSize"),
                interface_type: attr("interfaceType"),
                media_type: attr("mediaType"),
                health: attr("driveState"),
                firmware: attr("driveFirmware"),
                pd_status: attr("pdStatus"),
            }
        })
        .collect()
}
