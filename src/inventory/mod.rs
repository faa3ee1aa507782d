// Physical disk inventory: input list, collection and formatting
pub mod types;
pub mod servers;
pub mod collect_storage;

pub use servers::{read_server_list, InputError, INPUT_COLUMNS};
pub use collect_storage::{format_disk_info, get_physical_disks};
pub use types::{DiskRecord, ServerRecord};
