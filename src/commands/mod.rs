pub mod disks;
pub mod servers;

pub use disks::handle_disks_command;
pub use servers::handle_servers_command;
