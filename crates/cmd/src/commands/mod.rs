pub mod fields;
pub mod init;
pub mod list;

pub use fields::fields_command;
pub use init::init_command;
pub use list::list_command;
