pub mod init;
pub mod roster;
pub mod users;
