pub mod app_struct;
pub mod init;
