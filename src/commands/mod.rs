pub mod diff;
pub mod init;
pub mod reconcile;
pub mod validate;
