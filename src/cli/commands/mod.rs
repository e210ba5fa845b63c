pub mod adjust;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod migrate_legacy;
pub mod points;
pub mod punch;
pub mod show;
