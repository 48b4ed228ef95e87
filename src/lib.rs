pub mod aggregate;
pub mod archive;
pub mod config;
pub mod fetch;
pub mod ledger;
pub mod rebuild;
pub mod record;
pub mod report;
pub mod skiplog;
pub mod state;
pub mod update;
