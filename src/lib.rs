pub mod config;
pub mod db;
pub mod ledger;
pub mod routes;
pub mod types;
pub mod utils;
