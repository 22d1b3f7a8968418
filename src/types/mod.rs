pub mod error;
pub mod ids;
pub mod invite;
pub mod mail;
pub mod response;
pub mod team;
pub mod user;
