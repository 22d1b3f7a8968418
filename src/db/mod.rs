pub mod invites;
pub mod postgres_service;
pub mod teams;
pub mod users;
