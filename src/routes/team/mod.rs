pub mod create;
pub mod members;
pub mod membership;
pub mod name;
pub mod remove;
