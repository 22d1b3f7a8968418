pub mod accept;
pub mod inbound;
pub mod outbound;
pub mod reject;
pub mod revoke;
pub mod send;
