pub mod addresses;
pub mod candidates;
pub mod connection;
pub mod vocab;
