pub mod order;
pub mod roles;
