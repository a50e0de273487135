pub mod health;
pub mod policy;
