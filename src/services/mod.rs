// Service exports
pub mod email;

pub use email::{EmailClient, EmailError};
