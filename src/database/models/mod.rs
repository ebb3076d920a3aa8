pub mod property;
pub mod state;
pub mod user;

pub use property::{AdminProperty, Property, PropertyInput, PropertyRow, PropertyStatus, PropertyType};
pub use state::State;
pub use user::AdminCredential;
