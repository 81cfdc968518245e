pub mod alphabet;
pub mod layout;
