pub mod extract;
pub mod studio;
