pub mod bot;
pub mod collision;
pub mod relocation;
