pub mod commands;
pub mod contact;
