// src/handlers/mod.rs

pub mod analysis;
pub mod health;
pub mod question;
