// src/utils/mod.rs

pub mod email;
pub mod jwt;
pub mod password;
