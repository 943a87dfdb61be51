// src/api/handlers/mod.rs

pub mod auth_handler;
pub mod kpi_handler;
pub mod news_handler;
pub mod promotion_handler;
pub mod request_handler;
pub mod task_handler;
pub mod user_handler;
