// src/service/mod.rs

pub mod auth_service;
pub mod kpi_service;
pub mod news_service;
pub mod promotion_service;
pub mod request_service;
pub mod review_workflow;
pub mod task_service;
pub mod user_service;
