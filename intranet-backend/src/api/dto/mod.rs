// src/api/dto/mod.rs

pub mod auth_dto;
pub mod kpi_dto;
pub mod news_dto;
pub mod promotion_dto;
pub mod request_dto;
pub mod task_dto;
pub mod user_dto;
