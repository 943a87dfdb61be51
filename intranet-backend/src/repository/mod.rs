// src/repository/mod.rs

pub mod kpi_repository;
pub mod news_repository;
pub mod permission_request_repository;
pub mod promotion_repository;
pub mod request_hide_repository;
pub mod reviewable;
pub mod shift_change_request_repository;
pub mod task_repository;
pub mod user_repository;
pub mod vacation_request_repository;
