// src/domain/mod.rs

pub mod kpi_model;
pub mod news_model;
pub mod news_read_model;
pub mod permission_request_model;
pub mod promotion_model;
pub mod request_hide_model;
pub mod review;
pub mod shift_change_request_model;
pub mod task_model;
pub mod task_status;
pub mod user_model;
pub mod user_role;
pub mod vacation_request_model;
