//! DTOs de entrada y salida del router

pub mod board_dto;
pub mod form_dto;
pub mod response_dto;
pub mod session_dto;
pub mod table_dto;

pub use response_dto::ApiResponse;
pub use table_dto::TableIntent;
