pub mod dashboard;
pub mod health;
pub mod logs;
pub mod telegram;
pub mod users;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound
}
