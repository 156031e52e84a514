mod answer;
mod health;

pub use answer::{answer_handler, status_for};
pub use health::health_handler;
