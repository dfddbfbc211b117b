pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::{HttpConfig, RetryingClient};
pub use adapters::qkamura::QkamuraClient;
pub use adapters::slack::SlackClient;
pub use config::CliConfig;
pub use core::engine::VacancyEngine;
pub use domain::model::{Reservation, Room, StayRequest, Vacancy};
pub use utils::error::{QkamuraError, Result};
