pub mod engine;

pub use crate::domain::model::{Reservation, Room, StayRequest, Vacancy};
pub use crate::utils::error::Result;
pub use engine::VacancyEngine;
