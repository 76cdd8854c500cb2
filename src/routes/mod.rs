pub mod forecasts;
pub mod health;
