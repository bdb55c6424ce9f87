mod catalog;
mod error_shape;
mod health;
mod uploads;
