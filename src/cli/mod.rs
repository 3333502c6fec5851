// Interactive front end

pub mod app;

pub use app::{run, Choice};
