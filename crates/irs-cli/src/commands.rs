pub mod generate;
pub mod screen;
