pub mod terrain;
pub mod ui;
