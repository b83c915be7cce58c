pub mod screens;
pub mod theme;
