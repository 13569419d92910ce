pub mod app;
pub mod gateway;
pub mod lyrics;
pub mod observer;
pub mod translate;
pub mod ui;
