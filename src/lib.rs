pub mod api;
pub mod gui;
pub mod logging;
pub mod session;
pub mod settings;
pub mod sketch;
