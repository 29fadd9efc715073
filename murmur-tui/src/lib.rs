pub mod api;
pub mod app;
pub mod emoji;
#[macro_use]
pub mod logging;
pub mod store;
pub mod terminal;
pub mod text_wrapper;
pub mod ui;
