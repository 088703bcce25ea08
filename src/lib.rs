pub mod app;
pub mod assets;
pub mod cli;
pub mod config;
pub mod data;
pub mod listview;
pub mod modal;
pub mod output;
pub mod render;
pub mod site;
pub mod utils;

#[cfg(test)]
mod tests;
