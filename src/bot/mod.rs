//! Discord bot wiring: gateway client, event handlers, commands, and UI.

pub mod commands;
pub mod handler;
pub mod start;
pub mod ui;
