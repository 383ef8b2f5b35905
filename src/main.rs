#![allow(warnings)]
//! Chip Ranker Frontend Entry Point

mod models;
mod ranking;
mod stats;
mod export;
mod config;
mod store;
mod context;
mod auth;
mod components;
mod pages;
mod app;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    let logs = rolling_logger::init(config.log_level, config.log_capacity, config.log_echo);
    tracing::info!(auth = config.auth_configured(), "chip ranker starting");

    mount_to_body(move || view! { <App config=config.clone() logs=logs.clone() /> });
}
