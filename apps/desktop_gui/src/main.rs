use std::path::PathBuf;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::Context;
use backend_bridge::commands::BackendCommand;
use clap::Parser;
use controller::{events::UiEvent, reducer::ViewKind};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;
use ui::{theme::UiPreferences, EmployeeDeskApp, StartupConfig};

#[derive(Debug, Parser)]
#[command(name = "employee_desk", about = "Employee directory desktop client")]
struct Args {
    /// Employee collection endpoint, e.g. https://host/users
    #[arg(long)]
    api_base_url: Option<String>,
    /// View to open on launch; defaults to the last one used.
    #[arg(long, value_enum)]
    view: Option<ViewKind>,
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut settings = config::load_settings(&args.config)?;
    if let Some(url) = args.api_base_url {
        settings.api_base_url = url;
    }
    client_core::api::parse_base_url(&settings.api_base_url)
        .with_context(|| format!("invalid API base URL '{}'", settings.api_base_url))?;
    tracing::info!(
        api = %settings.api_base_url,
        timeout_secs = settings.request_timeout_secs,
        "starting employee desk"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);

    let startup = StartupConfig {
        initial_view: args.view,
        default_avatar_url: settings.default_avatar_url.clone(),
    };
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Employee Management System")
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Employee Management System",
        options,
        Box::new(move |cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(ui::theme::PREFERENCES_STORAGE_KEY)
                    .and_then(|text| UiPreferences::from_storage_text(&text))
            });
            Ok(Box::new(EmployeeDeskApp::new(
                cmd_tx, ui_rx, startup, persisted,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop UI exited with an error: {err}"))
}
