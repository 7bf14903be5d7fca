use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use crate::config::{default_webview_data_dir, AppConfig};
use crate::domain::entities::taxonomy::Taxonomy;
use crate::ui::state::app_state::AppContext;

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(false);
            error!(error = %format!("{err:#}"), "failed to load config");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_json);

    let taxonomy = match Taxonomy::load(config.taxonomy_path.as_deref()) {
        Ok(taxonomy) => taxonomy,
        Err(err) => {
            error!(error = %format!("{err:#}"), "failed to load taxonomy");
            std::process::exit(1);
        }
    };
    info!(
        categories = taxonomy.level1.len(),
        custom = config.taxonomy_path.is_some(),
        "taxonomy loaded"
    );

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    let context = AppContext {
        taxonomy: Arc::new(taxonomy),
        config: Arc::new(config),
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("RCA Review"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(context)
        .launch(app::App);
}
