use anyhow::{Context, Result};
use portal::core::config::Config;
use portal::core::startup::ensure_seeded;
use portal::core::state::PortalState;
use portal::core::tracing_init::init_tracing;
use portal::utils::time::today_iso;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    let config = Config::from_file(&config_path)
        .context(format!(
            "Failed to load configuration from '{}'. \
            If this is your first run, copy config.example.toml to config.toml and adjust the values.",
            config_path.display()
        ))?;

    init_tracing(&config.logging)?;

    info!(
        config_path = %config_path.display(),
        backend = %config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        log_level = %config.logging.level,
        log_format = %config.logging.format,
        "School portal starting"
    );

    let state = PortalState::new(config).context("Failed to open portal storage")?;

    if state.config.portal.seed_on_start {
        let report = ensure_seeded(&state.portal).context("Failed to seed demo data")?;
        if !report.any() {
            info!("Existing data found, seeding skipped");
        }
    }

    let overview = state
        .portal
        .admin_overview(&today_iso())
        .context("Failed to read startup overview")?;
    let session = state
        .portal
        .current_user()
        .context("Failed to read session pointer")?;

    info!(
        students = overview.students,
        teachers = overview.teachers,
        attendance_today = overview.attendance_today,
        results = overview.results,
        session_user = session.as_ref().map(|u| u.id.as_str()).unwrap_or("-"),
        root_admin_id = %state.portal.root_admin_id(),
        "School portal ready"
    );

    Ok(())
}
