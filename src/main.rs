#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use portfolio_motion::config::MotionConfig;
    use portfolio_motion::content::SiteContent;
    use portfolio_motion::log::{log_event, LogLevel};
    use serde_json::json;

    let (config, config_error) = MotionConfig::embedded();
    if let Some(error) = config_error {
        log_event(
            config.log_level,
            LogLevel::Warn,
            "motion_config_fallback",
            json!({ "error": error }),
        );
    }

    match SiteContent::embedded() {
        Ok(site) => log_event(
            config.log_level,
            LogLevel::Info,
            "site_content_ok",
            json!({
                "sections": site.navigation.section_ids().collect::<Vec<_>>(),
                "skills": site.skills.len(),
                "projects": site.projects.len(),
            }),
        ),
        Err(error) => {
            log_event(
                config.log_level,
                LogLevel::Warn,
                "site_content_invalid",
                json!({ "error": error }),
            );
            std::process::exit(1);
        }
    }

    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
