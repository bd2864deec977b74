#![allow(clippy::unwrap_used)]
// Layering tests: defaults < file < SITEPULSE_* environment.

use std::path::Path;

use figment::Jail;

use sitepulse_config::{Config, load_config, save_config, to_monitor_config};
use sitepulse_core::Strategy;

#[test]
fn test_defaults_without_file() {
    Jail::expect_with(|_jail| {
        let cfg = load_config(Some(Path::new("absent.toml"))).map_err(|e| e.to_string())?;
        assert_eq!(cfg, Config::default());
        Ok(())
    });
}

#[test]
fn test_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                backend_url = "https://backend.example/api"
                strategy = "fan-out"
                page_size = 10

                [timeouts]
                check = 4

                [[locations]]
                tag = "edge-1"
                label = "Edge 1"
            "#,
        )?;

        let cfg = load_config(Some(Path::new("config.toml"))).map_err(|e| e.to_string())?;
        assert_eq!(cfg.backend_url.as_deref(), Some("https://backend.example/api"));
        assert_eq!(cfg.strategy, Strategy::FanOut);
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.timeouts.check, 4);
        assert_eq!(cfg.timeouts.registry, 15);
        assert_eq!(cfg.locations.len(), 1);
        assert_eq!(cfg.locations[0].tag, "edge-1");
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                backend_url = "https://file.example"
                max_concurrency = 2
            "#,
        )?;
        jail.set_env("SITEPULSE_BACKEND_URL", "https://env.example");
        jail.set_env("SITEPULSE_TIMEOUTS__ORIGIN_GET", "12");

        let cfg = load_config(Some(Path::new("config.toml"))).map_err(|e| e.to_string())?;
        assert_eq!(cfg.backend_url.as_deref(), Some("https://env.example"));
        assert_eq!(cfg.max_concurrency, 2);
        assert_eq!(cfg.timeouts.origin_get, 12);

        let mc = to_monitor_config(&cfg).map_err(|e| e.to_string())?;
        assert_eq!(mc.backend_url.as_str(), "https://env.example/");
        Ok(())
    });
}

#[test]
fn test_save_writes_pretty_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let cfg = Config {
        backend_url: Some("https://backend.example".into()),
        refresh_interval_secs: 60,
        ..Config::default()
    };
    save_config(&cfg, &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("refresh_interval_secs = 60"));
    assert!(!raw.contains("ca_cert"));
}
