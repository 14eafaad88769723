use wellview_config::{AppConfig, ConfigError};

// 环境变量是进程级共享状态，所有场景放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::remove_var("WELLVIEW_DATABASE_URL");
        std::env::remove_var("WELLVIEW_DB_MAX_CONNECTIONS");
        std::env::remove_var("WELLVIEW_DEFAULT_LOCALE");
    }
    assert!(matches!(AppConfig::from_env(), Err(ConfigError::Missing(_))));

    unsafe {
        std::env::set_var("WELLVIEW_DATABASE_URL", "postgresql://wellview@localhost/wellview");
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.db_max_connections, 8);
    assert_eq!(config.default_locale, "en");

    unsafe {
        std::env::set_var("WELLVIEW_DB_MAX_CONNECTIONS", "16");
        std::env::set_var("WELLVIEW_DEFAULT_LOCALE", "es");
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.db_max_connections, 16);
    assert_eq!(config.default_locale, "es");

    unsafe {
        std::env::set_var("WELLVIEW_DB_MAX_CONNECTIONS", "many");
    }
    assert!(matches!(AppConfig::from_env(), Err(ConfigError::Invalid(_, _))));
}
