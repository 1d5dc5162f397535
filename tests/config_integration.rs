//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use marcher::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("MARCHER_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("MARCHER_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_nested_env_override() {
    std::env::set_var("MARCHER_INPUT__MOVE_SPEED", "7.5");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.input.move_speed, 7.5);
    std::env::remove_var("MARCHER_INPUT__MOVE_SPEED");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("MARCHER_WINDOW__TITLE");

    // The shipped config/default.toml matches the built-in defaults
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Ray Marcher");
    assert_eq!(config.shader.vertex_path, "shaders/quad.vert.wgsl");
}
