use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u16 = env_parse("__WALL_TEST_MISSING_KEY__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__WALL_TEST_EP_VALID__", "8080") };
    let val: u16 = env_parse("__WALL_TEST_EP_VALID__", 0);
    assert_eq!(val, 8080);
    unsafe { std::env::remove_var("__WALL_TEST_EP_VALID__") };
}

#[test]
fn env_parse_out_of_range_returns_default() {
    unsafe { std::env::set_var("__WALL_TEST_EP_RANGE__", "70000") };
    let val: u16 = env_parse("__WALL_TEST_EP_RANGE__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__WALL_TEST_EP_RANGE__") };
}

// =============================================================================
// env_path
// =============================================================================

#[test]
fn env_path_blank_is_unset() {
    unsafe { std::env::set_var("__WALL_TEST_PATH_BLANK__", "   ") };
    assert!(env_path("__WALL_TEST_PATH_BLANK__").is_none());
    unsafe { std::env::remove_var("__WALL_TEST_PATH_BLANK__") };
}

#[test]
fn env_path_present() {
    unsafe { std::env::set_var("__WALL_TEST_PATH_SET__", "/srv/wall/dist") };
    assert_eq!(env_path("__WALL_TEST_PATH_SET__"), Some(PathBuf::from("/srv/wall/dist")));
    unsafe { std::env::remove_var("__WALL_TEST_PATH_SET__") };
}

// =============================================================================
// ServerConfig
// =============================================================================

#[test]
fn body_limit_is_in_megabytes() {
    unsafe { std::env::set_var("WALL_BODY_LIMIT_MB", "3") };
    let config = ServerConfig::from_env();
    unsafe { std::env::remove_var("WALL_BODY_LIMIT_MB") };
    assert_eq!(config.body_limit_bytes, 3 * 1024 * 1024);
}
