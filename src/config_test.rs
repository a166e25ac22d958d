use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_scarlet_env() {
    unsafe {
        std::env::remove_var("SCARLET_API_BASE_URL");
        std::env::remove_var("SCARLET_ROLE_LOOKUP_ATTEMPTS");
        std::env::remove_var("SCARLET_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("SCARLET_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_applies_defaults_and_overrides() {
    unsafe { clear_scarlet_env() };
    assert_eq!(ResolverConfig::from_env().unwrap(), ResolverConfig::default());

    unsafe {
        std::env::set_var("SCARLET_API_BASE_URL", " https://api.example.test/ ");
        std::env::set_var("SCARLET_ROLE_LOOKUP_ATTEMPTS", "5");
        std::env::set_var("SCARLET_REQUEST_TIMEOUT_SECS", "30");
        std::env::set_var("SCARLET_CONNECT_TIMEOUT_SECS", "2");
    }
    let cfg = ResolverConfig::from_env().unwrap();
    assert_eq!(cfg.api_base_url, "https://api.example.test");
    assert_eq!(cfg.lookup_attempts, 5);
    assert_eq!(cfg.retry_policy().max_attempts(), 5);
    assert_eq!(cfg.timeouts, Timeouts { request: Duration::from_secs(30), connect: Duration::from_secs(2) });

    // Zero attempts still means one try.
    unsafe { std::env::set_var("SCARLET_ROLE_LOOKUP_ATTEMPTS", "0") };
    assert_eq!(ResolverConfig::from_env().unwrap().lookup_attempts, 1);

    unsafe { std::env::set_var("SCARLET_REQUEST_TIMEOUT_SECS", "soon") };
    let err = ResolverConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("SCARLET_REQUEST_TIMEOUT_SECS"), "{err}");

    unsafe {
        clear_scarlet_env();
        std::env::set_var("SCARLET_API_BASE_URL", "   ");
    }
    assert!(matches!(
        ResolverConfig::from_env(),
        Err(ConfigError::Invalid { var: "SCARLET_API_BASE_URL", .. })
    ));

    unsafe { clear_scarlet_env() };
}
