//! Configuration resolution for the shift logger.
//!
//! This module handles configuration values with a three-tier priority system:
//!
//! 1. **Parameter** - Explicitly provided function parameter (highest priority)
//! 2. **Environment Variable** - Value from environment variable
//! 3. **Default** - Built-in default value (lowest priority)
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SHIFT_LOGGER_PORT` | 5000 | HTTP listen port |
//! | `SHIFT_DATA_FILE` | shifts.json | Path of the JSON snapshot file |

use std::env;

/// Default HTTP listen port
pub(crate) const DEFAULT_PORT: u16 = 5000;

/// Default snapshot file path
pub(crate) const DEFAULT_DATA_FILE: &str = "shifts.json";

/// Environment variable name for the HTTP listen port
pub(crate) const PORT_ENV_VAR: &str = "SHIFT_LOGGER_PORT";

/// Environment variable name for the snapshot file path
pub(crate) const DATA_FILE_ENV_VAR: &str = "SHIFT_DATA_FILE";

/// Resolve the listen port with priority: parameter -> env var -> default
pub fn resolve_port(port_param: Option<u16>) -> u16 {
    // Priority 1: Use parameter if provided
    if let Some(port) = port_param {
        return port;
    }

    // Priority 2: Use environment variable if set
    if let Ok(env_port) = env::var(PORT_ENV_VAR)
        && let Ok(port) = env_port.parse::<u16>()
    {
        return port;
    }

    // Priority 3: Default value
    DEFAULT_PORT
}

/// Resolve the snapshot file path with priority: parameter -> env var -> default
pub fn resolve_data_file(path_param: Option<String>) -> String {
    // Priority 1: Use parameter if provided
    if let Some(path) = path_param {
        return path;
    }

    // Priority 2: Use environment variable if set
    if let Ok(env_path) = env::var(DATA_FILE_ENV_VAR)
        && !env_path.is_empty()
    {
        return env_path;
    }

    // Priority 3: Default value
    DEFAULT_DATA_FILE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    // Use a mutex to serialize env var tests to avoid race conditions
    // SAFETY: Tests are serialized via ENV_TEST_MUTEX to prevent data races
    static ENV_TEST_MUTEX: StdMutex<()> = StdMutex::new(());

    /// Helper to set an environment variable safely within tests.
    /// SAFETY: Must be called while holding ENV_TEST_MUTEX to prevent data races.
    unsafe fn set_env(key: &str, value: &str) {
        // SAFETY: Caller ensures ENV_TEST_MUTEX is held
        unsafe { env::set_var(key, value) };
    }

    /// Helper to remove an environment variable safely within tests.
    /// SAFETY: Must be called while holding ENV_TEST_MUTEX to prevent data races.
    unsafe fn remove_env(key: &str) {
        // SAFETY: Caller ensures ENV_TEST_MUTEX is held
        unsafe { env::remove_var(key) };
    }

    mod port {
        use super::*;

        #[test]
        fn test_uses_param_when_provided() {
            assert_eq!(resolve_port(Some(8080)), 8080);
        }

        #[test]
        fn test_param_takes_priority_over_env() {
            let _guard = ENV_TEST_MUTEX.lock().unwrap();
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                set_env(PORT_ENV_VAR, "9000");
            }
            let result = resolve_port(Some(8080));
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                remove_env(PORT_ENV_VAR);
            }
            assert_eq!(result, 8080);
        }

        #[test]
        fn test_uses_env_var_when_no_param() {
            let _guard = ENV_TEST_MUTEX.lock().unwrap();
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                set_env(PORT_ENV_VAR, "9000");
            }
            let result = resolve_port(None);
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                remove_env(PORT_ENV_VAR);
            }
            assert_eq!(result, 9000);
        }

        #[test]
        fn test_uses_default_when_no_param_or_env() {
            let _guard = ENV_TEST_MUTEX.lock().unwrap();
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                remove_env(PORT_ENV_VAR);
            }
            assert_eq!(resolve_port(None), DEFAULT_PORT);
        }

        #[test]
        fn test_ignores_invalid_env_var() {
            let _guard = ENV_TEST_MUTEX.lock().unwrap();
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                set_env(PORT_ENV_VAR, "not_a_port");
            }
            let result = resolve_port(None);
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                remove_env(PORT_ENV_VAR);
            }
            assert_eq!(result, DEFAULT_PORT);
        }
    }

    mod data_file {
        use super::*;

        #[test]
        fn test_uses_param_when_provided() {
            assert_eq!(
                resolve_data_file(Some("/tmp/custom.json".to_string())),
                "/tmp/custom.json"
            );
        }

        #[test]
        fn test_param_takes_priority_over_env() {
            let _guard = ENV_TEST_MUTEX.lock().unwrap();
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                set_env(DATA_FILE_ENV_VAR, "/var/env.json");
            }
            let result = resolve_data_file(Some("/tmp/param.json".to_string()));
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                remove_env(DATA_FILE_ENV_VAR);
            }
            assert_eq!(result, "/tmp/param.json");
        }

        #[test]
        fn test_uses_env_var_when_no_param() {
            let _guard = ENV_TEST_MUTEX.lock().unwrap();
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                set_env(DATA_FILE_ENV_VAR, "/var/env.json");
            }
            let result = resolve_data_file(None);
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                remove_env(DATA_FILE_ENV_VAR);
            }
            assert_eq!(result, "/var/env.json");
        }

        #[test]
        fn test_ignores_empty_env_var() {
            let _guard = ENV_TEST_MUTEX.lock().unwrap();
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                set_env(DATA_FILE_ENV_VAR, "");
            }
            let result = resolve_data_file(None);
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                remove_env(DATA_FILE_ENV_VAR);
            }
            assert_eq!(result, DEFAULT_DATA_FILE);
        }

        #[test]
        fn test_uses_default_when_no_param_or_env() {
            let _guard = ENV_TEST_MUTEX.lock().unwrap();
            // SAFETY: Holding ENV_TEST_MUTEX, no concurrent env access
            unsafe {
                remove_env(DATA_FILE_ENV_VAR);
            }
            assert_eq!(resolve_data_file(None), DEFAULT_DATA_FILE);
        }
    }
}
