use web_sys::window;

/// Reads `window.ENV_CONFIG[key]`, the runtime settings injected by the
/// hosting page.
pub fn get_env_var(key: &str) -> Option<String> {
    let window = window()?;

    let env_config = js_sys::Reflect::get(&window, &"ENV_CONFIG".into()).ok()?;

    if env_config.is_undefined() {
        log::warn!("ENV_CONFIG is undefined - using built-in defaults");
        return None;
    }

    let value = js_sys::Reflect::get(&env_config, &key.into()).ok()?;

    if value.is_undefined() {
        log::debug!("Environment variable '{}' is undefined", key);
        return None;
    }

    // Numbers and booleans are accepted as well as strings.
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))
        .or_else(|| value.as_bool().map(|b| b.to_string()))
}
