//! Public path initializer.
//! Uses `{}` placeholder for the function name - replace before use.

/// Function name used when the integrator does not choose one
pub const DEFAULT_INITIALIZER: &str = "setPath";

/// Reads `window.__MAP__[entry][window.__ENVIRONMENT__].href` and appends `/`
pub const SET_PATH_FUNCTION: &str = r#"function {}(entry) {
  const { __MAP__, __ENVIRONMENT__ } = window;
  const { href } = __MAP__[entry][__ENVIRONMENT__];
  return href + "/";
}
"#;

/// Same lookup as [`SET_PATH_FUNCTION`], exported as a CommonJS module
pub const SET_PATH_MODULE: &str = r#"module.exports = function (entry) {
  const { __MAP__, __ENVIRONMENT__ } = window;
  const { href } = __MAP__[entry][__ENVIRONMENT__];
  return href + "/";
};
"#;

/// Global function declaration named `name`, for inclusion in the host page
pub fn initializer_source(name: &str) -> String {
    SET_PATH_FUNCTION.replace("{}", name)
}

/// CommonJS module exporting the initializer
pub fn commonjs_source() -> String {
    SET_PATH_MODULE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_substituted() {
        let source = initializer_source("resolvePublicPath");
        assert!(source.starts_with("function resolvePublicPath(entry) {"));
        assert!(!source.contains("{}"));
    }

    #[test]
    fn test_lookup_appends_separator() {
        assert!(SET_PATH_FUNCTION.contains(r#"return href + "/";"#));
        assert!(SET_PATH_MODULE.contains(r#"return href + "/";"#));
    }
}
