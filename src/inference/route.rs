use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A `:name` placeholder, with an optional custom pattern group and modifier
/// (`/:id(\d+)?`).
static PARAM_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":([A-Za-z0-9_]+)(?:\([^)]*\))?[?*+]?").expect("param token regex should be valid")
});

/// Route parameters found in a path, and the path with each placeholder
/// rewritten to `{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParams {
    pub path: String,
    pub names: Vec<String>,
}

/// Extract route parameter names from `path` in declaration order.
///
/// Each placeholder token is rewritten in place, so a name that also appears
/// as plain text elsewhere in the path is left alone. A path without
/// placeholders comes back unchanged.
pub fn extract(path: &str) -> RouteParams {
    let names = PARAM_TOKEN
        .captures_iter(path)
        .map(|caps| caps[1].to_string())
        .collect();

    let path = PARAM_TOKEN
        .replace_all(path, |caps: &Captures| format!("{{{}}}", &caps[1]))
        .into_owned();

    RouteParams { path, names }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_multiple_params() {
        let params = extract("/duplicate/:id/group/:nick");
        assert_eq!(params.names, vec!["id", "nick"]);
        assert_eq!(params.path, "/duplicate/{id}/group/{nick}");
    }

    #[test]
    fn test_extract_without_params_is_identity() {
        let params = extract("/duplicate/{id}");
        assert!(params.names.is_empty());
        assert_eq!(params.path, "/duplicate/{id}");

        let again = extract(&extract("/a/:b").path);
        assert_eq!(again.path, "/a/{b}");
        assert!(again.names.is_empty());
    }

    #[test]
    fn test_extract_name_also_in_literal_text() {
        let params = extract("/user/:user/user");
        assert_eq!(params.names, vec!["user"]);
        assert_eq!(params.path, "/user/{user}/user");
    }

    #[test]
    fn test_extract_keeps_duplicate_names() {
        let params = extract("/a/:id/b/:id");
        assert_eq!(params.names, vec!["id", "id"]);
        assert_eq!(params.path, "/a/{id}/b/{id}");
    }

    #[test]
    fn test_extract_modifiers_and_custom_patterns() {
        let params = extract(r"/files/:name?/:rev(\d+)/:rest*");
        assert_eq!(params.names, vec!["name", "rev", "rest"]);
        assert_eq!(params.path, "/files/{name}/{rev}/{rest}");
    }

    #[test]
    fn test_extract_param_with_extension() {
        let params = extract("/report/:year.json");
        assert_eq!(params.names, vec!["year"]);
        assert_eq!(params.path, "/report/{year}.json");
    }
}
