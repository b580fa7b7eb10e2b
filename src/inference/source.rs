//! Static scanning of handler source text.
//!
//! Comments are stripped first, then the text is searched for
//! `<req>.query.<name>` and `<req>.body.<name>`. Access through aliases,
//! destructuring or computed keys is missed.

use crate::endpoint::push_distinct;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex should be valid"));

/// `//` to end of line, unless preceded by `:` or `\` (URLs, escaped slashes).
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(^|[^\\:])//.*$").expect("line comment regex should be valid")
});

static FUNCTION_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:async\s+)?function\b[^(]*\(\s*([A-Za-z_$][\w$]*)")
        .expect("function param regex should be valid")
});

/// `(req, res) => ...` and method shorthand `name(req, res) { ... }`
static PAREN_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:async\s*)?(?:[A-Za-z_$][\w$]*\s*)?\(\s*([A-Za-z_$][\w$]*)")
        .expect("paren param regex should be valid")
});

static ARROW_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:async\s+)?([A-Za-z_$][\w$]*)\s*=>").expect("arrow param regex should be valid")
});

/// Query and body parameter names read by a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceParams {
    pub query: Vec<String>,
    pub body: Vec<String>,
}

/// Remove block and line comments from source text.
pub fn strip_comments(source: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(source, "");
    LINE_COMMENT.replace_all(&without_blocks, "${1}").into_owned()
}

/// Name of the handler's first formal parameter, if it can be read off the
/// (comment-free) source.
pub fn request_ident(source: &str) -> Option<String> {
    [&*FUNCTION_PARAM, &*PAREN_PARAM, &*ARROW_PARAM]
        .iter()
        .find_map(|re| re.captures(source))
        .map(|caps| caps[1].to_string())
        .filter(|ident| ident != "async" && ident != "function")
}

/// Scan one handler's source for query and body parameter reads.
///
/// `default_ident` is used when the request parameter's name can't be found.
pub fn scan(source: &str, default_ident: &str) -> SourceParams {
    let code = strip_comments(source);
    let ident = request_ident(&code).unwrap_or_else(|| default_ident.to_string());

    let pattern = format!(
        r"(?:^|[^\w$]){}\.(query|body)\.([A-Za-z_$][\w$]*)",
        regex::escape(&ident)
    );
    let access = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("Cannot scan for request identifier '{}': {}", ident, e);
            return SourceParams::default();
        }
    };

    let mut params = SourceParams::default();
    for caps in access.captures_iter(&code) {
        let target = match &caps[1] {
            "query" => &mut params.query,
            _ => &mut params.body,
        };
        push_distinct(target, &caps[2]);
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_query_read_is_found() {
        let params = scan(
            "function (req, res) {\n  const master = req.query.master\n}",
            "req",
        );
        assert_eq!(params.query, vec!["master"]);
        assert!(params.body.is_empty());
    }

    #[test]
    fn test_line_comment_is_ignored() {
        let params = scan(
            "function (req, res) {\n  // const master = req.query.master\n  const x = 1\n}",
            "req",
        );
        assert!(params.query.is_empty());
    }

    #[test]
    fn test_block_comment_is_ignored() {
        let source = r#"function apiFooGetHandler(req, res) {
    /* Next usages of master and boss should not be inferred.
     *
     */
    /*
        res.send(`hello with master = ${master} and ${req.query.boss}`)
    */
}"#;
        assert_eq!(scan(source, "req"), SourceParams::default());
    }

    #[test]
    fn test_url_inside_string_is_not_a_comment() {
        let source = "function (req, res) {\n  res.redirect('http://x.io/?q=' + req.query.q)\n}";
        assert_eq!(scan(source, "req").query, vec!["q"]);
    }

    #[test]
    fn test_query_and_body_keep_discovery_order() {
        let source = r#"function apiBarGetHandler(req, res) {
    const master = req.query.master
    const user = req.body.username
    const size = req.body.group.length
    res.send(`hello with master = ${master} and ${req.query.boss} ${req.query.master}`)
}"#;
        let params = scan(source, "req");
        assert_eq!(params.query, vec!["master", "boss"]);
        assert_eq!(params.body, vec!["username", "group"]);
    }

    #[test]
    fn test_request_ident_detection() {
        assert_eq!(request_ident("function named(request, response) {}"), Some("request".into()));
        assert_eq!(request_ident("async function (r, s) {}"), Some("r".into()));
        assert_eq!(request_ident("(rq, rs) => rs.end()"), Some("rq".into()));
        assert_eq!(request_ident("async (rq) => 1"), Some("rq".into()));
        assert_eq!(request_ident("r => r.query.a"), Some("r".into()));
        assert_eq!(request_ident("handle(input, out) { }"), Some("input".into()));
        assert_eq!(request_ident("({ query }, res) => query.a"), None);
    }

    #[test]
    fn test_scan_uses_detected_ident() {
        let source = "(request, res) => res.send(request.query.page + req.query.ignored)";
        assert_eq!(scan(source, "req").query, vec!["page"]);
    }

    #[test]
    fn test_scan_dollar_prefixed_ident() {
        let source = "($req, res) => res.send($req.query.a + req.query.b)";
        assert_eq!(request_ident(source), Some("$req".into()));
        assert_eq!(scan(source, "req").query, vec!["a"]);
    }

    #[test]
    fn test_scan_ignores_longer_identifiers() {
        let source = "(req, res) => res.send(myreq.query.a + $req.body.b + req.query.c)";
        let params = scan(source, "req");
        assert_eq!(params.query, vec!["c"]);
        assert!(params.body.is_empty());
    }

    #[test]
    fn test_scan_falls_back_to_default_ident() {
        let source = "({ headers }, res) => res.send(ctx.body.token)";
        assert_eq!(scan(source, "ctx").body, vec!["token"]);
    }

    #[test]
    fn test_strip_comments_keeps_code() {
        let stripped = strip_comments("const a = 1 // trailing\n/* block */const b = 2");
        assert_eq!(stripped, "const a = 1 \nconst b = 2");
    }
}
