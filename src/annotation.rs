use crate::ir::{AnnotationMarker, Directive};
use regex::Regex;
use std::sync::LazyLock;

static RE_EXECUTE: LazyLock<Regex> = LazyLock::new(|| marker_regex("execute"));
static RE_IGNORE: LazyLock<Regex> = LazyLock::new(|| marker_regex("ignore"));
static RE_TEST: LazyLock<Regex> = LazyLock::new(|| marker_regex("test"));

static RE_LOOKS_LIKE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<!---\s*AUTOMATION:").unwrap());

fn marker_regex(keyword: &str) -> Regex {
    Regex::new(&format!(
        r"^\s*<!---\s*AUTOMATION:\s*{}\s*=\s*`(.*)`\s*-->",
        keyword
    ))
    .unwrap()
}

/// Patterns in precedence order. The first match wins.
fn patterns() -> [(Directive, &'static Regex); 3] {
    [
        (Directive::Execute, &*RE_EXECUTE),
        (Directive::Ignore, &*RE_IGNORE),
        (Directive::Test, &*RE_TEST),
    ]
}

/// Recognizes at most one marker at the start of a markup block's text.
pub fn recognize(text: &str) -> Option<AnnotationMarker> {
    for (directive, re) in patterns() {
        if let Some(caps) = re.captures(text) {
            return Some(AnnotationMarker {
                directive,
                payload: caps[1].to_string(),
            });
        }
    }
    if RE_LOOKS_LIKE_MARKER.is_match(text) {
        tracing::debug!(text = text.trim_end(), "malformed automation marker ignored");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(directive: Directive, payload: &str) -> Option<AnnotationMarker> {
        Some(AnnotationMarker {
            directive,
            payload: payload.to_string(),
        })
    }

    #[test]
    fn test_execute() {
        assert_eq!(
            recognize("<!--- AUTOMATION: execute=`echo run` -->\n"),
            marker(Directive::Execute, "echo run")
        );
    }

    #[test]
    fn test_ignore() {
        assert_eq!(
            recognize("<!--- AUTOMATION: ignore=`needs a browser` -->"),
            marker(Directive::Ignore, "needs a browser")
        );
    }

    #[test]
    fn test_test() {
        assert_eq!(
            recognize("<!--- AUTOMATION: test=`curl -f localhost:8080` -->"),
            marker(Directive::Test, "curl -f localhost:8080")
        );
    }

    #[test]
    fn test_whitespace_tolerance() {
        assert_eq!(
            recognize("  <!---   AUTOMATION:  execute = `make`   -->"),
            marker(Directive::Execute, "make")
        );
        assert_eq!(
            recognize("<!---AUTOMATION:test=`true`-->"),
            marker(Directive::Test, "true")
        );
    }

    #[test]
    fn test_payload_keeps_inner_backticks() {
        assert_eq!(
            recognize("<!--- AUTOMATION: execute=`echo `date`` -->"),
            marker(Directive::Execute, "echo `date`")
        );
    }

    #[test]
    fn test_unterminated_payload_is_no_match() {
        assert_eq!(recognize("<!--- AUTOMATION: execute=`echo run -->"), None);
    }

    #[test]
    fn test_unknown_directive() {
        assert_eq!(recognize("<!--- AUTOMATION: skip=`x` -->"), None);
    }

    #[test]
    fn test_plain_comment() {
        assert_eq!(recognize("<!-- just a note -->"), None);
        assert_eq!(recognize("<div>html</div>"), None);
    }

    #[test]
    fn test_two_dash_comment_is_not_a_marker() {
        assert_eq!(recognize("<!-- AUTOMATION: execute=`ls` -->"), None);
    }

    #[test]
    fn test_anchored_at_start() {
        assert_eq!(
            recognize("<p>x</p><!--- AUTOMATION: execute=`ls` -->"),
            None
        );
    }

    #[test]
    fn test_only_first_marker_in_block() {
        let text = "<!--- AUTOMATION: test=`one` -->\n<!--- AUTOMATION: execute=`two` -->\n";
        assert_eq!(recognize(text), marker(Directive::Test, "one"));
    }

    #[test]
    fn test_payload_does_not_span_lines() {
        assert_eq!(
            recognize("<!--- AUTOMATION: execute=`echo\nrun` -->"),
            None
        );
    }
}
