//! `{placeholder}` substitution for prompt templates.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex matching `{placeholder}` tokens in prompt templates.
///
/// A name is any run of characters other than braces, whitespace and `"`,
/// so `{user-id}` and `{team.name}` are placeholders while JSON examples
/// embedded in a template (`{"text": "..."}`) pass through untouched.
static PLACEHOLDER_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#"\{([^{}\s"]+)\}"#).expect("valid regex"));

/// Result of rendering a template.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RenderedPrompt {
    pub text: String,
    pub unresolved_placeholders: Vec<String>,
}

/// Replace every `{name}` whose name is present in `vars`.
///
/// Substitution is a single pass: substituted values are not scanned again.
/// Unknown placeholders are left in place verbatim and listed in
/// `unresolved_placeholders`. No escaping is applied to values.
pub fn render_template(template: &str, vars: &HashMap<String, String>) -> RenderedPrompt {
    let mut unresolved = Vec::new();
    let text = PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures| {
            let key = &caps[1];
            match vars.get(key) {
                Some(value) => value.clone(),
                None => {
                    unresolved.push(key.to_string());
                    caps[0].to_string()
                }
            }
        })
        .to_string();
    RenderedPrompt {
        text,
        unresolved_placeholders: unresolved,
    }
}

/// Extract placeholder keys from a template string, in order of appearance.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn replaces_every_occurrence() {
        let result = render_template("{topic} and again {topic}", &vars(&[("topic", "Docker")]));
        assert_eq!(result.text, "Docker and again Docker");
        assert!(result.unresolved_placeholders.is_empty());
    }

    #[test]
    fn missing_key_is_left_verbatim() {
        let result = render_template("Teach {topic} to {audience}", &vars(&[("topic", "Git")]));
        assert_eq!(result.text, "Teach Git to {audience}");
        assert_eq!(result.unresolved_placeholders, vec!["audience"]);
    }

    #[test]
    fn json_braces_are_not_placeholders() {
        let template = r#"Use {"text": "...", "feedback": "..."} for {name}"#;
        let result = render_template(template, &vars(&[("name", "choices")]));
        assert_eq!(
            result.text,
            r#"Use {"text": "...", "feedback": "..."} for choices"#
        );
    }

    #[test]
    fn values_are_not_rescanned_or_escaped() {
        let result = render_template(
            "{a} {b}",
            &vars(&[("a", "{b}"), ("b", "<\"quoted\">")]),
        );
        assert_eq!(result.text, "{b} <\"quoted\">");
    }

    #[test]
    fn surrounding_text_is_unchanged() {
        let template = "prefix {x} middle {{x}} suffix";
        let result = render_template(template, &vars(&[("x", "1")]));
        assert_eq!(result.text, "prefix 1 middle {1} suffix");
    }

    #[test]
    fn keys_with_dashes_and_dots_are_replaced() {
        let result = render_template(
            "{user-id} leads {team.name}",
            &vars(&[("user-id", "u1"), ("team.name", "Platform")]),
        );
        assert_eq!(result.text, "u1 leads Platform");
        assert!(result.unresolved_placeholders.is_empty());
    }

    #[test]
    fn multiline_json_is_not_a_placeholder() {
        let template = "{\n  \"scores\": {\"metric name\": 0}\n}";
        assert!(extract_placeholders(template).is_empty());
    }

    #[test]
    fn extract_in_order() {
        assert_eq!(
            extract_placeholders("{role} wants {goals} with {role}"),
            vec!["role", "goals", "role"]
        );
    }
}
