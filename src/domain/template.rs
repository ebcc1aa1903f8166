//! Message content rendering: literal text or `{{key}}` templates.
//!
//! Output goes to a plain-text transport, so values are substituted as-is
//! (no HTML escaping).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").expect("Failed to compile placeholder regex")
});

/// Flat key -> value mapping used to fill template placeholders.
pub type TemplateContext = BTreeMap<String, String>;

/// Where the message text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Text(String),
    Template {
        template: String,
        context: TemplateContext,
    },
}

impl ContentSource {
    /// Produce the text to transmit. Literal text is used verbatim.
    pub fn render(&self) -> String {
        match self {
            ContentSource::Text(text) => text.clone(),
            ContentSource::Template { template, context } => render_template(template, context),
        }
    }
}

/// Substitute every `{{key}}` in `template` from `context`.
///
/// Missing keys render as empty text. An empty template renders to an empty string.
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            context.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pairs: &[(&str, &str)]) -> TemplateContext {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_substitutes_key() {
        assert_eq!(
            render_template("Hi {{name}}", &ctx(&[("name", "Amy")])),
            "Hi Amy"
        );
    }

    #[test]
    fn test_render_missing_key_is_empty() {
        assert_eq!(render_template("Hi {{name}}", &TemplateContext::new()), "Hi ");
    }

    #[test]
    fn test_render_empty_template() {
        assert_eq!(render_template("", &ctx(&[("name", "Amy")])), "");
    }

    #[test]
    fn test_render_tolerates_inner_whitespace_and_repeats() {
        let out = render_template(
            "{{ course }} on {{day}}, see you {{day}}!",
            &ctx(&[("course", "Maths"), ("day", "Monday")]),
        );
        assert_eq!(out, "Maths on Monday, see you Monday!");
    }

    #[test]
    fn test_render_does_not_escape() {
        let out = render_template("{{who}} & co", &ctx(&[("who", "Tom \"T\" <Lee>")]));
        assert_eq!(out, "Tom \"T\" <Lee> & co");
    }

    #[test]
    fn test_render_leaves_unterminated_braces() {
        assert_eq!(
            render_template("Hi {{name", &ctx(&[("name", "Amy")])),
            "Hi {{name"
        );
    }

    #[test]
    fn test_content_source_text_is_verbatim() {
        let source = ContentSource::Text("Hi {{name}}".into());
        assert_eq!(source.render(), "Hi {{name}}");
    }

    #[test]
    fn test_content_source_template() {
        let source = ContentSource::Template {
            template: "Class at {{time}}".into(),
            context: ctx(&[("time", "5pm")]),
        };
        assert_eq!(source.render(), "Class at 5pm");
    }
}
