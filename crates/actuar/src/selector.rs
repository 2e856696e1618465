//! Per-backend selector rendering.
//!
//! Both renderers are pure: a [`Target`] maps to exactly one native selector
//! string per backend, and escaping guarantees the payload survives the trip
//! into CSS attribute selectors and XPath string literals.

use std::fmt;

use crate::target::{Strategy, Target};

/// Native selector for the DOM-driver backend.
///
/// The driver needs to know which engine evaluates the string, so the
/// rendering keeps the CSS/XPath split explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomSelector {
    /// Evaluated by the CSS selector engine
    Css(String),
    /// Evaluated by the XPath engine
    XPath(String),
}

impl DomSelector {
    /// The raw selector string, whichever engine it targets.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }
}

impl fmt::Display for DomSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "{s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
        }
    }
}

/// Render a target for the DOM-driver backend.
///
/// Strategies without a direct CSS equivalent (link text, element text)
/// render as XPath with properly quoted literals.
#[must_use]
pub fn dom_selector(target: &Target) -> DomSelector {
    let value = target.value();
    match target.strategy() {
        Strategy::Css => DomSelector::Css(value.to_string()),
        Strategy::XPath => DomSelector::XPath(value.to_string()),
        Strategy::Id => DomSelector::Css(format!("#{value}")),
        Strategy::Name => DomSelector::Css(format!("[name=\"{}\"]", css_double_quoted(value))),
        Strategy::ClassName => DomSelector::Css(format!(".{value}")),
        Strategy::TagName => DomSelector::Css(value.to_string()),
        Strategy::LinkText => DomSelector::XPath(format!(
            "//a[normalize-space(text())={}]",
            xpath_literal(value)
        )),
        Strategy::PartialLinkText => DomSelector::XPath(format!(
            "//a[contains(normalize-space(text()), {})]",
            xpath_literal(value)
        )),
        Strategy::Text => DomSelector::XPath(format!(
            "//*[normalize-space(text())={}]",
            xpath_literal(value)
        )),
        Strategy::DataTestId => {
            DomSelector::Css(format!("[data-testid=\"{}\"]", css_double_quoted(value)))
        }
        Strategy::Role => DomSelector::Css(format!("[role=\"{}\"]", css_double_quoted(value))),
    }
}

/// Render a target in the page engine's selector dialect.
///
/// The dialect prefixes non-CSS engines: `xpath=`, `text=`, `role=`.
#[must_use]
pub fn page_selector(target: &Target) -> String {
    let value = target.value();
    match target.strategy() {
        Strategy::Css => value.to_string(),
        Strategy::XPath => format!("xpath={value}"),
        Strategy::Id => format!("#{value}"),
        Strategy::Name => format!("[name=\"{}\"]", css_double_quoted(value)),
        Strategy::ClassName => format!(".{value}"),
        Strategy::TagName => value.to_string(),
        Strategy::LinkText => format!(
            "xpath=//a[normalize-space(text())={}]",
            xpath_literal(value)
        ),
        Strategy::PartialLinkText => format!(
            "xpath=//a[contains(normalize-space(text()), {})]",
            xpath_literal(value)
        ),
        Strategy::Text => format!("text={value}"),
        Strategy::DataTestId => format!("[data-testid=\"{}\"]", css_double_quoted(value)),
        Strategy::Role => format!("role={value}"),
    }
}

/// Escape a value for use inside a double-quoted CSS attribute selector.
///
/// Backslash is escaped first so the quote escape is not double-escaped.
#[must_use]
pub fn css_double_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a string as an XPath 1.0 literal.
///
/// XPath has no escape character, so a value containing a single quote is
/// decomposed into `concat('frag', "'", 'frag', ...)` with the quotes
/// themselves carried as double-quoted fragments. A quote-free value renders
/// as a plain single-quoted literal.
#[must_use]
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let parts: Vec<String> = value.split('\'').map(|part| format!("'{part}'")).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{
        class_name, css, data_test_id, id, link_text, name, partial_link_text, role, tag, text,
        xpath,
    };

    /// Reverse of `xpath_literal`: concatenates the quoted fragments back
    /// into the original string. Fragments never contain the quote they are
    /// delimited by, so a linear scan is unambiguous.
    fn eval_xpath_literal(expr: &str) -> String {
        let inner = expr
            .strip_prefix("concat(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(expr);
        let mut out = String::new();
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\'' => {
                    for f in chars.by_ref() {
                        if f == '\'' {
                            break;
                        }
                        out.push(f);
                    }
                }
                '"' => {
                    for f in chars.by_ref() {
                        if f == '"' {
                            break;
                        }
                        out.push(f);
                    }
                }
                _ => {}
            }
        }
        out
    }

    mod dom_rendering_tests {
        use super::*;

        #[test]
        fn css_and_tag_pass_through() {
            assert_eq!(
                dom_selector(&css("div > span")),
                DomSelector::Css("div > span".to_string())
            );
            assert_eq!(
                dom_selector(&tag("button")),
                DomSelector::Css("button".to_string())
            );
        }

        #[test]
        fn xpath_passes_through_raw() {
            assert_eq!(
                dom_selector(&xpath("//div[@id='x']")),
                DomSelector::XPath("//div[@id='x']".to_string())
            );
        }

        #[test]
        fn id_and_class_get_css_prefixes() {
            assert_eq!(
                dom_selector(&id("main")),
                DomSelector::Css("#main".to_string())
            );
            assert_eq!(
                dom_selector(&class_name("row")),
                DomSelector::Css(".row".to_string())
            );
        }

        #[test]
        fn attribute_strategies_escape_quotes() {
            assert_eq!(
                dom_selector(&name("user\"name")),
                DomSelector::Css("[name=\"user\\\"name\"]".to_string())
            );
            assert_eq!(
                dom_selector(&data_test_id("save")),
                DomSelector::Css("[data-testid=\"save\"]".to_string())
            );
            assert_eq!(
                dom_selector(&role("button")),
                DomSelector::Css("[role=\"button\"]".to_string())
            );
        }

        #[test]
        fn text_strategies_render_xpath() {
            assert_eq!(
                dom_selector(&text("Save")),
                DomSelector::XPath("//*[normalize-space(text())='Save']".to_string())
            );
            assert_eq!(
                dom_selector(&link_text("Home")),
                DomSelector::XPath("//a[normalize-space(text())='Home']".to_string())
            );
            assert_eq!(
                dom_selector(&partial_link_text("Hom")),
                DomSelector::XPath("//a[contains(normalize-space(text()), 'Hom')]".to_string())
            );
        }

        #[test]
        fn display_marks_the_engine() {
            assert_eq!(dom_selector(&id("x")).to_string(), "#x");
            assert_eq!(
                dom_selector(&xpath("//a")).to_string(),
                "xpath=//a"
            );
        }
    }

    mod page_rendering_tests {
        use super::*;

        #[test]
        fn dialect_prefixes() {
            assert_eq!(page_selector(&css(".item")), ".item");
            assert_eq!(page_selector(&xpath("//div")), "xpath=//div");
            assert_eq!(page_selector(&text("Save")), "text=Save");
            assert_eq!(page_selector(&role("button")), "role=button");
        }

        #[test]
        fn structural_strategies_match_dom_rendering() {
            assert_eq!(page_selector(&id("main")), "#main");
            assert_eq!(page_selector(&class_name("row")), ".row");
            assert_eq!(page_selector(&tag("input")), "input");
            assert_eq!(page_selector(&name("email")), "[name=\"email\"]");
            assert_eq!(
                page_selector(&data_test_id("save-btn")),
                "[data-testid=\"save-btn\"]"
            );
        }

        #[test]
        fn link_text_renders_prefixed_xpath() {
            assert_eq!(
                page_selector(&link_text("Sign in")),
                "xpath=//a[normalize-space(text())='Sign in']"
            );
            assert_eq!(
                page_selector(&partial_link_text("Sign")),
                "xpath=//a[contains(normalize-space(text()), 'Sign')]"
            );
        }
    }

    mod escaping_tests {
        use super::*;

        #[test]
        fn css_escapes_backslash_before_quote() {
            assert_eq!(css_double_quoted(r#"a\b"#), r#"a\\b"#);
            assert_eq!(css_double_quoted(r#"say "hi""#), r#"say \"hi\""#);
            assert_eq!(css_double_quoted(r#"\""#), r#"\\\""#);
        }

        #[test]
        fn quote_free_values_render_plain() {
            assert_eq!(xpath_literal("Save"), "'Save'");
            assert_eq!(xpath_literal(""), "''");
        }

        #[test]
        fn single_quote_decomposes_into_concat() {
            assert_eq!(
                xpath_literal("it's"),
                "concat('it', \"'\", 's')"
            );
            assert_eq!(xpath_literal("'"), "concat('', \"'\", '')");
            assert_eq!(
                xpath_literal("a'b'c"),
                "concat('a', \"'\", 'b', \"'\", 'c')"
            );
        }

        #[test]
        fn concat_evaluates_back_to_the_input() {
            for input in ["it's", "'", "''", "a'b'c", "don't stop", "'leading", "trailing'"] {
                assert_eq!(eval_xpath_literal(&xpath_literal(input)), input);
            }
        }

        #[test]
        fn double_quotes_survive_inside_single_quoted_fragments() {
            let lit = xpath_literal("say \"hi\"");
            assert_eq!(lit, "'say \"hi\"'");
            assert_eq!(eval_xpath_literal(&lit), "say \"hi\"");
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn xpath_literal_round_trips(input in "[ -~]{0,40}") {
                let literal = xpath_literal(&input);
                prop_assert_eq!(eval_xpath_literal(&literal), input);
            }

            #[test]
            fn quoted_inputs_always_use_concat(input in ".*'.*") {
                let literal = xpath_literal(&input);
                prop_assert!(literal.starts_with("concat("));
                prop_assert!(literal.ends_with(')'));
                prop_assert_eq!(eval_xpath_literal(&literal), input);
            }
        }
    }
}
