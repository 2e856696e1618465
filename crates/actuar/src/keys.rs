//! Named keys and chord encoding.
//!
//! The contract recognizes a closed set of key names. The DOM backend
//! receives them as the WebDriver private-use codepoints its wire protocol
//! defines; the page backend receives the engine's own key names. Anything
//! outside the set is sent as literal text.

/// WebDriver NULL key. Appended to chord sequences so held modifiers are
/// released when the chord ends.
pub const DOM_NULL: char = '\u{E000}';

/// A key name the contract maps to backend-native codes.
///
/// Modifiers are included for chord use; on their own they press and release
/// without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Tab
    Tab,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
    /// Forward delete
    Delete,
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// Up arrow
    ArrowUp,
    /// Down arrow
    ArrowDown,
    /// Home
    Home,
    /// End
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Control modifier
    Control,
    /// Shift modifier
    Shift,
    /// Alt modifier
    Alt,
}

impl Key {
    /// Parse a key name.
    ///
    /// Canonical names (`"Enter"`, `"PageUp"`, ...) match exactly; otherwise
    /// the name is uppercased with spaces and dashes folded to underscores
    /// and matched against the wire-protocol spelling (`"PAGE_UP"`,
    /// `"BACK_SPACE"`, ...). Returns `None` for anything else, which callers
    /// send as literal text.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        let exact = match trimmed {
            "Enter" => Some(Self::Enter),
            "Tab" => Some(Self::Tab),
            "Escape" => Some(Self::Escape),
            "Backspace" => Some(Self::Backspace),
            "Delete" => Some(Self::Delete),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            "Control" => Some(Self::Control),
            "Shift" => Some(Self::Shift),
            "Alt" => Some(Self::Alt),
            _ => None,
        };
        if exact.is_some() {
            return exact;
        }
        let normalized = trimmed.to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "ENTER" => Some(Self::Enter),
            "TAB" => Some(Self::Tab),
            "ESCAPE" => Some(Self::Escape),
            "BACK_SPACE" => Some(Self::Backspace),
            "DELETE" => Some(Self::Delete),
            "ARROW_LEFT" => Some(Self::ArrowLeft),
            "ARROW_RIGHT" => Some(Self::ArrowRight),
            "ARROW_UP" => Some(Self::ArrowUp),
            "ARROW_DOWN" => Some(Self::ArrowDown),
            "HOME" => Some(Self::Home),
            "END" => Some(Self::End),
            "PAGE_UP" => Some(Self::PageUp),
            "PAGE_DOWN" => Some(Self::PageDown),
            "CONTROL" => Some(Self::Control),
            "SHIFT" => Some(Self::Shift),
            "ALT" => Some(Self::Alt),
            _ => None,
        }
    }

    /// Key name in the page engine's vocabulary.
    #[must_use]
    pub const fn page_name(self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Tab => "Tab",
            Self::Escape => "Escape",
            Self::Backspace => "Backspace",
            Self::Delete => "Delete",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Control => "Control",
            Self::Shift => "Shift",
            Self::Alt => "Alt",
        }
    }

    /// WebDriver private-use codepoint for the DOM backend.
    #[must_use]
    pub const fn dom_code(self) -> char {
        match self {
            Self::Enter => '\u{E007}',
            Self::Tab => '\u{E004}',
            Self::Escape => '\u{E00C}',
            Self::Backspace => '\u{E003}',
            Self::Delete => '\u{E017}',
            Self::ArrowLeft => '\u{E012}',
            Self::ArrowUp => '\u{E013}',
            Self::ArrowRight => '\u{E014}',
            Self::ArrowDown => '\u{E015}',
            Self::Home => '\u{E011}',
            Self::End => '\u{E010}',
            Self::PageUp => '\u{E00E}',
            Self::PageDown => '\u{E00F}',
            Self::Control => '\u{E009}',
            Self::Shift => '\u{E008}',
            Self::Alt => '\u{E00A}',
        }
    }
}

/// Encode one key for the DOM backend: a named key becomes its codepoint,
/// anything else is the literal string.
#[must_use]
pub fn dom_sequence(key: &str) -> String {
    match Key::from_name(key) {
        Some(k) => k.dom_code().to_string(),
        None => key.to_string(),
    }
}

/// Encode a chord for the DOM backend.
///
/// Each entry is mapped like [`dom_sequence`]; the NULL key is appended so
/// modifiers held during the chord are released.
#[must_use]
pub fn dom_chord(keys: &[&str]) -> String {
    let mut out: String = keys.iter().map(|k| dom_sequence(k)).collect();
    out.push(DOM_NULL);
    out
}

/// Encode one key for the page backend: a named key passes through under the
/// engine spelling, anything else is the literal string.
#[must_use]
pub fn page_key(key: &str) -> String {
    match Key::from_name(key) {
        Some(k) => k.page_name().to_string(),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parsing_tests {
        use super::*;

        #[test]
        fn canonical_names_parse() {
            assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
            assert_eq!(Key::from_name("PageDown"), Some(Key::PageDown));
            assert_eq!(Key::from_name("ArrowLeft"), Some(Key::ArrowLeft));
        }

        #[test]
        fn wire_spellings_parse() {
            assert_eq!(Key::from_name("BACK_SPACE"), Some(Key::Backspace));
            assert_eq!(Key::from_name("page up"), Some(Key::PageUp));
            assert_eq!(Key::from_name("arrow-down"), Some(Key::ArrowDown));
            assert_eq!(Key::from_name("enter"), Some(Key::Enter));
        }

        #[test]
        fn unknown_names_stay_literal() {
            assert_eq!(Key::from_name("F13"), None);
            assert_eq!(Key::from_name("a"), None);
            // lowercased "backspace" normalizes to BACKSPACE, which is not
            // the wire spelling BACK_SPACE
            assert_eq!(Key::from_name("backspace"), None);
        }

        #[test]
        fn surrounding_whitespace_is_trimmed() {
            assert_eq!(Key::from_name("  Tab "), Some(Key::Tab));
        }
    }

    mod encoding_tests {
        use super::*;

        #[test]
        fn named_keys_map_to_codepoints() {
            assert_eq!(dom_sequence("Enter"), "\u{E007}");
            assert_eq!(dom_sequence("Tab"), "\u{E004}");
            assert_eq!(dom_sequence("Delete"), "\u{E017}");
            assert_eq!(dom_sequence("Home"), "\u{E011}");
        }

        #[test]
        fn literals_pass_through() {
            assert_eq!(dom_sequence("hello"), "hello");
            assert_eq!(page_key("hello"), "hello");
        }

        #[test]
        fn chord_appends_null_terminator() {
            let chord = dom_chord(&["Control", "a"]);
            assert_eq!(chord, format!("\u{E009}a{DOM_NULL}"));
        }

        #[test]
        fn page_names_normalize() {
            assert_eq!(page_key("BACK_SPACE"), "Backspace");
            assert_eq!(page_key("Enter"), "Enter");
        }

        #[test]
        fn arrow_codes_are_distinct() {
            let codes = [
                Key::ArrowLeft.dom_code(),
                Key::ArrowUp.dom_code(),
                Key::ArrowRight.dom_code(),
                Key::ArrowDown.dom_code(),
            ];
            for (i, a) in codes.iter().enumerate() {
                for (j, b) in codes.iter().enumerate() {
                    assert_eq!(i == j, a == b);
                }
            }
        }
    }
}
