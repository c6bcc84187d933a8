//! Translation hook for user-visible labels.
//!
//! Label texts are English source strings; a [`Translator`] maps them to the
//! user's language. Placeholders (`{name}`, `{id}`) are substituted after
//! translation.

/// Maps English source strings to localized strings.
pub trait Translator {
    /// Translate a source string.
    fn translate(&self, text: &str) -> String;
}

/// Translator that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslator;

impl Translator for NullTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Translate `template` and substitute `{key}` placeholders.
pub(crate) fn format_translated(tx: &dyn Translator, template: &str, args: &[(&str, &str)]) -> String {
    let mut text = tx.translate(template);
    for (key, value) in args {
        text = text.replace(&format!("{{{key}}}"), value);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shouting;

    impl Translator for Shouting {
        fn translate(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    #[test]
    fn test_null_translator() {
        assert_eq!(NullTranslator.translate("Planet"), "Planet");
    }

    #[test]
    fn test_format_translated() {
        let text = format_translated(&NullTranslator, "{name} (#{id})", &[("name", "Ares"), ("id", "7")]);
        assert_eq!(text, "Ares (#7)");

        let text = format_translated(&Shouting, "ship {id}", &[("ID", "7")]);
        assert_eq!(text, "SHIP 7");
    }
}
