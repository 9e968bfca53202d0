//! Classification of draw.io style strings onto Visio masters.

use stencil_core::shape::MasterKind;

/// A substring rule: vertices whose style contains `needle` use `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    needle: String,
    kind: MasterKind,
}

impl StyleRule {
    pub fn new(needle: impl Into<String>, kind: MasterKind) -> Self {
        Self {
            needle: needle.into(),
            kind,
        }
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn kind(&self) -> MasterKind {
        self.kind
    }

    /// Returns true if the rule applies to `style`.
    pub fn matches(&self, style: &str) -> bool {
        style.contains(self.needle.as_str())
    }
}

/// An ordered rule table with a fallback kind.
///
/// The first matching rule wins. With the built-in table:
///
/// ```
/// # use stencil::mapping::StyleClassifier;
/// # use stencil_core::shape::MasterKind;
/// let classifier = StyleClassifier::default();
/// assert_eq!(classifier.classify("ellipse;whiteSpace=wrap;"), MasterKind::Ellipse);
/// assert_eq!(classifier.classify("rhombus;"), MasterKind::Rhombus);
/// assert_eq!(classifier.classify("rounded=1;"), MasterKind::Rectangle);
/// assert_eq!(classifier.classify(""), MasterKind::Rectangle);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleClassifier {
    rules: Vec<StyleRule>,
    fallback: MasterKind,
}

impl StyleClassifier {
    /// Creates a classifier that tries `extra` before the built-in rules.
    pub fn new(extra: Vec<StyleRule>) -> Self {
        let mut rules = extra;
        rules.extend(builtin_rules());
        Self {
            rules,
            fallback: MasterKind::Rectangle,
        }
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Returns the master kind for a vertex style.
    pub fn classify(&self, style: &str) -> MasterKind {
        self.rules
            .iter()
            .find(|rule| rule.matches(style))
            .map_or(self.fallback, StyleRule::kind)
    }
}

impl Default for StyleClassifier {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn builtin_rules() -> [StyleRule; 2] {
    [
        StyleRule::new("ellipse", MasterKind::Ellipse),
        StyleRule::new("rhombus", MasterKind::Rhombus),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_classification() {
        let classifier = StyleClassifier::default();

        assert_eq!(classifier.classify("ellipse"), MasterKind::Ellipse);
        assert_eq!(
            classifier.classify("shape=ellipse;perimeter=ellipsePerimeter;"),
            MasterKind::Ellipse
        );
        assert_eq!(classifier.classify("rhombus;whiteSpace=wrap;"), MasterKind::Rhombus);
        assert_eq!(classifier.classify("rounded=0;"), MasterKind::Rectangle);
        assert_eq!(classifier.classify(""), MasterKind::Rectangle);
    }

    #[test]
    fn test_ellipse_takes_precedence_over_rhombus() {
        let classifier = StyleClassifier::default();
        assert_eq!(classifier.classify("rhombus;ellipse;"), MasterKind::Ellipse);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let classifier = StyleClassifier::default();
        assert_eq!(classifier.classify("Ellipse;"), MasterKind::Rectangle);
    }

    #[test]
    fn test_extra_rules_come_first() {
        let classifier = StyleClassifier::new(vec![
            StyleRule::new("cylinder", MasterKind::Ellipse),
            StyleRule::new("ellipse", MasterKind::Rhombus),
        ]);

        assert_eq!(classifier.rules().len(), 4);
        assert_eq!(classifier.classify("shape=cylinder3;"), MasterKind::Ellipse);
        assert_eq!(classifier.classify("ellipse;"), MasterKind::Rhombus);
        assert_eq!(classifier.classify("rhombus;"), MasterKind::Rhombus);
        assert_eq!(classifier.classify("text;"), MasterKind::Rectangle);
    }
}
