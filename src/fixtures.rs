//! Hand-authored pattern files
//!
//! Four fixed JavaScript files written next to the generated profiles, each
//! concentrating one theme so issue counts can be compared per style.

/// Directory name the pattern files are written into
pub const PATTERNS_DIR: &str = "patterns";

/// Theme a pattern file illustrates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTheme {
    /// Widespread common mistakes
    CommonMistakes,
    /// Modern syntax idioms
    ModernSyntax,
    /// Legacy syntax idioms
    LegacySyntax,
    /// Larger composite async/data-processing example
    ComplexAsync,
}

/// A fixed pattern file with embedded content
#[derive(Debug, Clone, Copy)]
pub struct PatternFile {
    pub file_name: &'static str,
    pub theme: PatternTheme,
    pub content: &'static str,
}

/// All pattern files in write order
pub const PATTERN_FILES: [PatternFile; 4] = [
    PatternFile {
        file_name: "linting-issues.js",
        theme: PatternTheme::CommonMistakes,
        content: include_str!("../assets/patterns/linting-issues.js"),
    },
    PatternFile {
        file_name: "modern-js.js",
        theme: PatternTheme::ModernSyntax,
        content: include_str!("../assets/patterns/modern-js.js"),
    },
    PatternFile {
        file_name: "legacy-js.js",
        theme: PatternTheme::LegacySyntax,
        content: include_str!("../assets/patterns/legacy-js.js"),
    },
    PatternFile {
        file_name: "complex-processing.js",
        theme: PatternTheme::ComplexAsync,
        content: include_str!("../assets/patterns/complex-processing.js"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_four_distinct_files() {
        let names: HashSet<_> = PATTERN_FILES.iter().map(|f| f.file_name).collect();
        assert_eq!(names.len(), 4);
        assert!(PATTERN_FILES.iter().all(|f| f.file_name.ends_with(".js")));
    }

    #[test]
    fn test_one_file_per_theme() {
        let themes: Vec<_> = PATTERN_FILES.iter().map(|f| f.theme).collect();
        assert_eq!(
            themes,
            vec![
                PatternTheme::CommonMistakes,
                PatternTheme::ModernSyntax,
                PatternTheme::LegacySyntax,
                PatternTheme::ComplexAsync,
            ]
        );
    }

    #[test]
    fn test_common_mistakes_content() {
        let content = PATTERN_FILES[0].content;
        assert!(content.starts_with("// File with common linting issues"));
        assert!(content.contains("if(a==b){"));
        assert!(content.contains("eval(\"console.log('eval is evil')\");"));
    }

    #[test]
    fn test_modern_uses_template_literals() {
        let content = PATTERN_FILES[1].content;
        assert!(content.contains("#privateField = 'private';"));
        assert!(content.contains("fetch(`/api/users/${userId}`)"));
    }

    #[test]
    fn test_legacy_has_implicit_global() {
        let content = PATTERN_FILES[2].content;
        assert!(content.contains("implicitGlobal = 'This creates a global';"));
    }

    #[test]
    fn test_complex_is_largest() {
        let largest = PATTERN_FILES
            .iter()
            .max_by_key(|f| f.content.lines().count())
            .map(|f| f.theme);
        assert_eq!(largest, Some(PatternTheme::ComplexAsync));
    }
}
