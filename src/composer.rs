//! File content composer
//!
//! Builds one synthetic JavaScript file from the pattern library:
//!
//! 1. Emit [`IMPORTS_PREAMBLE`], accounted as [`PREAMBLE_LINES`] lines.
//! 2. While the accounted line count is below the target, pick the pattern at
//!    `(seed + lines) mod PatternKind::COUNT`, generate it at position
//!    `lines`, append it followed by two blank lines, and advance by the
//!    fragment's line count plus [`SEPARATOR_LINES`].
//!
//! The composer stops only after crossing the target, so output is never
//! shorter than requested and never ends in a partial fragment.

use crate::fragment::SourceFragment;
use crate::patterns::PatternKind;

/// Fixed header emitted at the top of every generated file
pub const IMPORTS_PREAMBLE: &str = "// Auto-generated test file for benchmarking
const fs = require('fs');
const path = require('path');
const util = require('util');
const crypto = require('crypto');

";

/// Lines the preamble counts toward the target
pub const PREAMBLE_LINES: u64 = 5;

/// Lines accounted for the blank-line separator after each fragment
pub const SEPARATOR_LINES: u64 = 2;

const SEPARATOR: &str = "\n\n\n";

/// A composed file together with the bookkeeping that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    content: String,
    kinds: Vec<PatternKind>,
    accounted_lines: u64,
}

impl Composition {
    /// Compose content for `target_lines` using `seed`
    pub fn build(target_lines: u64, seed: u64) -> Self {
        let mut content = String::from(IMPORTS_PREAMBLE);
        let mut kinds = Vec::new();
        let mut lines = PREAMBLE_LINES;

        // Always emit at least one fragment, even for tiny targets
        loop {
            let kind = pattern_for(seed, lines);
            let fragment = kind.generate(lines, seed);
            lines += fragment_lines(&fragment);
            content.push_str(fragment.text());
            content.push_str(SEPARATOR);
            kinds.push(kind);

            if lines >= target_lines {
                break;
            }
        }

        Self {
            content,
            kinds,
            accounted_lines: lines,
        }
    }

    /// Generated file text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume the composition, returning the file text
    pub fn into_content(self) -> String {
        self.content
    }

    /// Pattern kinds in emission order
    pub fn kinds(&self) -> &[PatternKind] {
        &self.kinds
    }

    /// Accounted line count at the point the composer stopped
    pub fn accounted_lines(&self) -> u64 {
        self.accounted_lines
    }
}

/// Compose a synthetic file of at least `target_lines` lines
///
/// # Example
/// ```
/// use lintbench::composer::{compose, IMPORTS_PREAMBLE};
///
/// let content = compose(50, 0);
/// assert!(content.starts_with(IMPORTS_PREAMBLE));
/// assert!(content.lines().count() >= 50);
/// assert_eq!(content, compose(50, 0));
/// ```
pub fn compose(target_lines: u64, seed: u64) -> String {
    Composition::build(target_lines, seed).into_content()
}

/// Pattern chosen for a fragment starting at accounted line `lines`
pub fn pattern_for(seed: u64, lines: u64) -> PatternKind {
    let n = PatternKind::COUNT as u64;
    let index = (seed % n + lines % n) % n;
    PatternKind::from_index(index as usize)
}

fn fragment_lines(fragment: &SourceFragment) -> u64 {
    fragment.line_count() as u64 + SEPARATOR_LINES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_is_five_lines_plus_blank() {
        assert_eq!(IMPORTS_PREAMBLE.lines().count(), 6);
        assert_eq!(
            IMPORTS_PREAMBLE.lines().filter(|l| !l.is_empty()).count() as u64,
            PREAMBLE_LINES
        );
    }

    #[test]
    fn test_first_fragment_for_seed_zero() {
        // 0 + 5 = 5 -> object-manipulation at position 5
        let composition = Composition::build(1, 0);
        assert_eq!(composition.kinds(), &[PatternKind::ObjectManipulation]);
        assert!(composition.content().contains("const obj5 = {"));
    }

    #[test]
    fn test_tiny_target_emits_one_full_fragment() {
        for target in 0..=5 {
            let composition = Composition::build(target, 3);
            assert_eq!(composition.kinds().len(), 1);
            assert!(composition.accounted_lines() > PREAMBLE_LINES);
        }
    }

    #[test]
    fn test_rotation_follows_accounted_lines() {
        let composition = Composition::build(200, 0);
        let mut lines = PREAMBLE_LINES;
        for kind in composition.kinds() {
            assert_eq!(*kind, pattern_for(0, lines));
            lines += kind.generate(lines, 0).line_count() as u64 + SEPARATOR_LINES;
        }
        assert_eq!(lines, composition.accounted_lines());
    }

    #[test]
    fn test_stops_right_after_crossing_target() {
        let composition = Composition::build(200, 7);
        assert!(composition.accounted_lines() >= 200);

        let mut lines = PREAMBLE_LINES;
        let mut last_step = 0;
        for kind in composition.kinds() {
            last_step = kind.generate(lines, 7).line_count() as u64 + SEPARATOR_LINES;
            lines += last_step;
        }
        assert!(composition.accounted_lines() - last_step < 200);
    }

    #[test]
    fn test_newlines_cover_accounted_lines() {
        let composition = Composition::build(500, 11);
        let newlines = composition.content().matches('\n').count() as u64;
        assert_eq!(newlines, composition.accounted_lines() + 1);
    }

    #[test]
    fn test_output_line_count_at_least_target() {
        for target in [1, 5, 6, 50, 200, 1000] {
            for seed in 0..16 {
                let content = compose(target, seed);
                assert!(content.lines().count() as u64 >= target);
            }
        }
    }

    #[test]
    fn test_pattern_for_matches_plain_modulo() {
        assert_eq!(pattern_for(0, 5), PatternKind::from_index(5));
        assert_eq!(pattern_for(3, 5), PatternKind::from_index(0));
        assert_eq!(pattern_for(u64::MAX, u64::MAX), PatternKind::from_index(6));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(compose(50, 0), compose(50, 1));
    }
}
