#![no_main]

use libfuzzer_sys::fuzz_target;
use lintbench::diagnostics::{parse_report, ToolFormat};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Must never panic, whatever the linter printed
        let eslint = parse_report(ToolFormat::EslintJson, input);
        let oxlint = parse_report(ToolFormat::OxlintJson, input);
        assert_eq!(eslint.is_structured(), oxlint.is_structured());
    }
});
