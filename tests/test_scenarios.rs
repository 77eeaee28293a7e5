//! End-to-end scenarios through the public `analyze` entry point.
//!
//! Each case feeds a complete PHP source file through the full pipeline
//! and checks the reported diagnostics and the rewritten text.

use rstest::rstest;

use phlint::{analyze, AnalyzeOptions, DiagnosticCode};

fn run(source: &str) -> phlint::Analysis {
    analyze(source, &AnalyzeOptions::new())
}

fn run_excluding(source: &str, exclude: &[&str]) -> phlint::Analysis {
    analyze(source, &AnalyzeOptions::with_exclude(exclude.iter().copied()))
}

#[test]
fn test_global_scope_qualifier_removed() {
    let analysis = run("<?php\n\\strlen($x);\n");

    assert_eq!(analysis.diagnostics.len(), 1);
    let d = &analysis.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::NoNamespace);
    assert!(d.fixable);
    assert!(d.message.contains("does not have defined namespace"));
    assert_eq!(analysis.rewritten.as_deref(), Some("<?php\nstrlen($x);\n"));
}

#[test]
fn test_namespaced_bare_call_gets_import() {
    let analysis = run("<?php\nnamespace App;\nstrlen($x);\n");

    assert_eq!(analysis.diagnostics.len(), 1);
    let d = &analysis.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::Import);
    assert_eq!(d.message.as_ref(), "PHP internal function \"strlen\" must be imported");
    assert_eq!(
        analysis.rewritten.as_deref(),
        Some("<?php\nnamespace App;\nuse function strlen;\nstrlen($x);\n")
    );
}

#[test]
fn test_redundant_qualifier_removed_import_kept() {
    let analysis = run("<?php\nnamespace App;\nuse function strlen;\n\\strlen($x);\n");

    assert_eq!(analysis.diagnostics.len(), 1);
    assert_eq!(analysis.diagnostics[0].code, DiagnosticCode::RedundantFqn);
    assert_eq!(
        analysis.rewritten.as_deref(),
        Some("<?php\nnamespace App;\nuse function strlen;\nstrlen($x);\n")
    );
}

#[test]
fn test_excluded_import_statement_deleted() {
    let analysis = run_excluding(
        "<?php\nnamespace App;\nuse function strlen;\nstrlen($x);\n",
        &["strlen"],
    );

    assert_eq!(analysis.diagnostics.len(), 1);
    let d = &analysis.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::ExcludeImported);
    assert_eq!(d.message.as_ref(), "Function strlen cannot be imported");
    assert_eq!(
        analysis.rewritten.as_deref(),
        Some("<?php\nnamespace App;\nstrlen($x);\n")
    );
}

#[test]
fn test_method_call_is_not_flagged() {
    let analysis = run("<?php\nnamespace App;\n$obj->strlen($x);\n");
    assert!(analysis.is_clean());
    assert_eq!(analysis.rewritten, None);
}

#[rstest]
#[case("<?php\nnamespace App;\nStr::strlen($x);\n")]
#[case("<?php\nnamespace App;\n$obj?->strlen($x);\n")]
#[case("<?php\nnamespace App;\nfunction strlen($x) { return 1; }\n")]
#[case("<?php\nnamespace App;\n$a = new strlen($x);\n")]
#[case("<?php\nnamespace App;\nHelpers\\strlen($x);\n")]
fn test_non_call_positions_are_clean(#[case] source: &str) {
    let analysis = run(source);
    assert!(analysis.is_clean(), "expected clean: {source:?}");
}

#[test]
fn test_qualified_without_import_gets_both_edits() {
    let analysis = run("<?php\nnamespace App;\n\\strlen($x);\n");

    assert_eq!(analysis.diagnostics.len(), 1);
    assert_eq!(analysis.diagnostics[0].code, DiagnosticCode::ImportFqn);
    assert_eq!(
        analysis.rewritten.as_deref(),
        Some("<?php\nnamespace App;\nuse function strlen;\nstrlen($x);\n")
    );
}

#[test]
fn test_exclusion_beats_import_planning() {
    // A qualified call to an excluded name loses its qualifier but never
    // gains an import.
    let analysis = run_excluding("<?php\nnamespace App;\n\\strlen($x);\n", &["strlen"]);

    assert_eq!(analysis.diagnostics.len(), 1);
    assert_eq!(
        analysis.diagnostics[0].code,
        DiagnosticCode::ExcludeRedundantFqn
    );
    let rewritten = analysis.rewritten.as_deref().unwrap();
    assert!(!rewritten.contains("use function"));
    assert!(rewritten.contains("strlen($x)"));
}

#[test]
fn test_excluded_bare_call_is_compliant() {
    let analysis = run_excluding("<?php\nnamespace App;\nstrlen($x);\n", &["strlen"]);
    assert!(analysis.is_clean());
    assert_eq!(analysis.rewritten, None);
}

#[test]
fn test_scope_isolation_between_namespaces() {
    let source = "<?php\nnamespace A;\nuse function strlen;\nstrlen($x);\nnamespace B;\nstrlen($y);\n";
    let analysis = run(source);

    // A's import does not cover B.
    assert_eq!(analysis.diagnostics.len(), 1);
    assert_eq!(analysis.diagnostics[0].code, DiagnosticCode::Import);
    assert_eq!(
        analysis.rewritten.as_deref(),
        Some("<?php\nnamespace A;\nuse function strlen;\nstrlen($x);\nnamespace B;\nuse function strlen;\nstrlen($y);\n")
    );
}

#[test]
fn test_braced_namespace_insertion_after_brace() {
    let analysis = run("<?php\nnamespace App {\n    strlen($x);\n}\n");

    assert_eq!(
        analysis.rewritten.as_deref(),
        Some("<?php\nnamespace App {\nuse function strlen;\n    strlen($x);\n}\n")
    );
}

#[test]
fn test_import_block_sorted_across_multiple_calls() {
    let analysis = run("<?php\nnamespace App;\nstrlen($a);\ncount($b);\nimplode($c);\n");

    let rewritten = analysis.rewritten.as_deref().unwrap();
    let count_at = rewritten.find("use function count;").unwrap();
    let implode_at = rewritten.find("use function implode;").unwrap();
    let strlen_at = rewritten.find("use function strlen;").unwrap();
    assert!(count_at < implode_at && implode_at < strlen_at);
}

#[test]
fn test_mixed_fixes_in_one_scope() {
    let analysis = run(
        "<?php\nnamespace App;\nuse function count;\nstrlen($a);\n\\count($b);\n\\implode($c);\n",
    );

    let codes: Vec<_> = analysis.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::Import,
            DiagnosticCode::RedundantFqn,
            DiagnosticCode::ImportFqn,
        ]
    );
    assert_eq!(
        analysis.rewritten.as_deref(),
        Some("<?php\nnamespace App;\nuse function implode;\nuse function strlen;\nuse function count;\nstrlen($a);\ncount($b);\nimplode($c);\n")
    );
}

#[test]
fn test_aliased_import_does_not_cover_original_name() {
    // `use function strlen as len;` binds `len`, so a bare `strlen(...)`
    // still needs its own import.
    let analysis = run("<?php\nnamespace App;\nuse function strlen as len;\nstrlen($x);\n");

    assert_eq!(analysis.diagnostics.len(), 1);
    assert_eq!(analysis.diagnostics[0].code, DiagnosticCode::Import);
}

#[test]
fn test_vendor_import_shadows_builtin() {
    // The short name resolves to the vendor function, so neither the bare
    // call nor the import is a violation.
    let analysis = run("<?php\nnamespace App;\nuse function Vendor\\strlen;\nstrlen($x);\n");
    assert!(analysis.is_clean());
}

#[test]
fn test_case_insensitive_call_and_import() {
    let analysis = run("<?php\nnamespace App;\nuse function StrLen;\nSTRLEN($x);\n");
    assert!(analysis.is_clean());
}

#[test]
fn test_unterminated_string_reports_lex_error() {
    let analysis = run("<?php\nnamespace App;\n$s = \"oops;\n");

    assert_eq!(analysis.diagnostics.len(), 1);
    let d = &analysis.diagnostics[0];
    assert_eq!(d.code, DiagnosticCode::LexError);
    assert!(!d.fixable);
    assert_eq!(analysis.rewritten, None);
}

#[test]
fn test_positions_are_one_indexed_in_display() {
    let analysis = run("<?php\nnamespace App;\nstrlen($x);\n");
    let position = analysis.diagnostics[0].position;
    // `strlen` starts line 3 (0-indexed 2), column 1 (0-indexed 0).
    assert_eq!(position.line, 2);
    assert_eq!(position.col, 0);
    assert_eq!(position.to_string(), "3:1");
}

#[rstest]
#[case(DiagnosticCode::Import, "Import")]
#[case(DiagnosticCode::ImportFqn, "ImportFQN")]
#[case(DiagnosticCode::RedundantFqn, "RedundantFQN")]
#[case(DiagnosticCode::ExcludeRedundantFqn, "ExcludeRedundantFQN")]
#[case(DiagnosticCode::ExcludeImported, "ExcludeImported")]
#[case(DiagnosticCode::NoNamespace, "NoNamespace")]
fn test_code_names(#[case] code: DiagnosticCode, #[case] expected: &str) {
    assert_eq!(code.as_str(), expected);
}

#[test]
fn test_fix_is_idempotent_per_scenario() {
    let sources = [
        "<?php\n\\strlen($x);\n",
        "<?php\nnamespace App;\nstrlen($x);\n",
        "<?php\nnamespace App;\nuse function strlen;\n\\strlen($x);\n",
        "<?php\nnamespace A;\nstrlen($x);\nnamespace B;\n\\count($y);\n",
    ];
    for source in sources {
        let first = run(source);
        let rewritten = first.rewritten.as_deref().unwrap_or(source);
        let second = run(rewritten);
        assert!(
            second.rewritten.is_none(),
            "second pass still rewrites {source:?}: {:?}",
            second.diagnostics
        );
    }
}
