//! Property-based tests over generated PHP sources.
//!
//! Generates files from a small grammar of statements (bare calls,
//! qualified calls, imports, vendor imports, user calls, method calls)
//! spread over zero, one, or two namespaces, and checks the pipeline's
//! global guarantees: fixes converge in one pass, analysis is
//! deterministic, and clean files are never rewritten.

use proptest::prelude::*;

use phlint::{analyze, AnalyzeOptions};

const NAMES: &[&str] = &["strlen", "count", "implode", "sprintf", "array_map"];

#[derive(Debug, Clone)]
enum Stmt {
    Bare(&'static str),
    Qualified(&'static str),
    Import(&'static str),
    VendorImport(&'static str),
    UserCall(String),
    MethodCall(&'static str),
}

impl Stmt {
    fn render(&self, out: &mut String) {
        match self {
            Stmt::Bare(name) => out.push_str(&format!("{name}($x);\n")),
            Stmt::Qualified(name) => out.push_str(&format!("\\{name}($x);\n")),
            Stmt::Import(name) => out.push_str(&format!("use function {name};\n")),
            Stmt::VendorImport(name) => {
                out.push_str(&format!("use function Vendor\\Lib\\{name};\n"))
            }
            Stmt::UserCall(name) => out.push_str(&format!("{name}($x);\n")),
            Stmt::MethodCall(name) => out.push_str(&format!("$obj->{name}($x);\n")),
        }
    }
}

fn arb_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NAMES)
}

fn arb_stmt() -> impl Strategy<Value = Stmt> {
    prop_oneof![
        3 => arb_name().prop_map(Stmt::Bare),
        3 => arb_name().prop_map(Stmt::Qualified),
        2 => arb_name().prop_map(Stmt::Import),
        1 => arb_name().prop_map(Stmt::VendorImport),
        1 => "[a-z][a-z0-9_]{2,8}".prop_map(Stmt::UserCall),
        1 => arb_name().prop_map(Stmt::MethodCall),
    ]
}

/// A whole file: statements in the global scope, optionally followed by
/// one or two namespace blocks with their own statements.
fn arb_file() -> impl Strategy<Value = String> {
    let stmts = prop::collection::vec(arb_stmt(), 0..6);
    let namespaces = prop::collection::vec(
        ("[A-Z][a-zA-Z0-9]{1,8}", prop::collection::vec(arb_stmt(), 0..6)),
        0..3,
    );
    (stmts, namespaces).prop_map(|(global, namespaces)| {
        let mut out = String::from("<?php\n");
        for stmt in &global {
            stmt.render(&mut out);
        }
        for (name, stmts) in &namespaces {
            out.push_str(&format!("namespace {name};\n"));
            for stmt in stmts {
                stmt.render(&mut out);
            }
        }
        out
    })
}

fn arb_exclude() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(NAMES.to_vec(), 0..=2)
}

proptest! {
    /// One fix pass reaches a fixed point: re-analyzing the rewritten
    /// output plans nothing further.
    #[test]
    fn test_fixes_converge_in_one_pass(source in arb_file(), exclude in arb_exclude()) {
        let options = AnalyzeOptions::with_exclude(exclude);
        let first = analyze(&source, &options);

        if let Some(rewritten) = &first.rewritten {
            let second = analyze(rewritten, &options);
            prop_assert_eq!(
                second.diagnostics.iter().filter(|d| d.fixable).count(),
                0,
                "second pass still has fixable diagnostics\nfirst:  {:?}\nsecond: {:?}\nrewritten:\n{}",
                first.diagnostics, second.diagnostics, rewritten
            );
            prop_assert!(second.rewritten.is_none());
        }
    }

    /// Same input, same output: no hidden state leaks between runs.
    #[test]
    fn test_analysis_is_deterministic(source in arb_file(), exclude in arb_exclude()) {
        let options = AnalyzeOptions::with_exclude(exclude);
        let a = analyze(&source, &options);
        let b = analyze(&source, &options);

        prop_assert_eq!(&a.rewritten, &b.rewritten);
        prop_assert_eq!(a.diagnostics.len(), b.diagnostics.len());
        for (x, y) in a.diagnostics.iter().zip(b.diagnostics.iter()) {
            prop_assert_eq!(x.code, y.code);
            prop_assert_eq!(x.range, y.range);
        }
    }

    /// A file with no diagnostics is never rewritten.
    #[test]
    fn test_clean_files_are_untouched(source in arb_file(), exclude in arb_exclude()) {
        let options = AnalyzeOptions::with_exclude(exclude);
        let analysis = analyze(&source, &options);
        if analysis.diagnostics.is_empty() {
            prop_assert!(analysis.rewritten.is_none());
        }
    }

    /// Every fixable diagnostic implies a rewrite, and the rewrite differs
    /// from the input.
    #[test]
    fn test_fixable_diagnostics_imply_rewrite(source in arb_file(), exclude in arb_exclude()) {
        let options = AnalyzeOptions::with_exclude(exclude);
        let analysis = analyze(&source, &options);
        if analysis.diagnostics.iter().any(|d| d.fixable) {
            let rewritten = analysis.rewritten.as_deref();
            prop_assert!(rewritten.is_some());
            prop_assert_ne!(rewritten, Some(source.as_str()));
        }
    }
}
