use proptest::prelude::*;
use treeignore::{Pattern, PatternKind, PatternOrigin};

fn file_rule(raw: &str) -> Pattern {
    Pattern::compile(raw, PatternOrigin::FileRule)
}

proptest! {
    #[test]
    fn compiling_any_rule_is_total_and_deterministic(raw in "[a-z*?/\\\\\\[\\]{},!^.-]{1,16}") {
        let first = file_rule(&raw);
        let second = file_rule(&raw);
        prop_assert_eq!(first.matcher_source(), second.matcher_source());
        prop_assert_eq!(first.kind(), second.kind());
        for path in ["", "a", "a/b", "a/b/c.txt", ".hidden"] {
            prop_assert_eq!(first.matches(path), second.matches(path));
        }
    }

    #[test]
    fn compiling_any_custom_rule_is_total(raw in "\\PC{1,16}") {
        let pattern = Pattern::compile(&raw, PatternOrigin::CustomRule);
        prop_assert_eq!(pattern.kind(), PatternKind::Custom);
        prop_assert_eq!(pattern.raw(), raw.as_str());
    }

    #[test]
    fn simple_name_matches_only_the_final_segment(
        name in "[a-z][a-z0-9_]{0,8}",
        dirs in proptest::collection::vec("[a-z]{1,5}", 0..4),
    ) {
        let pattern = file_rule(&name);
        prop_assert_eq!(pattern.kind(), PatternKind::SimpleName);

        let mut path = dirs.join("/");
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(&name);
        prop_assert!(pattern.matches(&path));
        let longer = format!("{}x", path);
        prop_assert!(!pattern.matches(&longer));
    }

    #[test]
    fn extension_glob_floats_to_any_depth(
        stem in "[a-z]{1,6}",
        ext in "[a-z]{1,4}",
        dirs in proptest::collection::vec("[a-z]{1,5}", 0..4),
    ) {
        let pattern = file_rule(&format!("*.{}", ext));
        let mut path = dirs.join("/");
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(&format!("{}.{}", stem, ext));
        prop_assert!(pattern.matches(&path));
    }

    #[test]
    fn rooted_star_never_crosses_a_separator(
        prefix in "[a-z]{1,4}",
        rest in "[a-z]{0,4}",
        child in "[a-z]{1,4}",
    ) {
        let pattern = file_rule(&format!("/{}*", prefix));
        let top = format!("{}{}", prefix, rest);
        prop_assert!(pattern.matches(&top));
        let nested = format!("{}/{}", top, child);
        prop_assert!(!pattern.matches(&nested));
    }
}
