//! Result URL normalization.

use docsearch::normalize_result_url;
use docsearch::util::url::join_base_url;
use proptest::prelude::*;

fn path_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z0-9-]{1,8}", 1..4),
        prop::sample::select(vec!["", ".html", ".html.html", "/"]),
    )
        .prop_map(|(segments, suffix)| format!("/{}{}", segments.join("/"), suffix))
}

fn tail_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "#usage", "#api.html", "?tab=code", "?v=1#demo"]).prop_map(str::to_string)
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(path in path_strategy(), tail in tail_strategy()) {
        let url = format!("{}{}", path, tail);
        let once = normalize_result_url(&url);
        prop_assert_eq!(normalize_result_url(&once), once);
    }

    #[test]
    fn prop_normalized_path_has_no_html_suffix(path in path_strategy(), tail in tail_strategy()) {
        let once = normalize_result_url(&format!("{}{}", path, tail));
        let path_part = once.split(['#', '?']).next().unwrap_or_default();
        prop_assert!(!path_part.ends_with(".html"));
    }

    #[test]
    fn prop_tail_is_preserved(path in path_strategy(), tail in tail_strategy()) {
        let once = normalize_result_url(&format!("{}{}", path, tail));
        prop_assert!(once.ends_with(&tail));
    }

    #[test]
    fn prop_join_root_base_is_identity(path in path_strategy()) {
        prop_assert_eq!(join_base_url("/", &path), path.clone());
        prop_assert_eq!(join_base_url("", &path), path);
    }

    #[test]
    fn prop_join_base_is_idempotent(path in path_strategy()) {
        let once = join_base_url("/ui", &path);
        prop_assert_eq!(join_base_url("/ui", &once), once.clone());
        prop_assert!(once == "/ui" || once.starts_with("/ui/"));
    }
}

#[test]
fn test_examples() {
    assert_eq!(normalize_result_url("/docs/button.html"), "/docs/button");
    assert_eq!(normalize_result_url("/docs/button.html#usage"), "/docs/button#usage");
}
