//! Route labels for request spans and metrics.

use uuid::Uuid;

/// Collapse identifiers in `path` so that labels stay low-cardinality:
/// UUID segments become `{uuid}` and product lookup terms become `{term}`.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return "/".to_owned();
    }

    let mut label = String::new();

    for (index, segment) in segments.iter().enumerate() {
        label.push('/');

        if Uuid::parse_str(segment).is_ok() {
            label.push_str("{uuid}");
        } else if index == 1 && segments.first() == Some(&"products") {
            label.push_str("{term}");
        } else {
            label.push_str(segment);
        }
    }

    label
}
