//! Name conversions shared by the type table and the field classifier.

use protoschema_core::SymbolicName;

/// Upper-case the first letter and every letter following `_`, dropping
/// the underscores: `foo_bar` becomes `FooBar`.
pub(crate) fn camelize(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut upper_next = true;
    for c in segment.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// JSON name protoc derives for a field when no `json_name` is given.
pub(crate) fn default_json_name(field_name: &str) -> String {
    let mut out = String::with_capacity(field_name.len());
    let mut upper_next = false;
    for c in field_name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Leading symbolic segments for every type declared in a file.
///
/// A module-prefix override is used verbatim; otherwise each package
/// segment is camelized.
pub(crate) fn prefix_segments(package: &str, module_prefix: Option<&str>) -> Vec<String> {
    match module_prefix {
        Some(prefix) => split_non_empty(prefix).map(str::to_string).collect(),
        None => split_non_empty(package).map(camelize).collect(),
    }
}

/// Symbolic name of a type declared under `prefix` at nesting `path`.
pub(crate) fn symbol_for(prefix: &[String], path: &[&str]) -> SymbolicName {
    let mut segments = prefix.to_vec();
    segments.extend(path.iter().map(|s| camelize(s)));
    SymbolicName::new(segments)
}

fn split_non_empty(text: &str) -> impl Iterator<Item = &str> {
    text.split('.').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camelize_handles_snake_and_camel_input() {
        assert_eq!(camelize("foo_bar"), "FooBar");
        assert_eq!(camelize("b_c"), "BC");
        assert_eq!(camelize("Outer"), "Outer");
        assert_eq!(camelize("HTTPRequest"), "HTTPRequest");
        assert_eq!(camelize("v1"), "V1");
    }

    #[test]
    fn json_name_matches_protoc_rule() {
        assert_eq!(default_json_name("foo_bar"), "fooBar");
        assert_eq!(default_json_name("foo"), "foo");
        assert_eq!(default_json_name("foo_bar_baz"), "fooBarBaz");
        assert_eq!(default_json_name("_foo"), "Foo");
    }

    #[test]
    fn prefix_override_replaces_package_segments() {
        assert_eq!(prefix_segments("acme.api_v1", None), ["Acme", "ApiV1"]);
        assert_eq!(prefix_segments("acme.api_v1", Some("My.App")), ["My", "App"]);
        assert!(prefix_segments("", None).is_empty());
    }

    #[test]
    fn symbol_appends_camelized_path() {
        let prefix = prefix_segments("pkg", None);
        assert_eq!(symbol_for(&prefix, &["Outer", "inner_msg"]).to_string(), "Pkg.Outer.InnerMsg");
    }
}
