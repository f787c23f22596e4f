//! Identifier case conversion.
//!
//! Every generated file name, PHP class, namespace and environment key is
//! derived from the user's `vendor/name` slug through these functions.
//!
//! | Function          | `"plugin-name"` | `"PluginName"`  | `"HTTPServer"`  |
//! |-------------------|-----------------|-----------------|-----------------|
//! | [`to_pascal_case`] | `PluginName`    | `Pluginname`    | `Httpserver`    |
//! | [`to_snake_case`]  | `plugin-name`   | `plugin_name`   | `http_server`   |
//! | [`to_kebab_case`]  | `plugin-name`   | `plugin-name`   | `http-server`   |
//!
//! Pascal casing works on separator-delimited slugs: each segment is
//! capitalised and the rest of the segment lower-cased, so already-cased
//! input is flattened. Snake and kebab casing work on already-cased text and
//! leave separators they do not recognise alone. The conversions are total
//! and not reversible (acronyms collapse).

use std::sync::LazyLock;

use regex::Regex;

// `(.)([A-Z][a-z]+)`: a capitalised word preceded by anything.
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("static pattern is valid"));

// `([a-z0-9])([A-Z])`: a lower-case letter or digit followed by a capital.
static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static pattern is valid"));

/// Convert a `-`/`_` separated slug to `PascalCase`.
///
/// Each segment has its first character upper-cased and the remainder
/// lower-cased. Empty segments (`a--b`, leading `_`) contribute nothing.
pub fn to_pascal_case(input: &str) -> String {
    input
        .split(['-', '_'])
        .map(capitalize)
        .collect()
}

/// Same algorithm as [`to_pascal_case`]; used for PHP vendor namespaces.
pub fn to_studly_case(input: &str) -> String {
    to_pascal_case(input)
}

/// Convert cased text to `snake_case`.
///
/// Two passes insert `_` at word boundaries, then the result is
/// lower-cased: `PluginName` → `plugin_name`, `HTTPServer` → `http_server`.
pub fn to_snake_case(input: &str) -> String {
    let words = WORD_BOUNDARY.replace_all(input, "${1}_${2}");
    CASE_BOUNDARY
        .replace_all(&words, "${1}_${2}")
        .to_lowercase()
}

/// [`to_snake_case`] with `_` replaced by `-`.
pub fn to_kebab_case(input: &str) -> String {
    to_snake_case(input).replace('_', "-")
}

/// Normalise a Composer package slug: lower-case, `_` becomes `-`.
pub fn normalize_slug(input: &str) -> String {
    input.to_lowercase().replace('_', "-")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_from_slugs() {
        assert_eq!(to_pascal_case("plugin-name"), "PluginName");
        assert_eq!(to_pascal_case("my_cool-package"), "MyCoolPackage");
        assert_eq!(to_pascal_case("widgets"), "Widgets");
    }

    #[test]
    fn pascal_case_lowers_segment_tails() {
        assert_eq!(to_pascal_case("ACME"), "Acme");
        assert_eq!(to_pascal_case("PluginName"), "Pluginname");
    }

    #[test]
    fn pascal_case_skips_empty_segments() {
        assert_eq!(to_pascal_case("a--b"), "AB");
        assert_eq!(to_pascal_case("_leading"), "Leading");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn pascal_case_leaves_non_letters() {
        assert_eq!(to_pascal_case("2fa-auth"), "2faAuth");
    }

    #[test]
    fn studly_matches_pascal() {
        assert_eq!(to_studly_case("acme-corp"), "AcmeCorp");
        assert_eq!(to_studly_case("acme-corp"), to_pascal_case("acme-corp"));
    }

    #[test]
    fn snake_case_boundaries() {
        assert_eq!(to_snake_case("PluginName"), "plugin_name");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("getHTTPResponseCode"), "get_http_response_code");
        assert_eq!(to_snake_case("Version2Api"), "version2_api");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn snake_case_keeps_unknown_separators() {
        assert_eq!(to_snake_case("filament-blog"), "filament-blog");
    }

    #[test]
    fn kebab_case_from_cased_text() {
        assert_eq!(to_kebab_case("PluginName"), "plugin-name");
        assert_eq!(to_kebab_case("HTTPServer"), "http-server");
    }

    #[test]
    fn kebab_of_pascal_round_trips_lowercase_slugs() {
        for slug in ["plugin-name", "a-b-c", "widgets", "filament-blog-posts", "my_pkg"] {
            let expected = slug.replace('_', "-");
            assert_eq!(to_kebab_case(&to_pascal_case(slug)), expected, "slug {slug}");
        }
    }

    #[test]
    fn normalize_slug_lowercases_and_hyphenates() {
        assert_eq!(normalize_slug("My_Package"), "my-package");
        assert_eq!(normalize_slug("already-fine"), "already-fine");
    }
}
