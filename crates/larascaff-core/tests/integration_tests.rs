//! Integration tests for larascaff-core's public API.

use larascaff_core::domain::{EditMode, ManifestEdit, to_pretty_json};
use larascaff_core::prelude::*;

#[test]
fn linking_twice_changes_the_document_once() {
    let package = PackageId::parse("acme/widgets").unwrap();
    let mut manifest = Manifest::parse("{\n    \"name\": \"laravel/laravel\"\n}\n").unwrap();

    assert!(manifest.add_path_dependency(&package).unwrap());
    let first = manifest.to_pretty_string().unwrap();

    assert!(!manifest.add_path_dependency(&package).unwrap());
    assert_eq!(manifest.to_pretty_string().unwrap(), first);

    assert!(first.starts_with("{\n    \"name\": \"laravel/laravel\",\n    \"repositories\""));
    assert!(first.ends_with("}\n"));
}

#[test]
fn insert_edits_respect_existing_values_and_overwrites_replace_them() {
    let mut manifest =
        Manifest::parse(r#"{"require-dev": {"orchestra/testbench": "^9.0"}}"#).unwrap();

    let insert = ManifestEdit::require_dev("orchestra/testbench", "^10.0", EditMode::Insert);
    assert!(!manifest.apply(&insert).unwrap());

    let overwrite = ManifestEdit::require_dev("orchestra/testbench", "^10.0", EditMode::Overwrite);
    assert!(manifest.apply(&overwrite).unwrap());
    assert_eq!(
        manifest.get("require-dev").unwrap()["orchestra/testbench"],
        "^10.0"
    );
}

#[test]
fn render_context_leaves_foreign_placeholders_alone() {
    let id = PackageId::parse("acme/widgets").unwrap();
    let ctx = RenderContext::new(PackageNames::derive(&id), Authorship::placeholder(2026));

    let blade = "{{ __('{{PACKAGE}}::messages.title') }} ${{ matrix.php }}";
    assert_eq!(
        ctx.render(blade),
        "{{ __('widgets::messages.title') }} ${{ matrix.php }}"
    );
}

#[test]
fn pretty_json_uses_the_requested_indent() {
    let value = serde_json::json!({"private": true});
    assert_eq!(to_pretty_json(&value, b"  ").unwrap(), "{\n  \"private\": true\n}");
}
