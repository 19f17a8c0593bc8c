//! Property tests for the lock document extractor.

use proptest::prelude::*;

use pubdiff::extract;

fn library_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,12}").unwrap()
}

fn version_string() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}").unwrap()
}

/// Pinned packages as (name, version) pairs with unique names
fn pinned_packages() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::hash_map(library_name(), version_string(), 1..8)
        .prop_map(|map| map.into_iter().collect())
}

/// Emit a well-formed lock document pinning the given packages
fn lock_document(packages: &[(String, String)]) -> String {
    let mut doc = String::from("packages:\n");
    for (name, version) in packages {
        doc.push_str(&format!(
            "  {name}:\n    dependency: \"direct main\"\n    description:\n      name: {name}\n      url: \"https://pub.dev\"\n    source: hosted\n    version: \"{version}\"\n"
        ));
    }
    doc
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: extraction is bounded by the tracked list - no record
    /// for a name the caller did not ask about, even when pinned.
    #[test]
    fn property_extract_is_bounded_by_tracked_list(
        packages in pinned_packages(),
        tracked in proptest::collection::vec(library_name(), 0..8),
    ) {
        let doc = lock_document(&packages);
        let snapshot = extract(&doc, &tracked).unwrap();

        prop_assert!(snapshot.len() <= tracked.len());
        for name in snapshot.names() {
            prop_assert!(tracked.iter().any(|t| t == name));
            prop_assert!(packages.iter().any(|(p, _)| p == name));
        }
    }

    /// PROPERTY: every tracked name that is pinned comes back with the
    /// pinned version, verbatim.
    #[test]
    fn property_extract_projects_pinned_versions(
        packages in pinned_packages(),
    ) {
        let doc = lock_document(&packages);
        let tracked: Vec<String> = packages.iter().map(|(n, _)| n.clone()).collect();

        let snapshot = extract(&doc, &tracked).unwrap();

        prop_assert_eq!(snapshot.len(), packages.len());
        for (name, version) in &packages {
            prop_assert_eq!(&snapshot.get(name).unwrap().version, version);
        }
    }

    /// PROPERTY: `extract` never panics, whatever the input text.
    #[test]
    fn property_extract_never_panics(
        text in ".{0,256}",
        tracked in proptest::collection::vec(library_name(), 0..4),
    ) {
        let _ = extract(&text, &tracked);
    }
}
