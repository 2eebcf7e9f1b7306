//! Property tests for manifest persistence and naming.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tempfile::TempDir;

use conduit::domain::ports::ManifestRepository;
use conduit::domain::value_objects::{file_extensions, file_stem_all};
use conduit::infrastructure::JsonManifestRepository;
use conduit::Manifest;

fn asset_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("([a-z]{1,6}[/\\\\])?[a-z][a-z0-9_-]{0,7}\\.(js|css|png)")
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A saved manifest loads back with separator-normalized keys.
    #[test]
    fn property_manifest_survives_fresh_load(
        entries in proptest::collection::btree_map(asset_name(), "[a-z0-9./-]{1,20}", 0..8),
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets/.manifest.json");

        let mut manifest = Manifest::new();
        for (name, published) in &entries {
            manifest.insert(name, published.clone());
        }

        let repo = JsonManifestRepository::new();
        repo.save(&manifest, &path).unwrap();
        let loaded = repo.load(&path).unwrap();

        let expected: BTreeMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.replace('\\', "/"), v.clone()))
            .collect();
        let actual: BTreeMap<String, String> = loaded
            .entries()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// PROPERTY: Stem and extensions reassemble a multi-extension file name.
    #[test]
    fn property_stem_and_extensions_rebuild_name(
        stem in "[a-z][a-z0-9_-]{0,7}",
        exts in proptest::collection::vec("[a-z]{1,4}", 0..3),
    ) {
        let mut name = stem.clone();
        for ext in &exts {
            name.push('.');
            name.push_str(ext);
        }

        prop_assert_eq!(file_stem_all(&name), stem.as_str());
        let rebuilt = format!("{}{}", file_stem_all(&name), file_extensions(&name).concat());
        prop_assert_eq!(rebuilt, name);
    }
}
