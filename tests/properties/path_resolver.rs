//! Property tests for logical path resolution.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tempfile::TempDir;

use conduit::infrastructure::LocalFs;
use conduit::PathResolver;

fn stem() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,7}").unwrap()
}

fn extensions() -> Vec<String> {
    vec![".css".to_string(), ".js".to_string()]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Resolving an already-resolved path returns it unchanged.
    #[test]
    fn property_resolution_is_idempotent(
        stems in proptest::collection::btree_set(stem(), 1..5),
        in_second_root in proptest::collection::vec(any::<bool>(), 5),
    ) {
        let dir = TempDir::new().unwrap();
        let roots = vec![dir.path().join("one"), dir.path().join("two")];
        for root in &roots {
            std::fs::create_dir_all(root).unwrap();
        }
        for (stem, second) in stems.iter().zip(in_second_root.iter()) {
            let root = &roots[usize::from(*second)];
            std::fs::write(root.join(format!("{stem}.js")), "x();").unwrap();
        }

        let fs = LocalFs::new();
        let resolver = PathResolver::new(roots, extensions());
        for stem in &stems {
            let resolved = resolver.resolve(&fs, stem).unwrap();
            prop_assert!(resolved.is_absolute());
            prop_assert!(resolved.is_file());
            let again = resolver.resolve(&fs, resolved.to_str().unwrap()).unwrap();
            prop_assert_eq!(again, resolved);
        }
    }

    /// PROPERTY: The first root that has a match wins.
    #[test]
    fn property_earlier_root_wins(name in stem()) {
        let dir = TempDir::new().unwrap();
        let roots = vec![dir.path().join("one"), dir.path().join("two")];
        for root in &roots {
            std::fs::create_dir_all(root).unwrap();
            std::fs::write(root.join(format!("{name}.js")), "x();").unwrap();
        }

        let fs = LocalFs::new();
        let resolver = PathResolver::new(roots.clone(), extensions());
        let resolved = resolver.resolve(&fs, &name).unwrap();
        let first = roots[0].join(format!("{name}.js")).canonicalize().unwrap();
        prop_assert_eq!(resolved, first);
    }

    /// PROPERTY: Names that exist nowhere never resolve.
    #[test]
    fn property_missing_names_do_not_resolve(
        present in proptest::collection::btree_set(stem(), 0..4),
        missing in stem(),
    ) {
        prop_assume!(!present.contains(&missing));
        let dir = TempDir::new().unwrap();
        for name in &present {
            std::fs::write(dir.path().join(format!("{name}.css")), "a{}").unwrap();
        }

        let fs = LocalFs::new();
        let resolver = PathResolver::new(vec![dir.path().to_path_buf()], extensions());
        prop_assert!(resolver.resolve(&fs, &missing).is_none());

        let resolved: BTreeSet<_> = present
            .iter()
            .filter_map(|name| resolver.resolve(&fs, name))
            .collect();
        prop_assert_eq!(resolved.len(), present.len());
    }
}
