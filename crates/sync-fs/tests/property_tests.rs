use proptest::prelude::*;
use std::path::Path;
use sync_fs::RelPath;

proptest! {
    #[test]
    fn accepted_paths_stay_under_root(s in "\\PC*") {
        // Whatever the input, an accepted RelPath must resolve below the root.
        if let Ok(path) = RelPath::new(&s) {
            let root = Path::new("/replica-root");
            let resolved = path.resolve(root);
            prop_assert!(resolved.starts_with(root));
            prop_assert!(!path.as_path().components().any(|c| matches!(
                c,
                std::path::Component::ParentDir
                    | std::path::Component::RootDir
                    | std::path::Component::Prefix(_)
            )));
        }
    }

    #[test]
    fn parent_is_an_ancestor(parts in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let path = RelPath::new(parts.join("/")).unwrap();
        let parent = path.parent().unwrap();

        prop_assert!(parent.is_ancestor_of(&path));
        prop_assert_eq!(parent.depth() + 1, path.depth());
    }
}
