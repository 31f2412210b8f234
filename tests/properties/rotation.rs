//! Rotation invariants over arbitrary backup-set sizes and retain counts.

use std::fs::{self, File};
use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use stagehand::rotate_backups;
use tempfile::tempdir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn rotation_invariants_hold(count in 0usize..10, keep in 0usize..6) {
        let dir = tempdir().unwrap();
        let now = SystemTime::now();

        // File i is newer than file i-1.
        for i in 0..count {
            let path = dir.path().join(format!("app_{i}.zip"));
            let file = File::create(&path).unwrap();
            let age = Duration::from_secs(((count - i) * 60) as u64);
            file.set_modified(now - age).unwrap();
        }

        let pattern = format!("{}/app_*.zip", dir.path().display());
        let deleted = rotate_backups(&pattern, keep).unwrap();

        let mut survivors: Vec<usize> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| {
                let name = e.unwrap().file_name().to_string_lossy().into_owned();
                name.trim_start_matches("app_")
                    .trim_end_matches(".zip")
                    .parse()
                    .unwrap()
            })
            .collect();
        survivors.sort_unstable();

        // Retain bound: exactly min(count, keep) files remain.
        prop_assert_eq!(survivors.len(), count.min(keep));
        prop_assert_eq!(deleted.len(), count.saturating_sub(keep));

        // Survivors are the newest files.
        let expected: Vec<usize> = (count.saturating_sub(keep)..count).collect();
        prop_assert_eq!(survivors, expected);

        // Idempotence: nothing left to rotate.
        let again = rotate_backups(&pattern, keep).unwrap();
        prop_assert!(again.is_empty());
    }
}
