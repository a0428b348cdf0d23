use std::io::Write;

use docfresh_fs::{StageOptions, StagedFile};
use tempfile::tempdir;

#[test]
fn test_commit_replaces_existing_destination() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("cached_0123abcd.pdf");
    std::fs::write(&dest, "stale").unwrap();

    let (staged, mut file) = StagedFile::create(&dest, StageOptions::new()).unwrap();
    file.write_all(b"fresh").unwrap();
    drop(file);
    staged.commit().unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"fresh");
}

#[test]
fn test_abandoned_stage_leaves_directory_clean() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("cached_0123abcd.pdf");

    {
        let (_staged, mut file) = StagedFile::create(&dest, StageOptions::new()).unwrap();
        file.write_all(&[0u8; 4096]).unwrap();
    }

    let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_custom_prefix_and_suffix() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("doc.pdf");
    let options = StageOptions::new().prefix("~").suffix(".download");

    let (staged, _file) = StagedFile::create(&dest, options).unwrap();
    let name = staged.path().file_name().unwrap().to_string_lossy().into_owned();

    assert!(name.starts_with(options.prefix_str()));
    assert!(name.ends_with(options.suffix_str()));
    assert_eq!(staged.destination(), dest.as_path());
}
