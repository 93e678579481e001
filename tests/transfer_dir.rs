use assert_fs::prelude::*;
use stagelink::{TransferOptions, transfer_entry};
use std::fs;

#[test]
fn plain_directory_created_empty() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("pkg/data");
    src.create_dir_all().unwrap();
    src.child("inner.txt").write_str("inner").unwrap();

    let dest = temp.child("out/data");
    transfer_entry(&TransferOptions::default(), src.path(), dest.path()).unwrap();

    assert!(dest.path().is_dir());
    // Children are the caller's tree walk's job, not this operation's.
    assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn directory_mode_is_synchronized() {
    use std::os::unix::fs::PermissionsExt;
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("pkg/data");
    src.create_dir_all().unwrap();
    fs::set_permissions(src.path(), fs::Permissions::from_mode(0o750)).unwrap();

    let dest = temp.child("out/data");
    transfer_entry(&TransferOptions::default(), src.path(), dest.path()).unwrap();

    let mode = fs::metadata(dest.path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o750);
}

#[test]
fn existing_destination_directory_is_reused() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("pkg/data");
    src.create_dir_all().unwrap();

    // Destination already populated by earlier calls in the tree walk.
    let dest = temp.child("out/data");
    dest.create_dir_all().unwrap();
    dest.child("already-staged.txt").write_str("keep me").unwrap();

    transfer_entry(&TransferOptions::default(), src.path(), dest.path()).unwrap();
    dest.child("already-staged.txt").assert("keep me");

    // Re-invocation is idempotent.
    transfer_entry(&TransferOptions::default(), src.path(), dest.path()).unwrap();
    dest.child("already-staged.txt").assert("keep me");
}
