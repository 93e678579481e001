use stagelink::{TransferError, TransferOptions, transfer_entry};
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_source_is_a_typed_error() {
    let td = tempdir().unwrap();
    let src = td.path().join("nope.bin");
    let dest = td.path().join("out").join("nope.bin");

    let err = transfer_entry(&TransferOptions::default(), &src, &dest).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TransferError>(),
        Some(TransferError::SourceNotFound(_))
    ));
}

#[test]
fn parent_through_regular_file_is_fatal() {
    let td = tempdir().unwrap();
    let src = td.path().join("src.txt");
    fs::write(&src, "x").unwrap();

    // A regular file where a directory level is needed.
    let blocker = td.path().join("blocker");
    fs::write(&blocker, "not a dir").unwrap();
    let dest = blocker.join("sub").join("src.txt");

    let err = transfer_entry(&TransferOptions::default(), &src, &dest).unwrap_err();
    let msg = format!("{err}");
    assert!(
        msg.contains("create destination directory"),
        "expected parent creation failure, got: {msg}"
    );
}

#[test]
fn parent_creation_happens_before_source_checks() {
    // A missing source still gets its destination parent created first, in
    // line with the operation's ordering.
    let td = tempdir().unwrap();
    let src = td.path().join("nope.bin");
    let dest = td.path().join("out").join("nope.bin");

    let _ = transfer_entry(&TransferOptions::default(), &src, &dest);
    assert!(td.path().join("out").is_dir());
}
