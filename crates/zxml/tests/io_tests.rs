#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Write;

use tempfile::NamedTempFile;
use zxml::{parse_file, parse_file_with_config, Config, ErrorKind};

fn write_temp(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

#[test]
fn file_read_error() {
    let result = parse_file("nonexistent_file.xml");
    let err = result.expect_err("missing file must not parse");
    match err.kind() {
        ErrorKind::Io { path } => assert_eq!(path, "nonexistent_file.xml"),
        other => panic!("Expected IO error, got {other:?}"),
    }
}

#[test]
fn parse_file_builds_tree() {
    let file = write_temp(b"<library><book id=\"7\"><title>Dune</title></book></library>");
    let doc = parse_file(file.path()).unwrap();
    let book = doc.find_by_path("library/book", true).unwrap();
    assert_eq!(book.attr("id"), Some("7"));
    assert_eq!(book.child_at(0).unwrap().text(), Some("Dune"));
}

#[test]
fn parse_file_reports_markup_errors() {
    let file = write_temp(b"<a attr=\"unterminated");
    let err = parse_file(file.path()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnexpectedEof { .. }));
}

#[test]
fn parse_file_rejects_invalid_utf8() {
    let file = write_temp(b"<a>\xff</a>");
    let err = parse_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidUtf8);
}

#[test]
fn parse_file_honours_size_limit() {
    let file = write_temp(b"<a>0123456789</a>");
    let err = parse_file_with_config(file.path(), Config::default().with_max_size(8)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MaxSizeExceeded { max: 8 });
}

#[test]
fn directory_is_not_a_document() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(dir.path()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io { .. }));
}

#[test]
fn oversized_file_is_rejected_from_its_length() {
    let file = NamedTempFile::new().unwrap();
    // sparse: reports 64 MiB without writing it
    file.as_file().set_len(64 * 1024 * 1024).unwrap();
    let err = parse_file(file.path()).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::MaxSizeExceeded {
            max: 10 * 1024 * 1024
        }
    );
    assert_eq!(err.span().start.offset, 0);
    assert_eq!(err.span().start.line, 1);

    let err = parse_file_with_config(file.path(), Config::default().with_max_size(1)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MaxSizeExceeded { max: 1 });
}
