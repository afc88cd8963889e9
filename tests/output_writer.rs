mod support;

use nounsmith::{NounError, write_output};

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn repeated_identical_writes_do_not_grow_the_file() {
    let root = support::temp_dir("writer_idempotent");
    std::fs::create_dir_all(&root).unwrap();
    let out = root.join("images");
    let doc = "<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>";

    let p1 = write_output(doc, &out, "noun.svg").unwrap();
    let len1 = std::fs::metadata(&p1).unwrap().len();
    let p2 = write_output(doc, &out, "noun.svg").unwrap();
    let len2 = std::fs::metadata(&p2).unwrap().len();

    assert_eq!(p1, p2);
    assert_eq!(len1, doc.len() as u64);
    assert_eq!(len1, len2);
    assert_eq!(std::fs::read(&p2).unwrap(), doc.as_bytes());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn different_documents_keep_only_the_latest() {
    let root = support::temp_dir("writer_latest");
    std::fs::create_dir_all(&root).unwrap();
    let out = root.join("images");

    write_output("a much longer first document", &out, "noun.svg").unwrap();
    let p = write_output("short", &out, "noun.svg").unwrap();
    assert_eq!(std::fs::read_to_string(&p).unwrap(), "short");
    assert_eq!(entries(&out), ["noun.svg"]);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn creates_exactly_one_directory_and_tolerates_existing_one() {
    let root = support::temp_dir("writer_dirs");
    std::fs::create_dir_all(&root).unwrap();
    assert!(entries(&root).is_empty());

    let out = root.join("images");
    write_output("x", &out, "noun.svg").unwrap();
    assert_eq!(entries(&root), ["images"]);
    assert_eq!(entries(&out), ["noun.svg"]);

    write_output("y", &out, "noun.svg").unwrap();
    assert_eq!(entries(&root), ["images"]);
    assert_eq!(entries(&out), ["noun.svg"]);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn output_dir_that_is_a_file_is_io_error() {
    let root = support::temp_dir("writer_file_in_way");
    std::fs::create_dir_all(&root).unwrap();
    let blocker = root.join("images");
    std::fs::write(&blocker, "not a directory").unwrap();

    let err = write_output("x", &blocker, "noun.svg").unwrap_err();
    assert!(matches!(err, NounError::Io { .. }), "{err}");
    assert_eq!(
        std::fs::read_to_string(&blocker).unwrap(),
        "not a directory"
    );

    std::fs::remove_dir_all(&root).ok();
}
