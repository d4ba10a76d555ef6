//! Translation from files on disk: open failures, batch translation.

use std::{fs, path::PathBuf};

use lesskeyc::lesskey::{
    CollectSink, LesskeyError, ParseOptions, parse_lesskey, translate_all,
    tables::{actions::A_QUIT, load_tables_json_bytes, save_tables_json},
};
use tempfile::tempdir;

#[test]
fn missing_source_is_a_silent_sentinel() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("does-not-exist");
    let mut sink = CollectSink::default();
    let res = parse_lesskey(Some(path.as_path()), &ParseOptions::default(), &mut sink);
    match res {
        Err(LesskeyError::SourceUnreadable { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected SourceUnreadable, got {other:?}"),
    }
    assert!(sink.diagnostics.is_empty());
}

#[test]
fn reads_file_and_reports_with_its_name() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("keys");
    fs::write(&path, "q quit\nz bogus\n").expect("write source");

    let mut sink = CollectSink::default();
    let t = parse_lesskey(Some(path.as_path()), &ParseOptions::default(), &mut sink).expect("readable");
    assert_eq!(t.errors, 1);
    assert_eq!(&t.cmd[..3], &[b'q', 0, A_QUIT]);
    assert_eq!(
        sink.messages(),
        vec![format!("{}: line 2: unknown action: bogus", path.display())]
    );
}

#[test]
fn non_utf8_bytes_pass_through() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("latin1");
    fs::write(&path, b"#env\nNAME=caf\xe9\n").expect("write source");
    let t = parse_lesskey(Some(path.as_path()), &ParseOptions::default(), CollectSink::default())
        .expect("readable");
    assert_eq!(t.var, b"NAME\0\x81caf\xe9\0".to_vec());
}

#[test]
fn batch_translation_keeps_order_and_isolation() {
    let dir = tempdir().expect("tempdir");
    let mut paths: Vec<PathBuf> = Vec::new();
    for i in 0..8 {
        let p = dir.path().join(format!("k{i}"));
        // Odd files carry one error each.
        let body = if i % 2 == 0 {
            format!("{i} quit\n")
        } else {
            format!("{i} nope\n")
        };
        fs::write(&p, body).expect("write source");
        paths.push(p);
    }
    paths.push(dir.path().join("missing"));

    let results = translate_all(&paths, &ParseOptions::default());
    assert_eq!(results.len(), paths.len());
    for (i, (p, res)) in results.iter().enumerate() {
        assert_eq!(p, &paths[i]);
        if i == 8 {
            assert!(matches!(res, Err(LesskeyError::SourceUnreadable { .. })));
            continue;
        }
        let (t, diags) = res.as_ref().expect("readable");
        assert_eq!(t.cmd[0], b'0' + i as u8);
        assert_eq!(t.errors, i % 2);
        assert_eq!(diags.len(), i % 2);
    }
}

#[test]
fn json_dump_round_trips_through_disk() {
    let dir = tempdir().expect("tempdir");
    let src = dir.path().join("keys");
    fs::write(&src, "#line-edit\n^A home\n#env\nX=1\n").expect("write source");
    let t = parse_lesskey(Some(src.as_path()), &ParseOptions::default(), CollectSink::default())
        .expect("readable");

    let out = dir.path().join("tables.json");
    save_tables_json(&out, &t).expect("save");
    let back = load_tables_json_bytes(&fs::read(&out).expect("read back")).expect("parse");
    assert_eq!(back, t);
}
