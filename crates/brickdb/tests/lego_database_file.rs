use brickdb::prelude::*;
use brickdb::{SqliteConfig, Value};
use brickdb_core::error::ConnectionErrorKind;

fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
    items.sort();
    items
}

#[test]
fn file_database_round_trips_colors_and_parts() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("lego.sqlite");
    let path_str = path.to_str().expect("utf-8 temp path");

    let mut db = LegoDatabase::open(&SqliteConfig::file(path_str)).expect("open file db");
    db.create_colors_table().expect("create colors");
    db.create_parts_table().expect("create parts");

    {
        let mut colors = db.prepare_color_insert().expect("prepare color insert");
        colors.insert("blue", "AAAAAA", false).expect("insert color");

        let mut parts = db.prepare_part_insert().expect("prepare part insert");
        parts
            .insert("part", Some("http://x/y.png"))
            .expect("insert part with url");
        parts.insert("part", None).expect("insert part without url");
    }

    let colors = db.read_all_colors().expect("read colors");
    assert_eq!(colors, vec![Color::new("blue", "AAAAAA", false)]);

    let parts = db.read_all_parts().expect("read parts");
    assert_eq!(
        sorted(parts.into_iter().map(|p| (p.name, p.image_url)).collect()),
        vec![
            ("part".to_string(), None),
            ("part".to_string(), Some("http://x/y.png".to_string())),
        ]
    );

    db.close();
    db.close();

    // Data survives reopening.
    let reader = DatabaseReader::open(&path).expect("reopen read-only");
    assert_eq!(reader.read_all_colors().expect("reread colors").len(), 1);
    assert_eq!(reader.read_all_parts().expect("reread parts").len(), 2);
}

#[test]
fn dark_turquoise_round_trips_exactly() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("lego.sqlite");

    let db = DatabaseBuilder::build(&path).expect("build db");
    let color = Color::new("Dark Turquoise", "05131D", false);
    db.prepare_color_insert()
        .expect("prepare")
        .insert_color(&color)
        .expect("insert");

    let rows = db
        .connection()
        .read_all_rows(&db.schema().colors.table)
        .expect("read rows");
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.value(&db.schema().colors.name), Some(&Value::from("Dark Turquoise")));
    assert_eq!(row.value(&db.schema().colors.rgb), Some(&Value::from("05131D")));
    assert_eq!(row.value(&db.schema().colors.transparent), Some(&Value::Bool(false)));
}

#[test]
fn builder_never_overwrites_an_existing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("lego.sqlite");

    drop(DatabaseBuilder::build(&path).expect("first build"));
    match DatabaseBuilder::build(&path) {
        Err(Error::Connection(e)) => assert_eq!(e.kind, ConnectionErrorKind::FileExists),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("second build should fail"),
    }
}

#[test]
fn pages_flow_through_the_writer() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("lego.sqlite");

    let colors: ResultsList<Color> = ResultsList::from_json(
        r#"{"count": 2, "next": null, "results": [
            {"name": "Black", "rgb": "05131D", "is_trans": false},
            {"name": "Trans-Clear", "rgb": "FCFCFC", "is_trans": true}
        ]}"#,
    )
    .expect("parse colors page");
    let parts: ResultsList<Part> = ResultsList::from_json(
        r#"{"count": 1, "next": null, "results": [
            {"part_num": "3001", "name": "Brick 2 x 4", "part_img_url": "https://x/3001.jpg"}
        ]}"#,
    )
    .expect("parse parts page");

    let mut writer = DatabaseWriter::spawn(&path).expect("spawn writer");
    writer
        .submit(WriteBatch::Colors(colors.results.clone()))
        .expect("submit colors");
    writer
        .submit(WriteBatch::Parts(parts.results.clone()))
        .expect("submit parts");
    let summary = writer.finish().expect("finish writer");
    assert_eq!((summary.colors, summary.parts), (2, 1));

    let reader = DatabaseReader::open(&path).expect("open reader");
    assert_eq!(
        sorted(reader.read_all_colors().expect("read colors")),
        sorted(colors.results)
    );
    assert_eq!(reader.read_all_parts().expect("read parts"), parts.results);
}
