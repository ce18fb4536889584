use std::io::Write;
use teamy_byteparse::byteparse::SchemaFile;
use teamy_byteparse::byteparse::parse;

const FRAME_SCHEMA_JSON: &str = r#"{
    "record": {
        "fields": [
            { "name": "Head", "kind": "u8", "tag": "len:1,equal:0x7E" },
            { "name": "Payload", "kind": "bytes", "tag": "len:*,escape:Escapes" },
            { "name": "Tail", "kind": "u8", "tag": "len:1,equal:0x7E" }
        ]
    },
    "escapes": {
        "Escapes": [[125, [125, 1]], [126, [125, 2]]]
    }
}"#;

#[test]
fn loads_schema_from_disk_and_decodes() {
    let mut file = tempfile::NamedTempFile::new().expect("tmp");
    file.write_all(FRAME_SCHEMA_JSON.as_bytes()).expect("write");
    let schema_file = SchemaFile::load(file.path()).expect("load");
    let (record_schema, escapes) = schema_file.into_parts();
    record_schema.check(&escapes).expect("check");

    let buf = [0x7E, 0x7D, 0x02, 0x41, 0x7E];
    let outcome = parse(&buf, &record_schema, &escapes).unwrap();
    assert_eq!(outcome.consumed(), 5);
    let record = outcome.into_record().unwrap();
    assert_eq!(record.bytes("Payload"), Some(&[0x7E, 0x41][..]));
}

#[test]
fn missing_file_is_an_error() {
    assert!(SchemaFile::load("definitely/not/here.json").is_err());
}

#[test]
fn nested_record_round_trips_through_json() {
    let text = r#"{
        "record": {
            "fields": [
                { "name": "Head", "kind": "u8" },
                { "name": "Data", "kind": "bytes", "tag": "len:*" },
                {
                    "name": "Nested",
                    "kind": { "record": { "fields": [
                        { "name": "Len", "kind": "u16", "tag": "len:2,equal:0x0003" }
                    ] } }
                }
            ]
        }
    }"#;
    let schema_file: SchemaFile = serde_json::from_str(text).expect("json");
    let (record_schema, escapes) = schema_file.into_parts();
    let buf = [0x01, 0x02, 0x00, 0x03];
    let outcome = parse(&buf, &record_schema, &escapes).unwrap();
    assert_eq!(outcome.consumed(), 4);
    let record = outcome.into_record().unwrap();
    assert_eq!(record.bytes("Data"), Some(&[0x02][..]));
    assert_eq!(record.record("Nested").unwrap().uint("Len"), Some(3));
}
