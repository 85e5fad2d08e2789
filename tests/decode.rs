use std::path::Path;

use colophon::sans::{self, Error, ErrorKind, Field, Layout, Subfield, Tag};
use csv::ReaderBuilder;

const CATTLE: &str = "fixtures/cattle.mrc";
const UMLAUT: &str = "fixtures/umlaut.mrc";
const NO_001: &str = "fixtures/no_001.mrc";

fn read(path: &str) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

/// A fixed field, padded with blanks to 44 bytes.
fn padded(s: &str) -> Vec<u8> {
    format!("{s:<44}").into_bytes()
}

#[test]
fn leader() {
    let record = read(CATTLE);
    let leader = sans::leader(&record).unwrap();

    assert_eq!(format!("{leader:?}"), "Leader(\"01732cam a2200433   4500\")");
    assert_eq!(leader.record_length().unwrap(), 1732);
    assert_eq!(leader.record_status(), b'c');
    assert_eq!(leader.record_type(), b'a');
    assert_eq!(leader.bibliographic_level(), b'm');
    assert_eq!(leader.control_type(), b' ');
    assert!(leader.is_unicode());
    assert_eq!(leader.indicator_count().unwrap(), 2);
    assert_eq!(leader.subfield_code_length().unwrap(), 2);
    assert_eq!(leader.base_address().unwrap(), 433);
    assert_eq!(leader.entry_map(), b"4500");
    assert_eq!(leader.layout().unwrap(), Layout::MARC21);
}

#[test]
fn base_address() {
    assert_eq!(sans::base_address(&read(CATTLE)).unwrap(), 433);
    assert_eq!(sans::base_address(&read(UMLAUT)).unwrap(), 397);
}

#[test]
fn directory() {
    let record = read(CATTLE);

    let raw = sans::directory_raw(&record).unwrap();
    assert_eq!(raw.len(), 408);
    assert_eq!(raw.len() % 12, 0);

    let directory = sans::directory(&record).unwrap();
    assert_eq!(directory.len(), 34);

    let entry = &directory[1];
    assert_eq!(entry.tag(), "003");
    assert_eq!(entry.length().unwrap(), 6);
    assert_eq!(entry.position().unwrap(), 13);
    assert_eq!(
        format!("{entry:?}"),
        "DirectoryEntry { tag: Tag(\"003\"), length: 0006, position: 00013 }"
    );
}

#[test]
fn directory_matches_fixture() {
    let record = read(CATTLE);
    let directory = sans::directory(&record).unwrap();

    let expected = expected_directory(CATTLE);
    assert_eq!(directory.len(), expected.len());

    for (entry, (tag, length, position)) in directory.iter().zip(expected) {
        assert_eq!(entry.tag().as_str(), Some(tag.as_str()));
        assert_eq!(entry.length().unwrap(), length);
        assert_eq!(entry.position().unwrap(), position);
    }
}

#[test]
fn control_number() {
    let record = read(CATTLE);
    assert_eq!(sans::control_number(&record).unwrap(), b"crle00532681");

    let record = read(UMLAUT);
    assert_eq!(sans::control_number(&record).unwrap(), b"OCM1bookssj0001856241");

    let record = read(NO_001);
    let err = sans::control_number(&record).unwrap_err();
    assert_eq!(err, Error::NotFound(Tag::CONTROL_NUMBER));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn control_field() {
    let record = read(CATTLE);

    assert_eq!(sans::control_field("001", &record).unwrap(), b"crle00532681");
    assert_eq!(sans::control_field("003", &record).unwrap(), b"OCoLC");
    assert_eq!(sans::control_field("007", &record).unwrap(), padded("cr"));

    let err = sans::control_field("abc", &record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert_eq!(err.to_string(), "Tag \"abc\" is not a valid control field tag.");

    for tag in ["999", "010", "01", "0011", ""] {
        let err = sans::control_field(tag, &record).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument, "{tag:?}");
    }

    let err = sans::control_field("009", &record).unwrap_err();
    assert_eq!(err, Error::NotFound(Tag::new(*b"009")));

    let err = sans::control_field("001", &read(NO_001)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn field() {
    let record = read(CATTLE);

    assert_eq!(sans::field("001", &record).unwrap(), b"crle00532681");
    assert_eq!(sans::field("650", &record).unwrap(), b" 0\x1faCastration.");

    let err = sans::field("999", &record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Field 999 not found.");

    let err = sans::field("abc", &record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn control_fields() {
    let record = read(CATTLE);

    let fields = sans::control_fields("007", &record).unwrap();
    assert_eq!(
        fields,
        [padded("cr"), padded("cr bn||||||abp"), padded("cr bn||||||cda")]
    );

    let fields = sans::control_fields("001", &record).unwrap();
    assert_eq!(fields, [b"crle00532681"]);

    assert!(sans::control_fields("009", &record).unwrap().is_empty());

    let err = sans::control_fields("abc", &record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn data_fields() {
    let record = read(CATTLE);

    let fields = sans::data_fields("650", &record).unwrap();
    assert_eq!(fields.len(), 2);

    let fields = fields
        .into_iter()
        .map(sans::decode_data_field)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(fields[0].indicator1(), Some(b' '));
    assert_eq!(fields[0].indicator2(), Some(b'0'));
    assert_eq!(
        fields[0].subfields,
        [Subfield {
            code: b"a",
            content: b"Castration.",
        }]
    );

    assert_eq!(fields[1].indicators, b" 0");
    assert_eq!(
        fields[1].subfields,
        [
            Subfield {
                code: b"a",
                content: b"Cattle",
            },
            Subfield {
                code: b"x",
                content: b"Physiology.",
            },
        ]
    );

    assert!(sans::data_fields("999", &record).unwrap().is_empty());

    for tag in ["abc", "007", "65", "6500"] {
        let err = sans::data_fields(tag, &record).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument, "{tag:?}");
    }
}

#[test]
fn data_field() {
    let record = read(CATTLE);

    let field = sans::data_field("245", &record).unwrap();
    let field = sans::decode_data_field(field).unwrap();

    assert_eq!(field.indicators, b"10");
    assert_eq!(field.subfield(b'a'), Some(b"Castration of cattle".as_slice()));
    assert_eq!(field.subfield(b'c'), Some(b"by J. N. Wiltbank.".as_slice()));
    assert_eq!(field.subfield(b'z'), None);

    let err = sans::data_field("999", &record).unwrap_err();
    assert_eq!(err, Error::NotFound(Tag::new(*b"999")));
}

#[test]
fn content_is_not_transcoded() {
    let record = read(UMLAUT);

    let fields = sans::data_fields("100", &record).unwrap();
    let field = sans::decode_data_field(fields[0]).unwrap();

    assert_eq!(field.indicators, b"1 ");
    assert_eq!(field.subfields[0].code, b"a");
    assert_eq!(field.subfields[0].content, "Albrecher, Hansjörg.".as_bytes());
}

#[test]
fn decode_record() {
    let record = read(CATTLE);
    let fields = sans::decode_record(&record).unwrap();

    assert_eq!(fields.len(), 34);

    assert_eq!(
        fields[0],
        Field::Control {
            tag: Tag::CONTROL_NUMBER,
            content: b"crle00532681",
        }
    );

    let tags = fields.iter().map(Field::tag).collect::<Vec<_>>();
    let directory = sans::directory(&record).unwrap();
    assert!(tags.iter().zip(directory).all(|(t, e)| *t == e.tag()));

    let subjects = fields
        .iter()
        .filter(|f| f.tag() == "650")
        .filter_map(Field::as_data)
        .collect::<Vec<_>>();

    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[1].subfield(b'x'), Some(b"Physiology.".as_slice()));

    assert_eq!(fields[4].as_control(), Some(padded("cr").as_slice()));
    assert_eq!(fields[4].as_data(), None);
}

#[test]
fn decode_record_is_idempotent() {
    for path in [CATTLE, UMLAUT, NO_001] {
        let record = read(path);
        assert_eq!(
            sans::decode_record(&record).unwrap(),
            sans::decode_record(&record).unwrap()
        );
    }
}

#[test]
fn decode_record_umlaut() {
    let record = read(UMLAUT);
    let fields = sans::decode_record(&record).unwrap();

    assert_eq!(fields.len(), 31);

    let links = fields.iter().filter(|f| f.tag() == "856").collect::<Vec<_>>();
    assert_eq!(links.len(), 3);
    assert_eq!(links[1].as_data().unwrap().indicators, b"45");

    let fields = sans::fields(&record).unwrap();
    assert_eq!(fields.len(), 31);
}

#[test]
fn tags() {
    assert_eq!(Tag::CONTROL_NUMBER.to_string(), "001");
    assert_eq!(format!("{:?}", Tag::new(*b"FMT")), "Tag(\"FMT\")");
    assert!(Tag::new(*b"009").is_control());
    assert!(!Tag::new(*b"010").is_control());
    assert!(!Tag::new(*b"FMT").is_control());
    assert_eq!("245".parse::<Tag>().unwrap(), "245");
    assert_eq!(Tag::new(*b"\x1e45").to_string(), "\\x1e45");
}

/// Read the expected directory of a fixture, stored beside it as CSV rows of
/// tag, length and position.
fn expected_directory(path: impl AsRef<Path>) -> Vec<(String, usize, usize)> {
    let path = path.as_ref().with_extension("csv");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();

    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (
                r[0].to_string(),
                r[1].parse().unwrap(),
                r[2].parse().unwrap(),
            )
        })
        .collect()
}
