use ais_fixture_gen::fixture::parse_fixture_lines;
use ais_fixture_gen::types::{Extra, KeyedField, SkipReason};

#[test]
fn comments_do_not_shift_test_indices() {
    let with_comment = parse_fixture_lines(["# comment only", "", "1 AAAA 42"]).unwrap();
    let without = parse_fixture_lines(["1 AAAA 42"]).unwrap();
    assert_eq!(with_comment.records.len(), 1);
    assert_eq!(with_comment.records[0].index, 2);
    assert_eq!(without.records[0].index, 0);
    assert_eq!(
        with_comment
            .skipped
            .iter()
            .map(|s| (s.index, s.reason))
            .collect::<Vec<_>>(),
        vec![(0, SkipReason::Comment), (1, SkipReason::Blank)]
    );
}

#[test]
fn short_lines_are_skipped_silently() {
    let set = parse_fixture_lines(["1 AAAA", "5 BBBB 7", "justone"]).unwrap();
    assert_eq!(set.records.len(), 1);
    assert_eq!(set.records[0].index, 1);
    assert_eq!(set.skipped[0].reason, SkipReason::TooFewTokens(2));
    assert_eq!(set.skipped[1].reason, SkipReason::TooFewTokens(1));
    assert_eq!(set.line_count, 3);
}

#[test]
fn worked_example() {
    let set =
        parse_fixture_lines(["1 13HOI:0P0000VD>PfTNEoHo5Bl0000 227006760 callsign=TEST"]).unwrap();
    let r = &set.records[0];
    assert_eq!(r.message_type, 1);
    assert_eq!(r.payload, "13HOI:0P0000VD>PfTNEoHo5Bl0000");
    assert_eq!(r.mmsi, 227006760);
    assert_eq!(
        r.extras,
        vec![Extra::Keyed {
            field: KeyedField::Callsign,
            value: "TEST".into()
        }]
    );
}

#[test]
fn record_order_matches_input_order() {
    let lines = ["3 C 3", "# x", "1 A 1", "2 B 2"];
    let set = parse_fixture_lines(lines).unwrap();
    let payloads: Vec<&str> = set.records.iter().map(|r| r.payload.as_str()).collect();
    assert_eq!(payloads, ["C", "A", "B"]);
}

#[test]
fn tabs_and_repeated_spaces_separate_tokens() {
    let set = parse_fixture_lines(["  18\tB52K>;h00Fc>jpUlNV@ikwpUoP06   338087471  bin_len "]).unwrap();
    let r = &set.records[0];
    assert_eq!(r.message_type, 18);
    assert_eq!(r.mmsi, 338087471);
    assert_eq!(r.extras, vec![Extra::BinaryLength]);
}

#[test]
fn bad_message_type_is_fatal() {
    assert!(parse_fixture_lines(["1 A 1", "one B 2"]).is_err());
}
