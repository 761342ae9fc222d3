use ais_fixture_gen::GenerateError;
use ais_fixture_gen::emit::ReleasePolicy;
use ais_fixture_gen::pipeline::{GenerateOptions, check, generate};
use ais_fixture_gen::types::CheckOutcome;
use anyhow::Result;
use std::fs;
use tempfile::tempdir;

const FIXTURES: &str = "\
# type payload mmsi extras
# lines 0 and 1 are comments

1 13aG?P0P00PD;88MD5MTDww@2D0T 366053209
5 55NBsv02>tNDBL@E 123456789 callsign=CALL vessel_name=TEST
6 64aG@PP000PD;88MD5MTDww@2D0T 123456789 bin_len
8 85MwpKiKf:MPiQa:ofV@v2mQTfB
";

#[test]
fn writes_one_function_per_record() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("ais_test_payloads.txt");
    let output = dir.path().join("auto_test_payloads.c");
    fs::write(&input, FIXTURES)?;

    let summary = generate(&GenerateOptions::new(input, output.clone()))?;
    assert_eq!(summary.line_count, 7);
    assert_eq!(summary.generated, 3);
    assert_eq!(summary.skipped.len(), 4);

    let text = fs::read_to_string(&output)?;
    assert_eq!(text.matches("static void test_payload_").count(), 3);
    // Names follow the raw line, not the position among records.
    let order: Vec<usize> = ["test_payload_3)", "test_payload_4)", "test_payload_5)"]
        .iter()
        .map(|n| text.find(&format!("cmocka_unit_test({n}")).expect(n))
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert!(!text.contains("test_payload_6"));
    assert!(text.contains("assert_string_equal(msg.callsign, \"CALL\");"));
    assert!(text.contains("assert_string_equal(msg.vessel_name, \"TEST\");"));
    assert!(text.contains("assert_true(msg.bin_len > 0);"));
    assert!(text.starts_with("/* auto_test_payloads.c - generated by ais-fixture-gen from ais_test_payloads.txt."));
    Ok(())
}

#[test]
fn regeneration_is_byte_identical_and_overwrites() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("fixtures.txt");
    let output = dir.path().join("suite.c");
    fs::write(&input, FIXTURES)?;
    fs::write(&output, "int stale_content;\n".repeat(1000))?;

    let options = GenerateOptions::new(input, output.clone());
    generate(&options)?;
    let first = fs::read(&output)?;
    generate(&options)?;
    let second = fs::read(&output)?;
    assert_eq!(first, second);
    assert!(!String::from_utf8(second)?.contains("stale_content"));
    Ok(())
}

#[test]
fn missing_input_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("suite.c");
    let err = generate(&GenerateOptions::new(dir.path().join("nope.txt"), output.clone()))
        .unwrap_err();
    assert!(matches!(err, GenerateError::MissingInput { .. }));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn malformed_number_aborts_without_partial_output() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("fixtures.txt");
    let output = dir.path().join("suite.c");
    fs::write(&input, "1 AAAA 111\nX BBBB 222\n1 CCCC 333\n")?;
    fs::write(&output, "previous\n")?;

    let err = generate(&GenerateOptions::new(input, output.clone())).unwrap_err();
    match &err {
        GenerateError::MalformedNumber { line, token, content, .. } => {
            assert_eq!(*line, 2);
            assert_eq!(token, "X");
            assert_eq!(content, "X BBBB 222");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("line 2"));
    assert_eq!(fs::read_to_string(&output)?, "previous\n");
    Ok(())
}

#[test]
fn check_reports_missing_stale_and_current() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("fixtures.txt");
    let output = dir.path().join("suite.c");
    fs::write(&input, FIXTURES)?;
    let options = GenerateOptions::new(input.clone(), output.clone());

    assert_eq!(check(&options)?, CheckOutcome::Missing);
    generate(&options)?;
    assert_eq!(check(&options)?, CheckOutcome::UpToDate);

    fs::write(&input, format!("{FIXTURES}7 7IJNBm0?0CP0 244670000\n"))?;
    assert_eq!(check(&options)?, CheckOutcome::Stale);
    // check never writes
    assert_eq!(fs::read_to_string(&output)?.matches("static void").count(), 3);
    Ok(())
}

#[test]
fn guarded_release_registers_teardowns() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("fixtures.txt");
    let output = dir.path().join("suite.c");
    fs::write(&input, FIXTURES)?;
    let mut options = GenerateOptions::new(input, output.clone());
    options.suite.release = ReleasePolicy::Guarded;

    generate(&options)?;
    let text = fs::read_to_string(&output)?;
    assert_eq!(
        text.matches(", release_payload_message)").count(),
        3
    );
    assert_eq!(text.matches("free_ais_message(msg);").count(), 1);
    assert!(!text.contains("free_ais_message(&msg);"));
    Ok(())
}
