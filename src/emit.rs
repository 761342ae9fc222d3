//! Turns parsed fixture records into a cmocka test suite.

use crate::decoder::DecoderContract;
use crate::types::{Extra, GeneratedSuite, GeneratedTestCase, LineIndex, TestRecord};

pub const TEST_NAME_PREFIX: &str = "test_payload_";
pub const TEARDOWN_FN: &str = "release_payload_message";
pub const DEFAULT_SOURCE_NAME: &str = "ais_test_payloads.txt";
pub const DEFAULT_OUTPUT_NAME: &str = "auto_test_payloads.c";
const INDENT: &str = "    ";

/// When the decoded message is handed back to the decoder's release function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleasePolicy {
    /// Release at the end of the test body. A failed assertion leaves the
    /// message unreleased.
    #[default]
    AfterAssertions,
    /// Keep the message in cmocka test state and release it from a teardown,
    /// which also runs after a failed assertion.
    Guarded,
}

#[derive(Debug, Clone)]
pub struct SuiteOptions {
    pub contract: DecoderContract,
    pub release: ReleasePolicy,
    /// Shown in the generated banner only.
    pub source_name: String,
    pub output_name: String,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            contract: DecoderContract::default(),
            release: ReleasePolicy::default(),
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

pub fn test_name(index: LineIndex) -> String {
    format!("{TEST_NAME_PREFIX}{index}")
}

pub fn render_case(record: &TestRecord, options: &SuiteOptions) -> GeneratedTestCase {
    let c = &options.contract;
    let name = test_name(record.index);
    let mut body = String::new();

    body.push_str(&format!("static void {name}(void **state) {{\n"));
    match options.release {
        ReleasePolicy::AfterAssertions => {
            body.push_str(&format!("{INDENT}(void)state;\n"));
            body.push_str(&format!(
                "{INDENT}const char *payload = {};\n",
                c_string_literal(&record.payload)
            ));
            body.push_str(&format!("{INDENT}{} msg = {{0}};\n", c.message_struct));
        }
        ReleasePolicy::Guarded => {
            body.push_str(&format!("{INDENT}static {} msg;\n", c.message_struct));
            body.push_str(&format!(
                "{INDENT}const char *payload = {};\n",
                c_string_literal(&record.payload)
            ));
            body.push_str(&format!("{INDENT}msg = ({}){{0}};\n", c.message_struct));
            body.push_str(&format!("{INDENT}*state = &msg;\n"));
        }
    }
    body.push_str(&format!(
        "{INDENT}{} result = {}(&msg, payload, {});\n",
        c.result_type, c.decode_fn, c.fill_bits
    ));
    body.push_str(&format!("{INDENT}assert_true(result.{});\n", c.success_member));
    body.push_str(&format!(
        "{INDENT}assert_int_equal(msg.{}, {});\n",
        c.type_field, record.message_type
    ));
    body.push_str(&format!(
        "{INDENT}assert_int_equal(msg.{}, {});\n",
        c.mmsi_field, record.mmsi
    ));
    for extra in &record.extras {
        body.push_str(INDENT);
        body.push_str(&render_extra(extra, c));
        body.push('\n');
    }
    if options.release == ReleasePolicy::AfterAssertions {
        body.push_str(&format!("{INDENT}{}(&msg);\n", c.release_fn));
    }
    body.push_str("}\n");

    GeneratedTestCase {
        index: record.index,
        name,
        source: body,
    }
}

fn render_extra(extra: &Extra, c: &DecoderContract) -> String {
    match extra {
        Extra::Keyed { field, value } => format!(
            "assert_string_equal(msg.{}, {});",
            c.keyed_field(*field),
            c_string_literal(value)
        ),
        Extra::BinaryLength => format!("assert_true(msg.{} > 0);", c.bin_len_field),
    }
}

pub fn render_suite(records: &[TestRecord], options: &SuiteOptions) -> GeneratedSuite {
    let cases: Vec<GeneratedTestCase> = records.iter().map(|r| render_case(r, options)).collect();
    GeneratedSuite {
        preamble: render_preamble(options),
        entry_point: render_entry_point(&cases, options.release),
        cases,
    }
}

fn render_preamble(options: &SuiteOptions) -> String {
    let c = &options.contract;
    let mut out = String::new();
    out.push_str(&format!(
        "/* {} - generated by {} from {}.\n * Do not edit; add fixture lines and regenerate. */\n\n",
        comment_safe(&options.output_name),
        env!("CARGO_PKG_NAME"),
        comment_safe(&options.source_name)
    ));
    // cmocka.h expects these to be included first.
    for header in ["stddef.h", "stdarg.h", "setjmp.h", "stdint.h", "cmocka.h"] {
        out.push_str(&format!("#include <{header}>\n"));
    }
    out.push_str(&format!("#include \"{}\"\n\n", c.header));

    if options.release == ReleasePolicy::Guarded {
        out.push_str(&format!("static int {TEARDOWN_FN}(void **state) {{\n"));
        out.push_str(&format!("{INDENT}{} *msg = *state;\n", c.message_struct));
        out.push_str(&format!("{INDENT}if (msg != NULL) {{\n"));
        out.push_str(&format!("{INDENT}{INDENT}{}(msg);\n", c.release_fn));
        out.push_str(&format!("{INDENT}{INDENT}*state = NULL;\n"));
        out.push_str(&format!("{INDENT}}}\n"));
        out.push_str(&format!("{INDENT}return 0;\n"));
        out.push_str("}\n\n");
    }
    out
}

fn render_entry_point(cases: &[GeneratedTestCase], release: ReleasePolicy) -> String {
    let mut out = String::from("int main(void) {\n");
    if cases.is_empty() {
        // A zero-length CMUnitTest array does not compile.
        out.push_str(&format!("{INDENT}/* no payload fixtures */\n"));
        out.push_str(&format!("{INDENT}return 0;\n"));
        out.push_str("}\n");
        return out;
    }
    out.push_str(&format!("{INDENT}const struct CMUnitTest tests[] = {{\n"));
    for case in cases {
        let entry = match release {
            ReleasePolicy::AfterAssertions => format!("cmocka_unit_test({})", case.name),
            ReleasePolicy::Guarded => {
                format!("cmocka_unit_test_teardown({}, {TEARDOWN_FN})", case.name)
            }
        };
        out.push_str(&format!("{INDENT}{INDENT}{entry},\n"));
    }
    out.push_str(&format!("{INDENT}}};\n"));
    out.push_str(&format!(
        "{INDENT}return cmocka_run_group_tests(tests, NULL, NULL);\n"
    ));
    out.push_str("}\n");
    out
}

/// Quotes `text` as a C string literal. Bytes outside printable ASCII are
/// written as three-digit octal escapes so a following digit cannot extend
/// them, and `??` is split to keep trigraphs out of the output.
pub fn c_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    let mut after_question = false;
    for &byte in text.as_bytes() {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b'?' if after_question => out.push_str("\\?"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
        after_question = byte == b'?';
    }
    out.push('"');
    out
}

fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}
