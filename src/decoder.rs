use crate::types::KeyedField;

/// Names from the C decoder interface that generated tests call into.
///
/// The decoder itself lives outside this crate; only its shape matters here:
/// `ParseResult parse_ais_payload(AISMessage *msg, const char *payload, int fill_bits)`
/// and `void free_ais_message(AISMessage *msg)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderContract {
    /// Path as written in the `#include "..."` line, relative to the generated file.
    pub header: String,
    pub message_struct: String,
    pub result_type: String,
    /// Member of `result_type` that is true on success.
    pub success_member: String,
    pub decode_fn: String,
    pub release_fn: String,
    pub fill_bits: u8,
    pub type_field: String,
    pub mmsi_field: String,
    pub callsign_field: String,
    pub vessel_name_field: String,
    pub bin_len_field: String,
}

pub const DEFAULT_DECODER_HEADER: &str = "../src/parse_ais_msg.h";

impl Default for DecoderContract {
    fn default() -> Self {
        Self {
            header: DEFAULT_DECODER_HEADER.to_string(),
            message_struct: "AISMessage".to_string(),
            result_type: "ParseResult".to_string(),
            success_member: "ok".to_string(),
            decode_fn: "parse_ais_payload".to_string(),
            release_fn: "free_ais_message".to_string(),
            fill_bits: 0,
            type_field: "type".to_string(),
            mmsi_field: "mmsi".to_string(),
            callsign_field: KeyedField::Callsign.as_str().to_string(),
            vessel_name_field: KeyedField::VesselName.as_str().to_string(),
            bin_len_field: "bin_len".to_string(),
        }
    }
}

impl DecoderContract {
    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    pub fn keyed_field(&self, field: KeyedField) -> &str {
        match field {
            KeyedField::Callsign => &self.callsign_field,
            KeyedField::VesselName => &self.vessel_name_field,
        }
    }
}
