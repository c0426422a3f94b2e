use serde::Serialize;

use super::{Formatter, PeakOutput, iso8601_timestamp};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonLine<'a> {
    ts: String,
    #[serde(flatten)]
    output: &'a PeakOutput,
}

impl Formatter for JsonFormatter {
    fn format(&self, output: &PeakOutput) -> String {
        let line = JsonLine {
            ts: iso8601_timestamp(),
            output,
        };
        serde_json::to_string(&line).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
