use super::{Formatter, PeakOutput, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, output: &PeakOutput) -> String {
        let index = output.index.map_or(String::new(), |i| i.to_string());
        let value = output.value.map_or(String::new(), |v| v.to_string());
        let prominence = output
            .prominence
            .map_or(String::new(), |p| format!("{:.3}", p));
        format!(
            "{},{},{},{},{},{},{},{},{},{}",
            iso8601_timestamp(),
            output.source,
            output.frame_start,
            output.frame_len,
            output.status.as_str(),
            index,
            value,
            prominence,
            output.candidates,
            output.truncated
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,source,frame_start,frame_len,status,index,value,prominence,candidates,truncated")
    }
}
