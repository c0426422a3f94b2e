use super::{Formatter, PeakOutput};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, output: &PeakOutput) -> String {
        let location = format!(
            "{}[{}..{}]",
            output.source,
            output.frame_start,
            output.frame_start + output.frame_len
        );

        let (Some(index), Some(value), Some(prominence)) =
            (output.index, output.value, output.prominence)
        else {
            return match output.prominence {
                Some(best) if self.verbose => format!(
                    "{}: {} ({} candidates, best prominence {:.2})",
                    location,
                    output.status.as_str(),
                    output.candidates,
                    best
                ),
                _ => format!("{}: {}", location, output.status.as_str()),
            };
        };

        if self.verbose {
            format!(
                "{}: peak at {:>6} value {:>6} prominence {:>8.2} [candidates: {}{}]",
                location,
                index,
                value,
                prominence,
                output.candidates,
                if output.truncated { ", truncated" } else { "" }
            )
        } else {
            format!(
                "{}: peak at {} value {} prominence {:.2}",
                location, index, value, prominence
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::peak_output;

    #[test]
    fn test_text_peak_line() {
        let line = TextFormatter::new(false).format(&peak_output());
        assert_eq!(line, "tri.txt[512..521]: peak at 516 value 90 prominence 80.00");
    }

    #[test]
    fn test_text_verbose_mentions_candidates() {
        let line = TextFormatter::new(true).format(&peak_output());
        assert!(line.contains("candidates: 1"), "{}", line);
    }
}
