//! CSV rows and console summaries for simulation runs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::metrics::Summary;

/// Identifies a run in the persisted row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunInfo {
    pub model_id: String,
    pub sentence_macro_id: String,
    pub word_macro_id: String,
    pub input_file: String,
}

impl RunInfo {
    pub fn from_config(config: &SimConfig, input: &Path) -> Self {
        Self {
            model_id: config.model_id.clone(),
            sentence_macro_id: config.sentence_macro_id.clone(),
            word_macro_id: config.word_macro_id.clone(),
            input_file: input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.display().to_string()),
        }
    }
}

/// `1 hh 2 mm 3.40 ss`; zero hours and minutes are omitted.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs_f64();
    let hours = (total / 3600.0).floor() as u64;
    let minutes = ((total % 3600.0) / 60.0).floor() as u64;
    let seconds = total % 60.0;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours} hh"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} mm"));
    }
    parts.push(format!("{seconds:.2} ss"));
    parts.join(" ")
}

pub fn csv_header(summary: &Summary) -> Vec<String> {
    let mut header: Vec<String> = [
        "Timestamp",
        "Duration",
        "Model ID",
        "Sentence Macro ID",
        "Word Macro ID",
        "Input File",
        "Total Lines Processed",
        "Total Target Characters",
        "Total Clicks",
        "Total Keystrokes (Phonetic)",
        "Sentence Suggestions Used",
        "Word Suggestions Used",
        "Fallback Tokens Typed",
        "Keystroke Saving Rate (%)",
        "Average Chars per Click",
        "Suggestion Select Rate (%)",
        "Average Chars per Selection",
        "Total Segments from Sentence Sugg",
        "Avg Segments per Sentence Sugg",
        "Total Segments from Word Sugg",
        "Avg Segments per Word Sugg",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    header.extend(summary.sentence_hist.labels("SentSuggFreq"));
    header.extend(summary.word_hist.labels("WordSuggFreq"));
    header
}

/// One persisted row. Columns without a value (no phonetic baseline) are
/// left blank.
pub fn csv_row(timestamp: &str, duration: Duration, info: &RunInfo, summary: &Summary) -> Vec<String> {
    let mut row = vec![
        timestamp.to_string(),
        format_duration(duration),
        info.model_id.clone(),
        info.sentence_macro_id.clone(),
        info.word_macro_id.clone(),
        info.input_file.clone(),
        summary.lines.to_string(),
        summary.target_chars.to_string(),
        summary.clicks.to_string(),
        summary.keystrokes.map(|k| k.to_string()).unwrap_or_default(),
        summary.sentence_count.to_string(),
        summary.word_count.to_string(),
        summary.fallback_count.to_string(),
        summary
            .keystroke_saving_rate
            .map(|r| format!("{:.2}", r * 100.0))
            .unwrap_or_default(),
        format!("{:.2}", summary.chars_per_click),
        format!("{:.2}", summary.suggestion_rate * 100.0),
        format!("{:.2}", summary.chars_per_selection),
        summary.sentence_segments.to_string(),
        format!("{:.2}", summary.segments_per_sentence),
        summary.word_segments.to_string(),
        format!("{:.2}", summary.segments_per_word),
    ];
    row.extend(summary.sentence_hist.counts().iter().map(|c| c.to_string()));
    row.extend(summary.word_hist.counts().iter().map(|c| c.to_string()));
    row
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line(fields: &[String]) -> String {
    let mut line = fields.iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// Append `row` to the CSV at `path`, writing `header` first if the file does
/// not exist yet.
pub fn append_csv<P: AsRef<Path>>(path: P, header: &[String], row: &[String]) -> SimResult<()> {
    let path = path.as_ref();
    let exists = path.is_file();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut output = String::new();
    if !exists {
        output.push_str(&csv_line(header));
    }
    output.push_str(&csv_line(row));
    file.write_all(output.as_bytes())?;
    Ok(())
}

/// Human-readable corpus summary.
pub fn write_summary<W: Write>(out: &mut W, config: &SimConfig, summary: &Summary) -> io::Result<()> {
    writeln!(out, "Processed lines: {}", summary.lines)?;
    writeln!(out, "Model: {}", config.model_id)?;
    writeln!(out, "Sentence Macro: {}", config.sentence_macro_id)?;
    writeln!(out, "{}", "-".repeat(20))?;
    writeln!(out, "Total Target Length: {} characters", summary.target_chars)?;
    writeln!(out, "Total Clicks: {}", summary.clicks)?;
    writeln!(out, "Total Sentence Suggestions Used: {}", summary.sentence_count)?;
    writeln!(out, "Total Word Suggestions Used: {}", summary.word_count)?;
    writeln!(out, "Total Fallback Entries: {}", summary.fallback_count)?;
    writeln!(out, "{}", "-".repeat(20))?;
    writeln!(out, "Total Segments from Sentence Sugg: {}", summary.sentence_segments)?;
    writeln!(out, "Avg Segments per Sentence Sugg: {:.2}", summary.segments_per_sentence)?;
    writeln!(out, "Total Segments from Word Sugg: {}", summary.word_segments)?;
    writeln!(out, "Avg Segments per Word Sugg: {:.2}", summary.segments_per_word)?;
    writeln!(out, "{}", "-".repeat(20))?;
    writeln!(out, "Average Chars/Click: {:.2}", summary.chars_per_click)?;
    if let (Some(k), Some(rate)) = (summary.keystrokes, summary.keystroke_saving_rate) {
        writeln!(out, "Total Keystrokes (for comparison): {k}")?;
        writeln!(out, "Keystroke Saving Rate: {:.2}%", rate * 100.0)?;
    }
    writeln!(out, "Suggestion Select Rate: {:.2}%", summary.suggestion_rate * 100.0)?;
    writeln!(out, "Average Chars/Selection: {:.2}", summary.chars_per_selection)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CorpusMetrics;

    #[test]
    fn duration_omits_zero_units() {
        assert_eq!(format_duration(Duration::from_millis(3400)), "3.40 ss");
        assert_eq!(format_duration(Duration::from_secs(61)), "1 mm 1.00 ss");
        assert_eq!(format_duration(Duration::from_secs(3600 + 120)), "1 hh 2 mm 0.00 ss");
        assert_eq!(format_duration(Duration::ZERO), "0.00 ss");
    }

    #[test]
    fn header_and_row_line_up() {
        let summary = CorpusMetrics::new(5).finalize();
        let header = csv_header(&summary);
        let row = csv_row("2024-01-01 00:00:00", Duration::ZERO, &RunInfo::default(), &summary);
        assert_eq!(header.len(), 21 + 12);
        assert_eq!(header.len(), row.len());
        assert_eq!(header[21], "SentSuggFreq_1");
        assert_eq!(header[32], "WordSuggFreq_6plus");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn header_written_once() {
        let path = std::env::temp_dir().join(format!("voicesim_report_{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let header = vec!["A".to_string(), "B".to_string()];
        append_csv(&path, &header, &["1".to_string(), "2".to_string()]).unwrap();
        append_csv(&path, &header, &["3".to_string(), "4".to_string()]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "A,B\n1,2\n3,4\n");
        let _ = std::fs::remove_file(&path);
    }
}
