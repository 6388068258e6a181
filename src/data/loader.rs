use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value as JsonValue};

use super::error::DatasetError;
use super::model::{Dataset, Record};

pub const TITLE: &str = "Title";
pub const SOURCE: &str = "Source";
pub const PUBLICATION_DATE: &str = "Publication Date";
pub const EMOTION_LABEL: &str = "Emotion Label";
pub const THEMATIC_LABEL: &str = "Thematic Label";
pub const SUMMARY: &str = "Summary";
pub const URL: &str = "URL";

/// Columns without which a CSV file is rejected. Text columns are optional.
const REQUIRED_COLUMNS: [&str; 4] = [SOURCE, PUBLICATION_DATE, EMOTION_LABEL, THEMATIC_LABEL];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an article table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the fixed column names
/// * `.json` – `[{ "Title": ..., "Source": ..., ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = match ext.as_str() {
        "csv" | "json" => BufReader::new(File::open(path)?),
        other => return Err(DatasetError::UnsupportedExtension(other.to_string())),
    };

    let dataset = if ext == "csv" {
        read_csv(file)?
    } else {
        read_json(file)?
    };
    log::info!("Loaded {} articles from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row normalisation shared by both formats
// ---------------------------------------------------------------------------

/// One input row before normalisation, cells keyed by column.
#[derive(Debug, Default)]
struct RawRow {
    title: Option<String>,
    source: Option<String>,
    publication_date: Option<RawDate>,
    emotion_label: Option<String>,
    thematic_label: Option<String>,
    summary: Option<String>,
    url: Option<String>,
}

#[derive(Debug)]
enum RawDate {
    Text(String),
    /// Milliseconds since the Unix epoch, as written by `DataFrame.to_json`.
    EpochMillis(i64),
}

impl RawDate {
    fn parse(&self) -> Option<NaiveDate> {
        match self {
            RawDate::Text(s) => parse_publication_date(s),
            RawDate::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.date_naive()),
        }
    }
}

fn text(cell: Option<String>) -> String {
    cell.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn label(cell: Option<String>) -> Option<String> {
    let value = text(cell);
    (!value.is_empty()).then_some(value)
}

/// Normalise raw rows into a dataset, counting dates that failed to parse.
fn build_dataset(rows: Vec<RawRow>) -> Dataset {
    let mut coerced = 0usize;
    let records: Vec<Record> = rows
        .into_iter()
        .map(|row| {
            let publication_date = row.publication_date.as_ref().and_then(|raw| {
                let parsed = raw.parse();
                if parsed.is_none() {
                    coerced += 1;
                }
                parsed
            });
            Record {
                title: text(row.title),
                source: label(row.source),
                publication_date,
                emotion_label: label(row.emotion_label),
                thematic_label: label(row.thematic_label),
                summary: text(row.summary),
                url: text(row.url),
            }
        })
        .collect();

    if coerced > 0 {
        log::debug!("{coerced} publication dates could not be parsed and were set to null");
    }
    Dataset::from_records(records)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV table. Requires a header row containing at least the
/// categorical and date columns; other columns are ignored. Rows shorter
/// than the header load with the missing cells empty.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);

    for column in REQUIRED_COLUMNS {
        if position(column).is_none() {
            return Err(DatasetError::MissingColumn(column));
        }
    }

    let title_idx = position(TITLE);
    let source_idx = position(SOURCE);
    let date_idx = position(PUBLICATION_DATE);
    let emotion_idx = position(EMOTION_LABEL);
    let theme_idx = position(THEMATIC_LABEL);
    let summary_idx = position(SUMMARY);
    let url_idx = position(URL);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        rows.push(RawRow {
            title: cell(title_idx),
            source: cell(source_idx),
            publication_date: cell(date_idx).map(RawDate::Text),
            emotion_label: cell(emotion_idx),
            thematic_label: cell(theme_idx),
            summary: cell(summary_idx),
            url: cell(url_idx),
        });
    }

    Ok(build_dataset(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Read a records-oriented JSON array (`df.to_json(orient="records")`).
/// Missing keys and `null` load as empty values.
pub fn read_json<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let rows: Vec<Map<String, JsonValue>> = serde_json::from_reader(reader)?;

    let rows = rows
        .iter()
        .map(|obj| RawRow {
            title: json_text(obj.get(TITLE)),
            source: json_text(obj.get(SOURCE)),
            publication_date: json_date(obj.get(PUBLICATION_DATE)),
            emotion_label: json_text(obj.get(EMOTION_LABEL)),
            thematic_label: json_text(obj.get(THEMATIC_LABEL)),
            summary: json_text(obj.get(SUMMARY)),
            url: json_text(obj.get(URL)),
        })
        .collect();

    Ok(build_dataset(rows))
}

fn json_text(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_date(val: Option<&JsonValue>) -> Option<RawDate> {
    match val? {
        JsonValue::Null => None,
        JsonValue::Number(n) => match n.as_i64() {
            Some(ms) => Some(RawDate::EpochMillis(ms)),
            None => Some(RawDate::Text(n.to_string())),
        },
        JsonValue::String(s) => Some(RawDate::Text(s.clone())),
        other => Some(RawDate::Text(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// Parse a publication date in any of the common layouts news exports use.
/// Timestamps keep only their date part. Returns `None` when nothing fits.
pub fn parse_publication_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_common_layouts() {
        let expected = date(2025, 10, 4);
        for input in [
            "2025-10-04",
            "2025/10/04",
            "10/04/2025",
            "04.10.2025",
            "October 4, 2025",
            "Oct 4, 2025",
            "4 October 2025",
            "2025-10-04 13:45:00",
            "2025-10-04T13:45:00Z",
            "2025-10-04T13:45:00.250",
            "Sat, 04 Oct 2025 13:45:00 -0500",
            "  2025-10-04  ",
        ] {
            assert_eq!(parse_publication_date(input), Some(expected), "input {input:?}");
        }
    }

    #[test]
    fn garbage_dates_are_none() {
        for input in ["", "   ", "unknown", "2025-13-40", "last Tuesday"] {
            assert_eq!(parse_publication_date(input), None, "input {input:?}");
        }
    }

    #[test]
    fn csv_rows_are_normalised() {
        let csv = "\
Title,Source,Publication Date,Emotion Label,Thematic Label,Summary,URL
Raid on 26th St, Tribune ,2025-09-12,Fear,Enforcement,Agents arrived at dawn.,https://example.org/a
No date here,Sun-Times,not a date,,Community,,
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.records()[0];
        assert_eq!(first.title, "Raid on 26th St");
        assert_eq!(first.source.as_deref(), Some("Tribune"));
        assert_eq!(first.publication_date, Some(date(2025, 9, 12)));
        assert_eq!(first.emotion_label.as_deref(), Some("Fear"));
        assert_eq!(first.url, "https://example.org/a");

        let second = &ds.records()[1];
        assert_eq!(second.publication_date, None);
        assert_eq!(second.emotion_label, None);
        assert_eq!(second.thematic_label.as_deref(), Some("Community"));
        assert_eq!(second.summary, "");
    }

    #[test]
    fn csv_text_columns_are_optional() {
        let csv = "Source,Publication Date,Emotion Label,Thematic Label,Extra\nWBEZ,2025-01-02,Hope,Support,x\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        let record = &ds.records()[0];
        assert_eq!(record.title, "");
        assert_eq!(record.url, "");
        assert_eq!(record.source.as_deref(), Some("WBEZ"));
    }

    #[test]
    fn csv_missing_required_column_is_an_error() {
        let csv = "Title,Source,Publication Date,Thematic Label\nA,B,2025-01-01,C\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(EMOTION_LABEL)));
    }

    #[test]
    fn short_rows_load_with_missing_cells_empty() {
        let csv = "\
Title,Source,Publication Date,Emotion Label,Thematic Label,Summary,URL
A,Tribune,2025-01-01,Fear,Raids,s,u
B,WBEZ,2025-01-02,Hope
C,Sun-Times
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let second = &ds.records()[1];
        assert_eq!(second.emotion_label.as_deref(), Some("Hope"));
        assert_eq!(second.publication_date, Some(date(2025, 1, 2)));
        assert_eq!(second.thematic_label, None);
        assert_eq!(second.summary, "");
        assert_eq!(second.url, "");

        let third = &ds.records()[2];
        assert_eq!(third.source.as_deref(), Some("Sun-Times"));
        assert_eq!(third.publication_date, None);
        assert_eq!(third.emotion_label, None);
    }

    #[test]
    fn header_only_csv_is_empty_dataset() {
        let csv = "Title,Source,Publication Date,Emotion Label,Thematic Label,Summary,URL\n";
        assert!(read_csv(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn json_records_with_epoch_dates() {
        let json = r#"[
            {"Title": "A", "Source": "Tribune", "Publication Date": 1726099200000,
             "Emotion Label": "Anger", "Thematic Label": null, "URL": "https://example.org"},
            {"Title": "B", "Publication Date": "2024-09-13"},
            {"Title": "C", "Publication Date": "n/a", "Emotion Label": "  "}
        ]"#;
        let ds = read_json(json.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[0].publication_date, Some(date(2024, 9, 12)));
        assert_eq!(ds.records()[0].thematic_label, None);
        assert_eq!(ds.records()[1].publication_date, Some(date(2024, 9, 13)));
        assert_eq!(ds.records()[1].source, None);
        assert_eq!(ds.records()[2].publication_date, None);
        assert_eq!(ds.records()[2].emotion_label, None);
    }

    #[test]
    fn json_must_be_an_array() {
        let err = read_json(r#"{"Title": "A"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("articles.xlsx")).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedExtension(ext) if ext == "xlsx"));
    }
}
