// src/samples.rs

//! Sample-list parsing.
//!
//! The sample list is tab-separated with a header row naming at least the
//! `sample_id`, `file` and `synapse_id` columns (in any order; other columns
//! are ignored). One row per input file; rows sharing a `sample_id` belong to
//! the same sample. Any malformed row fails the whole parse so that no job is
//! ever submitted for a partially read list.

use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{PipelineError, Result};
use crate::fs::FileSystem;

/// One raw input to acquire for a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile {
    pub file: String,
    pub synapse_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub id: String,
    /// In the order the rows appear in the sample list.
    pub files: Vec<SampleFile>,
}

const SAMPLE_ID: &str = "sample_id";
const FILE: &str = "file";
const SYNAPSE_ID: &str = "synapse_id";

struct Columns {
    sample_id: usize,
    file: usize,
    synapse_id: usize,
    width: usize,
}

pub fn load_sample_list(fs: &dyn FileSystem, path: &Path) -> Result<Vec<Sample>> {
    let text = fs.read_to_string(path)?;
    parse_sample_list(&text)
}

/// Parse and group a sample list.
///
/// Samples come back ordered by `sample_id`, which is the order they are
/// submitted in. When every id is an integer they are ordered numerically
/// (`9` before `10`), otherwise lexicographically.
pub fn parse_sample_list(text: &str) -> Result<Vec<Sample>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty());

    let (header_line, header) = lines.next().ok_or(PipelineError::SampleList {
        line: 1,
        message: "sample list is empty".to_string(),
    })?;
    let columns = parse_header(header_line, header)?;

    let mut grouped: BTreeMap<String, Vec<SampleFile>> = BTreeMap::new();
    for (line, row) in lines {
        let fields: Vec<&str> = row.split('\t').map(str::trim).collect();
        if fields.len() < columns.width {
            return Err(PipelineError::SampleList {
                line,
                message: format!(
                    "expected at least {} columns, found {}",
                    columns.width,
                    fields.len()
                ),
            });
        }

        let sample_id = required(&fields, columns.sample_id, SAMPLE_ID, line)?;
        let file = required(&fields, columns.file, FILE, line)?;
        let synapse_id = required(&fields, columns.synapse_id, SYNAPSE_ID, line)?;

        grouped
            .entry(sample_id.to_string())
            .or_default()
            .push(SampleFile {
                file: file.to_string(),
                synapse_id: synapse_id.to_string(),
            });
    }

    let mut samples: Vec<Sample> = grouped
        .into_iter()
        .map(|(id, files)| Sample { id, files })
        .collect();
    sort_numeric_ids(&mut samples);
    Ok(samples)
}

/// Reorder by numeric value if all ids are integers. Stable, so ids that
/// compare equal numerically (`7`, `07`) keep their lexicographic order.
fn sort_numeric_ids(samples: &mut [Sample]) {
    if samples.iter().all(|s| s.id.parse::<i64>().is_ok()) {
        samples.sort_by_cached_key(|s| s.id.parse::<i64>().unwrap_or_default());
    }
}

fn parse_header(line: usize, header: &str) -> Result<Columns> {
    let names: Vec<&str> = header.split('\t').map(str::trim).collect();
    let find = |name: &str| {
        names
            .iter()
            .position(|n| *n == name)
            .ok_or_else(|| PipelineError::SampleList {
                line,
                message: format!("missing required column '{name}'"),
            })
    };

    let sample_id = find(SAMPLE_ID)?;
    let file = find(FILE)?;
    let synapse_id = find(SYNAPSE_ID)?;
    let width = sample_id.max(file).max(synapse_id) + 1;

    Ok(Columns {
        sample_id,
        file,
        synapse_id,
        width,
    })
}

fn required<'a>(fields: &[&'a str], index: usize, name: &str, line: usize) -> Result<&'a str> {
    match fields[index] {
        "" => Err(PipelineError::SampleList {
            line,
            message: format!("empty '{name}'"),
        }),
        value => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_rows_by_sample_in_id_order() {
        let text = "sample_id\tfile\tsynapse_id\n\
                    S2\tc.bam\tsyn3\n\
                    S1\ta.bam\tsyn1\n\
                    S1\tb.bam\tsyn2\n";
        let samples = parse_sample_list(text).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].id, "S1");
        assert_eq!(
            samples[0].files,
            vec![
                SampleFile { file: "a.bam".into(), synapse_id: "syn1".into() },
                SampleFile { file: "b.bam".into(), synapse_id: "syn2".into() },
            ]
        );
        assert_eq!(samples[1].id, "S2");
    }

    #[test]
    fn column_order_is_free_and_extra_columns_ignored() {
        let text = "synapse_id\tnote\tfile\tsample_id\r\nsyn9\tx\tz.cram\tS7\r\n";
        let samples = parse_sample_list(text).unwrap();
        assert_eq!(samples[0].id, "S7");
        assert_eq!(samples[0].files[0].file, "z.cram");
        assert_eq!(samples[0].files[0].synapse_id, "syn9");
    }

    #[test]
    fn missing_column_is_fatal() {
        let err = parse_sample_list("sample_id\tfile\nS1\ta.bam\n").unwrap_err();
        match err {
            PipelineError::SampleList { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("synapse_id"));
            }
            other => panic!("expected SampleList error, got {other:?}"),
        }
    }

    #[test]
    fn short_row_reports_its_line() {
        let text = "sample_id\tfile\tsynapse_id\nS1\ta.bam\tsyn1\n\nS1\tb.bam\n";
        match parse_sample_list(text).unwrap_err() {
            PipelineError::SampleList { line, .. } => assert_eq!(line, 4),
            other => panic!("expected SampleList error, got {other:?}"),
        }
    }

    #[test]
    fn empty_sample_id_is_fatal() {
        let text = "sample_id\tfile\tsynapse_id\n\ta.bam\tsyn1\n";
        assert!(parse_sample_list(text).is_err());
    }

    #[test]
    fn integer_ids_sort_numerically() {
        let text = "sample_id\tfile\tsynapse_id\n\
                    10\tc.bam\tsyn3\n\
                    9\ta.bam\tsyn1\n\
                    100\tb.bam\tsyn2\n";
        let ids: Vec<String> = parse_sample_list(text)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["9", "10", "100"]);
    }

    #[test]
    fn mixed_ids_sort_as_text() {
        let text = "sample_id\tfile\tsynapse_id\n10\ta\ts1\n9b\tb\ts2\n";
        let ids: Vec<String> = parse_sample_list(text)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["10", "9b"]);
    }

    #[test]
    fn header_only_gives_no_samples() {
        assert!(parse_sample_list("sample_id\tfile\tsynapse_id\n").unwrap().is_empty());
        assert!(parse_sample_list("").is_err());
    }
}
