use std::str::FromStr;

use solver_compare_shared::SolverTag;

use crate::error::ParseError;

pub const COL_INSTANCE: usize = 0;
pub const COL_TIME_LIMIT: usize = 2;
pub const COL_RUNTIME: usize = 3;
pub const COL_COST: usize = 4;
pub const COL_RUNTIME_TO_BEST: usize = 7;
pub const COL_ITERATIONS_TO_BEST: usize = 8;
pub const COL_TOTAL_ITERATIONS: usize = 9;

/// Ordered classification rules, first match wins.
///
/// A pattern must precede every shorter pattern it contains: `"GH + HC"` and
/// `"GH + TS"` come before `"GH"`. Tabu-search runs map to `None` and are not
/// part of the comparison.
pub const CLASSIFICATION_RULES: [(&str, Option<SolverTag>); 6] = [
    ("BinP", Some(SolverTag::BinPacking)),
    ("3Idx", Some(SolverTag::ThreeIndex)),
    ("GH + HC", Some(SolverTag::HeuristicFinal)),
    ("GH + TS", None),
    ("GH", Some(SolverTag::HeuristicInitial)),
    ("LB", Some(SolverTag::LowerBound)),
];

pub fn classify(line: &str) -> Option<SolverTag> {
    CLASSIFICATION_RULES
        .iter()
        .find(|(pattern, _)| line.contains(pattern))
        .and_then(|(_, tag)| *tag)
}

/// Local search progress reported with the final heuristic result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicProgress {
    pub runtime_to_best: f64,
    pub iterations_to_best: u64,
    pub total_iterations: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the experiment file.
    pub line: usize,
    pub instance_index: usize,
    pub tag: SolverTag,
    pub cost: f64,
    /// Present for exact and final heuristic records.
    pub runtime: Option<f64>,
    pub progress: Option<HeuristicProgress>,
}

/// Records of one experiment file plus the metadata read from its first rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExperiment {
    pub instance_type: String,
    pub time_limit: f64,
    pub records: Vec<RawRecord>,
}

fn required_columns(tag: SolverTag) -> usize {
    match tag {
        SolverTag::HeuristicFinal => COL_TOTAL_ITERATIONS + 1,
        _ => COL_COST + 1,
    }
}

fn field<T: FromStr>(
    cols: &[&str],
    idx: usize,
    name: &str,
    line: usize,
    tag: SolverTag,
) -> Result<T, ParseError> {
    let raw = cols[idx].trim();
    raw.parse().map_err(|_| ParseError::MalformedRecord {
        line,
        tag,
        reason: format!("column {} ({}) is not numeric: {:?}", idx, name, raw),
    })
}

/// Like `field`, but `inf` and `NaN` are malformed too.
fn finite_field(
    cols: &[&str],
    idx: usize,
    name: &str,
    line: usize,
    tag: SolverTag,
) -> Result<f64, ParseError> {
    let value: f64 = field(cols, idx, name, line, tag)?;
    if !value.is_finite() {
        return Err(ParseError::MalformedRecord {
            line,
            tag,
            reason: format!("column {} ({}) is not finite: {}", idx, name, value),
        });
    }
    Ok(value)
}

/// Takes the trailing underscore-separated token of an instance id.
pub fn instance_index(id: &str, line: usize) -> Result<usize, ParseError> {
    id.trim()
        .rsplit('_')
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| ParseError::BadInstanceId {
            line,
            id: id.to_string(),
        })
}

/// Parses one data line. Unclassified lines yield `Ok(None)`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<RawRecord>, ParseError> {
    let Some(tag) = classify(line) else {
        return Ok(None);
    };
    let cols: Vec<&str> = line.trim().split(',').collect();
    let required = required_columns(tag);
    if cols.len() < required {
        return Err(ParseError::MalformedRecord {
            line: line_no,
            tag,
            reason: format!("expected at least {} columns, got {}", required, cols.len()),
        });
    }

    let instance_index = instance_index(cols[COL_INSTANCE], line_no)?;
    let cost = finite_field(&cols, COL_COST, "cost", line_no, tag)?;
    let runtime = match tag {
        SolverTag::BinPacking | SolverTag::ThreeIndex | SolverTag::HeuristicFinal => {
            Some(finite_field(&cols, COL_RUNTIME, "runtime", line_no, tag)?)
        }
        SolverTag::HeuristicInitial | SolverTag::LowerBound => None,
    };
    let progress = if tag == SolverTag::HeuristicFinal {
        Some(HeuristicProgress {
            runtime_to_best: finite_field(&cols, COL_RUNTIME_TO_BEST, "runtime to best", line_no, tag)?,
            iterations_to_best: field(&cols, COL_ITERATIONS_TO_BEST, "iterations to best", line_no, tag)?,
            total_iterations: field(&cols, COL_TOTAL_ITERATIONS, "total iterations", line_no, tag)?,
        })
    } else {
        None
    };

    Ok(Some(RawRecord {
        line: line_no,
        instance_index,
        tag,
        cost,
        runtime,
        progress,
    }))
}

/// Parses a whole experiment file. The first line is a header and is skipped.
pub fn parse_experiment(contents: &str) -> Result<ParsedExperiment, ParseError> {
    let data: Vec<(usize, &str)> = contents
        .lines()
        .enumerate()
        .skip(1)
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let (_, first) = data.first().ok_or(ParseError::EmptyExperiment)?;
    let instance_type = first
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .split('_')
        .take(3)
        .collect::<Vec<_>>()
        .join("_");

    let time_limit = data
        .iter()
        .find_map(|(_, line)| {
            let limit: f64 = line.split(',').nth(COL_TIME_LIMIT)?.trim().parse().ok()?;
            limit.is_finite().then_some(limit)
        })
        .ok_or(ParseError::MissingTimeLimit)?;

    let mut records = Vec::with_capacity(data.len());
    for (line_no, line) in data {
        match parse_line(line_no, line)? {
            Some(record) => records.push(record),
            None => log::warn!("line {}: no solver label matched, skipping", line_no),
        }
    }

    Ok(ParsedExperiment {
        instance_type,
        time_limit,
        records,
    })
}
