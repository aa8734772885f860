//! Per-trial record output.
//!
//! Line format, one per trial with a 1-based index:
//!
//! ```text
//! <index>,yes,<solve_time_us>,<position_error>,<orientation_error>
//! <index>,no,not_available,not_available,not_available
//! ```

use crate::stats::TrialRecord;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

const NOT_AVAILABLE: &str = "not_available";

/// Destination for trial records
pub trait ResultSink {
    fn record(&mut self, record: &TrialRecord) -> io::Result<()>;

    /// Flush and release the destination. Called once at the end of a run.
    fn close(&mut self) -> io::Result<()>;
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn record(&mut self, record: &TrialRecord) -> io::Result<()> {
        (**self).record(record)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Writes the comma-separated record format, without a header row
pub struct CsvResultSink<W: Write> {
    writer: Option<csv::Writer<W>>,
    lines_written: usize,
}

impl<W: Write> fmt::Debug for CsvResultSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvResultSink")
            .field("open", &self.writer.is_some())
            .field("lines_written", &self.lines_written)
            .finish()
    }
}

impl CsvResultSink<File> {
    /// Create (or truncate) a data file
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> CsvResultSink<W> {
    pub fn new(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        Self {
            writer: Some(writer),
            lines_written: 0,
        }
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Close the sink and hand back the underlying writer
    pub fn into_inner(mut self) -> io::Result<W> {
        let writer = self.writer.take().ok_or_else(closed)?;
        writer.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> ResultSink for CsvResultSink<W> {
    fn record(&mut self, record: &TrialRecord) -> io::Result<()> {
        let writer = self.writer.as_mut().ok_or_else(closed)?;
        writer.write_record(&record_fields(record))?;
        self.lines_written += 1;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "sink already closed")
}

/// Fields of one record line
pub fn record_fields(record: &TrialRecord) -> [String; 5] {
    let number = (record.index + 1).to_string();
    match (
        record.success,
        record.solve_time_us,
        record.position_error,
        record.orientation_error,
    ) {
        (true, Some(time), Some(position), Some(orientation)) => [
            number,
            "yes".to_string(),
            time.to_string(),
            format_general(position),
            format_general(orientation),
        ],
        _ => [
            number,
            "no".to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
        ],
    }
}

/// Render one record line (without the trailing newline)
pub fn format_record(record: &TrialRecord) -> String {
    record_fields(record).join(",")
}

/// Format like C's `%g` with 6 significant digits.
///
/// This is what the record files have always contained, so existing
/// analysis scripts keep parsing them.
pub fn format_general(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to the target precision can bump the exponent (9.999995 -> 1e+01)
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose_error::PoseError;

    #[test]
    fn test_format_general_matches_printf() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(1.0), "1");
        assert_eq!(format_general(0.5), "0.5");
        assert_eq!(format_general(3.14159265), "3.14159");
        assert_eq!(format_general(0.000123456789), "0.000123457");
        assert_eq!(format_general(1.23456789e-5), "1.23457e-05");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(9.9999999), "10");
        assert_eq!(format_general(-2.5e-7), "-2.5e-07");
        assert_eq!(format_general(1e100), "1e+100");
    }

    #[test]
    fn test_success_line() {
        let record = TrialRecord::succeeded(
            0,
            152,
            PoseError {
                position: 1.5e-6,
                orientation: 0.0,
            },
        );
        assert_eq!(format_record(&record), "1,yes,152,1.5e-06,0");
    }

    #[test]
    fn test_failure_line() {
        assert_eq!(
            format_record(&TrialRecord::failed(41)),
            "42,no,not_available,not_available,not_available"
        );
    }

    #[test]
    fn test_sink_writes_one_line_per_record() {
        let mut sink = CsvResultSink::new(Vec::new());
        sink.record(&TrialRecord::failed(0)).unwrap();
        sink.record(&TrialRecord::failed(1)).unwrap();
        assert_eq!(sink.lines_written(), 2);

        let bytes = sink.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "1,no,not_available,not_available,not_available\n\
             2,no,not_available,not_available,not_available\n"
        );
    }

    #[test]
    fn test_sink_output_matches_formatted_lines() {
        let records = [
            TrialRecord::succeeded(
                0,
                87,
                PoseError {
                    position: 2.25e-5,
                    orientation: 0.0125,
                },
            ),
            TrialRecord::failed(1),
        ];
        let mut sink = CsvResultSink::new(Vec::new());
        for record in &records {
            sink.record(record).unwrap();
        }

        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let expected: String = records
            .iter()
            .map(|r| format!("{}\n", format_record(r)))
            .collect();
        assert_eq!(text, expected);
        assert!(text.starts_with("1,yes,87,2.25e-05,0.0125\n"));
    }

    #[test]
    fn test_record_after_close_fails() {
        let mut sink = CsvResultSink::new(Vec::new());
        sink.close().unwrap();
        assert!(sink.record(&TrialRecord::failed(0)).is_err());
        // Closing twice is harmless
        sink.close().unwrap();
    }

    #[test]
    fn test_create_makes_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("data.csv");

        let mut sink = CsvResultSink::create(&path).unwrap();
        sink.record(&TrialRecord::failed(0)).unwrap();
        sink.close().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
