//! CSV export for day profiles and derived economy intervals.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::schedule::{EconomyInterval, PowerSample};

/// Column header for sample exports.
const SAMPLES_HEADER: &str = "step,time_hr,watts,economy";

/// Column header for interval exports.
const INTERVALS_HEADER: &str = "start_hr,end_hr,duration_hr";

/// Exports a day profile to a CSV file at the given path.
///
/// The `economy` column carries the predicate evaluation for each sample,
/// so exported telemetry and derived intervals stay consistent.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_samples_csv<P>(samples: &[PowerSample], predicate: P, path: &Path) -> io::Result<()>
where
    P: Fn(&PowerSample) -> bool,
{
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_samples_csv(samples, predicate, buf)
}

/// Writes a day profile as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_samples_csv<P>(
    samples: &[PowerSample],
    predicate: P,
    writer: impl Write,
) -> io::Result<()>
where
    P: Fn(&PowerSample) -> bool,
{
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(SAMPLES_HEADER.split(','))?;
    for (step, sample) in samples.iter().enumerate() {
        wtr.write_record(&[
            step.to_string(),
            format!("{:.4}", sample.time_hr),
            format!("{:.2}", sample.watts),
            predicate(sample).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports derived economy intervals to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_intervals_csv(intervals: &[EconomyInterval], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_intervals_csv(intervals, buf)
}

/// Writes derived economy intervals as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_intervals_csv(intervals: &[EconomyInterval], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(INTERVALS_HEADER.split(','))?;
    for interval in intervals {
        wtr.write_record(&[
            format!("{:.4}", interval.start_hr),
            format!("{:.4}", interval.end_hr),
            format!("{:.4}", interval.duration_hr()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
