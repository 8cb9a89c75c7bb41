//! CSV output for extracted vehicle records.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Context;
use lotscan_core::{VehicleRecord, CSV_COLUMNS};

/// Writes one header row, then one row per record as they arrive.
pub(crate) struct CsvSink<W: io::Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Creates (or truncates) the file at `path` and writes the header.
    pub(crate) fn create(path: &Path) -> anyhow::Result<Self> {
        let writer = csv::Writer::from_path(path)
            .with_context(|| format!("cannot create output file {}", path.display()))?;
        Self::with_header(writer)
    }
}

impl<W: io::Write> CsvSink<W> {
    #[cfg(test)]
    pub(crate) fn from_writer(inner: W) -> anyhow::Result<Self> {
        Self::with_header(csv::Writer::from_writer(inner))
    }

    fn with_header(mut writer: csv::Writer<W>) -> anyhow::Result<Self> {
        writer.write_record(CSV_COLUMNS)?;
        Ok(Self { writer })
    }

    pub(crate) fn write(&mut self, record: &VehicleRecord) -> anyhow::Result<()> {
        self.writer.write_record(record.csv_row())?;
        Ok(())
    }

    /// Flushes buffered rows and hands back the underlying writer.
    pub(crate) fn finish(self) -> anyhow::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("failed to flush CSV output: {}", e.error()))
    }
}

#[cfg(test)]
mod tests {
    use lotscan_core::Numeric;

    use super::*;

    fn written(records: &[VehicleRecord]) -> String {
        let mut sink = CsvSink::from_writer(Vec::new()).unwrap();
        for record in records {
            sink.write(record).unwrap();
        }
        String::from_utf8(sink.finish().unwrap()).unwrap()
    }

    #[test]
    fn header_only_when_no_records() {
        assert_eq!(
            written(&[]),
            "url,vin,condition,year,make,model,trim,price,mileage,stock_number,\
             exterior_color,interior_color,drivetrain,transmission,engine,images\n"
        );
    }

    #[test]
    fn record_row_follows_header() {
        let mut record =
            VehicleRecord::new("https://www.toyotagallatin.com/viewdetails/new/JTD1/2024-corolla");
        record.year = Some(Numeric::Parsed(2024));
        record.make = Some("Toyota".to_string());
        record.price = Some(Numeric::Parsed(24995.0));
        record.mileage = Some(Numeric::Raw("TBD".to_string()));
        record.engine = Some("2.0L 4-Cyl, Dynamic Force".to_string());
        record.images = vec!["https://img/1.jpg".to_string(), "https://img/2.jpg".to_string()];

        let out = written(&[record]);
        let row = out.lines().nth(1).unwrap();

        assert_eq!(
            row,
            "https://www.toyotagallatin.com/viewdetails/new/JTD1/2024-corolla,,new,2024,Toyota,,,\
             24995.00,TBD,,,,,,\"2.0L 4-Cyl, Dynamic Force\",https://img/1.jpg|https://img/2.jpg"
        );
    }
}
