//! Tabular export of antennas and nefasto points through polars.

use anyhow::{bail, Context, Result};
use nefasto::api::NefastoPoints;
use nefasto::Registry;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            other => bail!("unsupported table extension {:?} (use .csv or .parquet)", other),
        }
    }
}

/// One row per antenna (`kind = "antenna"`) followed by one per nefasto
/// point (`kind = "nefasto"`, no frequency).
pub fn table(reg: &Registry, points: &NefastoPoints) -> PolarsResult<DataFrame> {
    let n = reg.len() + points.len();
    let mut kind: Vec<&str> = Vec::with_capacity(n);
    let mut frequency: Vec<Option<String>> = Vec::with_capacity(n);
    let mut xs: Vec<i32> = Vec::with_capacity(n);
    let mut ys: Vec<i32> = Vec::with_capacity(n);
    for a in reg.iter() {
        kind.push("antenna");
        frequency.push(Some(a.frequency.to_string()));
        xs.push(a.pos.x);
        ys.push(a.pos.y);
    }
    for p in points.iter() {
        kind.push("nefasto");
        frequency.push(None);
        xs.push(p.x);
        ys.push(p.y);
    }
    df!(
        "kind" => kind,
        "frequency" => frequency,
        "x" => xs,
        "y" => ys
    )
}

pub fn write_table(df: &mut DataFrame, out: &Path) -> Result<TableFormat> {
    let format = TableFormat::from_path(out)?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    match format {
        TableFormat::Csv => CsvWriter::new(&mut file).finish(df)?,
        TableFormat::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
    }
    tracing::info!(rows = df.height(), path = %out.display(), ?format, "table written");
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nefasto::api::{derive, Bounds, NefastoPolicy};
    use nefasto::Frequency;
    use tempfile::tempdir;

    fn pair() -> Registry {
        let mut reg = Registry::sorted();
        let a = Frequency::try_from('a').unwrap();
        reg.insert_new(a, 3, 4).unwrap();
        reg.insert_new(a, 5, 5).unwrap();
        reg
    }

    #[test]
    fn table_has_antennas_then_points() {
        let reg = pair();
        let points = derive(&reg, NefastoPolicy::Bounded(Bounds::new(10, 10)));
        let df = table(&reg, &points).unwrap();
        assert_eq!(df.shape(), (4, 4));
        assert_eq!(df.column("frequency").unwrap().null_count(), 2);
    }

    #[test]
    fn writes_csv_and_parquet() {
        let dir = tempdir().unwrap();
        let reg = pair();
        let points = derive(&reg, NefastoPolicy::Unbounded);
        let mut df = table(&reg, &points).unwrap();

        let csv = dir.path().join("out/antennas.csv");
        assert_eq!(write_table(&mut df, &csv).unwrap(), TableFormat::Csv);
        let text = std::fs::read_to_string(&csv).unwrap();
        assert_eq!(text.lines().next(), Some("kind,frequency,x,y"));
        assert_eq!(text.lines().nth(1), Some("antenna,a,3,4"));
        assert_eq!(text.lines().count(), 5);
        let back = LazyCsvReader::new(&csv)
            .with_infer_schema_length(Some(100))
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(back.shape(), (4, 4));

        let pq = dir.path().join("antennas.parquet");
        assert_eq!(write_table(&mut df, &pq).unwrap(), TableFormat::Parquet);
        assert!(std::fs::metadata(&pq).unwrap().len() > 0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(TableFormat::from_path(Path::new("x.json")).is_err());
        assert!(TableFormat::from_path(Path::new("noext")).is_err());
    }
}
