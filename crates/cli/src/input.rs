//! Point and option loaders for the CLI.
//!
//! - CSV: columns `x` and `y` (any numeric dtype), read through Polars.
//! - JSON: an array of `[x, y]` pairs.

use anyhow::{bail, Context, Result};
use meetpoint::position::OptionOverrides;
use meetpoint::Point;
use polars::prelude::*;
use std::fs;
use std::path::Path;

pub fn load_points(path: &Path) -> Result<Vec<Point>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_csv(path),
        Some("json") => load_json(path),
        other => bail!(
            "unsupported input extension {:?} for {} (expected .csv or .json)",
            other,
            path.display()
        ),
    }
}

fn load_json(path: &Path) -> Result<Vec<Point>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let pairs: Vec<[f64; 2]> =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    Ok(pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect())
}

fn load_csv(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns of {}", path.display()))?;
    tracing::info!(rows = df.height(), "input_csv_shape");

    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, pair)| match pair {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => bail!("row {row} of {} has a missing coordinate", path.display()),
        })
        .collect()
}

pub fn load_overrides(path: &Path) -> Result<OptionOverrides> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing options {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_pairs() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("pts.json");
        fs::write(&p, "[[1, 2], [5, 6.6], [-7, 8.1]]").unwrap();
        let pts = load_points(&p).unwrap();
        assert_eq!(pts, vec![Point::new(1.0, 2.0), Point::new(5.0, 6.6), Point::new(-7.0, 8.1)]);
    }

    #[test]
    fn csv_columns() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("pts.csv");
        fs::write(&p, "name,x,y\na,1,2\nb,3.5,-1\n").unwrap();
        let pts = load_points(&p).unwrap();
        assert_eq!(pts, vec![Point::new(1.0, 2.0), Point::new(3.5, -1.0)]);
    }

    #[test]
    fn unknown_extension() {
        assert!(load_points(Path::new("points.txt")).is_err());
    }

    #[test]
    fn partial_options_file() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("opts.json");
        fs::write(&p, r#"{"subsearch": true, "degree": 2}"#).unwrap();
        let o = load_overrides(&p).unwrap();
        assert_eq!(o.subsearch, Some(true));
        assert_eq!(o.degree, Some(2));
        assert_eq!(o.epsilon, None);
    }
}
