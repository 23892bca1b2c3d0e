use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{Dataset, Sighting};

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Fatal dataset loading failure. Raised before any UI is shown; there is no
/// partial load, a single bad record aborts everything.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A required column is absent from the header row.
    #[error("parsing {}: missing required column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    /// Malformed CSV: a non-numeric value in a numeric column, or a
    /// structurally bad record. The csv error carries the record and line
    /// numbers.
    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Raw CSV schema
// ---------------------------------------------------------------------------

/// Columns the loader requires in the header row. serde would quietly load
/// an absent `Option` column as all-`None`, so presence is checked up front.
const REQUIRED_COLUMNS: [&str; 7] = [
    "Country",
    "UFO_shape",
    "Year",
    "latitude",
    "longitude",
    "Description",
    "length_of_encounter_seconds",
];

/// One row exactly as it appears in the file. Header names are fixed by the
/// source dataset; extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "UFO_shape")]
    shape: Option<String>,
    #[serde(rename = "Year")]
    year: i32,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "length_of_encounter_seconds")]
    duration_seconds: f64,
}

impl RawRow {
    /// The one-time, irreversible unit conversion: seconds → minutes.
    fn into_sighting(self) -> Sighting {
        Sighting {
            country: self.country,
            shape: self.shape,
            year: self.year,
            latitude: self.latitude,
            longitude: self.longitude,
            duration_min: self.duration_seconds / 60.0,
            description: self.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Load the sightings dataset from a Latin-1 encoded CSV file.
///
/// Expected header (extra columns are ignored):
/// `Country, UFO_shape, Year, latitude, longitude, Description,
/// length_of_encounter_seconds`
///
/// The header row is checked for every required column before any record is
/// parsed; a missing column aborts the load. Empty `Country` / `UFO_shape` /
/// `Description` / coordinate cells load as `None`. A missing or non-numeric
/// duration or year in any record fails the whole load rather than
/// defaulting.
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_latin1(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    for &column in REQUIRED_COLUMNS.iter() {
        if !headers.iter().any(|name| name == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut sightings = Vec::new();
    for result in reader.deserialize::<RawRow>() {
        let row = result.map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        sightings.push(row.into_sighting());
    }

    Ok(Dataset::from_sightings(sightings))
}

/// Decode Latin-1 (ISO-8859-1) bytes. Every byte maps to the Unicode scalar
/// of the same value, so this cannot fail.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(bytes: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ufo.csv");
        std::fs::write(&path, bytes).unwrap();
        (dir, path)
    }

    const HEADER: &[u8] =
        b"Country,UFO_shape,Year,latitude,longitude,Description,length_of_encounter_seconds\n";

    #[test]
    fn loads_rows_and_converts_duration_to_minutes() {
        let mut csv = HEADER.to_vec();
        csv.extend_from_slice(
            b"USA,disk,1967,33.97,-118.24,\"Bright saucer, moving west\",120\n",
        );
        csv.extend_from_slice(b"M\xe9xico,light,1990,,,luz extra\xf1a,30\n");
        csv.extend_from_slice(b",,2004,51.5,-0.12,,600\n");
        let (_dir, path) = write_fixture(&csv);

        let ds = load(&path).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.sightings[0];
        assert_eq!(first.country.as_deref(), Some("USA"));
        assert_eq!(first.shape.as_deref(), Some("disk"));
        assert_eq!(first.year, 1967);
        assert_eq!(first.latitude, Some(33.97));
        assert_eq!(first.duration_min, 2.0);
        assert_eq!(first.description.as_deref(), Some("Bright saucer, moving west"));

        let second = &ds.sightings[1];
        assert_eq!(second.country.as_deref(), Some("México"));
        assert_eq!(second.description.as_deref(), Some("luz extraña"));
        assert_eq!(second.latitude, None);
        assert_eq!(second.longitude, None);
        assert_eq!(second.duration_min, 0.5);

        let third = &ds.sightings[2];
        assert_eq!(third.country, None);
        assert_eq!(third.shape, None);
        assert_eq!(third.description, None);
        assert_eq!(third.duration_min, 10.0);
    }

    #[test]
    fn trims_whitespace_in_fields() {
        let mut csv = HEADER.to_vec();
        csv.extend_from_slice(b" Canada , disk ,1999,,,  ,60\n");
        let (_dir, path) = write_fixture(&csv);

        let ds = load(&path).unwrap();
        let row = &ds.sightings[0];
        assert_eq!(row.country.as_deref(), Some("Canada"));
        assert_eq!(row.shape.as_deref(), Some("disk"));
        // Whitespace-only description is an empty cell.
        assert_eq!(row.description, None);
    }

    #[test]
    fn non_numeric_duration_aborts_the_load() {
        let mut csv = HEADER.to_vec();
        csv.extend_from_slice(b"USA,disk,1967,,,ok,120\n");
        csv.extend_from_slice(b"USA,disk,1968,,,bad,about120\n");
        let (_dir, path) = write_fixture(&csv);

        let err = load(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn empty_duration_aborts_the_load() {
        let mut csv = HEADER.to_vec();
        csv.extend_from_slice(b"USA,disk,1967,,,ok,\n");
        let (_dir, path) = write_fixture(&csv);

        assert!(matches!(load(&path).unwrap_err(), LoadError::Parse { .. }));
    }

    fn sample_value(column: &str) -> &'static str {
        match column {
            "Country" => "USA",
            "UFO_shape" => "disk",
            "Year" => "1967",
            "latitude" => "33.97",
            "longitude" => "-118.24",
            "Description" => "saucer over the ridge",
            "length_of_encounter_seconds" => "120",
            other => panic!("unexpected column {other}"),
        }
    }

    #[test]
    fn missing_required_columns_abort_the_load() {
        // Every required column, not just the numeric ones: an absent
        // `Option` column would otherwise load as all-`None`.
        for &missing in REQUIRED_COLUMNS.iter() {
            let kept: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|&column| column != missing)
                .collect();
            let row: Vec<&str> = kept.iter().map(|&column| sample_value(column)).collect();
            let csv = format!("{}\n{}\n", kept.join(","), row.join(","));
            let (_dir, path) = write_fixture(csv.as_bytes());

            match load(&path).unwrap_err() {
                LoadError::MissingColumn { column, .. } => assert_eq!(column, missing),
                err => panic!("expected a missing-column error for {missing}, got {err:?}"),
            }
        }
    }

    #[test]
    fn bom_prefixed_header_aborts_the_load() {
        // A UTF-8 BOM decodes to junk in front of the first header name, so
        // the Country column is no longer recognisable.
        let mut csv = b"\xef\xbb\xbf".to_vec();
        csv.extend_from_slice(HEADER);
        csv.extend_from_slice(b"USA,disk,1967,33.97,-118.24,ok,120\n");
        let (_dir, path) = write_fixture(&csv);

        match load(&path).unwrap_err() {
            LoadError::MissingColumn { column, .. } => assert_eq!(column, "Country"),
            err => panic!("expected a missing-column error, got {err:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let mut csv =
            b"Season,Country,UFO_shape,Year,latitude,longitude,Description,length_of_encounter_seconds\n"
                .to_vec();
        csv.extend_from_slice(b"summer,Australia,fireball,2010,-33.8,151.2,over the bay,45\n");
        let (_dir, path) = write_fixture(&csv);

        let ds = load(&path).unwrap();
        assert_eq!(ds.sightings[0].country.as_deref(), Some("Australia"));
        assert_eq!(ds.sightings[0].duration_min, 0.75);
    }
}
