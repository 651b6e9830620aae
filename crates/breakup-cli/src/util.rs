use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use breakup_analysis::{
    fragment::RawFragment,
    population::{FragmentPopulation, ImplementationRole},
};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read fragment rows from a CSV file exported by a breakup simulation
///
/// # Arguments
///
/// * `path` - Path to the fragment CSV file
///
/// # Returns
///
/// All rows of the file, in file order
///
/// # Errors
///
/// Returns error if the file cannot be opened, or if any row cannot be
/// deserialized. The error names the zero-based data row.
pub fn read_fragments_file<P>(path: P) -> anyhow::Result<Vec<RawFragment>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open fragment file: {}", path.display()))?;

    reader
        .deserialize::<RawFragment>()
        .enumerate()
        .map(|(row, record)| {
            record.with_context(|| {
                format!("Malformed record at row {row} of {}", path.display())
            })
        })
        .collect()
}

/// Load a fragment population from a CSV file
///
/// # Errors
///
/// Returns error if the file cannot be read, or if any record is malformed.
/// No partial population is returned.
pub fn load_population<P>(
    path: P,
    scenario: &str,
    role: ImplementationRole,
    label: &str,
) -> anyhow::Result<FragmentPopulation>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let rows = read_fragments_file(path)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "read fragment file");
    let population = FragmentPopulation::from_raw(scenario, role, label, &rows)
        .with_context(|| format!("Failed to load {role} population from {}", path.display()))?;
    Ok(population)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use breakup_analysis::{attribute::Attribute, population::LoadPopulationError};
    use tempfile::NamedTempFile;

    use super::*;

    const HEADER: &str = "ID,Name,Satellite Type,Characteristic Length [m],A/M [m^2/kg],Area [m^2],Mass [kg],Ejection Velocity [m/s]";

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_fragments() {
        let file = csv_file(&[
            HEADER,
            "1,Iridium 33-Collision-Fragment,DEBRIS,0.25,0.08,0.05,0.6,[1.0 2.0 2.0]",
            "2,Iridium 33-Collision-Fragment,DEBRIS,0.5,0.1,0.2,2.0,[-3.0e+00 4.0 0]",
        ]);
        let rows = read_fragments_file(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Iridium 33-Collision-Fragment");
        assert_eq!(rows[1].characteristic_length, 0.5);
        assert_eq!(rows[1].velocity.as_deref(), Some("[-3.0e+00 4.0 0]"));
    }

    #[test]
    fn test_velocity_column_alias() {
        let file = csv_file(&[
            "Name,Characteristic Length [m],A/M [m^2/kg],Velocity [m/s]",
            "a,0.25,0.08,[1.0 2.0 2.0]",
        ]);
        let population = load_population(
            file.path(),
            "scenario",
            ImplementationRole::Candidate,
            "Python",
        )
        .unwrap();
        assert_eq!(
            population.values(Attribute::VelocityMagnitude).unwrap(),
            vec![3.0]
        );
    }

    #[test]
    fn test_missing_velocity_column() {
        let file = csv_file(&[
            "Name,Characteristic Length [m],A/M [m^2/kg]",
            "a,0.25,0.08",
            "b,0.5,0.1",
        ]);
        let population = load_population(
            file.path(),
            "scenario",
            ImplementationRole::Reference,
            "C++",
        )
        .unwrap();
        assert_eq!(population.len(), 2);
        assert!(!population.has_attribute(Attribute::VelocityMagnitude));
    }

    #[test]
    fn test_malformed_velocity_aborts_load() {
        let file = csv_file(&[
            HEADER,
            "1,a,DEBRIS,0.25,0.08,0.05,0.6,[1.0 2.0 2.0]",
            "2,b,DEBRIS,0.25,0.08,0.05,0.6,[1.0 2.0]",
        ]);
        let err = load_population(
            file.path(),
            "scenario",
            ImplementationRole::Reference,
            "C++",
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadPopulationError>(),
            Some(LoadPopulationError::MalformedRecord { row: 1, .. })
        ));
    }

    #[test]
    fn test_non_numeric_field_reports_row() {
        let file = csv_file(&[
            HEADER,
            "1,a,DEBRIS,0.25,0.08,0.05,0.6,[1.0 2.0 2.0]",
            "2,b,DEBRIS,0.25,0.08,0.05,0.6,[1.0 2.0 2.0]",
            "3,c,DEBRIS,large,0.08,0.05,0.6,[1.0 2.0 2.0]",
        ]);
        let err = read_fragments_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_fragments_file("/nonexistent/fragments.csv").unwrap_err();
        assert!(err.to_string().contains("Failed to open fragment file"));
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let file = NamedTempFile::new().unwrap();
        Output::save_json(&vec![1.0, 2.5], Some(file.path().to_owned())).unwrap();
        let values: Vec<f64> = read_json_file("test", file.path()).unwrap();
        assert_eq!(values, vec![1.0, 2.5]);
    }
}
