use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

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
    pub fn from_output_path(output_path: Option<&Path>) -> anyhow::Result<Self> {
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

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
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

/// Collect every CSV file below `root`, recursively
///
/// Hidden files and directories (names starting with `.`) are skipped.
/// Matching is done on the `csv` extension, ignoring case.
///
/// # Returns
///
/// Paths of the CSV files, sorted
///
/// # Errors
///
/// Returns error if a directory cannot be read
pub fn find_csv_files<P>(root: P) -> anyhow::Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
{
    let mut files = vec![];
    let mut dirs = vec![root.as_ref().to_owned()];

    while let Some(dir) = dirs.pop() {
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read directory entry in {}", dir.display()))?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            let file_type = entry
                .file_type()
                .with_context(|| format!("Failed to read file type: {}", path.display()))?;
            if file_type.is_dir() {
                dirs.push(path);
            } else if is_csv(&path) && path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_find_csv_files_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b.csv"));
        touch(&root.join("a.csv"));
        touch(&root.join("subject1/session2/trial.CSV"));
        touch(&root.join("subject1/notes.txt"));

        let files = find_csv_files(root).unwrap();

        assert_eq!(
            files,
            vec![
                root.join("a.csv"),
                root.join("b.csv"),
                root.join("subject1/session2/trial.CSV"),
            ]
        );
    }

    #[test]
    fn test_find_csv_files_skips_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join(".hidden.csv"));
        touch(&root.join(".cache/trial.csv"));
        touch(&root.join("trial.csv"));

        let files = find_csv_files(root).unwrap();

        assert_eq!(files, vec![root.join("trial.csv")]);
    }

    #[test]
    fn test_find_csv_files_ignores_directories_named_csv() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("logs.csv")).unwrap();
        touch(&root.join("logs.csv/trial.csv"));

        let files = find_csv_files(root).unwrap();

        assert_eq!(files, vec![root.join("logs.csv/trial.csv")]);
    }

    #[test]
    fn test_find_csv_files_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_csv_files(dir.path().join("missing")).is_err());
    }
}
