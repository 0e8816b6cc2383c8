//! Appending TGD lines to per-day files.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::GuideError;

/// Line terminator for TGD files.
pub const LINE_ENDING: &str = "\r\n";

#[derive(Debug)]
struct OpenTgd {
    filename: String,
    file: BufWriter<File>,
}

impl OpenTgd {
    fn close(mut self) -> Result<(), GuideError> {
        debug!("closing {}", self.filename);
        self.file.flush()?;
        Ok(())
    }
}

/// Writes TGD lines into files in an output directory, holding at most one
/// file open at a time.
///
/// Files are opened in append mode. Consecutive lines for the same file
/// share a handle; the handle is flushed and closed as soon as a line for a
/// different file arrives, and by [`TgdWriter::finish`]. Dropping the writer
/// (ex: on an error path) also closes the file, but flush errors are lost.
#[derive(Debug)]
pub struct TgdWriter {
    out_dir: PathBuf,
    current: Option<OpenTgd>,
    files_opened: usize,
}

impl TgdWriter {
    /// Create a writer for `out_dir`. Nothing is opened until the first line.
    pub fn new(out_dir: impl Into<PathBuf>) -> TgdWriter {
        TgdWriter {
            out_dir: out_dir.into(),
            current: None,
            files_opened: 0,
        }
    }

    /// Directory files are written to.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Name of the currently open file, if any.
    pub fn current_filename(&self) -> Option<&str> {
        self.current.as_ref().map(|open| open.filename.as_str())
    }

    /// Number of times a file has been opened so far.
    pub fn files_opened(&self) -> usize {
        self.files_opened
    }

    /// Append `line` and a CRLF to `filename` in the output directory.
    pub fn write_line(&mut self, filename: &str, line: &str) -> Result<(), GuideError> {
        let file = self.file_for(filename)?;
        file.write_all(line.as_bytes())?;
        file.write_all(LINE_ENDING.as_bytes())?;
        Ok(())
    }

    fn file_for(&mut self, filename: &str) -> Result<&mut BufWriter<File>, GuideError> {
        let open = match self.current.take() {
            Some(open) if open.filename == filename => open,
            previous => {
                if let Some(previous) = previous {
                    previous.close()?;
                }
                let path = self.out_dir.join(filename);
                debug!("opening {}", path.display());
                let file = OpenOptions::new().create(true).append(true).open(&path)?;
                self.files_opened += 1;
                OpenTgd {
                    filename: filename.to_string(),
                    file: BufWriter::new(file),
                }
            }
        };
        Ok(&mut self.current.insert(open).file)
    }

    /// Flush and close the open file, returning how many files were opened.
    pub fn finish(mut self) -> Result<usize, GuideError> {
        if let Some(open) = self.current.take() {
            open.close()?;
        }
        Ok(self.files_opened)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test]
    fn groups_lines_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = TgdWriter::new(dir.path());
        assert_eq!(None, writer.current_filename());

        writer.write_line("20091030.tgd", "a").unwrap();
        writer.write_line("20091030.tgd", "b").unwrap();
        assert_eq!(Some("20091030.tgd"), writer.current_filename());
        writer.write_line("20091031.tgd", "c").unwrap();
        assert_eq!(Some("20091031.tgd"), writer.current_filename());
        assert_eq!(2, writer.finish().unwrap());

        assert_eq!(
            "a\r\nb\r\n",
            fs::read_to_string(dir.path().join("20091030.tgd")).unwrap()
        );
        assert_eq!(
            "c\r\n",
            fs::read_to_string(dir.path().join("20091031.tgd")).unwrap()
        );
    }

    #[test]
    fn previous_file_is_flushed_on_switch() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = TgdWriter::new(dir.path());
        writer.write_line("1.tgd", "first").unwrap();
        writer.write_line("2.tgd", "second").unwrap();
        // 1.tgd is complete on disk while the writer is still alive
        assert_eq!(
            "first\r\n",
            fs::read_to_string(dir.path().join("1.tgd")).unwrap()
        );
        writer.finish().unwrap();
    }

    #[test]
    fn appends_to_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("20091030.tgd"), "old\r\n").unwrap();

        let mut writer = TgdWriter::new(dir.path());
        writer.write_line("20091030.tgd", "new").unwrap();
        // returning to a file reopens it, still appending
        writer.write_line("20091031.tgd", "other").unwrap();
        writer.write_line("20091030.tgd", "newer").unwrap();
        assert_eq!(3, writer.finish().unwrap());

        assert_eq!(
            "old\r\nnew\r\nnewer\r\n",
            fs::read_to_string(dir.path().join("20091030.tgd")).unwrap()
        );
    }

    #[test]
    fn utf8_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = TgdWriter::new(dir.path());
        writer.write_line("x.tgd", "Caf\u{e9}").unwrap();
        writer.finish().unwrap();
        assert_eq!(
            b"Caf\xC3\xA9\r\n".to_vec(),
            fs::read(dir.path().join("x.tgd")).unwrap()
        );
    }

    #[test]
    fn missing_out_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = TgdWriter::new(dir.path().join("missing"));
        let err = writer.write_line("x.tgd", "line").unwrap_err();
        assert!(matches!(err, GuideError::Io(_)), "{err:?}");
        assert_eq!(None, writer.current_filename());
    }

    #[test]
    fn finish_without_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TgdWriter::new(dir.path());
        assert_eq!(dir.path(), writer.out_dir());
        assert_eq!(0, writer.finish().unwrap());
    }
}
