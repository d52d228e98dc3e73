//! Input folder and report destination selection.
//!
//! Paths given on the command line are used as-is. Anything missing is asked
//! for through a [`PathProvider`]: a line prompt on the terminal, or native
//! dialogs when the `dialogs` feature is enabled.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use exi_report::ensure_csv_extension;

/// Source of user-chosen paths. `Ok(None)` means the user cancelled.
pub trait PathProvider {
    fn input_dir(&mut self) -> Result<Option<PathBuf>>;
    fn output_file(&mut self) -> Result<Option<PathBuf>>;
}

/// Asks for paths on a line-oriented prompt.
///
/// An empty answer or end of input counts as a cancelled selection.
pub struct PromptPaths<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptPaths<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<PathBuf>> {
        write!(self.writer, "{prompt}: ").context("write prompt")?;
        self.writer.flush().context("flush prompt")?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).context("read answer")?;
        if read == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(answer)))
        }
    }
}

impl<R: BufRead, W: Write> PathProvider for PromptPaths<R, W> {
    fn input_dir(&mut self) -> Result<Option<PathBuf>> {
        self.ask("Select input folder")
    }

    fn output_file(&mut self) -> Result<Option<PathBuf>> {
        self.ask("Save As")
    }
}

/// Native folder picker and save dialog.
#[cfg(feature = "dialogs")]
#[derive(Debug, Default)]
pub struct DialogPaths;

#[cfg(feature = "dialogs")]
impl PathProvider for DialogPaths {
    fn input_dir(&mut self) -> Result<Option<PathBuf>> {
        Ok(rfd::FileDialog::new()
            .set_title("Select input folder")
            .pick_folder())
    }

    fn output_file(&mut self) -> Result<Option<PathBuf>> {
        Ok(rfd::FileDialog::new()
            .set_title("Save As")
            .add_filter("CSV", &["csv"])
            .save_file())
    }
}

/// Input folder from the command line, or from `provider` when not given.
pub fn resolve_input_dir(
    given: Option<PathBuf>,
    provider: &mut dyn PathProvider,
) -> Result<Option<PathBuf>> {
    match given {
        Some(path) => Ok(Some(path)),
        None => provider.input_dir(),
    }
}

/// Report path from the command line, or from `provider` when not given.
///
/// A path without an extension gets `.csv`.
pub fn resolve_output_file(
    given: Option<PathBuf>,
    provider: &mut dyn PathProvider,
) -> Result<Option<PathBuf>> {
    let chosen = match given {
        Some(path) => Some(path),
        None => provider.output_file()?,
    };
    Ok(chosen.map(ensure_csv_extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Unreachable;

    impl PathProvider for Unreachable {
        fn input_dir(&mut self) -> Result<Option<PathBuf>> {
            panic!("input_dir should not be asked");
        }

        fn output_file(&mut self) -> Result<Option<PathBuf>> {
            panic!("output_file should not be asked");
        }
    }

    #[test]
    fn prompt_reads_one_path_per_line() {
        let input = Cursor::new("exports/2024\n  medians  \n");
        let mut prompt = PromptPaths::new(input, Vec::new());

        assert_eq!(
            prompt.input_dir().unwrap(),
            Some(PathBuf::from("exports/2024"))
        );
        assert_eq!(prompt.output_file().unwrap(), Some(PathBuf::from("medians")));

        let written = String::from_utf8(prompt.writer).unwrap();
        assert_eq!(written, "Select input folder: Save As: ");
    }

    #[test]
    fn prompt_treats_blank_and_eof_as_cancel() {
        let mut prompt = PromptPaths::new(Cursor::new("\n"), Vec::new());
        assert_eq!(prompt.input_dir().unwrap(), None);
        assert_eq!(prompt.output_file().unwrap(), None);
    }

    #[test]
    fn command_line_paths_skip_the_provider() {
        let mut provider = Unreachable;
        let input = resolve_input_dir(Some(PathBuf::from("in")), &mut provider).unwrap();
        let output = resolve_output_file(Some(PathBuf::from("out")), &mut provider).unwrap();
        assert_eq!(input, Some(PathBuf::from("in")));
        assert_eq!(output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn provider_fills_missing_paths() {
        let mut prompt = PromptPaths::new(Cursor::new("in\nreport.csv\n"), Vec::new());
        let input = resolve_input_dir(None, &mut prompt).unwrap();
        let output = resolve_output_file(None, &mut prompt).unwrap();
        assert_eq!(input, Some(PathBuf::from("in")));
        assert_eq!(output, Some(PathBuf::from("report.csv")));
    }
}
