use std::{io::Read, path::PathBuf};

use anyhow::{bail, Context, Result};
use attr_tally::Outline;

use crate::IoArgs;

/// Structure that abstracts the input and output of subcommands.
pub struct IoPipe {
    source: Source,
    dest: PathBuf,
}

impl IoPipe {
    pub fn read_text(&self) -> &str {
        match self.source {
            Source::Stdin(ref content) => content,
            Source::File { ref content, .. } => content,
        }
    }

    pub fn read_outline(&self) -> Result<Outline> {
        let outline: Result<Outline, _> = idm::from_str(self.read_text());
        match &self.source {
            Source::Stdin(_) => outline.context("stdin is not valid IDM"),
            Source::File { path, .. } => {
                outline.with_context(|| format!("{path:?} is not valid IDM"))
            }
        }
    }

    pub fn write_text(&self, output: impl AsRef<str>) -> Result<()> {
        if self.dest.to_str() == Some("-") {
            print!("{}", output.as_ref());
        } else if self.dest.is_dir() {
            bail!("Cannot write text to a directory");
        } else {
            std::fs::write(&self.dest, output.as_ref())?;
            log::info!("Wrote {:?}", self.dest);
        }
        Ok(())
    }
}

impl TryFrom<IoArgs> for IoPipe {
    type Error = anyhow::Error;

    fn try_from(value: IoArgs) -> Result<Self> {
        let source = if value.input.to_str() == Some("-") {
            // Read stdin to string.
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Source::Stdin(input)
        } else if value.input.is_file() {
            let content = std::fs::read_to_string(&value.input)?;
            Source::File {
                path: value.input.clone(),
                content,
            }
        } else {
            bail!("Input {:?} is not a file", value.input);
        };

        let dest = value.output.unwrap_or_else(|| PathBuf::from("-"));

        Ok(IoPipe { source, dest })
    }
}

enum Source {
    Stdin(String),
    File { path: PathBuf, content: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("samples.idm");
        let output = dir.path().join("chart.txt");
        std::fs::write(&input, "SAMN001\n  :value liver\n").unwrap();

        let io = IoPipe::try_from(IoArgs {
            input: input.clone(),
            output: Some(output.clone()),
        })
        .unwrap();

        let outline = io.read_outline().unwrap();
        assert_eq!(outline.children.len(), 1);
        assert_eq!(outline.children[0].head, "SAMN001");

        io.write_text("chart\n").unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "chart\n");
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(IoPipe::try_from(IoArgs {
            input: dir.path().join("nonexistent.idm"),
            output: None,
        })
        .is_err());
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("samples.idm");
        std::fs::write(&input, "").unwrap();

        let io = IoPipe::try_from(IoArgs {
            input,
            output: Some(dir.path().to_owned()),
        })
        .unwrap();
        assert!(io.write_text("chart\n").is_err());
    }
}
