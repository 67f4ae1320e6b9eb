use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Write the result to a file, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create file: {:?}", path))?;
            writeln!(file, "{}", text)
                .with_context(|| format!("Failed to write file: {:?}", path))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_output(Some(&path), "<p>Done.</p>").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>Done.</p>\n");
    }
}
