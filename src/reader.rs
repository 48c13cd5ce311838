use std::io::BufRead;

use crate::error::LoaderError;

/// Lazy reader over a tab-delimited text stream. Yields one field array per
/// line, in input order; blank lines and `#` comment lines are skipped.
/// The first yielded row is the header and is discarded by the caller.
pub struct TabRecordReader<R: BufRead> {
    input: R,
    line: usize,
}

impl<R: BufRead> TabRecordReader<R> {
    pub fn new(input: R) -> Self {
        Self { input, line: 0 }
    }

    /// 1-based number of the last line yielded, for error context.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TabRecordReader<R> {
    type Item = Result<Vec<String>, LoaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut buf = String::new();
            match self.input.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    let line = buf.trim_end_matches(['\n', '\r']);
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    return Some(Ok(line.split('\t').map(str::to_string).collect()));
                }
                Err(err) => {
                    return Some(Err(LoaderError::Parse {
                        line: self.line + 1,
                        message: err.to_string(),
                    }));
                }
            }
        }
    }
}
