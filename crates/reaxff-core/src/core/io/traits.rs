use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing force-field parameter files.
///
/// Implementors carry their own read options, so the methods take `&self`.
pub trait ParameterFormat {
    /// The in-memory parameter model this format reads into.
    type Output;

    /// The error type for I/O and validation failures.
    type Error: Error + From<io::Error>;

    /// Reads and validates a complete parameter file from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is structurally
    /// invalid. Nothing is returned on failure.
    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Serializes a parameter model to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(&self, output: &Self::Output, writer: &mut impl Write)
    -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(
        &self,
        output: &Self::Output,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(output, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
