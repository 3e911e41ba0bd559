//! Utility functions for cascade-growth

mod parser;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::Result;

pub use parser::{parse_dataset, parse_line, parse_reader};

/// Save object to JSON file
pub fn save_json<T: Serialize, P: AsRef<Path>>(obj: &T, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, obj)?;
    writer.flush()?;
    Ok(())
}

/// Load object from JSON file
pub fn load_json<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path)?;
    let obj = serde_json::from_reader(BufReader::new(file))?;
    Ok(obj)
}

/// Timing utilities
pub mod timing {
    use std::time::Instant;
    use tracing::info;

    /// Logs the elapsed time of a named stage when dropped
    pub struct Timer {
        start: Instant,
        name: String,
    }

    impl Timer {
        /// Start new timer
        pub fn new(name: &str) -> Self {
            Timer {
                start: Instant::now(),
                name: name.to_string(),
            }
        }

        /// Get elapsed time in seconds
        pub fn elapsed(&self) -> f64 {
            self.start.elapsed().as_secs_f64()
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            info!(stage = %self.name, seconds = self.elapsed(), "finished");
        }
    }
}
