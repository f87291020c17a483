//! Providers of the raw data files.

use std::{
	collections::HashMap,
	io::{self, BufRead, Cursor},
	path::{Path, PathBuf},
	sync::Arc,
};

use async_trait::async_trait;

/// Stream of a single opened data file
pub type DataStream = Box<dyn BufRead + Send>;

/// Provider of data files by their logical name, e.g. `UnicodeData.txt`.
#[async_trait]
pub trait UcdSource: Send + Sync {
	/// Open the file with the given name.
	async fn open_data_file(&self, name: &str) -> io::Result<DataStream>;
}

/// Source serving files from named in-memory buffers.
#[derive(Clone, Default)]
pub struct MemorySource {
	files: HashMap<String, Arc<[u8]>>,
}

impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add or replace a file.
	pub fn add_file(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
		self.files.insert(name.into(), Arc::from(data.into()));
	}

	/// Builder-style [`add_file`](Self::add_file).
	pub fn with_file(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
		self.add_file(name, data);
		self
	}

	pub fn contains(&self, name: &str) -> bool {
		self.files.contains_key(name)
	}
}

#[async_trait]
impl UcdSource for MemorySource {
	async fn open_data_file(&self, name: &str) -> io::Result<DataStream> {
		match self.files.get(name) {
			Some(data) => Ok(Box::new(Cursor::new(data.clone()))),
			None => Err(io::Error::new(io::ErrorKind::NotFound, format!("no data file named '{name}'"))),
		}
	}
}

/// Source reading files from a directory on disk.
#[derive(Clone, Debug)]
pub struct DirectorySource {
	directory: PathBuf,
}

impl DirectorySource {
	pub fn new(directory: impl Into<PathBuf>) -> Self {
		Self { directory: directory.into() }
	}

	pub fn directory(&self) -> &Path {
		&self.directory
	}
}

#[async_trait]
impl UcdSource for DirectorySource {
	async fn open_data_file(&self, name: &str) -> io::Result<DataStream> {
		let data = tokio::fs::read(self.directory.join(name)).await?;
		Ok(Box::new(Cursor::new(data)))
	}
}

#[cfg(test)]
mod tests {
	use std::io::Read;

	use super::*;

	#[tokio::test]
	async fn memory_source_serves_named_files() {
		let source = MemorySource::new().with_file("Blocks.txt", "0000..007F; Basic Latin\n");

		let mut contents = String::new();
		source.open_data_file("Blocks.txt").await.unwrap().read_to_string(&mut contents).unwrap();
		assert_eq!(contents, "0000..007F; Basic Latin\n");

		let err = source.open_data_file("PropList.txt").await.err().unwrap();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}

	#[tokio::test]
	async fn directory_source_reports_missing_files() {
		let source = DirectorySource::new(std::env::temp_dir().join("onca_ucd_missing_directory"));
		let err = source.open_data_file("UnicodeData.txt").await.err().unwrap();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}
}
