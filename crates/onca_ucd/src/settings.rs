use core::fmt;
use std::path::PathBuf;

use onca_logging::LogLevel;
use onca_toml::{Table, Toml, TomlParseError};

use crate::UnicodeVersion;

/// Logical names of the 7 data files, in processing order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UcdFileNames {
	pub unicode_data:            String,
	pub prop_list:               String,
	pub derived_core_properties: String,
	pub blocks:                  String,
	pub unihan_readings:         String,
	pub unihan_variants:         String,
	pub unihan_numeric_values:   String,
}

impl UcdFileNames {
	pub const UNICODE_DATA:            &'static str = "UnicodeData.txt";
	pub const PROP_LIST:               &'static str = "PropList.txt";
	pub const DERIVED_CORE_PROPERTIES: &'static str = "DerivedCoreProperties.txt";
	pub const BLOCKS:                  &'static str = "Blocks.txt";
	pub const UNIHAN_READINGS:         &'static str = "Unihan_Readings.txt";
	pub const UNIHAN_VARIANTS:         &'static str = "Unihan_Variants.txt";
	pub const UNIHAN_NUMERIC_VALUES:   &'static str = "Unihan_NumericValues.txt";
}

impl Default for UcdFileNames {
	fn default() -> Self {
		Self {
			unicode_data: Self::UNICODE_DATA.to_string(),
			prop_list: Self::PROP_LIST.to_string(),
			derived_core_properties: Self::DERIVED_CORE_PROPERTIES.to_string(),
			blocks: Self::BLOCKS.to_string(),
			unihan_readings: Self::UNIHAN_READINGS.to_string(),
			unihan_variants: Self::UNIHAN_VARIANTS.to_string(),
			unihan_numeric_values: Self::UNIHAN_NUMERIC_VALUES.to_string(),
		}
	}
}

/// Error while loading settings
#[derive(Debug)]
pub enum SettingsError {
	/// The document is not valid toml
	Parse(TomlParseError),
	/// A key has a value of the wrong type, or a value that can't be interpreted
	InvalidValue { key: String, msg: String },
}

impl fmt::Display for SettingsError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SettingsError::Parse(err)                => write!(f, "{err}"),
			SettingsError::InvalidValue { key, msg } => write!(f, "Invalid value for '{key}': {msg}"),
		}
	}
}

impl std::error::Error for SettingsError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			SettingsError::Parse(err) => Some(err),
			_ => None,
		}
	}
}

impl From<TomlParseError> for SettingsError {
	fn from(err: TomlParseError) -> Self {
		Self::Parse(err)
	}
}

/// Settings for a database build.
/// 
/// ```toml
/// [ucd]
/// version = "7.0.0"
/// directory = "data/ucd"
/// unihan_directory = "data/unihan"
///
/// [files]
/// unicode_data = "UnicodeData.txt"
///
/// [log]
/// level = "verbose"
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UcdSettings {
	pub version:          UnicodeVersion,
	pub ucd_directory:    PathBuf,
	pub unihan_directory: PathBuf,
	pub files:            UcdFileNames,
	pub log_level:        LogLevel,
}

impl Default for UcdSettings {
	fn default() -> Self {
		Self {
			version: UnicodeVersion::default(),
			ucd_directory: PathBuf::from("ucd"),
			unihan_directory: PathBuf::from("ucd/unihan"),
			files: UcdFileNames::default(),
			log_level: LogLevel::Info,
		}
	}
}

impl UcdSettings {
	/// Load settings from a toml document, missing keys keep their default value.
	pub fn load(source: &str) -> Result<Self, SettingsError> {
		let toml = Toml::parse(source)?;
		let mut settings = Self::default();

		if let Some(ucd) = toml.get_table("ucd") {
			if let Some(version) = get_string(ucd, "ucd", "version")? {
				settings.version = UnicodeVersion::parse(version).ok_or_else(|| invalid_value("ucd.version", format!("'{version}' is not a version")))?;
			}
			if let Some(dir) = get_string(ucd, "ucd", "directory")? {
				settings.ucd_directory = PathBuf::from(dir);
			}
			if let Some(dir) = get_string(ucd, "ucd", "unihan_directory")? {
				settings.unihan_directory = PathBuf::from(dir);
			}
		}

		if let Some(files) = toml.get_table("files") {
			let names = &mut settings.files;
			for (key, name) in [
				("unicode_data", &mut names.unicode_data),
				("prop_list", &mut names.prop_list),
				("derived_core_properties", &mut names.derived_core_properties),
				("blocks", &mut names.blocks),
				("unihan_readings", &mut names.unihan_readings),
				("unihan_variants", &mut names.unihan_variants),
				("unihan_numeric_values", &mut names.unihan_numeric_values),
			] {
				if let Some(value) = get_string(files, "files", key)? {
					*name = value.to_string();
				}
			}
		}

		if let Some(log) = toml.get_table("log") {
			if let Some(level) = get_string(log, "log", "level")? {
				settings.log_level = LogLevel::from_name(level).ok_or_else(|| invalid_value("log.level", format!("unknown log level '{level}'")))?;
			}
		}

		Ok(settings)
	}
}

fn invalid_value(key: impl Into<String>, msg: impl Into<String>) -> SettingsError {
	SettingsError::InvalidValue { key: key.into(), msg: msg.into() }
}

fn get_string<'a>(table: &'a Table, table_name: &str, key: &str) -> Result<Option<&'a str>, SettingsError> {
	match table.get_item(key) {
		None => Ok(None),
		Some(_) => table.get::<String>(key)
			.map(|s| Some(s.as_str()))
			.ok_or_else(|| invalid_value(format!("{table_name}.{key}"), "expected a string")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_uses_defaults() {
		assert_eq!(UcdSettings::load("").unwrap(), UcdSettings::default());
	}

	#[test]
	fn load_all_tables() {
		let settings = UcdSettings::load(r#"
# Build settings
[ucd]
version = "7.0.0"
directory = "data/ucd"
unihan_directory = 'data/unihan'

[files]
unicode_data = "UnicodeData-7.0.0.txt"

[log]
level = "verbose"
"#).unwrap();

		assert_eq!(settings.version, UnicodeVersion::new(7, 0, 0));
		assert_eq!(settings.ucd_directory, PathBuf::from("data/ucd"));
		assert_eq!(settings.unihan_directory, PathBuf::from("data/unihan"));
		assert_eq!(settings.files.unicode_data, "UnicodeData-7.0.0.txt");
		assert_eq!(settings.files.blocks, UcdFileNames::BLOCKS);
		assert_eq!(settings.log_level, LogLevel::Verbose);
	}

	#[test]
	fn invalid_values() {
		assert!(matches!(UcdSettings::load("[ucd]\nversion = 7"), Err(SettingsError::InvalidValue { .. })));
		assert!(matches!(UcdSettings::load("[log]\nlevel = \"loud\""), Err(SettingsError::InvalidValue { .. })));
		assert!(matches!(UcdSettings::load("[ucd\nversion = \"7.0\""), Err(SettingsError::Parse(_))));
	}
}
