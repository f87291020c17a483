//! Minimal TOML reader for onca settings files.
//! 
//! Supports the subset needed for configuration: `[table]` and `[table.sub]` headers, `key = value` pairs with dotted keys,
//! basic and literal strings, decimal integers, booleans, and `#` comments.

use core::fmt;
use std::collections::HashMap;
use onca_parser_utils::{str_parser::*, ParserError};

/// TOML parsing error
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TomlParseError(pub ParserError);

impl fmt::Display for TomlParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("Failed to parse toml at {}:{}, err: {}", self.0.line + 1, self.0.column + 1, self.0.msg))
    }
}

impl std::error::Error for TomlParseError {
}

#[derive(Clone, PartialEq, Debug)]
pub enum Item {
	String(String),
	Integer(i64),
	Boolean(bool),
	Table(Table),
}

/// Toml table
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Table {
	items : HashMap<String, Item>,
}

impl Table {
	pub fn new() -> Self {
		Self { items: HashMap::new() }
	}

	/// Insert an item, returns `false` if the key already exists
	pub fn push(&mut self, key: String, item: Item) -> bool {
		if self.items.contains_key(&key) {
			return false;
		}
		self.items.insert(key, item);
		true
	}

	/// Insert an item with a dotted key, creating intermediate tables.
	/// 
	/// # Error
	/// 
	/// If one of the sub-keys points to a non-table, or the final key already exists, an error with the index of the failing key is returned
	pub fn push_multi_key(&mut self, keys: &[String], item: Item) -> Result<(), usize> {
		let (last, path) = match keys.split_last() {
			Some(split) => split,
			None => return Err(0),
		};
		let table = self.get_or_add_table(path)?;
		if table.push(last.clone(), item) {
			Ok(())
		} else {
			Err(keys.len() - 1)
		}
	}

	/// Get or create the sub-table at a dotted path
	pub fn get_or_add_table(&mut self, keys: &[String]) -> Result<&mut Table, usize> {
		let mut table = self;
		for (idx, key) in keys.iter().enumerate() {
			let item = table.items.entry(key.clone()).or_insert_with(|| Item::Table(Table::new()));
			table = match item {
				Item::Table(sub) => sub,
				_ => return Err(idx),
			};
		}
		Ok(table)
	}

	/// Get an item
	pub fn get_item(&self, key: &str) -> Option<&Item> {
		self.items.get(key)
	}

	/// Get an item of a specific type
	pub fn get<T: FromTomlItem>(&self, key: &str) -> Option<&T> {
		self.items.get(key).and_then(T::from_item)
	}

	/// Iterate over all key-item pairs, in no particular order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Item)> {
		self.items.iter().map(|(key, item)| (key.as_str(), item))
	}
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Toml {
	table : Table,
}

impl Toml {
	/// Create a new toml
	pub fn new() -> Self {
		Self { table: Table::new() }
	}

	/// Parse toml from a string
	pub fn parse(source: &str) -> Result<Self, TomlParseError> {
		let mut parser = Parser::new(source);
		parser.parse()
	}

	/// Get an element from the root table
	pub fn get(&self, key: &str) -> Option<&Item> {
		self.table.get_item(key)
	}

	/// Get a sub-table of the root table
	pub fn get_table(&self, key: &str) -> Option<&Table> {
		self.table.get(key)
	}
}

struct Parser<'a> {
	pub parser : StrParser<'a>,
}

impl<'a> Parser<'a> {
	fn new(source: &'a str) -> Self {
		Self { parser: StrParser::new(source) }
	}

	fn parse(&mut self) -> Result<Toml, TomlParseError> {
		let mut toml = Toml::new();
		let mut path = Vec::new();

		self.parser.consume_whitespace(true);
		while self.parser.can_parse() {
			if self.parser.string.starts_with('#') {
				self.parser.consume_to_eol();
			} else if self.parser.consume_char('[') {
				self.parser.consume_whitespace(false);
				path = self.parse_keys()?;
				self.parser.consume_whitespace(false);
				if !self.parser.consume_char(']') {
					return Err(self.error("Table is not closed"));
				}
				if toml.table.get_or_add_table(&path).is_err() {
					return Err(self.error("Path does not point to a table"));
				}
				self.expect_eol()?;
			} else {
				let (keys, item) = self.parse_key_item()?;
				let mut full_key = path.clone();
				full_key.extend(keys);
				if toml.table.push_multi_key(&full_key, item).is_err() {
					return Err(self.error("Duplicate key"));
				}
				self.expect_eol()?;
			}

			self.parser.consume_whitespace(true);
		}
		Ok(toml)
	}

	fn parse_key_item(&mut self) -> Result<(Vec<String>, Item), TomlParseError> {
		let keys = self.parse_keys()?;
		self.parser.consume_whitespace(false);
		if !self.parser.consume_char('=') {
			return Err(self.error("Key is not followed by an `=`"));
		}
		self.parser.consume_whitespace(false);
		let item = self.parse_item()?;
		Ok((keys, item))
	}

	fn parse_keys(&mut self) -> Result<Vec<String>, TomlParseError> {
		let mut arr = Vec::new();
		loop {
			let key = if self.parser.string.starts_with('"') {
				match self.parser.extract_string("\"", "\"") {
					Some(s) => s.to_string(),
					None => return Err(self.error("Invalid key")),
				}
			} else {
				let key = self.parser.extract_while(|ch| ch.is_alphanumeric() || ch == '-' || ch == '_');
				if key.is_empty() {
					return Err(self.error("Expected a key"));
				}
				key.to_string()
			};
			arr.push(key);

			self.parser.consume_whitespace(false);
			if !self.parser.consume_char('.') {
				return Ok(arr);
			}
			self.parser.consume_whitespace(false);
		}
	}

	fn parse_item(&mut self) -> Result<Item, TomlParseError> {
		let is_word_end = |s: &str, len: usize| s[len..].chars().next().map_or(true, |ch| !ch.is_alphanumeric());

		if self.parser.string.starts_with("true") && is_word_end(self.parser.string, 4) {
			self.parser.consume_count(4);
			return Ok(Item::Boolean(true));
		} else if self.parser.string.starts_with("false") && is_word_end(self.parser.string, 5) {
			self.parser.consume_count(5);
			return Ok(Item::Boolean(false));
		}

		match self.parser.string.chars().next() {
			// TOML basic string, only the common escapes are supported
			Some('"') => match self.parser.extract_string("\"", "\"") {
				Some(string) => Ok(Item::String(string.replace("\\\"", "\"").replace("\\\\", "\\"))),
				None => Err(self.error("Invalid string")),
			},
			// TOML literal string
			Some('\'') => match self.parser.extract_string("'", "'") {
				Some(string) => Ok(Item::String(string.to_string())),
				None => Err(self.error("Invalid string")),
			},
			Some(ch) if ch.is_ascii_digit() || ch == '-' || ch == '+' => {
				let mut s = self.parser.extract_while(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '+' || ch == '_').to_string();
				s.retain(|ch| ch != '_');
				match s.parse::<i64>() {
					Ok(val) => Ok(Item::Integer(val)),
					Err(_) => Err(self.error("Invalid integer literal")),
				}
			},
			Some(_) => Err(self.error("Invalid item")),
			None => Err(self.error("End of file")),
		}
	}

	/// Only whitespace and a comment may follow an item or table header on the same line
	fn expect_eol(&mut self) -> Result<(), TomlParseError> {
		self.parser.consume_whitespace(false);
		if self.parser.string.starts_with('#') {
			self.parser.consume_to_eol();
		}
		if self.parser.can_parse() && !self.parser.string.starts_with('\n') && !self.parser.string.starts_with("\r\n") {
			return Err(self.error("Unexpected data after item"));
		}
		Ok(())
	}

	fn error(&self, msg: &'static str) -> TomlParseError {
		TomlParseError(self.parser.error(msg))
	}
}


pub trait FromTomlItem {
	fn from_item(item: &Item) -> Option<&Self>;
}

impl FromTomlItem for Item {
    fn from_item(item: &Item) -> Option<&Self> {
        Some(item)
    }
}

macro_rules! impl_from_toml_item {
	($ty:ty => $iden:ident) => {
		impl FromTomlItem for $ty {
			fn from_item(item: &Item) -> Option<&Self> {
				if let Item::$iden(s) = item {
					Some(s)
				} else {
					None
				}
			}
		}
	};
}
impl_from_toml_item!(String => String);
impl_from_toml_item!(i64 => Integer);
impl_from_toml_item!(bool => Boolean);
impl_from_toml_item!(Table => Table);
