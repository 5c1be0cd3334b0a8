//! Configuration for reading and writing ledger CSV files.

use crate::HeaderSchema;

/// Format options for a ledger CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConfig {
    /// The field delimiter.
    pub delimiter: u8,
    /// The date format (strftime-style).
    pub date_format: String,
    /// Separator between entries of the `Replacement For` column.
    pub list_delimiter: char,
    /// Header spelling used when writing.
    pub output_schema: HeaderSchema,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            date_format: "%m/%d/%Y".to_string(),
            list_delimiter: '|',
            output_schema: HeaderSchema::Current,
        }
    }
}

impl CsvConfig {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> CsvConfigBuilder {
        CsvConfigBuilder::new()
    }
}

/// Builder for [`CsvConfig`].
#[derive(Debug, Clone, Default)]
pub struct CsvConfigBuilder {
    config: CsvConfig,
}

impl CsvConfigBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    #[must_use]
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set the date format (strftime-style).
    #[must_use]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    /// Set the separator used inside the `Replacement For` column.
    #[must_use]
    pub const fn list_delimiter(mut self, delimiter: char) -> Self {
        self.config.list_delimiter = delimiter;
        self
    }

    /// Set the header spelling written on output.
    #[must_use]
    pub const fn output_schema(mut self, schema: HeaderSchema) -> Self {
        self.config.output_schema = schema;
        self
    }

    /// Write the legacy header spelling.
    #[must_use]
    pub const fn legacy_headers(self, legacy: bool) -> Self {
        self.output_schema(if legacy {
            HeaderSchema::Legacy
        } else {
            HeaderSchema::Current
        })
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> CsvConfig {
        self.config
    }
}
