use crate::error::{AdminError, Result};

/// How a new value is merged with the value already stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineMode {
    /// Discard the old value.
    #[default]
    Replace,
    /// Old value followed by the new one.
    Append,
    /// New value followed by the old one.
    Prepend,
}

impl CombineMode {
    /// Resolve the `-a` / `-p` command-line flags. Prepend wins when both are set.
    pub fn from_flags(append: bool, prepend: bool) -> Self {
        if prepend {
            CombineMode::Prepend
        } else if append {
            CombineMode::Append
        } else {
            CombineMode::Replace
        }
    }

    /// Merge `old` and `new`. No separator is inserted.
    pub fn combine(self, old: &[u8], new: &[u8]) -> Vec<u8> {
        match self {
            CombineMode::Replace => new.to_vec(),
            CombineMode::Append => [old, new].concat(),
            CombineMode::Prepend => [new, old].concat(),
        }
    }
}

/// A single key update against a property file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub key: String,
    pub value: String,
    pub delimiter: char,
    pub combine: CombineMode,
    /// Wrap the written value in double quotes.
    pub quote: bool,
    /// Append `key<delimiter>value` at the end of the file when the key is absent.
    pub force_insert: bool,
    /// Ask the caller to print the resulting line.
    pub echo: bool,
}

impl UpdateRequest {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            delimiter: '=',
            combine: CombineMode::Replace,
            quote: false,
            force_insert: false,
            echo: false,
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn combine(mut self, combine: CombineMode) -> Self {
        self.combine = combine;
        self
    }

    pub fn quote(mut self, quote: bool) -> Self {
        self.quote = quote;
        self
    }

    pub fn force_insert(mut self, force_insert: bool) -> Self {
        self.force_insert = force_insert;
        self
    }

    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(AdminError::Usage("key must not be empty".into()));
        }
        if self.key.contains('\n') || self.value.contains('\n') || self.delimiter == '\n' {
            return Err(AdminError::Usage(
                "key, value and delimiter must not contain newlines".into(),
            ));
        }
        Ok(())
    }

    /// Compute the value to write from the value currently stored, if any.
    pub(crate) fn resolve_value(&self, old: Option<&[u8]>) -> Vec<u8> {
        let old = old.unwrap_or_default();
        let old = if self.quote { unquote(old) } else { old };
        let value = self.combine.combine(old, self.value.as_bytes());
        if self.quote {
            [&b"\""[..], &value, &b"\""[..]].concat()
        } else {
            value
        }
    }
}

fn unquote(value: &[u8]) -> &[u8] {
    value
        .strip_prefix(b"\"")
        .and_then(|v| v.strip_suffix(b"\""))
        .unwrap_or(value)
}
