use crate::error::ValidationError;

/// Which characters a form accepts while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCharset {
    /// Digits plus `,` and space, for lists of integers.
    IntegerList,
    /// Digits plus a decimal point.
    Decimal,
    Digits,
    /// Any non-control character, for paths.
    Any,
}

impl InputCharset {
    pub fn allows(self, c: char) -> bool {
        match self {
            Self::IntegerList => c.is_ascii_digit() || c == ',' || c == ' ',
            Self::Decimal => c.is_ascii_digit() || c == '.',
            Self::Digits => c.is_ascii_digit(),
            Self::Any => !c.is_control(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    active: bool,
    title: &'static str,
    description: &'static str,
    charset: InputCharset,
    raw: String,
}

impl Form {
    pub fn new(title: &'static str, description: &'static str, charset: InputCharset) -> Self {
        Self {
            active: false,
            title,
            description,
            charset,
            raw: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Deactivates and drops the buffer.
    pub fn reset(&mut self) {
        self.active = false;
        self.raw.clear();
    }

    /// Appends `c` when the form is active and the charset allows it.
    pub fn push(&mut self, c: char) -> bool {
        if !self.active || !self.charset.allows(c) {
            return false;
        }
        self.raw.push(c);
        true
    }

    pub fn pop(&mut self) {
        if self.active {
            self.raw.pop();
        }
    }

    pub fn value(&self) -> &str {
        &self.raw
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

const INTEGER_LIST_CHARS: &str = "1234567890, ";
const DECIMAL_CHARS: &str = "1234567890.";
const DIGIT_CHARS: &str = "1234567890";

fn only_allowed(raw: &str, allowed: &'static str) -> Result<(), ValidationError> {
    if raw.chars().all(|c| allowed.contains(c)) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCharacters { allowed })
    }
}

/// Parses `"500, 300 200"` style input into integers.
pub fn parse_integer_list(raw: &str) -> Result<Vec<u32>, ValidationError> {
    only_allowed(raw, INTEGER_LIST_CHARS)?;
    let values = raw
        .replace(',', " ")
        .split_whitespace()
        .map(|token| {
            token.parse::<u32>().map_err(|_| ValidationError::InvalidNumber {
                expected: "'123' or '123, 123' or '123 123'",
                got: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(values)
}

pub fn parse_decimal(raw: &str) -> Result<f64, ValidationError> {
    only_allowed(raw, DECIMAL_CHARS)?;
    parse_non_negative_float(raw)
}

/// Float parsing shared with the command line, which does not restrict characters.
pub fn parse_non_negative_float(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber {
            expected: "'123.4'",
            got: trimmed.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber {
            expected: "'123.4'",
            got: trimmed.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative(trimmed.to_string()));
    }
    Ok(value)
}

pub fn parse_integer(raw: &str) -> Result<u32, ValidationError> {
    only_allowed(raw, DIGIT_CHARS)?;
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }
    raw.parse::<u32>().map_err(|_| ValidationError::InvalidNumber {
        expected: "'1234'",
        got: raw.to_string(),
    })
}
