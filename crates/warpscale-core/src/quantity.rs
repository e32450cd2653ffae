//! Resource quantities (`500m`, `1.5Gi`, `2e3`).
//!
//! A quantity is kept as the text it was written with, so expanding and
//! flattening it never changes its spelling. Parsing only validates the
//! grammar:
//!
//! ```text
//! quantity      ::= signed-number suffix
//! signed-number ::= [+-]? ( digits | digits '.' digits? | '.' digits )
//! suffix        ::= binary-si | decimal-si | exponent
//! binary-si     ::= Ki | Mi | Gi | Ti | Pi | Ei
//! decimal-si    ::= n | u | m | "" | k | M | G | T | P | E
//! exponent      ::= ( e | E ) [+-]? digits
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::QuantityError;

/// Source of [`QUANTITY_RE`], quoted in [`QuantityError::Invalid`].
pub const QUANTITY_PATTERN: &str =
    r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[KMGTPE]i|[eE][+-]?[0-9]+|[numkMGTPE])?$";

static QUANTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(QUANTITY_PATTERN).expect("quantity pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity(String);

impl Quantity {
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        if s.is_empty() {
            return Err(QuantityError::Empty);
        }
        if !QUANTITY_RE.is_match(s) {
            return Err(QuantityError::Invalid(s.to_string()));
        }
        Ok(Quantity(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::parse(s)
    }
}

impl TryFrom<String> for Quantity {
    type Error = QuantityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Quantity::parse(&s)
    }
}

impl From<Quantity> for String {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
