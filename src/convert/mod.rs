//! Number conversion between binary, decimal, octal and hexadecimal
//!
//! Validation is a per-base digit check, parsing and rendering use the
//! standard radix routines on `u128`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Message shown when the input contains digits outside the base's alphabet
pub const INVALID_INPUT_MESSAGE: &str = "Invalid number for the selected base.";

/// Message shown when the value does not fit in 128 bits
pub const TOO_LARGE_MESSAGE: &str = "Number is too large to convert.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("{}", INVALID_INPUT_MESSAGE)]
    InvalidInputForBase { base: Base },

    #[error("{}", TOO_LARGE_MESSAGE)]
    TooLarge { base: Base },
}

impl ConvertError {
    /// Base the rejected input was entered in
    pub fn base(&self) -> Base {
        match self {
            ConvertError::InvalidInputForBase { base } | ConvertError::TooLarge { base } => *base,
        }
    }
}

/// One of the four supported numeral systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    Binary,
    #[default]
    Decimal,
    Octal,
    Hexadecimal,
}

impl Base {
    /// All bases in display order
    pub const ALL: [Base; 4] = [Base::Binary, Base::Decimal, Base::Octal, Base::Hexadecimal];

    pub fn radix(self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Decimal => 10,
            Base::Octal => 8,
            Base::Hexadecimal => 16,
        }
    }

    /// Lower-case name used in explanations and config files
    pub fn name(self) -> &'static str {
        match self {
            Base::Binary => "binary",
            Base::Decimal => "decimal",
            Base::Octal => "octal",
            Base::Hexadecimal => "hexadecimal",
        }
    }

    /// Capitalised label for the base selector
    pub fn label(self) -> &'static str {
        match self {
            Base::Binary => "Binary",
            Base::Decimal => "Decimal",
            Base::Octal => "Octal",
            Base::Hexadecimal => "Hexadecimal",
        }
    }

    pub fn is_valid_digit(self, c: char) -> bool {
        // is_digit accepts both cases of a-f for radix 16
        c.is_digit(self.radix())
    }

    /// True when `input` is non-empty and every character is a digit of this base
    pub fn validate(self, input: &str) -> bool {
        !input.is_empty() && input.chars().all(|c| self.is_valid_digit(c))
    }

    /// Render a value in this base (hexadecimal upper-cased)
    pub fn render(self, value: u128) -> String {
        match self {
            Base::Binary => format!("{:b}", value),
            Base::Decimal => value.to_string(),
            Base::Octal => format!("{:o}", value),
            Base::Hexadecimal => format!("{:X}", value),
        }
    }

    /// Next base in selector order, wrapping around
    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous base in selector order, wrapping around
    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[idx.checked_sub(1).unwrap_or(Self::ALL.len() - 1)]
    }

    pub fn index(self) -> usize {
        match self {
            Base::Binary => 0,
            Base::Decimal => 1,
            Base::Octal => 2,
            Base::Hexadecimal => 3,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown base '{0}' (expected binary, decimal, octal or hexadecimal)")]
pub struct UnknownBase(pub String);

impl FromStr for Base {
    type Err = UnknownBase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" | "bin" | "2" => Ok(Base::Binary),
            "decimal" | "dec" | "10" => Ok(Base::Decimal),
            "octal" | "oct" | "8" => Ok(Base::Octal),
            "hexadecimal" | "hex" | "16" => Ok(Base::Hexadecimal),
            _ => Err(UnknownBase(s.to_string())),
        }
    }
}

/// A converted representation in one target base
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub base: Base,
    pub digits: String,
}

/// Result of converting one input from its source base into the other three
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub input: String,
    pub base: Base,
    pub value: u128,
    /// Targets in binary, decimal, octal, hexadecimal order, source base excluded
    pub conversions: Vec<Conversion>,
}

impl ConversionResult {
    /// Digits for a target base, `None` for the source base
    pub fn get(&self, base: Base) -> Option<&str> {
        self.conversions
            .iter()
            .find(|c| c.base == base)
            .map(|c| c.digits.as_str())
    }

    /// Multi-line explanation, one line per target base
    pub fn explanation(&self) -> String {
        let mut text = format!(
            "The input number ({}) in {} converts as follows:\n",
            self.input, self.base
        );
        for conversion in &self.conversions {
            text.push_str(&format!("- {}: {}\n", conversion.base, conversion.digits));
        }
        text
    }
}

/// Validate `input` against `base` and convert it into the other three bases
pub fn convert(input: &str, base: Base) -> Result<ConversionResult, ConvertError> {
    if !base.validate(input) {
        tracing::debug!(base = %base, len = input.len(), "rejected input");
        return Err(ConvertError::InvalidInputForBase { base });
    }

    // Validation leaves overflow as the only possible parse failure
    let value = u128::from_str_radix(input, base.radix())
        .map_err(|_| ConvertError::TooLarge { base })?;

    let conversions = Base::ALL
        .iter()
        .copied()
        .filter(|&target| target != base)
        .map(|target| Conversion {
            base: target,
            digits: target.render(value),
        })
        .collect();

    tracing::debug!(base = %base, value = %value, "converted");

    Ok(ConversionResult {
        input: input.to_string(),
        base,
        value,
        conversions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_binary_to_others() {
        let result = convert("1010", Base::Binary).unwrap();
        assert_eq!(result.get(Base::Decimal), Some("10"));
        assert_eq!(result.get(Base::Octal), Some("12"));
        assert_eq!(result.get(Base::Hexadecimal), Some("A"));
        assert_eq!(result.get(Base::Binary), None);
    }

    #[test]
    fn test_hex_to_others() {
        let result = convert("FF", Base::Hexadecimal).unwrap();
        assert_eq!(result.get(Base::Binary), Some("11111111"));
        assert_eq!(result.get(Base::Decimal), Some("255"));
        assert_eq!(result.get(Base::Octal), Some("377"));
    }

    #[test]
    fn test_lowercase_hex_renders_uppercase() {
        let result = convert("deadbeef", Base::Hexadecimal).unwrap();
        assert_eq!(result.value, 0xDEAD_BEEF);
        assert_eq!(result.get(Base::Decimal), Some("3735928559"));

        let back = convert("3735928559", Base::Decimal).unwrap();
        assert_eq!(back.get(Base::Hexadecimal), Some("DEADBEEF"));
    }

    #[test]
    fn test_invalid_digit_for_base() {
        let err = convert("18", Base::Octal).unwrap_err();
        assert_eq!(err, ConvertError::InvalidInputForBase { base: Base::Octal });
        assert_eq!(err.to_string(), INVALID_INPUT_MESSAGE);

        assert!(convert("102", Base::Binary).is_err());
        assert!(convert("12a", Base::Decimal).is_err());
        assert!(convert("FG", Base::Hexadecimal).is_err());
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = convert("", Base::Decimal).unwrap_err();
        assert_eq!(err.to_string(), INVALID_INPUT_MESSAGE);
    }

    #[test]
    fn test_signs_prefixes_and_whitespace_rejected() {
        for input in ["+10", "-10", " 10", "10 ", "0x1F", "1_000", "١٢"] {
            assert!(convert(input, Base::Decimal).is_err(), "{input:?} should be rejected");
        }
        assert!(convert("0x1F", Base::Hexadecimal).is_err());
        assert!(convert("0b101", Base::Binary).is_err());
    }

    #[test]
    fn test_leading_zeros_are_insignificant() {
        let result = convert("0001", Base::Binary).unwrap();
        assert_eq!(result.get(Base::Decimal), Some("1"));
        assert_eq!(result.input, "0001");

        let zero = convert("000", Base::Octal).unwrap();
        assert_eq!(zero.get(Base::Binary), Some("0"));
        assert_eq!(zero.get(Base::Decimal), Some("0"));
        assert_eq!(zero.get(Base::Hexadecimal), Some("0"));
    }

    fn strip_leading_zeros(s: &str) -> String {
        let trimmed = s.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Convert to decimal, then from decimal back into the source base
    fn round_trip(input: &str, base: Base) -> String {
        let value = convert(input, base).unwrap().value;
        let decimal = Base::Decimal.render(value);
        let back = convert(&decimal, Base::Decimal).unwrap();
        back.get(base).map(str::to_string).unwrap_or(decimal)
    }

    #[test]
    fn test_round_trip_all_zeros() {
        assert_eq!(round_trip("0", Base::Binary), "0");
        assert_eq!(round_trip("0000", Base::Hexadecimal), "0");
        assert_eq!(round_trip("00", Base::Decimal), "0");
    }

    // Digit counts stay below each base's u128 limit
    proptest! {
        #[test]
        fn prop_binary_round_trip(s in "0{0,6}[01]{1,124}") {
            prop_assert_eq!(round_trip(&s, Base::Binary), strip_leading_zeros(&s));
        }

        #[test]
        fn prop_decimal_round_trip(s in "0{0,6}[0-9]{1,38}") {
            prop_assert_eq!(round_trip(&s, Base::Decimal), strip_leading_zeros(&s));
        }

        #[test]
        fn prop_octal_round_trip(s in "0{0,6}[0-7]{1,42}") {
            prop_assert_eq!(round_trip(&s, Base::Octal), strip_leading_zeros(&s));
        }

        #[test]
        fn prop_hexadecimal_round_trip(s in "0{0,6}[0-9a-fA-F]{1,32}") {
            prop_assert_eq!(
                round_trip(&s, Base::Hexadecimal),
                strip_leading_zeros(&s).to_ascii_uppercase()
            );
        }

        #[test]
        fn prop_out_of_alphabet_rejected(s in "[0-9a-fA-F]{0,8}[g-zG-Z+ _-][0-9a-fA-F]{0,8}") {
            for base in Base::ALL {
                prop_assert_eq!(
                    convert(&s, base),
                    Err(ConvertError::InvalidInputForBase { base })
                );
            }
        }
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let first = convert("7f3", Base::Hexadecimal).unwrap();
        let second = convert("7f3", Base::Hexadecimal).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.explanation(), second.explanation());
    }

    #[test]
    fn test_explanation_order_skips_source() {
        let result = convert("12", Base::Octal).unwrap();
        assert_eq!(
            result.explanation(),
            "The input number (12) in octal converts as follows:\n\
             - binary: 1010\n\
             - decimal: 10\n\
             - hexadecimal: A\n"
        );

        let order: Vec<Base> = result.conversions.iter().map(|c| c.base).collect();
        assert_eq!(order, vec![Base::Binary, Base::Decimal, Base::Hexadecimal]);
    }

    #[test]
    fn test_u128_limits() {
        let max = u128::MAX.to_string();
        let result = convert(&max, Base::Decimal).unwrap();
        assert_eq!(result.get(Base::Hexadecimal), Some("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"));

        let err = convert("340282366920938463463374607431768211456", Base::Decimal).unwrap_err();
        assert_eq!(err, ConvertError::TooLarge { base: Base::Decimal });
        assert_eq!(err.to_string(), TOO_LARGE_MESSAGE);

        // Leading zeros do not count against the limit
        let padded = format!("0000{}", "1".repeat(128));
        assert!(convert(&padded, Base::Binary).is_ok());
        assert!(convert(&"1".repeat(129), Base::Binary).is_err());
    }

    #[test]
    fn test_base_table() {
        let radixes: Vec<u32> = Base::ALL.iter().map(|b| b.radix()).collect();
        assert_eq!(radixes, vec![2, 10, 8, 16]);
        assert!(Base::Hexadecimal.is_valid_digit('f'));
        assert!(Base::Hexadecimal.is_valid_digit('F'));
        assert!(!Base::Octal.is_valid_digit('8'));
        assert!(!Base::Binary.is_valid_digit('2'));
    }

    #[test]
    fn test_base_cycling_wraps() {
        assert_eq!(Base::Hexadecimal.next(), Base::Binary);
        assert_eq!(Base::Binary.prev(), Base::Hexadecimal);
        assert_eq!(Base::Decimal.next(), Base::Octal);
        for base in Base::ALL {
            assert_eq!(base.next().prev(), base);
            assert_eq!(Base::ALL[base.index()], base);
        }
    }

    #[test]
    fn test_base_from_str() {
        assert_eq!("hex".parse::<Base>().unwrap(), Base::Hexadecimal);
        assert_eq!("Binary".parse::<Base>().unwrap(), Base::Binary);
        assert_eq!("8".parse::<Base>().unwrap(), Base::Octal);
        assert!("base64".parse::<Base>().is_err());
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = convert("1010", Base::Binary).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["base"], "binary");
        assert_eq!(json["input"], "1010");
        assert_eq!(json["conversions"][2]["base"], "hexadecimal");
        assert_eq!(json["conversions"][2]["digits"], "A");
    }
}
