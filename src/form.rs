//! Interactive driver info form.
//!
//! Each of the eleven fields carries a bounded domain and a default; the
//! form re-prompts until the answer parses and falls inside the domain, so
//! nothing downstream ever sees an invalid value.

use crate::types::driver::{DriverRecord, FIELD_COUNT};
use std::fmt;
use std::io::{self, BufRead, Write};

/// Allowed values for one form field
#[derive(Debug, Clone, Copy)]
pub enum FieldDomain {
    /// Inclusive numeric range
    Range { min: i64, max: i64 },
    /// Fixed enumerated set
    Choices(&'static [i64]),
}

impl FieldDomain {
    pub fn contains(&self, value: i64) -> bool {
        match self {
            FieldDomain::Range { min, max } => (*min..=*max).contains(&value),
            FieldDomain::Choices(choices) => choices.contains(&value),
        }
    }
}

impl fmt::Display for FieldDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDomain::Range { min, max } => write!(f, "{} to {}", min, max),
            FieldDomain::Choices(choices) => {
                let mut first = true;
                for choice in *choices {
                    if !first {
                        f.write_str("/")?;
                    }
                    write!(f, "{}", choice)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

/// One form field: prompt text, domain, default answer
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub domain: FieldDomain,
    pub default: i64,
}

/// The eleven form fields, in training column order.
pub const FIELDS: [FieldSpec; FIELD_COUNT] = [
    FieldSpec {
        label: "Age",
        domain: FieldDomain::Range { min: 18, max: 65 },
        default: 30,
    },
    FieldSpec {
        label: "Gender (0 = female, 1 = male)",
        domain: FieldDomain::Choices(&[0, 1]),
        default: 0,
    },
    FieldSpec {
        label: "Income",
        domain: FieldDomain::Range {
            min: 10_000,
            max: 500_000,
        },
        default: 50_000,
    },
    FieldSpec {
        label: "Joining designation (1 is lowest)",
        domain: FieldDomain::Choices(&[1, 2, 3, 4, 5]),
        default: 1,
    },
    FieldSpec {
        label: "Total business value",
        domain: FieldDomain::Range {
            min: 0,
            max: 10_000_000,
        },
        default: 10_000,
    },
    FieldSpec {
        label: "Education level (2 is highest)",
        domain: FieldDomain::Choices(&[0, 1, 2]),
        default: 0,
    },
    FieldSpec {
        label: "Last grade (5 is highest)",
        domain: FieldDomain::Range { min: 1, max: 5 },
        default: 3,
    },
    FieldSpec {
        label: "Income increased (0 = no, 1 = yes)",
        domain: FieldDomain::Choices(&[0, 1]),
        default: 0,
    },
    FieldSpec {
        label: "Last rating",
        domain: FieldDomain::Range { min: 1, max: 5 },
        default: 3,
    },
    FieldSpec {
        label: "Grade improved (-1 = decrease, 0 = no change, 1 = increase)",
        domain: FieldDomain::Choices(&[-1, 0, 1]),
        default: -1,
    },
    FieldSpec {
        label: "Rating change",
        domain: FieldDomain::Range { min: -4, max: 4 },
        default: 0,
    },
];

/// Prompt-driven form collecting one driver record per submission
pub struct DriverForm;

impl DriverForm {
    /// Read one complete record.
    ///
    /// Returns `None` when input ends or the user types "exit"/"quit" at
    /// any prompt.
    pub fn read_record<R: BufRead, W: Write>(
        input: &mut R,
        out: &mut W,
    ) -> io::Result<Option<DriverRecord>> {
        let mut values = [0_i64; FIELD_COUNT];

        for (index, field) in FIELDS.iter().enumerate() {
            match Self::read_field(input, out, field)? {
                Some(value) => values[index] = value,
                None => return Ok(None),
            }
        }

        Ok(Some(DriverRecord::from_inputs(values)))
    }

    /// Prompt for one field until an in-domain answer arrives.
    fn read_field<R: BufRead, W: Write>(
        input: &mut R,
        out: &mut W,
        field: &FieldSpec,
    ) -> io::Result<Option<i64>> {
        loop {
            write!(
                out,
                "{} [{}] (default {}): ",
                field.label, field.domain, field.default
            )?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Ok(Some(field.default));
            }
            if answer.eq_ignore_ascii_case("exit") || answer.eq_ignore_ascii_case("quit") {
                return Ok(None);
            }

            match answer.parse::<i64>() {
                Ok(value) if field.domain.contains(value) => return Ok(Some(value)),
                Ok(value) => {
                    writeln!(out, "{} is not allowed, expected {}", value, field.domain)?;
                }
                Err(_) => {
                    writeln!(out, "Enter a whole number ({})", field.domain)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(input: &str) -> Option<DriverRecord> {
        let mut cursor = Cursor::new(input.as_bytes().to_vec());
        let mut sink = Vec::new();
        DriverForm::read_record(&mut cursor, &mut sink).unwrap()
    }

    #[test]
    fn test_empty_answers_take_defaults() {
        let record = read(&"\n".repeat(11)).unwrap();
        let expected = DriverRecord::default();

        assert_eq!(record.age, expected.age);
        assert_eq!(record.income, expected.income);
        assert_eq!(record.grade_improved, expected.grade_improved);
    }

    #[test]
    fn test_out_of_range_reprompts() {
        // Age 10 is rejected, 42 accepted, rest default
        let input = format!("10\n42\n{}", "\n".repeat(10));
        let record = read(&input).unwrap();
        assert_eq!(record.age, 42);
    }

    #[test]
    fn test_enumerated_field_rejects_outsiders() {
        // Gender 2 is not in {0, 1}
        let input = format!("\n2\n1\n{}", "\n".repeat(9));
        let record = read(&input).unwrap();
        assert_eq!(record.gender, 1);
    }

    #[test]
    fn test_non_numeric_reprompts() {
        let input = format!("abc\n25\n{}", "\n".repeat(10));
        let record = read(&input).unwrap();
        assert_eq!(record.age, 25);
    }

    #[test]
    fn test_exit_aborts_record() {
        assert!(read("exit\n").is_none());
        assert!(read("\n\nquit\n").is_none());
    }

    #[test]
    fn test_eof_aborts_record() {
        assert!(read("").is_none());
        assert!(read("30\n1\n").is_none());
    }

    #[test]
    fn test_negative_values_in_domain() {
        // All defaults except rating change -3
        let input = format!("{}-3\n", "\n".repeat(10));
        let record = read(&input).unwrap();
        assert_eq!(record.rating_change, -3);
    }

    #[test]
    fn test_field_specs_are_self_consistent() {
        for field in &FIELDS {
            assert!(
                field.domain.contains(field.default),
                "default for {} is outside its domain",
                field.label
            );
        }
    }
}
