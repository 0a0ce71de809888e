//! The closed set of operations a record can assert

use crate::scanner::Record;
use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;

/// Operation selected by a record's type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Sum,
    LShift1,
    LShift,
    RShift,
    Square,
    Product,
    Quotient,
    Unknown(String),
}

/// A value recomputed from a record's inputs, to be compared with `key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computed {
    /// Symbolic form of the evaluated expression, e.g. `A + B`
    pub expression: &'static str,
    /// Record key holding the expected value
    pub key: &'static str,
    pub value: BigInt,
}

impl Computed {
    fn new(expression: &'static str, key: &'static str, value: BigInt) -> Self {
        Self {
            expression,
            key,
            value,
        }
    }
}

/// Reasons an operation could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("shift amount {amount} exceeds limit {max}")]
    ShiftTooLarge { amount: u64, max: u64 },

    #[error("division by zero")]
    DivisionByZero,

    /// Only possible for records that skipped the key set check
    #[error("operand {0} is missing")]
    MissingOperand(&'static str),
}

impl Operation {
    /// Every known operation, in table order
    pub const KNOWN: [Operation; 7] = [
        Operation::Sum,
        Operation::LShift1,
        Operation::LShift,
        Operation::RShift,
        Operation::Square,
        Operation::Product,
        Operation::Quotient,
    ];

    /// Map a record type to its operation (exact, case-sensitive match)
    pub fn from_type(test_type: &str) -> Self {
        match test_type {
            "Sum" => Self::Sum,
            "LShift1" => Self::LShift1,
            "LShift" => Self::LShift,
            "RShift" => Self::RShift,
            "Square" => Self::Square,
            "Product" => Self::Product,
            "Quotient" => Self::Quotient,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Sum => "Sum",
            Self::LShift1 => "LShift1",
            Self::LShift => "LShift",
            Self::RShift => "RShift",
            Self::Square => "Square",
            Self::Product => "Product",
            Self::Quotient => "Quotient",
            Self::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Exact key set a record of this type must carry
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Sum => &["A", "B", "Sum"],
            Self::LShift1 => &["A", "LShift1"],
            Self::LShift => &["A", "N", "LShift"],
            Self::RShift => &["A", "N", "RShift"],
            Self::Square => &["A", "Square"],
            Self::Product => &["A", "B", "Product"],
            Self::Quotient => &["A", "B", "Quotient", "Remainder"],
            Self::Unknown(_) => &[],
        }
    }

    /// Recompute the record's expected values from its inputs.
    /// Unknown operations assert nothing and yield no results.
    ///
    /// Shift amounts are the low 64 bits of `N`'s magnitude and must not
    /// exceed `max_shift_bits`. Division truncates toward zero, so the
    /// remainder takes the dividend's sign; right shifts round toward
    /// negative infinity.
    pub fn evaluate(
        &self,
        record: &Record,
        max_shift_bits: u64,
    ) -> Result<Vec<Computed>, EvaluationError> {
        let computed = match self {
            Self::Sum => {
                let (a, b) = (operand(record, "A")?, operand(record, "B")?);
                vec![Computed::new("A + B", "Sum", a + b)]
            }
            Self::LShift1 => {
                let a = operand(record, "A")?;
                vec![Computed::new("A + A", "LShift1", a + a)]
            }
            Self::LShift => {
                let a = operand(record, "A")?;
                let n = shift_amount(operand(record, "N")?, max_shift_bits)?;
                vec![Computed::new("A << N", "LShift", a << n)]
            }
            Self::RShift => {
                let a = operand(record, "A")?;
                let n = shift_amount(operand(record, "N")?, max_shift_bits)?;
                vec![Computed::new("A >> N", "RShift", a >> n)]
            }
            Self::Square => {
                let a = operand(record, "A")?;
                vec![Computed::new("A * A", "Square", a * a)]
            }
            Self::Product => {
                let (a, b) = (operand(record, "A")?, operand(record, "B")?);
                vec![Computed::new("A * B", "Product", a * b)]
            }
            Self::Quotient => {
                let (a, b) = (operand(record, "A")?, operand(record, "B")?);
                if b.is_zero() {
                    return Err(EvaluationError::DivisionByZero);
                }
                vec![
                    Computed::new("A / B", "Quotient", a / b),
                    Computed::new("A % B", "Remainder", a % b),
                ]
            }
            Self::Unknown(_) => Vec::new(),
        };

        Ok(computed)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn operand<'r>(record: &'r Record, key: &'static str) -> Result<&'r BigInt, EvaluationError> {
    record.get(key).ok_or(EvaluationError::MissingOperand(key))
}

/// Narrow `N` to the low 64 bits of its magnitude and bound it
fn shift_amount(n: &BigInt, max_shift_bits: u64) -> Result<usize, EvaluationError> {
    let amount = n.magnitude().iter_u64_digits().next().unwrap_or(0);
    let too_large = EvaluationError::ShiftTooLarge {
        amount,
        max: max_shift_bits,
    };

    if amount > max_shift_bits {
        return Err(too_large);
    }
    usize::try_from(amount).map_err(|_| too_large)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::RecordScanner;
    use std::io::Cursor;

    fn record(input: &str) -> Record {
        RecordScanner::new(Cursor::new(input.as_bytes().to_vec()))
            .next_record()
            .unwrap()
            .unwrap()
    }

    fn single(operation: Operation, input: &str) -> Computed {
        let mut computed = operation.evaluate(&record(input), 1024).unwrap();
        assert_eq!(computed.len(), 1);
        computed.remove(0)
    }

    #[test]
    fn test_type_mapping_round_trips_names() {
        for operation in Operation::KNOWN {
            assert_eq!(Operation::from_type(operation.name()), operation);
            assert!(operation.is_known());
            assert!(operation.required_keys().contains(&operation.name()));
        }
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        assert_eq!(
            Operation::from_type("sum"),
            Operation::Unknown("sum".to_string())
        );
        let unknown = Operation::from_type("Foo");
        assert!(!unknown.is_known());
        assert_eq!(unknown.name(), "Foo");
        assert!(unknown.required_keys().is_empty());
        assert_eq!(unknown.evaluate(&record("Foo = 1\n"), 64), Ok(vec![]));
    }

    #[test]
    fn test_sum_and_lshift1() {
        let sum = single(Operation::Sum, "Sum = 0\nA = 1\nB = 2\n");
        assert_eq!(sum.value, BigInt::from(3));
        assert_eq!(sum.expression, "A + B");
        assert_eq!(sum.key, "Sum");

        let doubled = single(Operation::LShift1, "LShift1 = 0\nA = -7\n");
        assert_eq!(doubled.value, BigInt::from(-14));
    }

    #[test]
    fn test_shifts() {
        let left = single(Operation::LShift, "LShift = 0\nA = 3\nN = 41\n");
        assert_eq!(left.value, BigInt::from(3) << 65usize);

        let right = single(Operation::RShift, "RShift = 0\nA = 300\nN = 4\n");
        assert_eq!(right.value, BigInt::from(0x30));
    }

    #[test]
    fn test_right_shift_of_negative_rounds_down() {
        let right = single(Operation::RShift, "RShift = 0\nA = -3\nN = 1\n");
        assert_eq!(right.value, BigInt::from(-2));
    }

    #[test]
    fn test_shift_amount_uses_magnitude() {
        let left = single(Operation::LShift, "LShift = 0\nA = 1\nN = -4\n");
        assert_eq!(left.value, BigInt::from(16));
    }

    #[test]
    fn test_shift_above_ceiling() {
        let result = Operation::LShift.evaluate(&record("LShift = 0\nA = 1\nN = 1000\n"), 64);
        assert_eq!(
            result,
            Err(EvaluationError::ShiftTooLarge {
                amount: 0x1000,
                max: 64
            })
        );
    }

    #[test]
    fn test_square_and_product() {
        let square = single(Operation::Square, "Square = 0\nA = -10\n");
        assert_eq!(square.value, BigInt::from(256));

        let product = single(Operation::Product, "Product = 0\nA = 10\nB = -3\n");
        assert_eq!(product.value, BigInt::from(-48));
    }

    #[test]
    fn test_quotient_truncates() {
        let computed = Operation::Quotient
            .evaluate(
                &record("Quotient = 0\nA = -7\nB = 2\nRemainder = 0\n"),
                64,
            )
            .unwrap();

        assert_eq!(computed[0].key, "Quotient");
        assert_eq!(computed[0].value, BigInt::from(-3));
        assert_eq!(computed[1].key, "Remainder");
        assert_eq!(computed[1].value, BigInt::from(-1));
    }

    #[test]
    fn test_division_by_zero() {
        let result = Operation::Quotient.evaluate(
            &record("Quotient = 0\nA = 5\nB = 0\nRemainder = 0\n"),
            64,
        );
        assert_eq!(result, Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn test_missing_operand() {
        let result = Operation::Product.evaluate(&record("Product = 0\nA = 5\n"), 64);
        assert_eq!(result, Err(EvaluationError::MissingOperand("B")));
    }
}
