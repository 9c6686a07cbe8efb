//! # Sequence Validator
//!
//! Checks that a chip sequence reads as a well-formed boolean expression.
//! Only the surface shape is checked; nothing is evaluated.
//!
//! Rules run in a fixed order and the first one that fails decides the
//! message:
//!
//! ```text
//! 1. singleton identifier     [pizza]
//! 2. trailing operator        [pizza AND]
//! 3. consecutive operators    [pizza AND OR tacos]
//! 4. leading operator         [AND pizza]
//! 5. parenthesis balance      [pizza )]   [( pizza]
//! 6. adjacency                [pizza tacos]   [pizza AND )]
//! ```
//!
//! Nothing constrains what follows `(` or `)`, so `( AND pizza )` passes.
//! That is the established behavior and is pinned by a test.

use std::fmt;

use crate::core::chip::TokenClass;

/// The rule a sequence broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    SingleIdentifier,
    TrailingOperator,
    ConsecutiveOperators,
    LeadingOperator,
    UnmatchedClose,
    UnclosedParens,
    IdentifierFollowedBy,
    OperatorFollowedBy,
    /// Adjacency scan reached an operator with nothing after it. The
    /// trailing-operator rule catches this first, so `validate` never
    /// reports it.
    OperatorAtEnd,
}

impl Violation {
    pub fn message(self) -> &'static str {
        match self {
            Violation::SingleIdentifier => {
                "Single ID chips are not allowed. Add operators (AND/OR) or parentheses."
            }
            Violation::TrailingOperator => {
                "Cannot end with an operator. Add another ID chip or close parentheses."
            }
            Violation::ConsecutiveOperators => "Cannot have consecutive operators.",
            Violation::LeadingOperator => "Cannot start with an operator.",
            Violation::UnmatchedClose => "Unmatched closing parenthesis.",
            Violation::UnclosedParens => "Unclosed parentheses.",
            Violation::IdentifierFollowedBy => {
                "ID chips must be followed by operators (AND/OR) or closing parentheses."
            }
            Violation::OperatorFollowedBy => {
                "Operators must be followed by ID chips or opening parentheses."
            }
            Violation::OperatorAtEnd => "Cannot end with an operator.",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verdict {
    violation: Option<Violation>,
}

impl Verdict {
    pub const VALID: Verdict = Verdict { violation: None };

    fn fail(violation: Violation) -> Self {
        Self {
            violation: Some(violation),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }

    /// The diagnostic for the first broken rule, or `""` when valid.
    pub fn message(&self) -> &'static str {
        self.violation.map(Violation::message).unwrap_or("")
    }

    pub fn violation(&self) -> Option<Violation> {
        self.violation
    }
}

/// Validate a sequence of chip labels.
pub fn validate<S: AsRef<str>>(labels: &[S]) -> Verdict {
    let classes: Vec<TokenClass> = labels.iter().map(|l| TokenClass::of(l.as_ref())).collect();
    match check(&classes) {
        Ok(()) => Verdict::VALID,
        Err(violation) => Verdict::fail(violation),
    }
}

/// Split a typed expression into chip labels.
///
/// Tokens are separated by whitespace; `(` and `)` always stand alone, so
/// `(pizza OR sushi)` yields five labels.
pub fn tokenize(expr: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in expr.chars() {
        if ch.is_whitespace() || ch == '(' || ch == ')' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            if !ch.is_whitespace() {
                tokens.push(ch.to_string());
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn check(classes: &[TokenClass]) -> Result<(), Violation> {
    use TokenClass::{Close, Id, Op, Open};

    let (Some(&first), Some(&last)) = (classes.first(), classes.last()) else {
        return Ok(());
    };

    if classes.len() == 1 && first == Id {
        return Err(Violation::SingleIdentifier);
    }

    if last == Op {
        return Err(Violation::TrailingOperator);
    }

    if classes.windows(2).any(|pair| pair == [Op, Op]) {
        return Err(Violation::ConsecutiveOperators);
    }

    if first == Op {
        return Err(Violation::LeadingOperator);
    }

    let mut depth: usize = 0;
    for class in classes {
        match class {
            Open => depth += 1,
            Close => {
                depth = depth.checked_sub(1).ok_or(Violation::UnmatchedClose)?;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(Violation::UnclosedParens);
    }

    check_adjacency(classes)
}

/// What may follow each identifier and operator.
fn check_adjacency(classes: &[TokenClass]) -> Result<(), Violation> {
    use TokenClass::{Close, Id, Op};

    for (i, class) in classes.iter().enumerate() {
        let next = classes.get(i + 1);
        match (class, next) {
            (Id, Some(Op | Close)) | (Id, None) => {}
            (Id, Some(_)) => return Err(Violation::IdentifierFollowedBy),
            (Op, None) => return Err(Violation::OperatorAtEnd),
            (Op, Some(Op | Close)) => return Err(Violation::OperatorFollowedBy),
            _ => {}
        }
    }

    Ok(())
}
