// JtV source builders
//
// JtV only accepts a whole program (`run -` / `run <path>`), so host values end
// up inside source text. Only typed integers are ever rendered into a template;
// untrusted text must first become an `IntLiteral`.

use std::fmt;
use thiserror::Error;

/// Rejection of untrusted text that was meant to become a JtV literal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnippetError {
    #[error("empty input")]
    Empty,

    #[error("not an integer literal: {0:?}")]
    NotAnInteger(String),
}

/// Integer validated from untrusted text, safe to render as JtV data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntLiteral(i64);

impl IntLiteral {
    /// Parse untrusted text as a decimal integer
    ///
    /// Surrounding whitespace is ignored; anything else that is not part of an
    /// `i64` literal rejects the whole input.
    pub fn parse(input: &str) -> Result<Self, SnippetError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SnippetError::Empty);
        }
        trimmed
            .parse::<i64>()
            .map(IntLiteral)
            .map_err(|_| SnippetError::NotAnInteger(input.to_string()))
    }
}

impl fmt::Display for IntLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Iterative Fibonacci, result printed on one line
pub fn fibonacci(n: u32) -> String {
    format!(
        r#"fn fibonacci(n: Int): Int {{
    if n <= 1 {{
        return n
    }}

    prev = 0
    curr = 1

    for i in 2..n+1 {{
        next = prev + curr
        prev = curr
        curr = next
    }}

    return curr
}}

result = fibonacci({n})
print(result)
"#
    )
}

/// `user_value + 10` where `user_value` is validated data
pub fn secure_calculation(user_value: IntLiteral) -> String {
    format!(
        r#"user_value = {user_value}
safe_result = user_value + 10

print(safe_result)
"#
    )
}

/// 2x2 matrix addition, prints c11, c12, c21, c22 on separate lines
pub fn matrix_add(a: [i64; 4], b: [i64; 4]) -> String {
    format!(
        r#"fn matrix_add(a11: Int, a12: Int, a21: Int, a22: Int,
              b11: Int, b12: Int, b21: Int, b22: Int): (Int, Int, Int, Int) {{
    c11 = a11 + b11
    c12 = a12 + b12
    c21 = a21 + b21
    c22 = a22 + b22

    return (c11, c12, c21, c22)
}}

result = matrix_add({}, {}, {}, {}, {}, {}, {}, {})

print(result[0])
print(result[1])
print(result[2])
print(result[3])
"#,
        a[0], a[1], a[2], a[3], b[0], b[1], b[2], b[3]
    )
}

/// Sum of squares with multiplication spelled as repeated addition
pub fn calculate_score(values: &[i64]) -> String {
    format!(
        r#"@pure fn calculate_score(values: List<Int>): Int {{
    score = 0
    for val in values {{
        squared = 0
        for i in 0..val {{
            squared = squared + val
        }}
        score = score + squared
    }}
    return score
}}

values = {}
result = calculate_score(values)
print(result)
"#,
        int_list(values)
    )
}

/// Balance transfer guarded by a sufficient-funds check, prints both balances
pub fn transfer(from_balance: i64, to_balance: i64, amount: i64) -> String {
    format!(
        r#"fn transfer(from_balance: Int, to_balance: Int, amount: Int): (Int, Int) {{
    if from_balance >= amount {{
        new_from = from_balance - amount
        new_to = to_balance + amount
        return (new_from, new_to)
    }} else {{
        return (from_balance, to_balance)
    }}
}}

result = transfer({from_balance}, {to_balance}, {amount})
print(result[0])
print(result[1])
"#
    )
}

fn int_list(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_literal_accepts_plain_integers() {
        assert_eq!(IntLiteral::parse("5").unwrap().0, 5);
        assert_eq!(IntLiteral::parse("  -42\n").unwrap().0, -42);
    }

    #[test]
    fn test_int_literal_rejects_code() {
        let err = IntLiteral::parse("5; import os; os.system('rm -rf /')").unwrap_err();

        assert!(matches!(err, SnippetError::NotAnInteger(_)));
    }

    #[test]
    fn test_int_literal_rejects_empty_and_overflow() {
        assert_eq!(IntLiteral::parse("   ").unwrap_err(), SnippetError::Empty);
        assert!(IntLiteral::parse("99999999999999999999").is_err());
        assert!(IntLiteral::parse("5\nprint(1)").is_err());
    }

    #[test]
    fn test_fibonacci_substitutes_argument() {
        let source = fibonacci(20);

        assert!(source.contains("result = fibonacci(20)"));
        assert!(source.contains("for i in 2..n+1 {"));
    }

    #[test]
    fn test_secure_calculation_embeds_literal_only() {
        let source = secure_calculation(IntLiteral::parse(" 7 ").unwrap());

        assert!(source.starts_with("user_value = 7\n"));
    }

    #[test]
    fn test_matrix_add_orders_operands() {
        let source = matrix_add([1, 2, 3, 4], [5, 6, 7, 8]);

        assert!(source.contains("result = matrix_add(1, 2, 3, 4, 5, 6, 7, 8)"));
    }

    #[test]
    fn test_calculate_score_renders_list() {
        let source = calculate_score(&[1, 2, 3, 4, 5]);

        assert!(source.contains("values = [1, 2, 3, 4, 5]"));
        assert!(calculate_score(&[]).contains("values = []"));
    }

    #[test]
    fn test_transfer_substitutes_operands() {
        let source = transfer(1000, 500, 100);

        assert!(source.contains("result = transfer(1000, 500, 100)"));
    }
}
