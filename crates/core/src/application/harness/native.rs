// Host-native reference implementations

/// Iterative Fibonacci
///
/// `None` when F(n) does not fit in a `u64` (n > 93).
pub fn fibonacci(n: u32) -> Option<u64> {
    if n <= 1 {
        return Some(u64::from(n));
    }
    let (mut prev, mut curr) = (0u64, 1u64);
    for _ in 2..=n {
        let next = prev.checked_add(curr)?;
        prev = curr;
        curr = next;
    }
    Some(curr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_small_values() {
        let expected = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34];
        for (n, want) in expected.iter().enumerate() {
            assert_eq!(fibonacci(n as u32), Some(*want));
        }
    }

    #[test]
    fn test_fibonacci_twenty() {
        assert_eq!(fibonacci(20), Some(6765));
    }

    #[test]
    fn test_fibonacci_overflow_boundary() {
        assert_eq!(fibonacci(93), Some(12_200_160_415_121_876_738));
        assert_eq!(fibonacci(94), None);
    }
}
