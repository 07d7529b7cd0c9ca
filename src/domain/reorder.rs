//! Drag-and-drop reorder within one ordered sequence

use tracing::trace;

use crate::domain::{DomainError, DomainResult};

/// Move the element at `from` to `to`.
///
/// The element is extracted first and then inserted at `to` in the
/// shortened sequence: `[A,B,C,D]` with `0 -> 2` yields `[B,C,A,D]`.
/// Both indices must lie in `[0, len)`; nothing moves otherwise.
pub fn move_element<T>(seq: &mut Vec<T>, from: usize, to: usize) -> DomainResult<()> {
    let len = seq.len();
    for index in [from, to] {
        if index >= len {
            return Err(DomainError::IndexOutOfRange { index, len });
        }
    }
    if from == to {
        return Ok(());
    }
    trace!("move_element: from={} to={} len={}", from, to, len);
    let moved = seq.remove(from);
    seq.insert(to, moved);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 2, "BCAD")]
    #[case(2, 0, "CABD")]
    #[case(3, 0, "DABC")]
    #[case(0, 3, "BCDA")]
    #[case(1, 2, "ACBD")]
    #[case(1, 1, "ABCD")]
    fn given_sequence_when_moving_then_extracts_and_reinserts(
        #[case] from: usize,
        #[case] to: usize,
        #[case] expected: &str,
    ) {
        let mut seq: Vec<char> = "ABCD".chars().collect();

        move_element(&mut seq, from, to).unwrap();

        assert_eq!(seq.into_iter().collect::<String>(), expected);
    }

    #[rstest]
    #[case(4, 0, 4)]
    #[case(0, 4, 4)]
    #[case(9, 9, 9)]
    fn given_index_outside_bounds_when_moving_then_fails_without_change(
        #[case] from: usize,
        #[case] to: usize,
        #[case] bad: usize,
    ) {
        let mut seq: Vec<char> = "ABCD".chars().collect();

        let err = move_element(&mut seq, from, to).unwrap_err();

        assert_eq!(err, DomainError::IndexOutOfRange { index: bad, len: 4 });
        assert_eq!(seq.into_iter().collect::<String>(), "ABCD");
    }

    #[test]
    fn given_empty_sequence_when_moving_zero_to_zero_then_out_of_range() {
        let mut seq: Vec<u8> = Vec::new();
        assert!(matches!(
            move_element(&mut seq, 0, 0),
            Err(DomainError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }
}
