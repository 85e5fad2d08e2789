//! Helper for reading the fixed-width decimal numbers of leaders and directory
//! entries.

use super::StructuralError;

/// Read an unsigned decimal number from a run of ASCII digits.
///
/// Signs, padding, empty runs and values overflowing `usize` are rejected;
/// `what` names the number in the resulting error.
pub fn decimal(r: &[u8], what: &'static str) -> Result<usize, StructuralError> {
    if r.is_empty() {
        Err(StructuralError::NotNumeric(what))?;
    }

    r.iter()
        .try_fold(0, |acc: usize, b| {
            if !b.is_ascii_digit() {
                return None;
            }

            acc.checked_mul(10)?.checked_add(usize::from(b - b'0'))
        })
        .ok_or(StructuralError::NotNumeric(what))
}
