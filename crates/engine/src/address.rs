//! Cell addressing.
//!
//! Rows are 0-based internally and displayed 1-based. Columns are 0-based
//! internally and displayed as Excel-style letters (bijective base-26 with
//! no zero digit), so 0=A, 25=Z, 26=AA, 701=ZZ, 702=AAA.

/// Convert 0-based column index to Excel-style letter(s).
pub fn col_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Convert Excel-style letter(s) back to a 0-based column index.
///
/// Returns `None` for the empty string, any character outside `A`-`Z`,
/// or a label too long for the index to fit in a `usize`.
pub fn letters_to_col(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut col: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        let digit = ch as usize - 'A' as usize + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    Some(col - 1)
}

/// Display reference for a cell, e.g. (0, 0) -> "A1", (4, 27) -> "AB5".
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", col_to_letters(col), row + 1)
}
