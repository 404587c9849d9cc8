#[cfg(test)]
#[path = "./string_test.rs"]
mod string_test;

/// pads `s` with spaces on the right until it is `len` characters wide
pub fn right_pad(s: &str, len: usize) -> String {
    format!("{:<width$}", s, width = len)
}

/// formats a signed displacement as an operand term, like " + 4" or " - 37".
/// a zero displacement renders as nothing
pub fn displacement_term(disp: i32) -> String {
    if disp == 0 {
        String::new()
    } else if disp < 0 {
        format!(" - {}", -disp)
    } else {
        format!(" + {}", disp)
    }
}
