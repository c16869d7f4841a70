#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals in string is OK
        "()"
        "a string"
        "A~¶Þॐஃ"
    }

    tests! {
        multiline in string is OK
        "1"
        "2"
        "3"
    }

    tests! {
        unterminated in string is ERR(65)
        "[line 2] Error: Unterminated string."
    }

    tests! {
        error_after_multiline in string is ERR(70)
        "Undefined variable 'err'."
        "[line 7]"
    }
}
