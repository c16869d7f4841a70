#[macro_use]
mod common;

#[cfg(test)]
mod print {
    tests! {
        missing_argument in print is ERR(65)
        "[line 1] Error at ';': Expect expression."
    }
}
