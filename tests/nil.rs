#[macro_use]
mod common;

#[cfg(test)]
mod nil {
    tests! {
        literal in nil is OK
        "nil"
    }
}
