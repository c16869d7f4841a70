#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        scope in for is OK
        "0"
        "-1"
        "after"
        "0"
    }

    tests! {
        syntax in for is OK
        "1"
        "2"
        "3"
        "0"
        "1"
        "2"
        "done"
        "0"
        "1"
    }

    tests! {
        closure_in_body in for is OK
        "4"
        "1"
        "4"
        "2"
        "4"
        "3"
    }

    tests! {
        return_inside in for is OK
        "i"
    }

    tests! {
        statement_condition in for is ERR(65)
        "[line 1] Error at '{': Expect expression."
        "[line 1] Error at ')': Expect ';' after expression."
    }

    tests! {
        var_in_body in for is ERR(65)
        "[line 1] Error at 'var': Expect expression."
    }
}
