#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        this_in_method in this is OK
        "42"
    }

    tests! {
        closure in this is OK
        "Foo"
    }

    tests! {
        bound_method in this is OK
        "Jane"
    }

    tests! {
        this_at_top_level in this is ERR(65)
        "[line 1] Error at 'this': Can't use 'this' outside of a class."
    }

    tests! {
        this_in_top_level_function in this is ERR(65)
        "[line 2] Error at 'this': Can't use 'this' outside of a class."
    }
}
