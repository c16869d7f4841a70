#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherit_methods in inheritance is OK
        "foo"
        "bar"
        "bar"
    }

    tests! {
        set_fields_from_base_class in inheritance is OK
        "foo 1"
        "foo 2"
        "bar 1"
        "bar 2"
        "bar 1"
        "bar 2"
    }

    tests! {
        constructor in inheritance is OK
        "value"
    }

    tests! {
        parenthesized_superclass in inheritance is ERR(65)
        "[line 3] Error at '(': Expect superclass name."
    }

    tests! {
        inherit_from_function in inheritance is ERR(70)
        "Superclass must be a class."
        "[line 3]"
    }

    tests! {
        inherit_from_nil in inheritance is ERR(70)
        "Superclass must be a class."
        "[line 2]"
    }

    tests! {
        inherit_from_number in inheritance is ERR(70)
        "Superclass must be a class."
        "[line 2]"
    }
}
