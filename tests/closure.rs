#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        assign_to_closure in closure is OK
        "local"
        "after f"
        "after f"
        "after g"
    }

    tests! {
        close_over_function_parameter in closure is OK
        "param"
    }

    tests! {
        close_over_later_variable in closure is OK
        "b"
        "a"
    }

    tests! {
        counter in closure is OK
        "1"
        "2"
        "3"
    }

    tests! {
        nested_closure in closure is OK
        "a"
        "b"
        "c"
    }

    tests! {
        reference_closure_multiple_times in closure is OK
        "a"
        "a"
    }

    tests! {
        shadow_closure_with_local in closure is OK
        "closure"
        "shadow"
        "closure"
    }
}
