#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        many in field is OK
        "bar value"
        "baz value"
    }

    tests! {
        method in field is OK
        "arg"
    }

    tests! {
        on_instance in field is OK
        "bar value"
        "baz value"
        "bar value"
        "baz value"
    }

    tests! {
        field_shadows_method in field is OK
        "field"
    }

    tests! {
        get_on_num in field is ERR(70)
        "Only instances have properties."
        "[line 2]"
    }

    tests! {
        get_on_bool in field is ERR(70)
        "Only instances have properties."
        "[line 1]"
    }

    tests! {
        get_on_class in field is ERR(70)
        "Only instances have properties."
        "[line 2]"
    }

    tests! {
        set_on_string in field is ERR(70)
        "Only instances have fields."
        "[line 1]"
    }

    tests! {
        set_on_nil in field is ERR(70)
        "Only instances have fields."
        "[line 1]"
    }

    tests! {
        undefined in field is ERR(70)
        "Undefined property 'bar'."
        "[line 4]"
    }

    tests! {
        set_evaluation_order in field is ERR(70)
        "Undefined variable 'undefined1'."
        "[line 1]"
    }
}
