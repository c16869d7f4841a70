#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        empty in class is OK
        "Foo"
    }

    tests! {
        reference_self in class is OK
        "Foo"
    }

    tests! {
        local_reference_self in class is OK
        "Foo"
    }

    tests! {
        inherited_method in class is OK
        "in foo"
        "in bar"
    }

    tests! {
        local_inherit_other in class is OK
        "B"
    }

    tests! {
        inherit_self in class is ERR(65)
        "[line 1] Error at 'Foo': A class can't inherit from itself."
    }
}
