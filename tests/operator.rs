#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add in operator is OK
        "579"
        "string"
    }

    tests! {
        subtract in operator is OK
        "1"
        "0.25"
    }

    tests! {
        multiply in operator is OK
        "15"
        "25"
    }

    tests! {
        divide in operator is OK
        "4"
        "6.25"
    }

    tests! {
        negate in operator is OK
        "-3"
        "3"
        "-3"
    }

    tests! {
        comparison in operator is OK
        "true"
        "false"
        "false"
        "true"
        "true"
        "false"
        "false"
        "false"
        "true"
        "false"
        "true"
        "true"
        "false"
        "false"
        "true"
    }

    tests! {
        equals in operator is OK
        "true"
        "true"
        "false"
        "true"
        "false"
        "true"
        "false"
        "false"
        "false"
        "false"
    }

    tests! {
        equals_class in operator is OK
        "true"
        "false"
        "false"
        "true"
        "false"
        "false"
        "false"
        "false"
    }

    tests! {
        equals_method in operator is OK
        "true"
        "false"
    }

    tests! {
        not in operator is OK
        "false"
        "true"
        "true"
        "false"
        "false"
        "true"
        "false"
        "false"
    }

    tests! {
        precedence in operator is OK
        "7"
        "ab"
        "1"
        "4"
        "3"
        "3"
        "true"
        "true"
    }

    tests! {
        add_bool_nil in operator is ERR(70)
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        add_num_string in operator is ERR(70)
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        negate_nonnum in operator is ERR(70)
        "Operand must be a number."
        "[line 1]"
    }

    tests! {
        greater_nonnum in operator is ERR(70)
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        less_nonnum in operator is ERR(70)
        "Operands must be numbers."
        "[line 1]"
    }
}
