#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add_strings in operator is OK
        "string"
        "a1"
        "1a"
        "v=nil"
        "flag true"
    }

    tests! {
        equality in operator is OK
        "true"
        "false"
        "true"
        "false"
        "true"
        "false"
        "false"
    }

    tests! {
        comma in operator is OK
        "3"
        "two"
    }

    tests! {
        ternary in operator is OK
        "yes"
        "no"
        "eq"
        "1"
    }

    tests! {
        ternary_precedence in operator is OK
        "a"
        "math works"
    }

    tests! {
        add_type_error in operator is ERR
        "Operands must both be numbers or one of them a string."
        "[line 1]"
    }

    tests! {
        divide_by_zero in operator is ERR
        "Cannot divide by zero."
        "[line 1]"
    }

    tests! {
        comparison_type_error in operator is ERR
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        negate_non_number in operator is ERR
        "Operand must be a number."
        "[line 1]"
    }
}
