#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        print_name in function is OK
        "<fn named>"
    }

    tests! {
        recursion in function is OK
        "21"
    }

    tests! {
        nil_return in function is OK
        "nil"
        "nil"
    }

    tests! {
        parameters in function is OK
        "15"
    }

    tests! {
        local_recursion in function is OK
        "done"
    }

    tests! {
        too_many_parameters in function is ERR
        "[line 1] Error at 'p33': Cannot have more than 32 parameters."
    }

    tests! {
        too_many_arguments in function is ERR
        "[line 2] Error at '33': Cannot have more than 32 arguments."
    }
}
