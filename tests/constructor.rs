#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init in constructor is OK
        "1"
        "2"
    }

    tests! {
        early_return in constructor is OK
        "built"
        "Foo instance"
    }

    tests! {
        call_init_explicitly in constructor is OK
        "init 1"
        "init 2"
        "2"
    }

    tests! {
        default in constructor is OK
        "Foo instance"
    }

    tests! {
        return_value in constructor is ERR
        "[line 3] Error at 'return': Cannot return a value from an instance initializer."
    }

    tests! {
        default_arguments in constructor is ERR
        "Expected 0 arguments but got 3."
        "[line 2]"
    }
}
