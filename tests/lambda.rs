#[macro_use]
mod common;

#[cfg(test)]
mod lambda {
    tests! {
        in_variable in lambda is OK
        "8"
    }

    tests! {
        as_argument in lambda is OK
        "42"
    }

    tests! {
        display in lambda is OK
        "<fn>"
    }

    tests! {
        captures_globals in lambda is OK
        "15"
        "25"
    }

    tests! {
        immediate_call in lambda is OK
        "7"
    }
}
