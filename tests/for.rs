#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        scope in for is OK
        "0"
        "1"
        "after"
    }

    tests! {
        no_clauses in for is OK
        "0"
        "1"
    }

    tests! {
        statement_initializer in for is OK
        "0"
        "1"
    }

    tests! {
        syntax in for is ERR
        "[line 1] Error at 'var': Expected expression."
    }
}
