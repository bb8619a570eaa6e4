#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals in string is OK
        "hello"
        ""
        "one"
        "two"
    }

    tests! {
        unterminated in string is ERR
        "[line 2] Error: Unterminated string."
    }
}
