#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        in_method in this is OK
        "Egotist instance"
    }

    tests! {
        counter in this is OK
        "2"
    }

    tests! {
        outside_class in this is ERR
        "[line 1] Error at 'this': Cannot use 'this' outside a class."
    }

    tests! {
        in_function in this is ERR
        "[line 2] Error at 'this': Cannot use 'this' outside a class."
    }
}
