#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        define_and_read in variable is OK
        "1"
        "nil"
    }

    tests! {
        redefine_global in variable is OK
        "second"
    }

    tests! {
        read_outer_in_initializer in variable is OK
        "2"
    }

    tests! {
        self_initializer in variable is ERR
        "[line 3] Error at 'b': Cannot read local variable in its own initializer."
    }

    tests! {
        duplicate_local in variable is ERR
        "[line 3] Error at 'a': A variable is already defined with name 'a' in this scope."
    }

    tests! {
        undefined in variable is ERR
        "Undefined variable 'x'."
        "[line 1]"
    }

    tests! {
        global_self_initializer in variable is ERR
        "Undefined variable 'a'."
        "[line 1]"
    }
}
