#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        scope in block is OK
        "2"
        "1"
    }

    tests! {
        empty in block is OK
    }
}
