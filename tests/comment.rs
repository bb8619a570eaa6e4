#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    tests! {
        line_at_eof in comment is OK
        "ok"
    }

    tests! {
        only_comments in comment is OK
    }

    tests! {
        block in comment is OK
        "ok"
    }

    tests! {
        division_still_works in comment is OK
        "5"
    }
}
