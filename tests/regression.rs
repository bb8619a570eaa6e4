#[macro_use]
mod common;

#[cfg(test)]
mod regression {
    // The loop condition must be evaluated again before every iteration,
    // and the truthiness of its result is what keeps the loop running.
    tests! {
        while_condition_reevaluated in regression is OK
        "1"
        "2"
        "done 3"
    }
}
