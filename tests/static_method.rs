#[macro_use]
mod common;

#[cfg(test)]
mod static_method {
    tests! {
        call in static_method is OK
        "16"
    }

    tests! {
        this_is_the_class in static_method is OK
        "Config::class"
    }

    tests! {
        inherited in static_method is OK
        "from base"
    }

    tests! {
        undefined in static_method is ERR
        "No such static method found: pi."
        "[line 2]"
    }

    tests! {
        instance_does_not_see_statics in static_method is ERR
        "No such property found: 'square'."
        "[line 4]"
    }
}
