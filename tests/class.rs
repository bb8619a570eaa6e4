#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        display in class is OK
        "Foo::class"
        "Foo instance"
    }

    tests! {
        reference_self in class is OK
        "Foo::class"
    }

    tests! {
        inherit_self in class is ERR
        "[line 1] Error at 'Foo': A class cannot inherit from itself."
    }

    tests! {
        superclass_must_be_class in class is ERR
        "Superclass must be a class."
        "[line 2]"
    }
}
