#[macro_export]
macro_rules! tests {
    ($file:ident in $scope:tt is OK $($expected:expr)*) => {
        #[test]
        fn $file() {
            use rune_lang::rune;

            let mut expected = vec![$($expected),*];

            // if exists, concat expected lines with new lines
            let expected = match expected.len() {
                0 => "".to_string(),
                _ => {
                    // add empty string to end to add new line to end of output
                    expected.push("");
                    expected.join("\n")
                }
            };

            let mut output = Vec::new();
            let mut rune = rune::new(&mut output);

            rune.run_file(format!("tests/target/{}/{}.rune", stringify!($scope), stringify!($file)));

            // drop rune here to release the borrow on output before reading it
            drop(rune);
            assert_eq!(expected, std::str::from_utf8(&output).unwrap());
        }
    };

    ($file:ident in $scope:tt is ERR $($expected:expr)+) => {
        #[test]
        fn $file() {
            use assert_cmd::Command;

            // output concats expected with new line
            let output = vec![$($expected),+].join("\n");
            let file = format!("tests/target/{}/{}.rune", stringify!($scope), stringify!($file));

            Command::cargo_bin("rune").unwrap()
                .arg(file)
                .assert()
                .stderr(format!("{output}\n"))
                .failure();
        }
    };
}
