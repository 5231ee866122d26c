// RUST CONCEPT: Integration tests for whole scripts
// Each test runs a short program through the public API, the way an embedding
// application or the CLI would, and checks exactly what it printed

use pytime_core::{BufferOutput, FixedZone, Interpreter, RuntimeError, execute_string};

// Five hours west of UTC, no daylight saving
const EASTERN_STANDARD: i32 = 18_000;

fn setup_interpreter() -> (Interpreter, BufferOutput) {
    let mut interp = Interpreter::new();
    interp.set_zone_source(Box::new(FixedZone::west(EASTERN_STANDARD)));
    let output = BufferOutput::new();
    interp.set_output(Box::new(output.clone()));
    (interp, output)
}

// Run a script on a fresh interpreter; returns the result and everything printed
fn run(script: &str) -> (Result<(), RuntimeError>, String) {
    let (mut interp, output) = setup_interpreter();
    let result = execute_string(script, &mut interp);
    (result, output.contents())
}

fn run_ok(script: &str) -> String {
    let (result, output) = run(script);
    if let Err(err) = result {
        panic!("script failed with {}\n--- output ---\n{}", err, output);
    }
    output
}

fn run_err(script: &str) -> RuntimeError {
    run(script).0.expect_err("script should have raised")
}

const ONE_TO_NINE: &str =
    "time.struct_time(tm_year=1, tm_mon=2, tm_mday=3, tm_hour=4, tm_min=5, tm_sec=6, tm_wday=7, tm_yday=8, tm_isdst=9)";

#[test]
fn test_struct_time_from_each_sequence_kind() {
    let sequences = [
        "bytes([1, 2, 3, 4, 5, 6, 7, 8, 9])",
        "b'\\x01\\x02\\x03\\x04\\x05\\x06\\x07\\x08\\x09'",
        "{1: 1, 2: 2, 3: 3, 4: 4, 5: 5, 6: 6, 7: 7, 8: 8, 9: 9}",
        "frozenset([1, 2, 3, 4, 5, 6, 7, 8, 9])",
        "[1, 2, 3, 4, 5, 6, 7, 8, 9]",
        "range(1, 10)",
        "{1, 2, 3, 4, 5, 6, 7, 8, 9}",
        "set([1, 2, 3, 4, 5, 6, 7, 8, 9])",
        "'123456789'",
        "(1, 2, 3, 4, 5, 6, 7, 8, 9)",
    ];

    for sequence in sequences {
        let script = format!("import time\nst = time.struct_time({})\nprint(st)", sequence);
        assert_eq!(run_ok(&script), format!("{}\n", ONE_TO_NINE), "from {}", sequence);
    }
}

#[test]
fn test_struct_time_passes_through_struct_time() {
    let output = run_ok(
        "import time\n\
         st = time.struct_time(time.struct_time(range(1, 10)))\n\
         print(st)",
    );
    assert_eq!(output, format!("{}\n", ONE_TO_NINE));
}

#[test]
fn test_struct_time_valid_lengths() {
    let nine = "1, 1, 1, 1, 1, 1, 1, 1, 1";
    for (extra, zone, gmtoff) in [
        ("", "None", "None"),
        (", 'EST'", "'EST'", "None"),
        (", 'EST', -18000", "'EST'", "-18000"),
        (", 'EST', -18000, 99", "'EST'", "-18000"),
    ] {
        let script = format!(
            "import time\nst = time.struct_time([{}{}])\nprint(repr(st))\nprint(len(st))",
            nine, extra
        );
        let expected = format!(
            "time.struct_time(tm_year=1, tm_mon=1, tm_mday=1, tm_hour=1, tm_min=1, tm_sec=1, \
             tm_wday=1, tm_yday=1, tm_isdst=1, tm_zone={}, tm_gmtoff={})\n9\n",
            zone, gmtoff
        );
        assert_eq!(run_ok(&script), expected);
    }
}

#[test]
fn test_struct_time_too_short() {
    let err = run_err("import time\nst = time.struct_time([1, 1, 1, 1, 1, 1, 1, 1])");
    assert_eq!(
        err.to_string(),
        "TypeError: time.struct_time() takes an at least 9-sequence (8-sequence given)"
    );
}

#[test]
fn test_struct_time_rejects_non_sequences() {
    for bad in ["True", "0j", "1", "None", "NotImplemented", "bytearray([1, 1, 1, 1, 1, 1, 1, 1, 1])"] {
        let err = run_err(&format!("import time\nst = time.struct_time({})", bad));
        assert_eq!(err.to_string(), "TypeError: constructor requires a sequence", "for {}", bad);
    }
}

#[test]
fn test_struct_time_attributes() {
    let script = "import time\n\
                  st = time.struct_time(range(1, 10))\n\
                  print(st.n_fields, st.n_unnamed_fields, st.n_sequence_fields)\n\
                  print(st.tm_year, st.tm_mon, st.tm_mday, st.tm_hour, st.tm_min)\n\
                  print(st.tm_sec, st.tm_wday, st.tm_yday, st.tm_isdst)\n\
                  print(st.tm_zone, st.tm_gmtoff)";
    assert_eq!(run_ok(script), "11 2 9\n1 2 3 4 5\n6 7 8 9\nNone None\n");

    let err = run_err("import time\nst = time.struct_time(range(1, 10))\nst.tm_century");
    assert_eq!(
        err.to_string(),
        "AttributeError: 'time.struct_time' object has no attribute 'tm_century'"
    );
}

#[test]
fn test_struct_time_get_item_range() {
    let setup = "import time\nst = time.struct_time([1, 2, 3, 4, 5, 6, 7, 8, 9, 'EST', 0])\n";
    for index in -12i64..=12 {
        let script = format!("{}print(st[{}])", setup, index);
        let (result, output) = run(&script);
        if (-9..=8).contains(&index) {
            result.unwrap();
            let expected = if index < 0 { index + 10 } else { index + 1 };
            assert_eq!(output, format!("{}\n", expected));
        } else {
            let err = result.unwrap_err();
            assert_eq!(err.to_string(), "IndexError: tuple index out of range", "st[{}]", index);
        }
    }

    let output = run_ok(&format!("{}print(st[1:4], st[::-3], st[-2:])", setup));
    assert_eq!(output, "(2, 3, 4) (9, 6, 3) (8, 9)\n");
}

#[test]
fn test_struct_time_is_immutable() {
    let setup = "import time\nst = time.struct_time(range(1, 10))\n";
    let err = run_err(&format!("{}st.tm_year = 2000", setup));
    assert_eq!(err.to_string(), "AttributeError: readonly attribute");

    let err = run_err(&format!("{}st[0] = 2000", setup));
    assert_eq!(
        err.to_string(),
        "TypeError: 'time.struct_time' object does not support item assignment"
    );
}

#[test]
fn test_struct_time_str_and_repr() {
    let output = run_ok(
        "import time\n\
         st = time.struct_time(range(1, 10))\n\
         print(str(st))\n\
         print(repr(st))\n\
         print(type(st))",
    );
    assert_eq!(
        output,
        format!(
            "{0}\n{1}\n<class 'time.struct_time'>\n",
            ONE_TO_NINE,
            "time.struct_time(tm_year=1, tm_mon=2, tm_mday=3, tm_hour=4, tm_min=5, tm_sec=6, \
             tm_wday=7, tm_yday=8, tm_isdst=9, tm_zone=None, tm_gmtoff=None)"
        )
    );
}

#[test]
fn test_mktime_happy_path() {
    let output = run_ok(
        "import time\n\
         seq = (1970, 1, 1, 0, 0, 0, 0, 0, 0)\n\
         print(time.mktime(seq))\n\
         seq = time.struct_time((1970, 1, 1, 0, 0, 0, 0, 0, 0))\n\
         print(time.mktime(seq))",
    );
    assert_eq!(output, "18000.0\n18000.0\n");
}

#[test]
fn test_mktime_no_overflow_error() {
    // mktime always returns a float, so 1970 prints 18000.0 where the captured trace shows 18000
    let output = run_ok(
        "import time\n\
         print('''>>> time.mktime((1900, 1, 1, 0, 0, 0, 0, 0, 0))''')\n\
         print(time.mktime((1900, 1, 1, 0, 0, 0, 0, 0, 0)))\n\
         print(time.mktime((1970, 1, 1, 0, 0, 0, 0, 0, 0)))\n\
         print(time.mktime((2016, 1, 1, 0, 0, 0, 0, 0, 0)))",
    );
    assert_eq!(
        output,
        ">>> time.mktime((1900, 1, 1, 0, 0, 0, 0, 0, 0))\n-2208970800.0\n18000.0\n1451624400.0\n"
    );
}

#[test]
fn test_mktime_single_field_changes() {
    // Weekday and day-of-year never influence the result
    let cases = [
        ("(1999, 1, 1, 0, 0, 0, 0, 0, -1)", "915166800.0"),
        ("(1970, 5, 1, 0, 0, 0, 0, 0, 1)", "10382400.0"),
        ("(1970, 1, 5, 0, 0, 0, 0, 0, -1)", "363600.0"),
        ("(1970, 1, 1, 5, 0, 0, 0, 0, -1)", "36000.0"),
        ("(1970, 1, 1, 0, 5, 0, 0, 0, -1)", "18300.0"),
        ("(1970, 1, 1, 0, 0, 5, 0, 0, -1)", "18005.0"),
        ("(1970, 1, 1, 0, 0, 0, 5, 0, -1)", "18000.0"),
        ("(1970, 1, 1, 0, 0, 0, 0, 200, -1)", "18000.0"),
    ];
    for (tuple, expected) in cases {
        let output = run_ok(&format!("import time\nprint(time.mktime({}))", tuple));
        assert_eq!(output, format!("{}\n", expected), "mktime{}", tuple);
    }
}

#[test]
fn test_mktime_dst_flag_by_month() {
    let mut script = String::from("import time\n");
    for month in 1..=12 {
        let isdst = if month <= 3 || month == 12 { 0 } else { 1 };
        script.push_str(&format!(
            "print(time.mktime((1970, {}, 1, 0, 0, 0, 0, 0, {})))\n",
            month, isdst
        ));
    }
    let output = run_ok(&script);

    // Days before the first of each month in 1970
    let day_of_year = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    let expected: String = day_of_year
        .iter()
        .enumerate()
        .map(|(i, days)| {
            let month = i + 1;
            let dst = if month <= 3 || month == 12 { 0 } else { 3600 };
            format!("{}.0\n", days * 86_400 + 18_000 - dst)
        })
        .collect();
    assert_eq!(output, expected);
}

#[test]
fn test_mktime_too_early() {
    for year in ["-1970", "70", "1899"] {
        let (result, output) = run(&format!(
            "import time\nprint('before')\nprint(time.mktime(({}, 1, 1, 0, 0, 0, 0, 0, 0)))\nprint('after')",
            year
        ));
        assert_eq!(output, "before\n");
        assert_eq!(
            result.unwrap_err().to_string(),
            "OverflowError: mktime argument out of range"
        );
    }
}

#[test]
fn test_mktime_too_late() {
    let (mut interp, output) = setup_interpreter();
    let script = "import time\n\
                  print(time.mktime((275760, 9, 12, 0, 0, 0, 0, 0, 1)))\n\
                  print(time.mktime((275760, 9, 13, 0, 0, 0, 0, 0, 1)))";
    let err = execute_string(script, &mut interp).unwrap_err();
    assert_eq!(err.to_string(), "OverflowError: signed integer is greater than maximum");
    assert_eq!(err.exception_name(), "OverflowError");
    assert_eq!(interp.current_pos.map(|pos| pos.line), Some(3));
    assert_eq!(output.contents(), "8639999928000.0\n");
}

#[test]
fn test_mktime_late_evening_past_ceiling() {
    // The range limits the resulting instant, not the local calendar day
    let (result, output) = run(
        "import time\n\
         print(time.mktime((275760, 9, 12, 18, 59, 59, 0, 0, 0)))\n\
         print(time.mktime((275760, 9, 12, 23, 0, 0, 0, 0, 0)))",
    );
    assert_eq!(output, "8639999999999.0\n");
    assert_eq!(
        result.unwrap_err().to_string(),
        "OverflowError: signed integer is greater than maximum"
    );
}

#[test]
fn test_mktime_bad_input() {
    let data = [
        "False",
        "1j",
        "{1970: 1970, 1: 1, 0: 0}",
        "1.2",
        "frozenset([1970, 1, 0])",
        "1",
        "[1970, 1, 1, 0, 0, 0, 0, 0, 0]",
        "range(1, 2, 3)",
        "{1970, 1, 0}",
        "slice(1, 2, 3)",
        "'123456789'",
        "None",
        "NotImplemented",
    ];
    for d in data {
        let err = run_err(&format!("import time\ntime.mktime({})", d));
        assert_eq!(
            err.to_string(),
            "TypeError: Tuple or struct_time argument required",
            "mktime({})",
            d
        );
    }
}

#[test]
fn test_mktime_non_integer_fields() {
    for field in ["True", "3.14159", "'abc'", "b'abc'", "None", "[1, 2]", "(1+2j)", "{1: 2}"] {
        let (result, _) = run(&format!(
            "import time\ntime.mktime((1970, {}, 1, 2, 0, 0, 0, 0, 0))",
            field
        ));
        if field == "True" {
            // bool is an integer
            result.unwrap();
        } else {
            let err = result.unwrap_err();
            assert_eq!(err.exception_name(), "TypeError", "field {}: {}", field, err);
        }
    }
}

#[test]
fn test_mktime_wrong_length_and_arg_count() {
    let err = run_err("import time\ntime.mktime((1970, 1, 1, 0, 0, 0, 0, 0))");
    assert_eq!(err.to_string(), "TypeError: function takes exactly 9 arguments (8 given)");

    let err = run_err("import time\ntime.mktime()");
    assert_eq!(err.to_string(), "TypeError: mktime() takes exactly one argument (0 given)");

    let err = run_err("import time\ntime.mktime(1, 2)");
    assert_eq!(err.to_string(), "TypeError: mktime() takes exactly one argument (2 given)");
}

#[test]
fn test_localtime_round_trip_through_script() {
    let output = run_ok(
        "import time\n\
         st = time.localtime(1451624400)\n\
         print(st.tm_year, st.tm_mon, st.tm_mday, st.tm_hour, st.tm_wday, st.tm_yday)\n\
         print(time.mktime(st))\n\
         print(time.timezone, time.altzone)",
    );
    assert_eq!(output, "2016 1 1 0 4 1\n1451624400.0\n18000 14400\n");
}

#[test]
fn test_errors_without_import() {
    let err = run_err("time.mktime((1970, 1, 1, 0, 0, 0, 0, 0, 0))");
    assert_eq!(err.to_string(), "NameError: name 'time' is not defined");

    let err = run_err("import datetime");
    assert!(matches!(err, RuntimeError::ModuleNotFound(_)));
}
