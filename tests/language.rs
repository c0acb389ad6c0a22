use std::{
    fs,
    sync::Arc,
    thread,
};

use sythin::{
    error::{ParseError, RuntimeError},
    evaluable_definitions, evaluate_definition,
    interpreter::lexer::{Token, tokenize},
    live::LiveProgram,
    parse, sample, validate,
};
use walkdir::WalkDir;

#[test]
fn example_programs_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "sth"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let program = parse(&content).unwrap_or_else(|e| panic!("{path:?} failed to parse: {e}"));
        let diagnostics = validate(&program);
        assert!(diagnostics.is_empty(), "{path:?}: {diagnostics:?}");

        for (name, frequency, time, expected) in extract_expectations(&content) {
            count += 1;
            let actual = evaluate_definition(&program, &name, frequency, time)
                .unwrap_or_else(|e| panic!("{path:?}: {name} {frequency} {time} failed: {e}"));
            assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                    "{path:?}: {name} {frequency} {time} gave {actual}, expected {expected}");
        }
    }

    assert!(count > 0, "No expectations found in tests/programs");
}

/// Reads `#! name frequency time expected` header lines.
fn extract_expectations(content: &str) -> Vec<(String, f64, f64, f64)> {
    content.lines()
           .filter_map(|line| line.trim_start().strip_prefix("#!"))
           .map(|rest| {
               let fields: Vec<&str> = rest.split_whitespace().collect();
               let number = |i: usize| -> f64 {
                   fields[i].parse().unwrap_or_else(|e| panic!("bad field in '{rest}': {e}"))
               };
               (fields[0].to_string(), number(1), number(2), number(3))
           })
           .collect()
}

fn eval(body: &str, frequency: f64, time: f64) -> Result<f64, RuntimeError> {
    let program = parse(&format!("main = \\f.\\t. {body}")).unwrap();
    evaluate_definition(&program, "main", frequency, time)
}

fn assert_value(body: &str, expected: f64) {
    match eval(body, 1.0, 0.0) {
        Ok(actual) => assert_eq!(actual, expected, "{body}"),
        Err(e) => panic!("{body} failed: {e}"),
    }
}

#[test]
fn numeric_literals_round_trip() {
    let mut checked = 0;
    for sign in ["", "+", "-"] {
        for integer in ["", "0", "7", "42", "1234567"] {
            for fraction in [None, Some(""), Some("5"), Some("0625"), Some("333")] {
                for exponent in ["", "e3", "E-2", "e+10", "e-7", "E0"] {
                    let digits_after_dot = fraction.is_some_and(|f| !f.is_empty());
                    if integer.is_empty() && !digits_after_dot {
                        continue;
                    }
                    let fraction = fraction.map(|f| format!(".{f}")).unwrap_or_default();
                    let text = format!("{sign}{integer}{fraction}{exponent}");
                    let expected: f64 = text.parse().unwrap_or_else(|e| panic!("{text}: {e}"));

                    let tokens = tokenize(&text).unwrap_or_else(|e| panic!("{text}: {e}"));
                    match tokens.as_slice() {
                        [(Token::Number(n), _)] => {
                            assert!((n - expected).abs() <= 1e-12 * expected.abs(), "{text} -> {n}, expected {expected}");
                        },
                        other => panic!("{text} lexed to {other:?}"),
                    }
                    checked += 1;
                }
            }
        }
    }
    assert!(checked > 300, "{checked}");
}

#[test]
fn curried_builtins() {
    assert_value("mult 2 21", 42.0);
    assert_value("divide 1 0", f64::INFINITY);
    assert_value("pow 2 10", 1024.0);
    assert_value("plus 1 (mult 2 3)", 7.0);
    assert_value("inv 4", -4.0);
    assert_value("mod 7 3", 1.0);
}

#[test]
fn case_matching() {
    assert_value("case 2 of 1 -> 10, 2 -> 20, _ -> 0 end", 20.0);
    assert_value("case 2.6 of 3 -> 10, _ -> 0 end", 10.0);
    assert_value("case 5 of 1 -> 10, _ -> 0 end", 0.0);
    assert!(matches!(eval("case 5 of 1 -> 10 end", 1.0, 0.0),
                     Err(RuntimeError::NoMatchingClause { value: 5, .. })));
}

#[test]
fn scoping_and_shadowing() {
    assert_value("let x = 1 in let x = 2 in x end end", 2.0);
    assert_value("(\\x. let x = 3 in x end) 1", 3.0);
    assert_value("let f = 9 in f end", 9.0);
    assert_eq!(eval("let x = t in (\\x. x) 5 end", 1.0, 2.0), Ok(5.0));
}

#[test]
fn sine_end_to_end() {
    let program = parse("main = \\f.\\t. sin((2 * pi) * (f * t))").unwrap();
    assert_eq!(evaluable_definitions(&program), ["main"]);
    assert!(evaluate_definition(&program, "main", 440.0, 0.0).unwrap().abs() < 1e-12);
    let peak = evaluate_definition(&program, "main", 440.0, 1.0 / 1760.0).unwrap();
    assert!((peak - 1.0).abs() < 1e-12);
}

#[test]
fn evaluation_is_deterministic() {
    let program = parse("main = \\f.\\t. sin(2 * pi * f * t) * exp (inv t) + pow t 0.3").unwrap();
    for i in 0..100 {
        let t = f64::from(i) / 37.0;
        let first = evaluate_definition(&program, "main", 261.63, t).unwrap();
        let second = evaluate_definition(&program, "main", 261.63, t).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

#[test]
fn concurrent_evaluation_matches_sequential() {
    let program = parse("osc = \\f.\\t. sin(2 * pi * f * t)\n\
                         main = \\f.\\t. let a = osc f t, b = osc (f * 2) t in\n\
                           case floor (t * 8) of 0 -> a, 1 -> b, _ -> (a + b) / 2 end\n\
                         end").unwrap();
    let pairs: Vec<(f64, f64)> = (0..1000).map(|i| {
                                              let i = f64::from(i);
                                              (110.0 + i, i / 1000.0)
                                          })
                                          .collect();

    let mut sequential: Vec<u64> =
        pairs.iter()
             .map(|&(f, t)| evaluate_definition(&program, "main", f, t).unwrap().to_bits())
             .collect();

    let workers = 8;
    let mut concurrent: Vec<u64> = thread::scope(|scope| {
        let handles: Vec<_> = pairs.chunks(pairs.len().div_ceil(workers))
                                   .map(|part| {
                                       let program = &program;
                                       scope.spawn(move || {
                                                part.iter()
                                                    .map(|&(f, t)| {
                                                        evaluate_definition(program, "main", f, t).unwrap().to_bits()
                                                    })
                                                    .collect::<Vec<_>>()
                                            })
                                   })
                                   .collect();
        handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
    });

    sequential.sort_unstable();
    concurrent.sort_unstable();
    assert_eq!(sequential, concurrent);
}

#[test]
fn top_level_definitions_evaluate_in_root_scope() {
    let program = parse("phase = t\nmain = \\f.\\t. phase").unwrap();
    assert!(matches!(evaluate_definition(&program, "main", 1.0, 0.5),
                     Err(RuntimeError::UnknownIdentifier { ref name, .. }) if name == "t"));

    let program = parse("k = 2 * pi\nmain = \\f.\\t. k + k").unwrap();
    assert_eq!(evaluate_definition(&program, "main", 1.0, 0.0), Ok(4.0 * std::f64::consts::PI));
}

#[test]
fn errors_carry_positions() {
    let err = parse("main = \\f.\\t.\n  f ? t").unwrap_err();
    assert_eq!(err.to_string(), "<string>:2:5: unrecognized character '?'");

    let err = parse("main = \\f.\\t. case f of 1 -> 2").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEndOfInput { line: 1, column: 31, .. }),
            "{err:?}");
}

#[test]
fn runtime_errors_become_silence() {
    let program = parse("main = \\f.\\t. sin main").unwrap();
    assert!(matches!(evaluate_definition(&program, "main", 1.0, 0.0),
                     Err(RuntimeError::ExpectedNumber { context: "sin", found: "closure", .. })));
    assert_eq!(sample(&program, "main", 1.0, 0.0), 0.0);
}

#[test]
fn reload_while_evaluating() {
    let live = Arc::new(LiveProgram::load("main = \\f.\\t. 1").unwrap());

    thread::scope(|scope| {
        let reader = Arc::clone(&live);
        scope.spawn(move || {
                 for i in 0..500 {
                     let value = evaluate_definition(&reader.current(), "main", 1.0, f64::from(i)).unwrap();
                     assert!(value == 1.0 || value == 2.0);
                 }
             });
        live.reload("main = \\f.\\t. 2").unwrap();
        assert!(live.reload("main = \\f.\\t. (").is_err());
    });

    assert_eq!(evaluate_definition(&live.current(), "main", 1.0, 0.0), Ok(2.0));
}
