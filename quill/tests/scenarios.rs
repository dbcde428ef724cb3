use std::sync::Arc;
use std::time::Duration;

use quill::{
    CharStatus, Difficulty, Phase, SessionError, Snippet, Transition, TypingSession, accuracy,
    classify, count_errors, find_next_content_line, line_for_offset, wpm,
};
use web_time::Instant;

const SAMPLES: &[&str] = &[
    "",
    "a",
    "abc",
    "fn main() {\n    println!(\"hi\");\n}",
    "café\n\t🚀",
    "    \n\n  x",
];

fn prefixes(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    (0..=chars.len()).map(|n| chars[..n].iter().collect()).collect()
}

fn session(code: &str) -> TypingSession {
    let snippet = Arc::new(Snippet::new("s", "rust", Difficulty::Medium, "Sample", code));
    TypingSession::new(snippet).unwrap()
}

#[test]
fn mismatched_last_character() {
    assert_eq!(count_errors("abc", "abd"), 1);
    assert_eq!(
        classify("abc", "abd"),
        [CharStatus::Correct, CharStatus::Correct, CharStatus::Incorrect]
    );
}

#[test]
fn session_runs_to_completion() {
    let mut session = session("abc");
    assert_eq!(session.phase(), Phase::Idle);

    assert_eq!(session.on_input("a").unwrap(), Transition::Started);
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.on_input("ab").unwrap(), Transition::Progressed);

    let Transition::Completed(result) = session.on_input("abc").unwrap() else {
        panic!("third input should complete the session");
    };
    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(result.error_count, 0);
}

#[test]
fn caret_line_lookup() {
    assert_eq!(line_for_offset("ab\ncd", 3), 1);
}

#[test]
fn next_content_line_skips_blanks() {
    assert_eq!(find_next_content_line(&["", "  ", "x"], 0, true), 2);
}

#[test]
fn wpm_over_one_minute() {
    assert_eq!(wpm(25, 60_000), 5.0);
}

#[test]
fn classification_covers_target() {
    for target in SAMPLES {
        for typed in SAMPLES.iter().chain(["zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"].iter()) {
            assert_eq!(
                classify(target, typed).len(),
                target.chars().count(),
                "target {target:?}, typed {typed:?}"
            );
        }
    }
}

#[test]
fn prefixes_have_no_errors() {
    for target in SAMPLES {
        for prefix in prefixes(target) {
            assert_eq!(count_errors(target, &prefix), 0, "prefix {prefix:?} of {target:?}");
        }
        assert_eq!(count_errors(target, target), 0);
    }
}

#[test]
fn accuracy_stays_in_range() {
    for target in SAMPLES.iter().filter(|target| !target.is_empty()) {
        for typed in SAMPLES {
            let accuracy = accuracy(target, typed);
            assert!((0.0..=100.0).contains(&accuracy), "{target:?} vs {typed:?}: {accuracy}");
        }
    }
}

#[test]
fn wpm_is_monotonic() {
    for elapsed in [1, 500, 60_000, 3_600_000] {
        let mut previous = 0.0;
        for typed in 0..200 {
            let current = wpm(typed, elapsed);
            assert!(current >= previous);
            previous = current;
        }
    }
    assert_eq!(wpm(100, 0), 0.0);
}

#[test]
fn reset_is_idempotent() {
    let mut session = session("hello");
    session.on_input("hex").unwrap();

    session.reset();
    let once = (session.phase(), session.input_string(), session.error_count());
    session.reset();
    let twice = (session.phase(), session.input_string(), session.error_count());

    assert_eq!(once, twice);
    assert_eq!(once, (Phase::Idle, String::new(), 0));
}

#[test]
fn completed_session_is_frozen() {
    let mut session = session("abc");
    session.on_input("a").unwrap();
    session.on_input("abd").unwrap();

    let errors = session.error_count();
    let input = session.input_string();
    let result = session.result().cloned();

    for attempt in ["", "abc", "abcd", "x"] {
        assert_eq!(session.on_input(attempt), Err(SessionError::Completed));
    }

    assert_eq!(session.error_count(), errors);
    assert_eq!(session.input_string(), input);
    assert_eq!(session.result().cloned(), result);
}

#[test]
fn typing_a_snippet_with_line_breaks() {
    let code = "def greet(name):\n\n    return f\"Hello, {name}\"";
    let mut session = session(code);
    let start = Instant::now();
    let mut now = start;

    for line in code.lines().filter(|line| !line.trim().is_empty()) {
        for c in line.trim_start().chars() {
            now += Duration::from_millis(100);
            session.type_char_at(c, now).unwrap();
            session.poll_tick(now);
        }
        if !session.is_completed() {
            session.line_break_at(now).unwrap();
        }
    }

    let result = session.result().unwrap();
    assert_eq!(result.error_count, 0);
    assert_eq!(result.accuracy, 100.0);
    assert_eq!(session.input_string(), code);
    assert!(result.wpm > 0.0);
    assert!(!session.samples().is_empty());
    assert_eq!(
        result.elapsed_ms,
        (now - start).as_millis() as u64 - 100,
        "the clock starts with the first character"
    );
}
