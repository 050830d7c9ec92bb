//! Property-based tests for the formatter automaton
//!
//! The core contract is "never fail, always make forward progress": any
//! byte sequence must be processed without panicking, and everything that
//! is not a recognized tag must survive verbatim.

use proptest::prelude::*;

use tagtint::automaton::{FormatterAutomaton, Options};

fn run(input: &[u8], opts: Options) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut automaton = FormatterAutomaton::new(&mut out, opts);
        automaton.feed(input).unwrap();
        automaton.finish().unwrap();
    }
    out
}

fn strip(input: &[u8]) -> Vec<u8> {
    run(
        input,
        Options {
            strip: true,
            ..Options::default()
        },
    )
}

proptest! {
    #[test]
    fn never_panics_on_arbitrary_bytes(input in proptest::collection::vec(any::<u8>(), 0..512)) {
        run(&input, Options { escape: true, ..Options::default() });
        run(&input, Options { strip: true, ..Options::default() });
    }

    #[test]
    fn strip_is_idempotent(input in proptest::collection::vec(any::<u8>(), 0..256)) {
        let once = strip(&input);
        let twice = strip(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn tag_free_text_is_untouched(text in "[a-zA-Z0-9 .,!?]{0,128}") {
        // no '{', '-' or '}' in the alphabet, so nothing can look like a tag
        let out = run(text.as_bytes(), Options { sanitize: false, ..Options::default() });
        prop_assert_eq!(out, text.into_bytes());
    }

    #[test]
    fn closers_never_underflow(n in 1..16usize) {
        let input = "--}".repeat(n);
        let out = run(input.as_bytes(), Options { sanitize: false, ..Options::default() });
        prop_assert_eq!(out, input.into_bytes());
    }

    #[test]
    fn balanced_tags_strip_to_payload(words in proptest::collection::vec("[a-z]{1,8}", 1..8)) {
        let mut tagged = String::new();
        let mut payload = String::new();
        for (i, word) in words.iter().enumerate() {
            let spec = ["r", "G*", ";y", "", "0_"][i % 5];
            tagged.push_str(&format!("{{{spec}--{word}--}}"));
            payload.push_str(word);
        }
        prop_assert_eq!(strip(tagged.as_bytes()), payload.into_bytes());
    }

    #[test]
    fn output_always_contains_the_payload(word in "[a-z]{1,12}") {
        let input = format!("{{c*--{word}--}}");
        let out = run(input.as_bytes(), Options::default());
        let text = String::from_utf8(out).unwrap();
        prop_assert!(text.contains(word.as_str()));
    }
}
