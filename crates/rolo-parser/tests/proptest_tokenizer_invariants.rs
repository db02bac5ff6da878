#![forbid(unsafe_code)]

//! Property tests for the tokenizer's positional contract.

use proptest::prelude::*;
use rolo_parser::{Flag, tokenize};

proptest! {
    // The marker alphabet below cannot produce `n/` or `-t`, so the whole
    // input must land in the preamble, verbatim apart from outer trim.
    #[test]
    fn marker_free_input_becomes_the_preamble(s in "[a-zA-Z0-9 .,]{0,60}") {
        let flags = [Flag::new("n/"), Flag::new("-t")];
        let map = tokenize(&s, &flags).unwrap();
        prop_assert_eq!(map.preamble(), s.trim());
        prop_assert!(!map.has(&flags[0]));
        prop_assert!(!map.has(&flags[1]));
    }

    #[test]
    fn values_keep_encounter_order(values in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
        let tag = Flag::new("t/");
        let mut line = String::from("cmd");
        for value in &values {
            line.push_str(" t/");
            line.push_str(value);
        }
        let map = tokenize(&line, std::slice::from_ref(&tag)).unwrap();
        prop_assert_eq!(map.values(&tag).unwrap(), values.as_slice());
    }

    // Wrapping any quote-free, backslash-free text in quotes must hand it
    // back exactly, inner whitespace included.
    #[test]
    fn quoted_values_round_trip(value in "[a-z A-Z0-9.,]{0,24}") {
        let name = Flag::new("n/");
        let line = format!("cmd n/ \"{value}\"");
        let map = tokenize(&line, std::slice::from_ref(&name)).unwrap();
        prop_assert_eq!(map.last(&name), Some(value.as_str()));
    }

    #[test]
    fn markers_inside_quotes_never_delimit(inner in "[a-z]{1,10}") {
        let name = Flag::new("n/");
        let tag = Flag::new("t/");
        let line = format!("cmd n/ \"{inner} t/{inner}\" t/x");
        let map = tokenize(&line, &[name.clone(), tag.clone()]).unwrap();
        let expected = format!("{inner} t/{inner}");
        prop_assert_eq!(map.last(&name), Some(expected.as_str()));
        prop_assert_eq!(map.values(&tag).unwrap(), &["x"]);
    }

    // A marker glued to the previous word never delimits.
    #[test]
    fn unspaced_markers_stay_literal(word in "[a-z]{1,8}") {
        let tag = Flag::new("t/");
        let line = format!("cmd t/ {word}t/abc");
        let map = tokenize(&line, std::slice::from_ref(&tag)).unwrap();
        prop_assert_eq!(map.values(&tag).unwrap(), &[format!("{word}t/abc")]);
    }
}
