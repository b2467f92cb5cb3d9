#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Positions must be consecutive and words free of separators
    for (expected, (word, position)) in (1u32..).zip(wordscan::utils::tokenize(data)) {
        assert_eq!(position, expected);
        assert!(!word.is_empty());
        assert!(!word.contains(wordscan::utils::WORD_SEPARATORS));
    }
});
