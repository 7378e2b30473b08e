use crate::ident::{escape, is_reserved_word};

#[test]
fn reserved_words_get_underscore_prefix() {
    assert_eq!(escape("default"), "_default");
    assert_eq!(escape("delete"), "_delete");
    assert!(is_reserved_word("class"));
}

#[test]
fn plain_identifiers_are_borrowed() {
    let escaped = escape("Identity");
    assert!(matches!(escaped, std::borrow::Cow::Borrowed("Identity")));
}
