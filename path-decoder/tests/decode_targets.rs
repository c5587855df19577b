use path_decoder::decoder::{decode_target, get_path_from_raw_target, DecodeError};

/// (raw target, expected path)
const CASES: &[(&str, &str)] = &[
    ("", ""),
    ("*", ""),
    ("/", "/"),
    ("/a", "/a"),
    // escapes other than %2E / %2F, and broken ones, pass through
    ("/a%", "/a%"),
    ("/a%a", "/a%a"),
    ("/a%ab", "/a%ab"),
    ("/a%41", "/a%41"),
    ("/a%25", "/a%25"),
    ("/a%2520", "/a%2520"),
    ("/a%252F", "/a%252F"),
    ("/a%5C", "/a%5C"),
    ("/a%2f", "/a/"),
    ("/a%2F", "/a/"),
    ("/a%2e", "/a."),
    ("/a%2E", "/a."),
    // duplicate slashes
    ("/a//", "/a/"),
    ("/a///", "/a/"),
    ("/a///a", "/a/a"),
    ("/a///ab", "/a/ab"),
    ("/a///abc", "/a/abc"),
    ("/a///abcd", "/a/abcd"),
    ("/a//b", "/a/b"),
    // parent segments
    ("/a/b/c//..", "/a/b/"),
    ("/a/b/c////..", "/a/b/"),
    ("/a/b/c////../..", "/a/"),
    ("/a/b/c////../../..", "/"),
    ("/a//b///c////../d/..", "/a/b/"),
    ("/a///..", "/"),
    ("/a///../..", "/"),
    ("/a///../../..", "/"),
    ("/a//../", "/"),
    ("/a///../../", "/"),
    ("/a///../../../", "/"),
    ("/a///../", "/"),
    ("/a///../bcde", "/bcde"),
    ("/a/..", "/"),
    ("/a/../", "/"),
    ("/a/../b", "/b"),
    ("/a/b/c/d/..", "/a/b/c/"),
    ("/../../a/b/c/d/", "/a/b/c/d/"),
    ("/a/../../b/c/d/", "/b/c/d/"),
    // current segments
    ("/a/.", "/a/"),
    ("/a/./", "/a/"),
    ("/a/./b", "/a/b"),
    // escaped dot segments
    ("/a/%2E/", "/a/"),
    ("/a/%2e/b", "/a/b"),
    ("/a/.%2E/", "/"),
    ("/a/%2e./b", "/b"),
    ("/a/%2e%2E/b", "/b"),
    // query
    ("/?", "/"),
    ("/?query", "/"),
    ("/a/b/c?", "/a/b/c"),
    ("/a/b/c/?", "/a/b/c/"),
    // absolute form
    ("http://foo", "/"),
    ("http://foo/", "/"),
    ("https://foo/bar", "/bar"),
    ("https://foo/bar?", "/bar"),
    ("https://foo/bar?query", "/bar"),
    ("https://foo?query/", "/"),
    ("https://foo/?query/", "/"),
];

#[test]
fn decodes_known_targets() {
    for &(input, expected) in CASES {
        let got = get_path_from_raw_target(Some(input))
            .unwrap_or_else(|e| panic!("{input:?} failed: {e}"));
        assert_eq!(got, expected, "input {input:?}");
    }
}

#[test]
fn decode_target_agrees_with_entry_point() {
    for &(input, _) in CASES {
        assert_eq!(
            decode_target(input),
            get_path_from_raw_target(Some(input)),
            "input {input:?}"
        );
    }
}

#[test]
fn null_target() {
    assert_eq!(get_path_from_raw_target(None), Err(DecodeError::NullInput));
}

#[test]
fn authority_form_targets_are_unsupported() {
    for input in ["foo:443", "foo", "a/b", "?x", ".", "**", "HTTPS://foo/", "ftp://foo/a"] {
        match get_path_from_raw_target(Some(input)) {
            Err(DecodeError::UnsupportedForm(t)) => assert_eq!(t, input),
            other => panic!("{input:?}: expected UnsupportedForm, got {other:?}"),
        }
    }
}
