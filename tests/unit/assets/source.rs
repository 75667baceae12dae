use super::*;

#[test]
fn parse_classifies_by_prefix() {
    assert_eq!(
        ImageSource::parse("https://example.com/me.jpg"),
        ImageSource::Url("https://example.com/me.jpg".to_string())
    );
    assert_eq!(
        ImageSource::parse("HTTP://example.com/me.jpg"),
        ImageSource::Url("HTTP://example.com/me.jpg".to_string())
    );
    assert!(matches!(
        ImageSource::parse("data:image/png;base64,AAAA"),
        ImageSource::DataUrl(_)
    ));
    assert_eq!(
        ImageSource::parse("file:///tmp/me.png"),
        ImageSource::Path(PathBuf::from("/tmp/me.png"))
    );
    assert_eq!(
        ImageSource::parse("  photos/me.png "),
        ImageSource::Path(PathBuf::from("photos/me.png"))
    );
}

#[test]
fn file_scheme_is_case_insensitive() {
    assert_eq!(
        ImageSource::parse("FILE:///tmp/a.png"),
        ImageSource::Path(PathBuf::from("/tmp/a.png"))
    );
    assert_eq!(
        ImageSource::parse("File://photos/me.png"),
        ImageSource::Path(PathBuf::from("photos/me.png"))
    );
}

#[test]
fn describe_never_leaks_inline_payloads() {
    let s = ImageSource::parse("data:image/png;base64,c2VjcmV0");
    assert!(!s.describe().contains("c2VjcmV0"));
    assert!(!format!("{s:?}").contains("c2VjcmV0"));
    assert_eq!(
        ImageSource::Bytes(vec![0; 12]).describe(),
        "in-memory bytes (12 bytes)"
    );
}

#[test]
fn data_url_base64_and_whitespace() {
    assert_eq!(
        decode_data_url("data:image/png;base64,aGVs\nbG8=").unwrap(),
        b"hello"
    );
    assert_eq!(
        decode_data_url("data:;BASE64,aGVsbG8=").unwrap(),
        b"hello"
    );
}

#[test]
fn data_url_percent_encoded() {
    assert_eq!(decode_data_url("data:,a%20b").unwrap(), b"a b");
    assert!(decode_data_url("data:,a%2").is_err());
    assert!(decode_data_url("data:,a%zz").is_err());
}

#[test]
fn data_url_malformed() {
    assert!(decode_data_url("data:image/png;base64").is_err());
    assert!(decode_data_url("http://x/y.png").is_err());
    assert!(decode_data_url("data:image/png;base64,@@@").is_err());
}
