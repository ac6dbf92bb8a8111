use super::{ErrorKind, IStr};

#[test]
fn test_line_len() {
    let input = IStr::new(b"12 4\n 5  \n", 0);
    assert_eq!(input.line_len().unwrap(), 4);

    let input = IStr::new(b"\nabc", 0);
    assert_eq!(input.line_len().unwrap(), 0);
}

#[test]
fn test_line_len_missing_newline() {
    let input = IStr::new(b"1234", 10);
    let error = input.line_len().unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::ExpectedLine));
    assert_eq!(error.span(), 10..14);
    assert_eq!(error.to_string(), "expected line (at 10..14)");
}

#[test]
#[cfg(feature = "std")]
fn test_errors_are_std_errors() {
    let error: Box<dyn std::error::Error> = Box::new(ErrorKind::ExpectedLine);
    assert_eq!(error.to_string(), "expected line");

    let error: Box<dyn std::error::Error> = Box::new(IStr::new(b"", 0).line_len().unwrap_err());
    assert_eq!(error.to_string(), "expected line (at 0..0)");
}
