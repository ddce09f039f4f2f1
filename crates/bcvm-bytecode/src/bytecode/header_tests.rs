use super::header::Header;
use super::image::ImageError;

#[test]
fn header_roundtrip() {
    let h = Header::new(1_048_576, 3);

    let bytes = h.to_bytes();
    assert_eq!(bytes, [0x00, 0x00, 0x10, 0x00, 3, 0, 0, 0]);
    assert_eq!(Header::from_bytes(&bytes), Ok(h));
}

#[test]
fn header_ignores_trailing_bytes() {
    let bytes = [16, 0, 0, 0, 1, 0, 0, 0, 0xAA, 0xBB];

    let h = Header::from_bytes(&bytes).unwrap();
    assert_eq!(h.stack_size, 16);
    assert_eq!(h.static_count, 1);
}

#[test]
fn header_too_short() {
    assert_eq!(Header::from_bytes(&[1, 2, 3]), Err(ImageError::TooShort(3)));
    assert_eq!(
        Header::from_bytes(&[1, 0, 0, 0, 2, 0, 0]),
        Err(ImageError::TooShort(7))
    );
}

#[test]
fn static_size_is_word_count_times_four() {
    assert_eq!(Header::new(0, 0).static_size(), 0);
    assert_eq!(Header::new(0, 5).static_size(), 20);
}
