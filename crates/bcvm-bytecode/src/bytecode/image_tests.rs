use super::header::Header;
use super::image::{Image, ImageError};

#[test]
fn image_roundtrip() {
    let img = Image::new(Header::new(64, 2), vec![0, 42, 0, 0, 0, 20, 21]);

    let bytes = img.to_bytes();
    assert_eq!(bytes.len(), 8 + 7);
    assert_eq!(&bytes[8..], img.code());
    assert_eq!(Image::from_bytes(&bytes), Ok(img));
}

#[test]
fn image_header_only() {
    let bytes = Header::new(32, 0).to_bytes();

    let img = Image::from_bytes(&bytes).unwrap();
    assert_eq!(img.code_len(), 0);
    assert_eq!(img.static_base(), 32);
}

#[test]
fn image_static_base_follows_code() {
    let img = Image::new(Header::new(100, 4), vec![21; 10]);

    assert_eq!(img.static_base(), 110);
    assert_eq!(img.header().static_size(), 16);
}

#[test]
fn image_rejects_short_input() {
    assert_eq!(Image::from_bytes(&[]), Err(ImageError::TooShort(0)));
    assert_eq!(Image::from_bytes(&[0; 5]), Err(ImageError::TooShort(5)));
}

#[test]
fn image_does_not_validate_code() {
    let mut bytes = Header::new(8, 0).to_bytes().to_vec();
    bytes.extend_from_slice(&[0xFF, 0xFE]);

    let img = Image::from_bytes(&bytes).unwrap();
    assert_eq!(img.code(), &[0xFF, 0xFE]);
}
