use super::image::ImageError;
use super::instruction::{FunctionHeader, Instruction};
use super::opcode::Opcode;

fn encoded(instr: &Instruction) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    instr.encode(&mut out);
    out
}

#[test]
fn literal_layout() {
    let bytes = encoded(&Instruction::Literal(72));

    assert_eq!(bytes, [0, 72, 0, 0, 0]);
    assert_eq!(Instruction::Literal(72).size(), bytes.len());
}

#[test]
fn literal_negative_word() {
    let bytes = encoded(&Instruction::Literal(-1));

    assert_eq!(bytes, [0, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(Instruction::decode(&bytes, 0), Ok(Instruction::Literal(-1)));
}

#[test]
fn literal_array_layout() {
    let instr = Instruction::LiteralArray(vec![72, 105]);
    let bytes = encoded(&instr);

    assert_eq!(bytes, [1, 2, 0, 0, 0, 72, 0, 0, 0, 105, 0, 0, 0]);
    assert_eq!(instr.size(), 13);
    assert_eq!(Instruction::decode(&bytes, 0), Ok(instr));
}

#[test]
fn plain_opcode_is_one_byte() {
    let instr = Instruction::Op(Opcode::Call);

    assert_eq!(encoded(&instr), [17]);
    assert_eq!(instr.size(), 1);
    assert_eq!(instr.opcode(), Opcode::Call);
}

#[test]
fn decode_at_offset() {
    let mut code = Vec::new();
    Instruction::Op(Opcode::PrintEndl).encode(&mut code);
    Instruction::Literal(7).encode(&mut code);

    assert_eq!(Instruction::decode(&code, 1), Ok(Instruction::Literal(7)));
}

#[test]
fn decode_unknown_opcode() {
    assert_eq!(
        Instruction::decode(&[22], 0),
        Err(ImageError::UnknownOpcode {
            opcode: 22,
            offset: 0
        })
    );
}

#[test]
fn decode_truncated_literal() {
    assert_eq!(
        Instruction::decode(&[0, 1, 2], 0),
        Err(ImageError::TruncatedOperand(1))
    );
}

#[test]
fn decode_literal_array_count_past_end() {
    // Claims 100 elements, carries one.
    let code = [1, 100, 0, 0, 0, 5, 0, 0, 0];

    assert_eq!(
        Instruction::decode(&code, 0),
        Err(ImageError::TruncatedOperand(1))
    );
}

#[test]
fn decode_literal_array_negative_count() {
    let code = [1, 0xFF, 0xFF, 0xFF, 0xFF];

    assert_eq!(
        Instruction::decode(&code, 0),
        Err(ImageError::TruncatedOperand(1))
    );
}

#[test]
fn decode_past_end() {
    assert_eq!(
        Instruction::decode(&[], 0),
        Err(ImageError::TruncatedOperand(0))
    );
}

#[test]
fn function_header_roundtrip() {
    let h = FunctionHeader::new(2, 3);
    let mut bytes = Vec::new();
    h.encode(&mut bytes);

    assert_eq!(bytes, [2, 0, 0, 0, 3, 0, 0, 0]);
    assert_eq!(FunctionHeader::decode(&bytes, 0), Ok(h));
    assert_eq!(
        FunctionHeader::decode(&bytes[..6], 0),
        Err(ImageError::TruncatedOperand(4))
    );
}
