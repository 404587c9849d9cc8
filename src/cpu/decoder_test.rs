use pretty_assertions::assert_eq;

use crate::config::Config;
use crate::cpu::{Decoder, Op, Parameter, Width, R8, R16};
use crate::error::DecodeError;

/// decodes `code` and returns the text of each instruction
fn decode_lines(code: &[u8]) -> Vec<String> {
    let mut decoder = Decoder::new(code);
    decoder.decode().unwrap();
    decoder.instructions().iter().map(|i| i.instruction.to_string()).collect()
}

#[test]
fn can_decode_mov_imm_reg() {
    let mut decoder = Decoder::new(&[0xB0u8, 0x05][..]);
    decoder.decode().unwrap();

    let ops = decoder.instructions();
    assert_eq!(1, ops.len());
    assert_eq!(0, ops[0].offset);
    assert_eq!(vec![0xB0u8, 0x05], ops[0].bytes);
    assert_eq!(Op::Mov, ops[0].instruction.command);
    assert_eq!(Parameter::Reg8(R8::AL), ops[0].instruction.params.dst);
    assert_eq!(Parameter::Imm8(5), ops[0].instruction.params.src);
    assert_eq!("mov al, 5", ops[0].instruction.to_string());
}

#[test]
fn can_decode_register_moves() {
    let code: Vec<u8> = vec![
        0x89, 0xD9, // mov cx, bx
        0x88, 0xE5, // mov ch, ah
        0x89, 0xDE, // mov si, bx
        0x88, 0xC6, // mov dh, al
        0x89, 0xFB, // mov bx, di
        0x89, 0xC5, // mov bp, ax
    ];
    assert_eq!(vec![
        "mov cx, bx",
        "mov ch, ah",
        "mov si, bx",
        "mov dh, al",
        "mov bx, di",
        "mov bp, ax",
    ], decode_lines(&code));
}

#[test]
fn can_decode_immediate_moves() {
    let code: Vec<u8> = vec![
        0xB1, 0x0C,       // mov cl, 12
        0xB5, 0xF4,       // mov ch, -12
        0xB9, 0x0C, 0x00, // mov cx, 12
        0xB9, 0xF4, 0xFF, // mov cx, -12
        0xBA, 0x6C, 0x0F, // mov dx, 3948
    ];
    // immediates of the mov forms are never sign extended
    assert_eq!(vec![
        "mov cl, 12",
        "mov ch, 244",
        "mov cx, 12",
        "mov cx, 65524",
        "mov dx, 3948",
    ], decode_lines(&code));
}

#[test]
fn can_decode_effective_addresses() {
    let code: Vec<u8> = vec![
        0x8A, 0x00,             // mov al, [bx + si]
        0x8B, 0x1B,             // mov bx, [bp + di]
        0x8B, 0x56, 0x00,       // mov dx, [bp]
        0x8A, 0x60, 0x04,       // mov ah, [bx + si + 4]
        0x8A, 0x80, 0x87, 0x13, // mov al, [bx + si + 4999]
        0x89, 0x09,             // mov [bx + di], cx
        0x88, 0x0A,             // mov [bp + si], cl
        0x88, 0x6E, 0x00,       // mov [bp], ch
    ];
    assert_eq!(vec![
        "mov al, [bx + si]",
        "mov bx, [bp + di]",
        "mov dx, [bp]",
        "mov ah, [bx + si + 4]",
        "mov al, [bx + si + 4999]",
        "mov [bx + di], cx",
        "mov [bp + si], cl",
        "mov [bp], ch",
    ], decode_lines(&code));
}

#[test]
fn zero_displacement_is_not_rendered() {
    let mut decoder = Decoder::new(&[0x8Bu8, 0x46, 0x00][..]);
    decoder.decode().unwrap();
    let op = &decoder.instructions()[0];
    assert_eq!(3, op.bytes.len());
    assert_eq!("mov ax, [bp]", op.instruction.to_string());

    // a 16-bit zero displacement is also omitted
    assert_eq!(vec!["mov ax, [bx]"], decode_lines(&[0x8B, 0x87, 0x00, 0x00]));
}

#[test]
fn can_decode_negative_displacements() {
    let code: Vec<u8> = vec![
        0x8B, 0x41, 0xDB,       // mov ax, [bx + di - 37]
        0x89, 0x8C, 0xD4, 0xFE, // mov [si - 300], cx
        0x8B, 0x57, 0xE0,       // mov dx, [bx - 32]
    ];
    assert_eq!(vec![
        "mov ax, [bx + di - 37]",
        "mov [si - 300], cx",
        "mov dx, [bx - 32]",
    ], decode_lines(&code));
}

#[test]
fn can_decode_direct_address() {
    let code: Vec<u8> = vec![
        0x8B, 0x2E, 0x05, 0x00, // mov bp, [5]
        0x8B, 0x1E, 0x82, 0x0D, // mov bx, [3458]
        0x88, 0x36, 0x10, 0x27, // mov [10000], dh
    ];
    assert_eq!(vec![
        "mov bp, [5]",
        "mov bx, [3458]",
        "mov [10000], dh",
    ], decode_lines(&code));

    // mod 1 with rm 6 is bp based, not a direct address
    assert_eq!(vec!["mov bx, [bp + 5]"], decode_lines(&[0x8B, 0x5E, 0x05]));
}

#[test]
fn direct_address_is_always_a_word() {
    // byte sized operand, but the address still occupies two bytes
    let mut decoder = Decoder::new(&[0x8Au8, 0x16, 0x31, 0x10, 0xB0, 0x01][..]);
    decoder.decode().unwrap();
    let ops = decoder.instructions();
    assert_eq!(2, ops.len());
    assert_eq!("mov dl, [4145]", ops[0].instruction.to_string());
    assert_eq!(4, ops[1].offset);
    assert_eq!("mov al, 1", ops[1].instruction.to_string());
}

#[test]
fn can_decode_arithmetic() {
    let code: Vec<u8> = vec![
        0x03, 0x18,                   // add bx, [bx + si]
        0x03, 0x5E, 0x00,             // add bx, [bp]
        0x83, 0xC6, 0x02,             // add si, 2
        0x83, 0xC5, 0x02,             // add bp, 2
        0x83, 0xC1, 0x08,             // add cx, 8
        0x80, 0x07, 0x22,             // add byte [bx], 34
        0x83, 0x82, 0xE8, 0x03, 0x1D, // add word [bp + si + 1000], 29
        0x05, 0xE8, 0x03,             // add ax, 1000
        0x04, 0x09,                   // add al, 9
        0x2B, 0x18,                   // sub bx, [bx + si]
        0x83, 0xEE, 0x02,             // sub si, 2
        0x80, 0x2F, 0x22,             // sub byte [bx], 34
        0x2C, 0x09,                   // sub al, 9
        0x2D, 0xE8, 0x03,             // sub ax, 1000
        0x3B, 0x18,                   // cmp bx, [bx + si]
        0x83, 0xFE, 0x02,             // cmp si, 2
        0x3C, 0x09,                   // cmp al, 9
        0x3D, 0xE8, 0x03,             // cmp ax, 1000
        0x39, 0xD8,                   // cmp ax, bx
    ];
    assert_eq!(vec![
        "add bx, [bx + si]",
        "add bx, [bp]",
        "add si, 2",
        "add bp, 2",
        "add cx, 8",
        "add byte [bx], 34",
        "add word [bp + si + 1000], 29",
        "add ax, 1000",
        "add al, 9",
        "sub bx, [bx + si]",
        "sub si, 2",
        "sub byte [bx], 34",
        "sub al, 9",
        "sub ax, 1000",
        "cmp bx, [bx + si]",
        "cmp si, 2",
        "cmp al, 9",
        "cmp ax, 1000",
        "cmp ax, bx",
    ], decode_lines(&code));
}

#[test]
fn sign_extends_byte_immediates() {
    let mut decoder = Decoder::new(&[0x83u8, 0xC0, 0xFF][..]);
    decoder.decode().unwrap();
    let op = &decoder.instructions()[0].instruction;
    assert_eq!(Parameter::Reg16(R16::AX), op.params.dst);
    assert_eq!(Parameter::ImmS8(-1), op.params.src);
    assert_eq!(None, op.size_qualifier);
    assert_eq!("add ax, -1", op.to_string());

    assert_eq!(vec![
        "add word [bx], -1",
        "sub dx, -128",
        "cmp byte [bx], 255",
        "add al, 255",
    ], decode_lines(&[
        0x83, 0x07, 0xFF,   // s=1 w=1, memory destination
        0x83, 0xEA, 0x80,   // s=1 w=1, most negative byte
        0x82, 0x3F, 0xFF,   // s=1 w=0 is not sign extended
        0x80, 0xC0, 0xFF,   // s=0 w=0
    ]));
}

#[test]
fn size_qualifier_only_for_small_immediates_to_memory() {
    let mut decoder = Decoder::new(&[0x80u8, 0x3E, 0x31, 0x10, 0x00][..]);
    decoder.decode().unwrap();
    let op = &decoder.instructions()[0].instruction;
    assert_eq!(Some(Width::Byte), op.size_qualifier);
    assert_eq!("cmp byte [4145], 0", op.to_string());

    assert_eq!(vec![
        "add [bx], 392",
        "add sp, 392",
        "add word [bp + di], 255",
    ], decode_lines(&[
        0x81, 0x07, 0x88, 0x01, // add [bx], 392
        0x81, 0xC4, 0x88, 0x01, // add sp, 392
        0x81, 0x03, 0xFF, 0x00, // add word [bp + di], 255
    ]));
}

#[test]
fn can_decode_adc_and_sbb() {
    assert_eq!(vec![
        "adc si, 4",
        "sbb word [bx], 1",
    ], decode_lines(&[
        0x83, 0xD6, 0x04, // adc si, 4
        0x83, 0x1F, 0x01, // sbb word [bx], 1
    ]));
}

#[test]
fn unsupported_group_operation_keeps_stream_aligned() {
    let mut decoder = Decoder::new(&[
        0x80u8, 0xCB, 0x01,     // or bl, 1
        0x81, 0x27, 0x34, 0x12, // and word [bx], 0x1234
        0xB0, 0x05,             // mov al, 5
    ][..]);
    decoder.decode().unwrap();

    let ops = decoder.instructions();
    assert_eq!(3, ops.len());
    assert_eq!(Op::Unsupported(1), ops[0].instruction.command);
    assert_eq!("Unsupported operation 1", ops[0].instruction.to_string());
    assert_eq!(3, ops[0].bytes.len());
    assert_eq!(Op::Unsupported(4), ops[1].instruction.command);
    assert_eq!(4, ops[1].bytes.len());
    assert_eq!(7, ops[2].offset);
    assert_eq!("mov al, 5", ops[2].instruction.to_string());
}

#[test]
fn can_decode_short_jumps() {
    let code: Vec<u8> = vec![
        0x74, 0x04, // je 0x6
        0x74, 0xFC, // je 0x0
        0x74, 0x00, // je 0x6
        0x74, 0xFA, // je 0x2
    ];
    let mut decoder = Decoder::new(&code[..]);
    decoder.decode().unwrap();

    let lines: Vec<String> = decoder.instructions().iter().map(|i| i.instruction.to_string()).collect();
    assert_eq!(vec![
        "je label1 ; 4",
        "je label2 ; -4",
        "je label1 ; 0",
        "je label3 ; -6",
    ], lines);

    let labels = decoder.labels();
    assert_eq!(3, labels.len());
    assert_eq!(Some("label1"), labels.get(6));
    assert_eq!(Some("label2"), labels.get(0));
    assert_eq!(Some("label3"), labels.get(2));
}

#[test]
fn jumps_to_same_target_share_label() {
    let code: Vec<u8> = vec![
        0x75, 0x02, // jne 0x4
        0xE2, 0x00, // loop 0x4
        0xE3, 0xFE, // jcxz 0x4
    ];
    assert_eq!(vec![
        "jne label1 ; 2",
        "loop label1 ; 0",
        "jcxz label1 ; -2",
    ], decode_lines(&code));
}

#[test]
fn jump_target_is_relative_to_end_of_instruction() {
    let mut code = vec![0x90u8; 10];
    code.extend_from_slice(&[0x74, 0xFE]);
    let mut decoder = Decoder::new(&code[..]);
    decoder.decode().unwrap();

    let jump = &decoder.instructions()[10];
    assert_eq!(10, jump.offset);
    assert_eq!("je label1 ; -2", jump.instruction.to_string());
    assert_eq!(Some("label1"), decoder.labels().get(10));
}

#[test]
fn can_decode_every_branch_mnemonic() {
    let code: Vec<u8> = vec![
        0x74, 0x00, 0x7C, 0x00, 0x7E, 0x00, 0x72, 0x00, 0x76, 0x00, 0x7A, 0x00, 0x70, 0x00, 0x78, 0x00,
        0x75, 0x00, 0x7D, 0x00, 0x7F, 0x00, 0x73, 0x00, 0x77, 0x00, 0x7B, 0x00, 0x71, 0x00, 0x79, 0x00,
        0xE2, 0x00, 0xE1, 0x00, 0xE0, 0x00, 0xE3, 0x00,
    ];
    let mnemonics: Vec<String> = decode_lines(&code)
        .iter()
        .map(|s| s.split(' ').next().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(vec![
        "je", "jl", "jle", "jb", "jbe", "jp", "jo", "js",
        "jne", "jnl", "jnle", "jnb", "jnbe", "jnp", "jno", "jns",
        "loop", "loopz", "loopnz", "jcxz",
    ], mnemonics);
}

#[test]
fn unknown_bytes_are_reported_and_skipped() {
    assert_eq!(vec![
        "Unknown byte 0x90",
        "Unknown byte 0xf4",
        "mov al, 5",
        "Unknown byte 0x6",
    ], decode_lines(&[0x90, 0xF4, 0xB0, 0x05, 0x06]));
}

#[test]
fn empty_input_decodes_nothing() {
    let mut decoder = Decoder::new(&b""[..]);
    decoder.decode().unwrap();
    assert!(decoder.instructions().is_empty());
    assert!(decoder.labels().is_empty());
    assert_eq!(0, decoder.cursor());
}

#[test]
fn truncated_instruction_is_an_error() {
    let mut decoder = Decoder::new(&[0xB0u8, 0x05, 0xB8, 0x01][..]);
    match decoder.decode() {
        Err(DecodeError::Truncated { offset, cursor }) => {
            assert_eq!(2, offset);
            assert_eq!(4, cursor);
        }
        other => panic!("expected truncation, got {:?}", other),
    }
    // instructions before the truncated one are kept
    assert_eq!(1, decoder.instructions().len());
    assert_eq!("mov al, 5", decoder.instructions()[0].instruction.to_string());
}

#[test]
fn truncated_displacement_and_modrm_are_errors() {
    for code in &[
        vec![0x8Bu8],           // missing ModRM
        vec![0x8B, 0x46],       // missing disp8
        vec![0x8A, 0x80, 0x87], // missing disp16 high byte
        vec![0x8B, 0x1E, 0x82], // missing direct address high byte
        vec![0x83, 0xC0],       // missing immediate
        vec![0x74],             // missing jump displacement
    ] {
        let mut decoder = Decoder::new(&code[..]);
        match decoder.decode() {
            Err(DecodeError::Truncated { offset, cursor }) => {
                assert_eq!(0, offset, "{:02X?}", code);
                assert_eq!(code.len(), cursor, "{:02X?}", code);
            }
            other => panic!("expected truncation for {:02X?}, got {:?}", code, other),
        }
        assert!(decoder.instructions().is_empty());
    }
}

#[test]
fn uses_configured_label_prefix() {
    let cfg = Config {
        label_prefix: "l_".to_owned(),
        ..Config::default()
    };
    let mut decoder = Decoder::with_config(&[0xEBu8, 0x74, 0xFE][..], &cfg);
    decoder.decode().unwrap();
    assert_eq!(vec!["Unknown byte 0xeb", "je l_1 ; -2"],
        decoder.instructions().iter().map(|i| i.instruction.to_string()).collect::<Vec<_>>());
    assert_eq!(Some("l_1"), decoder.labels().get(1));
}

#[test]
fn decoders_are_independent() {
    let code = [0x74u8, 0xFE];
    let mut first = Decoder::new(&code[..]);
    first.decode().unwrap();
    let mut second = Decoder::new(&code[..]);
    second.decode().unwrap();
    assert_eq!(Some("label1"), first.labels().get(0));
    assert_eq!(Some("label1"), second.labels().get(0));
}
