use crate::{
    GrammarError, IOPattern, Op, OpKind, OpQueue, PermutationType, ProtocolMismatch,
    TranscriptError,
};

fn op(kind: OpKind, size: u64, label: &str) -> Op {
    Op {
        kind,
        label: label.as_bytes().to_vec(),
        size,
    }
}

#[test]
fn test_parse_protocol() {
    let io = IOPattern::parse(b"bad-protocol\0S8first challenge\0A8first reply").unwrap();
    assert_eq!(io.domain_separator, b"bad-protocol");
    assert_eq!(
        io.ops,
        vec![
            op(OpKind::Squeeze, 8, "first challenge"),
            op(OpKind::Absorb, 8, "first reply"),
        ]
    );
}

#[test]
fn test_parse_edge_cases() {
    // no separator: everything is the domain separator
    let io = IOPattern::parse(b"only-a-domain").unwrap();
    assert_eq!(io.domain_separator, b"only-a-domain");
    assert!(io.ops.is_empty());

    let io = IOPattern::parse(b"").unwrap();
    assert!(io.domain_separator.is_empty() && io.ops.is_empty());

    // missing digits mean size zero, a trailing separator yields no extra op
    let io = IOPattern::parse(b"ds\0R\0A3\0").unwrap();
    assert_eq!(
        io.ops,
        vec![op(OpKind::Ratchet, 0, ""), op(OpKind::Absorb, 3, "")]
    );

    // leading zeros are accepted
    let io = IOPattern::parse(b"ds\0H007x").unwrap();
    assert_eq!(io.ops, vec![op(OpKind::Hint, 7, "x")]);
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        IOPattern::parse(b"ds\0A1a\0X2b").unwrap_err(),
        GrammarError::UnknownOpKind {
            offset: 7,
            byte: b'X'
        }
    );
    assert_eq!(
        IOPattern::parse(b"ds\0S99999999999999999999label").unwrap_err(),
        GrammarError::SizeOverflow { offset: 4 }
    );
    assert!(IOPattern::parse(b"ds\0S18446744073709551615max").is_ok());
}

#[test]
fn test_builder() {
    let io = IOPattern::new("session")
        .and_then(|io| io.absorb(32, "commitment"))
        .and_then(|io| io.squeeze(16, "challenge"))
        .and_then(|io| io.ratchet())
        .and_then(|io| io.hint(4, "aux"))
        .unwrap();
    assert_eq!(
        io.to_bytes(),
        b"session\0A32commitment\0S16challenge\0R\0H4aux".to_vec()
    );
    assert_eq!(IOPattern::parse(&io.to_bytes()).unwrap(), io);

    assert_eq!(
        IOPattern::new("s").unwrap().absorb(0, "x").unwrap_err(),
        GrammarError::ZeroSize(OpKind::Absorb)
    );
    assert!(matches!(
        IOPattern::new("s").unwrap().squeeze(1, "1st"),
        Err(GrammarError::InvalidLabel { .. })
    ));
    assert!(matches!(
        IOPattern::new("s").unwrap().hint(1, "a\0b"),
        Err(GrammarError::InvalidLabel { .. })
    ));
    assert!(IOPattern::new("a\0b").is_err());
}

#[test]
fn test_display() {
    let io = IOPattern::parse(b"demo\0A2x\0S1y").unwrap();
    assert_eq!(
        io.to_string(),
        "IOPattern {\n  DomainSeparator: demo\n  Ops:\n    * Absorb 2 x\n    * Squeeze 1 y\n}"
    );
    assert_eq!(
        IOPattern::parse(b"empty").unwrap().to_string(),
        "IOPattern {\n  DomainSeparator: empty\n  Ops:\n}"
    );
}

fn queue() -> OpQueue {
    OpQueue::new(&[op(OpKind::Absorb, 10, "a"), op(OpKind::Squeeze, 5, "s")])
}

#[test]
fn test_queue_exact_and_split() {
    let mut q = queue();
    q.absorb(10).unwrap();
    q.squeeze(5).unwrap();
    assert!(q.is_empty());
    assert!(q.finish().is_ok());

    let mut q = queue();
    q.absorb(3).unwrap();
    assert_eq!(q.peek().map(|op| op.size), Some(7));
    q.absorb(7).unwrap();
    q.squeeze(2).unwrap();
    q.squeeze(3).unwrap();
    assert!(q.finish().is_ok());
}

#[test]
fn test_queue_mismatch() {
    let mut q = queue();
    assert_eq!(
        q.squeeze(5),
        Err(ProtocolMismatch::KindMismatch {
            expected: OpKind::Absorb,
            label: "a".to_string(),
            requested: OpKind::Squeeze
        })
    );
    // a rejected request consumes nothing
    assert_eq!(q.len(), 2);

    assert_eq!(
        q.absorb(11),
        Err(ProtocolMismatch::SizeExceeded {
            kind: OpKind::Absorb,
            label: "a".to_string(),
            remaining: 10,
            requested: 11
        })
    );

    // sizes never spill into the next operation
    q.absorb(6).unwrap();
    assert!(q.absorb(5).is_err());

    assert_eq!(
        q.finish(),
        Err(ProtocolMismatch::Unfinished {
            kind: OpKind::Absorb,
            label: "a".to_string(),
            remaining: 2
        })
    );

    let mut q = OpQueue::new(&[]);
    assert_eq!(
        q.ratchet(),
        Err(ProtocolMismatch::EmptyQueue {
            requested: OpKind::Ratchet,
            size: 0
        })
    );
}

#[test]
fn test_queue_ratchet_and_hint() {
    let io = IOPattern::parse(b"ds\0H4h\0R\0S1s").unwrap();
    let mut q = io.op_queue();
    assert!(q.ratchet().is_err());
    q.hint(4).unwrap();
    q.ratchet().unwrap();
    q.squeeze(1).unwrap();
    assert!(q.finish().is_ok());
}

#[test]
fn test_permutation_type_from_str() {
    assert_eq!("keccak".parse::<PermutationType>(), Ok(PermutationType::Keccak));
    assert_eq!("Keccak-F1600".parse::<PermutationType>(), Ok(PermutationType::Keccak));
    assert_eq!("SKYSCRAPER".parse::<PermutationType>(), Ok(PermutationType::Skyscraper));
    assert_eq!(
        "poseidon".parse::<PermutationType>(),
        Err(TranscriptError::UnknownPermutation("poseidon".to_string()))
    );
    assert_eq!(PermutationType::default().to_string(), "keccak");
}

#[test]
fn test_parse_rejects_empty_operations() {
    for (text, kind) in [
        (&b"ds\0A0x"[..], OpKind::Absorb),
        (&b"ds\0S1a\0Sb"[..], OpKind::Squeeze),
        (&b"ds\0H00aux"[..], OpKind::Hint),
    ] {
        assert_eq!(
            IOPattern::parse(text).unwrap_err(),
            GrammarError::ZeroSize(kind)
        );
    }
}

#[test]
fn test_sized_ratchet_is_consumed_once() {
    let io = IOPattern::parse(b"ds\0R5\0S1c").unwrap();
    assert_eq!(io.ops[0], op(OpKind::Ratchet, 5, ""));
    assert_eq!(io.to_bytes(), b"ds\0R5\0S1c".to_vec());

    let mut q = io.op_queue();
    q.ratchet().unwrap();
    assert_eq!(
        q.ratchet(),
        Err(ProtocolMismatch::KindMismatch {
            expected: OpKind::Squeeze,
            label: "c".to_string(),
            requested: OpKind::Ratchet
        })
    );
    q.squeeze(1).unwrap();
    assert!(q.finish().is_ok());
}
