use arith::{BN254Fr, Field, FieldForECC};
use circuit::{CircuitEngine, ConstraintKind, CircuitError, Variable, WitnessBuilder, U8};
use ethnum::U256;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::{
    keccak::KECCAK_RATE,
    skyscraper::{sbox_byte, sbox_word},
    DuplexSponge, HasherError, KeccakPermutation, NativeKeccakSponge, Permutation, Skyscraper,
    SkyscraperNative, SkyscraperPermutation,
};

type Builder = WitnessBuilder<BN254Fr>;

const SQUARE_VECTORS: [(&str, &str); 4] = [
    ("0", "0"),
    (
        "1",
        "9915499612839321149637521777990102151350674507940716049588462388200839649614",
    ),
    (
        "2",
        "17773755579518009376303681366703133516854333631346829854655645366227550102839",
    ),
    (
        "1104450765605124869545290932753078120560901577733272073477890658487831733222",
        "20498050724266033890829404465405035543297153733520482423774420418741549228506",
    ),
];

const BAR_VECTORS: [(&str, &str); 4] = [
    ("0", "0"),
    ("1", "680564733841876926926749214863536422912"),
    ("2", "1361129467683753853853498429727072845824"),
    (
        "4111585712030104139416666328230194227848755236259444667527487224433891325648",
        "18867677047139790809471719918880601980605904427073186248909139907505620573990",
    ),
];

const COMPRESS_VECTOR: (&str, &str, &str) = (
    "21614608883591910674239883101354062083890746690626773887530227216615498812963",
    "9813154100006487150380270585621895148484502414032888228750638800367218873447",
    "3583228880285179354728993622328037400470978495633822008876840172083178912457",
);

fn fr(s: &str) -> BN254Fr {
    BN254Fr::from_u256(U256::from_str_radix(s, 10).unwrap())
}

fn byte_values(api: &Builder, bytes: &[U8]) -> Vec<u8> {
    bytes
        .iter()
        .map(|b| api.value(b.val).to_u256().as_u8())
        .collect()
}

// ====================================
// keccak
// ====================================

#[test]
fn test_native_keccak_zero_state() {
    let mut sponge = NativeKeccakSponge::new(&[0u8; 32]);
    let mut out = [0u8; 8];
    sponge.squeeze(&mut out);
    assert_eq!(u64::from_le_bytes(out), 0xf1258f7940e1dde7);
}

#[test]
fn test_native_keccak_tag() {
    let io = b"bad-protocol\0S8first challenge\0A8first reply\0S16second challenge\0A16second reply";
    let tag = NativeKeccakSponge::derive_tag(io);
    assert_eq!(
        tag,
        [
            70, 90, 126, 76, 159, 176, 174, 189, 248, 103, 44, 32, 119, 81, 48, 107, 135, 183,
            230, 104, 17, 230, 234, 178, 49, 179, 119, 18, 187, 196, 177, 121
        ]
    );
}

#[test]
fn test_native_keccak_absorb_split() {
    let data = (0..300u32).map(|i| (i * 7) as u8).collect::<Vec<_>>();

    let mut whole = NativeKeccakSponge::new(&[1u8; 32]);
    whole.absorb(&data);
    let mut expected = [0u8; 200];
    whole.squeeze(&mut expected);

    for split in [0, 1, 135, 136, 137, 299] {
        let mut sponge = NativeKeccakSponge::new(&[1u8; 32]);
        sponge.absorb(&data[..split]);
        sponge.absorb(&data[split..]);
        let mut out = [0u8; 200];
        sponge.squeeze(&mut out[..50]);
        sponge.squeeze(&mut out[50..]);
        assert_eq!(out, expected);
    }
}

#[test]
fn test_keccak_gadget_matches_keccakf() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
    let mut bytes = [0u8; 200];
    rng.fill_bytes(&mut bytes);

    let mut api = Builder::new();
    let mut perm = KeccakPermutation::new(&mut api);
    let state = U8::constants(&mut api, &bytes);
    <KeccakPermutation as Permutation<Builder>>::state_mut(&mut perm).copy_from_slice(&state);
    perm.permute(&mut api).unwrap();

    let mut lanes = [0u64; 25];
    for (lane, chunk) in lanes.iter_mut().zip(bytes.chunks_exact(8)) {
        *lane = u64::from_le_bytes(chunk.try_into().unwrap());
    }
    tiny_keccak::keccakf(&mut lanes);
    let expected = lanes
        .iter()
        .flat_map(|l| l.to_le_bytes())
        .collect::<Vec<_>>();

    assert_eq!(byte_values(&api, perm.bytes()), expected);
    assert!(api.check().is_ok());
}

#[test]
fn test_keccak_gadget_rejects_out_of_range_byte() {
    let mut api = Builder::new();
    let mut perm = KeccakPermutation::new(&mut api);
    let not_a_byte = api.input(BN254Fr::from(256u64));
    <KeccakPermutation as Permutation<Builder>>::state_mut(&mut perm)[3] =
        U8::from_variable_unchecked(not_a_byte);
    perm.permute(&mut api).unwrap();
    assert!(!api.is_satisfied());
}

#[test]
fn test_keccak_duplex_sponge() {
    let squeeze_with = |parts: &[&[u8]]| {
        let mut api = Builder::new();
        let perm = KeccakPermutation::new(&mut api);
        let mut sponge = DuplexSponge::<Builder, _>::new(perm);
        let iv = U8::constants(&mut api, &[0u8; 32]);
        sponge
            .initialize(&mut api, iv.as_slice().try_into().unwrap())
            .unwrap();
        for part in parts {
            let part = U8::constants(&mut api, part);
            sponge.absorb(&mut api, &part).unwrap();
        }
        assert_eq!(sponge.squeeze_pos(), KECCAK_RATE);

        let zero = U8::constant(&mut api, 0);
        let mut out = [zero; 8];
        sponge.squeeze(&mut api, &mut out).unwrap();
        assert_eq!(sponge.squeeze_pos(), 8);
        assert!(api.check().is_ok());
        byte_values(&api, &out)
    };

    let expected = vec![213, 75, 5, 20, 66, 15, 182, 47];
    assert_eq!(squeeze_with(&[b"abc".as_slice()]), expected);
    assert_eq!(squeeze_with(&[b"a".as_slice(), b"bc".as_slice()]), expected);
    assert_eq!(
        squeeze_with(&[b"".as_slice(), b"ab".as_slice(), b"c".as_slice()]),
        expected
    );
}

// ====================================
// skyscraper
// ====================================

#[test]
fn test_sbox_byte() {
    assert_eq!(sbox_byte(0xcd), 0xd3);
    assert_eq!(sbox_byte(0x17), 0x0e);
    assert_eq!(sbox_word(0xcd17, 16), 0xd30e);

    // the S-box is a permutation of the bytes
    let mut seen = [false; 256];
    (0..=255u8).for_each(|b| seen[sbox_byte(b) as usize] = true);
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn test_sbox_gadget() {
    for word_bits in [8, 16] {
        let mut api = Builder::new();
        let skyscraper = Skyscraper::new(&mut api, word_bits).unwrap();
        for (input, output) in [(0xcdu64, 0xd3u64), (0x17, 0x0e)] {
            let x = api.input(BN254Fr::from(input));
            let y = skyscraper.sbox(&mut api, x);
            assert_eq!(api.value(y), BN254Fr::from(output));
        }
        assert!(api.check().is_ok());
    }

    let mut api = Builder::new();
    let skyscraper = Skyscraper::new(&mut api, 16).unwrap();
    let x = api.input(BN254Fr::from(0xcd17u64));
    let y = skyscraper.sbox(&mut api, x);
    assert_eq!(api.value(y), BN254Fr::from(0xd30eu64));

    // a byte table does not contain 0x1234
    let mut api = Builder::new();
    let skyscraper = Skyscraper::new(&mut api, 8).unwrap();
    let x = api.input(BN254Fr::from(0x1234u64));
    skyscraper.sbox(&mut api, x);
    assert!(matches!(
        api.check(),
        Err(CircuitError::Unsatisfied {
            kind: ConstraintKind::Lookup,
            ..
        })
    ));
}

#[test]
fn test_square() {
    let native = SkyscraperNative::<BN254Fr>::new().unwrap();
    let mut api = Builder::new();
    let skyscraper = Skyscraper::new(&mut api, 8).unwrap();
    for (input, output) in SQUARE_VECTORS {
        let x = api.input(fr(input));
        let y = skyscraper.square(&mut api, x);
        assert_eq!(api.value(y), fr(output));
        assert_eq!(native.square(fr(input)), fr(output));
    }
    assert!(api.check().is_ok());
}

#[test]
fn test_bar() {
    let native = SkyscraperNative::<BN254Fr>::new().unwrap();
    for word_bits in [8, 16] {
        let mut api = Builder::new();
        let skyscraper = Skyscraper::new(&mut api, word_bits).unwrap();
        for (input, output) in BAR_VECTORS {
            let x = api.input(fr(input));
            let y = skyscraper.bar(&mut api, x).unwrap();
            assert_eq!(api.value(y), fr(output));
            assert_eq!(native.bar(fr(input)), fr(output));
        }
        assert!(api.check().is_ok());
    }
}

#[test]
fn test_compress() {
    let (l, r, expected) = COMPRESS_VECTOR;
    let native = SkyscraperNative::<BN254Fr>::new().unwrap();
    assert_eq!(native.compress(fr(l), fr(r)), fr(expected));

    for word_bits in [8, 16] {
        let mut api = Builder::new();
        let skyscraper = Skyscraper::new(&mut api, word_bits).unwrap();
        let lv = api.input(fr(l));
        let rv = api.input(fr(r));
        let out = skyscraper.compress(&mut api, lv, rv).unwrap();
        assert_eq!(api.value(out), fr(expected));
        assert!(api.check().is_ok());
    }
}

#[test]
fn test_skyscraper_gadget_matches_native() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let native = SkyscraperNative::<BN254Fr>::new().unwrap();
    let mut api = Builder::new();
    let skyscraper = Skyscraper::new(&mut api, 8).unwrap();
    for _ in 0..4 {
        let mut expected = [
            BN254Fr::random_unsafe(&mut rng),
            BN254Fr::random_unsafe(&mut rng),
        ];
        let mut state = [api.input(expected[0]), api.input(expected[1])];
        skyscraper.permute(&mut api, &mut state).unwrap();
        native.permute(&mut expected);
        assert_eq!(api.values(&state), expected.to_vec());
    }
    assert!(api.check().is_ok());
}

#[test]
fn test_skyscraper_word_size() {
    let mut api = Builder::new();
    assert_eq!(
        Skyscraper::new(&mut api, 12).unwrap_err(),
        HasherError::UnsupportedWordSize(12)
    );
    assert!(SkyscraperPermutation::new(&mut api, 32).is_err());
}

#[test]
fn test_skyscraper_duplex_sponge() {
    let native = SkyscraperNative::<BN254Fr>::new().unwrap();
    let mut api = Builder::new();
    let perm = SkyscraperPermutation::new(&mut api, 8).unwrap();
    let mut sponge = DuplexSponge::<Builder, _>::new(perm);

    let mut iv_bytes = [0u8; 32];
    iv_bytes[0] = 3;
    iv_bytes[1] = 1;
    let iv = U8::constants(&mut api, &iv_bytes);
    sponge
        .initialize(&mut api, iv.as_slice().try_into().unwrap())
        .unwrap();
    assert_eq!(
        api.values(&sponge.permutation().elements()),
        vec![BN254Fr::ZERO, BN254Fr::from(259u64)]
    );

    // squeeze permutes first, then one element per permutation
    let zero = api.zero();
    let mut out = [zero; 2];
    sponge.squeeze(&mut api, &mut out).unwrap();
    let mut expected = [BN254Fr::ZERO, BN254Fr::from(259u64)];
    native.permute(&mut expected);
    let first = expected[0];
    native.permute(&mut expected);
    assert_eq!(api.values(&out), vec![first, expected[0]]);

    // absorbing overwrites the rate
    let x = api.input(BN254Fr::from(42u64));
    sponge.absorb(&mut api, &[x]).unwrap();
    let mut challenge = [zero];
    sponge.squeeze(&mut api, &mut challenge).unwrap();
    let mut expected = [BN254Fr::from(42u64), expected[1]];
    native.permute(&mut expected);
    assert_eq!(api.value(challenge[0]), expected[0]);

    // ratchet clears the rate
    sponge.ratchet(&mut api).unwrap();
    native.permute(&mut expected);
    let elements: [Variable; 2] = sponge.permutation().elements();
    assert_eq!(api.values(&elements), vec![BN254Fr::ZERO, expected[1]]);
    assert_eq!(sponge.squeeze_pos(), 1);

    sponge.debug_state(&mut api);
    assert!(api.check().is_ok());
}
