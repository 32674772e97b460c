use data_encoding::BASE32_NOPAD;
use proptest::prelude::*;
use stellar_wire::strkey::{self, StrKeyError, VersionByte};
use stellar_wire::utils::crypto::{crc16_xmodem, sha256};
use stellar_wire::xdr::{Asset, Memo, MuxedAccount, Operation, ReadXdr, WriteXdr};
use stellar_wire::{KeyPair, NetworkId};

fn fixed_kind() -> impl Strategy<Value = VersionByte> {
    prop_oneof![
        Just(VersionByte::AccountId),
        Just(VersionByte::SecretSeed),
        Just(VersionByte::PreAuthTx),
        Just(VersionByte::Sha256Hash),
    ]
}

fn unknown_version() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("not a known version byte", |b| VersionByte::from_byte(*b).is_none())
}

proptest! {
    #[test]
    fn strkey_roundtrips(kind in fixed_kind(), payload in prop::array::uniform32(any::<u8>())) {
        let encoded = strkey::encode(kind, &payload).unwrap();
        prop_assert_eq!(encoded.chars().next(), Some(kind.prefix()));
        prop_assert_eq!(encoded.len(), 56);

        let (decoded_kind, decoded) = strkey::decode(&encoded).unwrap();
        prop_assert_eq!(decoded_kind, kind);
        prop_assert_eq!(decoded.as_slice(), &payload[..]);
    }

    #[test]
    fn muxed_accounts_roundtrip(key in prop::array::uniform32(any::<u8>()), id in any::<u64>()) {
        let encoded = strkey::encode_muxed_account(&key, id);
        prop_assert!(encoded.starts_with('M'));
        prop_assert_eq!(strkey::decode_muxed_account(&encoded).unwrap(), (key, id));
    }

    #[test]
    fn flipped_checksum_bits_are_rejected(
        key in prop::array::uniform32(any::<u8>()),
        bit in 0usize..16,
    ) {
        let encoded = strkey::encode_account_id(&key);
        let mut raw = BASE32_NOPAD.decode(encoded.as_bytes()).unwrap();
        let at = raw.len() - 2 + bit / 8;
        raw[at] ^= 1 << (bit % 8);

        let corrupted = BASE32_NOPAD.encode(&raw);
        let is_checksum_error = matches!(
            strkey::decode(&corrupted),
            Err(StrKeyError::ChecksumMismatch { .. })
        );
        prop_assert!(is_checksum_error);
    }

    #[test]
    fn unknown_versions_are_rejected(
        version in unknown_version(),
        payload in prop::array::uniform32(any::<u8>()),
    ) {
        let mut raw = vec![version];
        raw.extend_from_slice(&payload);
        let checksum = crc16_xmodem(&raw);
        raw.extend_from_slice(&checksum.to_le_bytes());

        let result = strkey::decode(&BASE32_NOPAD.encode(&raw));
        prop_assert_eq!(result, Err(StrKeyError::UnknownVersion(version)));
    }

    #[test]
    fn payments_roundtrip_through_xdr(
        destination in prop::array::uniform32(any::<u8>()),
        muxed_id in prop::option::of(any::<u64>()),
        amount in 1i64..=i64::MAX,
    ) {
        let op = Operation::payment(MuxedAccount::new(destination, muxed_id), Asset::Native, amount);
        let bytes = op.to_xdr().unwrap();
        prop_assert_eq!(bytes.len() % 4, 0);
        prop_assert_eq!(Operation::from_xdr(&bytes).unwrap(), op);
    }

    #[test]
    fn text_memos_are_padded(text in "[a-zA-Z0-9 ]{0,28}") {
        let memo = Memo::text(text.as_str()).unwrap();
        let bytes = memo.to_xdr().unwrap();
        prop_assert_eq!(bytes.len() % 4, 0);
        // discriminant + length + padded text
        prop_assert_eq!(bytes.len(), 8 + (text.len() + 3) / 4 * 4);
        prop_assert_eq!(Memo::from_xdr(&bytes).unwrap(), memo);
    }

    #[test]
    fn trailing_bytes_are_rejected(amount in any::<i64>(), extra in 1usize..8) {
        let op = Operation::bump_sequence(amount);
        let mut bytes = op.to_xdr().unwrap();
        bytes.extend(std::iter::repeat(0u8).take(extra));
        prop_assert!(Operation::from_xdr(&bytes).is_err());
    }

    #[test]
    fn signatures_verify_only_their_message(
        seed in prop::array::uniform32(any::<u8>()),
        message in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let keypair = KeyPair::from_seed(&seed).unwrap();
        let signature = keypair.sign(&message).unwrap();
        prop_assert!(keypair.verify(&message, &signature));

        let public_only = KeyPair::from_account_id(&keypair.account_id()).unwrap();
        prop_assert!(public_only.verify(&message, &signature));

        let mut tampered = message.clone();
        tampered.push(0x01);
        prop_assert!(!keypair.verify(&tampered, &signature));
    }

    #[test]
    fn seeds_roundtrip_through_strkey(seed in prop::array::uniform32(any::<u8>())) {
        let keypair = KeyPair::from_seed(&seed).unwrap();
        let secret = keypair.secret_seed().unwrap();
        let restored = KeyPair::from_secret_seed(secret.as_str()).unwrap();
        prop_assert_eq!(restored.account_id(), keypair.account_id());
        prop_assert_eq!(&keypair.signature_hint()[..], &keypair.public_key()[28..]);
    }

    #[test]
    fn network_ids_hash_the_passphrase(passphrase in ".{1,64}") {
        let id = NetworkId::from_passphrase(&passphrase);
        prop_assert_eq!(id.as_bytes(), &sha256(passphrase.as_bytes()));
        prop_assert_eq!(id, NetworkId::from_passphrase(&passphrase));
    }
}
