use stellar_wire::ffi;
use stellar_wire::signing::{build_signature_base, SignaturePreImage};
use stellar_wire::types::{EnvelopeRequest, NetworkSelector, SignRequest, VerifyRequest};
use stellar_wire::utils::crypto::sha256;
use stellar_wire::xdr::{
    AccountId, Asset, EnvelopeType, Memo, Operation, ReadXdr, TransactionEnvelope, WriteXdr,
};
use stellar_wire::{
    build_fee_bump, ErrorCode, KeyPair, Network, SigningError, TransactionBuilder,
    PUBLIC_NETWORK_ID, TESTNET_NETWORK_ID,
};

const SEED: &str = "SBXLH5ZCTJR2VKCDFKUQWP2WI4B5HKWDRQQ4TUZLFE47MQ4LZEAHCBLU";
const DESTINATION: &str = "GAYYAL2XJKSQHQ7RJG7MXHTXPZFPUWPCV46UZLBEEF7FAHIQ36FT7ATA";
const TX_HASH: &str = "5a424a2c9eef5df0ffcd16aa5f5f9e67531925a3a79dc9b0fb0ed104c66c0748";
const SIGNED_ENVELOPE: &str = "AAAAAgAAAAAaMuO+bZmKOKaA6t/MWAinSvM2ucSNlpZRXdRJc/37ugAAAGQAAAEfcfsEywAAAAAAAAAAAAAAAQAAAAAAAAABAAAAADGAL1dKpQPD8Um+y553fkr6WeKvPUysJCF+UB0Q34s/AAAAAAAAAAAAmJaAAAAAAAAAAAFz/fu6AAAAQBMivGbeSFpdCa74D5Co6eETWRF0x26TlichzdareXOIWwZBa1SCr5eemD15n97ktwJSJzBKyIfQ5oWVNjzyAAo=";

fn keypair() -> KeyPair {
    KeyPair::from_secret_seed(SEED).expect("seed decodes")
}

fn payment_envelope() -> TransactionEnvelope {
    let destination: AccountId = DESTINATION.parse().expect("destination decodes");
    TransactionBuilder::new(keypair().to_xdr_account_id(), 1_234_567_890_122)
        .add_operation(Operation::payment(destination.into(), Asset::Native, 10_000_000))
        .build_envelope()
        .expect("envelope builds")
}

fn testnet() -> NetworkSelector {
    NetworkSelector {
        network: Some("testnet".into()),
        passphrase: None,
    }
}

#[test]
fn build_sign_and_encode_matches_known_envelope() {
    let mut envelope = payment_envelope();
    envelope.sign(&keypair(), &TESTNET_NETWORK_ID).expect("signs");

    assert_eq!(hex::encode(envelope.hash(&TESTNET_NETWORK_ID).unwrap()), TX_HASH);
    assert_eq!(envelope.to_xdr_base64().unwrap(), SIGNED_ENVELOPE);
}

#[test]
fn decoded_envelope_verifies_against_recomputed_base() {
    let envelope = TransactionEnvelope::from_xdr_base64(SIGNED_ENVELOPE).expect("decodes");
    assert_eq!(envelope.envelope_type(), EnvelopeType::Tx);

    let TransactionEnvelope::Tx(v1) = &envelope else {
        panic!("expected a v1 envelope");
    };
    let base = build_signature_base(
        &TESTNET_NETWORK_ID,
        EnvelopeType::Tx,
        &v1.tx.to_xdr().unwrap(),
    );
    assert_eq!(base, envelope.signature_base(&TESTNET_NETWORK_ID).unwrap());

    let hash = sha256(&base);
    let signature = &envelope.signatures()[0];
    assert_eq!(signature.hint, keypair().signature_hint());
    assert!(keypair().verify(&hash, &signature.signature));

    assert!(envelope.verify_signature(&keypair(), &TESTNET_NETWORK_ID).unwrap());
    assert!(!envelope.verify_signature(&keypair(), &PUBLIC_NETWORK_ID).unwrap());
    assert_eq!(envelope.to_xdr_base64().unwrap(), SIGNED_ENVELOPE);
}

#[test]
fn external_signer_flow() {
    let mut envelope = payment_envelope();
    let preimage = SignaturePreImage::for_envelope(&envelope, &TESTNET_NETWORK_ID).unwrap();
    assert_eq!(preimage.hash_hex(), TX_HASH);
    assert_eq!(preimage.signature_count, 0);

    let signer = keypair();
    let signature = signer.sign(&preimage.hash).unwrap();
    envelope
        .add_external_signature(signer.public_key(), &signature, &TESTNET_NETWORK_ID)
        .expect("valid signature is accepted");
    assert_eq!(envelope.to_xdr_base64().unwrap(), SIGNED_ENVELOPE);

    let other = KeyPair::from_seed(&[7u8; 32]).unwrap();
    let forged = other.sign(&preimage.hash).unwrap();
    let result = envelope.add_external_signature(signer.public_key(), &forged, &TESTNET_NETWORK_ID);
    assert!(matches!(result, Err(SigningError::InvalidSignature(_))));
    assert_eq!(envelope.signatures().len(), 1);
}

#[test]
fn multiple_signers_are_recognized() {
    let first = keypair();
    let second = KeyPair::from_seed(&[42u8; 32]).unwrap();
    let bystander = KeyPair::from_seed(&[9u8; 32]).unwrap();

    let mut envelope = payment_envelope();
    envelope.sign(&first, &TESTNET_NETWORK_ID).unwrap();
    envelope.sign(&second, &TESTNET_NETWORK_ID).unwrap();

    let candidates = [bystander, second.clone(), first.clone()];
    let signers = envelope
        .verified_signers(&TESTNET_NETWORK_ID, &candidates)
        .unwrap();
    let accounts: Vec<String> = signers.iter().map(|k| k.account_id()).collect();
    assert_eq!(accounts, vec![second.account_id(), first.account_id()]);
}

#[test]
fn fee_bump_wraps_signed_inner_envelope() {
    let mut inner = payment_envelope();
    inner.sign(&keypair(), &TESTNET_NETWORK_ID).unwrap();

    let fee_source = KeyPair::from_seed(&[3u8; 32]).unwrap();
    let fee_bump = build_fee_bump(fee_source.to_xdr_account_id(), 200, inner).unwrap();
    assert_eq!(fee_bump.tx.fee, 400);

    let mut envelope = TransactionEnvelope::TxFeeBump(fee_bump);
    envelope.sign(&fee_source, &TESTNET_NETWORK_ID).unwrap();
    assert_eq!(envelope.envelope_type(), EnvelopeType::TxFeeBump);

    let decoded = TransactionEnvelope::from_xdr(&envelope.to_xdr().unwrap()).unwrap();
    assert_eq!(decoded, envelope);
    assert!(decoded.verify_signature(&fee_source, &TESTNET_NETWORK_ID).unwrap());
    assert!(!decoded.verify_signature(&keypair(), &TESTNET_NETWORK_ID).unwrap());
    assert_ne!(
        decoded.hash(&TESTNET_NETWORK_ID).unwrap(),
        payment_envelope().hash(&TESTNET_NETWORK_ID).unwrap()
    );
}

#[test]
fn memo_changes_the_hash() {
    let destination: AccountId = DESTINATION.parse().unwrap();
    let with_memo = TransactionBuilder::new(keypair().to_xdr_account_id(), 1_234_567_890_122)
        .memo(Memo::text("hello").unwrap())
        .add_operation(Operation::payment(destination.into(), Asset::Native, 10_000_000))
        .build_envelope()
        .unwrap();
    assert_ne!(
        hex::encode(with_memo.hash(&TESTNET_NETWORK_ID).unwrap()),
        TX_HASH
    );
}

#[test]
fn ffi_sign_then_verify() {
    let unsigned = payment_envelope().to_xdr_base64().unwrap();

    let signed = ffi::sign_transaction(&SignRequest {
        envelope: unsigned.clone(),
        secret_seed: SEED.to_string(),
        network: testnet(),
    })
    .expect("signs");
    assert_eq!(signed.envelope, SIGNED_ENVELOPE);
    assert_eq!(signed.tx_hash, TX_HASH);
    assert_eq!(signed.signature_count, 1);

    let verified = ffi::verify_transaction(&VerifyRequest {
        envelope: signed.envelope.clone(),
        account_id: keypair().account_id(),
        network: testnet(),
    })
    .unwrap();
    assert!(verified.valid);

    let unverified = ffi::verify_transaction(&VerifyRequest {
        envelope: unsigned,
        account_id: keypair().account_id(),
        network: testnet(),
    })
    .unwrap();
    assert!(!unverified.valid);
}

#[test]
fn ffi_hash_and_summary() {
    let request = EnvelopeRequest {
        envelope: SIGNED_ENVELOPE.to_string(),
        network: NetworkSelector {
            network: None,
            passphrase: Some(Network::testnet().passphrase().to_string()),
        },
    };

    let preimage = ffi::transaction_hash(&request).unwrap();
    assert_eq!(preimage.hash_hex(), TX_HASH);
    assert_eq!(preimage.signature_count, 1);

    let summary = ffi::summarize_envelope(&request).unwrap();
    assert_eq!(summary.tx_hash, TX_HASH);
    assert_eq!(summary.fee, 100);
    assert_eq!(summary.operations.len(), 1);
    assert_eq!(summary.operations[0].amount.as_deref(), Some("1.0000000"));
}

#[test]
fn ffi_rejects_truncated_envelope() {
    let mut bytes = TransactionEnvelope::from_xdr_base64(SIGNED_ENVELOPE)
        .unwrap()
        .to_xdr()
        .unwrap();
    bytes.truncate(bytes.len() - 8);

    use base64::Engine;
    let request = EnvelopeRequest {
        envelope: base64::engine::general_purpose::STANDARD.encode(bytes),
        network: testnet(),
    };
    let error = ffi::summarize_envelope(&request).unwrap_err();
    assert_eq!(error.code, ErrorCode::MalformedXdr);
}
