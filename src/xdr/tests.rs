//! Integration tests for the XDR module

use crate::xdr::*;

const SOURCE: &str = "GANDFY56NWMYUOFGQDVN7TCYBCTUV4ZWXHCI3FUWKFO5ISLT7X53VTO2";
const DESTINATION: &str = "GAYYAL2XJKSQHQ7RJG7MXHTXPZFPUWPCV46UZLBEEF7FAHIQ36FT7ATA";

/// One native payment of 1 XLM, fee 100, sequence 1234567890123, unsigned
const UNSIGNED_ENVELOPE: &str = "AAAAAgAAAAAaMuO+bZmKOKaA6t/MWAinSvM2ucSNlpZRXdRJc/37ugAAAGQAAAEfcfsEywAAAAAAAAAAAAAAAQAAAAAAAAABAAAAADGAL1dKpQPD8Um+y553fkr6WeKvPUysJCF+UB0Q34s/AAAAAAAAAAAAmJaAAAAAAAAAAAA=";

fn payment_transaction() -> Transaction {
    let source: AccountId = SOURCE.parse().unwrap();
    let destination: AccountId = DESTINATION.parse().unwrap();
    Transaction {
        source_account: source.into(),
        fee: 100,
        seq_num: 1_234_567_890_123,
        cond: Preconditions::None,
        memo: Memo::None,
        operations: vec![Operation::payment(destination.into(), Asset::Native, 10_000_000)],
        ext: TransactionExt::V0,
    }
}

#[test]
fn test_known_envelope_decodes() {
    let envelope = TransactionEnvelope::from_xdr_base64(UNSIGNED_ENVELOPE).unwrap();
    let expected = TransactionEnvelope::Tx(TransactionV1Envelope::new(payment_transaction()));
    assert_eq!(envelope, expected);
    assert_eq!(envelope.envelope_type(), EnvelopeType::Tx);
    assert!(envelope.signatures().is_empty());
}

#[test]
fn test_known_envelope_encodes_identically() {
    let envelope = TransactionEnvelope::Tx(TransactionV1Envelope::new(payment_transaction()));
    assert_eq!(envelope.to_xdr_base64().unwrap(), UNSIGNED_ENVELOPE);
}

#[test]
fn test_every_truncation_fails() {
    let bytes = TransactionEnvelope::Tx(TransactionV1Envelope::new(payment_transaction()))
        .to_xdr()
        .unwrap();
    for len in 0..bytes.len() {
        assert!(
            TransactionEnvelope::from_xdr(&bytes[..len]).is_err(),
            "prefix of {} bytes decoded",
            len
        );
    }
}

#[test]
fn test_trailing_bytes_rejected() {
    let mut bytes = TransactionEnvelope::Tx(TransactionV1Envelope::new(payment_transaction()))
        .to_xdr()
        .unwrap();
    let len = bytes.len();
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    assert_eq!(
        TransactionEnvelope::from_xdr(&bytes),
        Err(XdrError::TrailingBytes {
            offset: len,
            remaining: 4
        })
    );
}

#[test]
fn test_memo_padding_must_be_zero() {
    let mut tx = payment_transaction();
    tx.memo = Memo::text("abc").unwrap();
    let mut bytes = tx.to_xdr().unwrap();

    // Locate the memo: source(36) fee(4) seq(8) cond(4) type(4) len(4) "abc" pad
    let pad = 36 + 4 + 8 + 4 + 4 + 4 + 3;
    assert_eq!(bytes[pad], 0);
    bytes[pad] = 0xff;
    assert_eq!(
        Transaction::from_xdr(&bytes),
        Err(XdrError::NonZeroPadding { offset: pad })
    );
}

#[test]
fn test_depth_limit_applies_to_envelopes() {
    let bytes = TransactionEnvelope::Tx(TransactionV1Envelope::new(payment_transaction()))
        .to_xdr()
        .unwrap();
    assert!(matches!(
        TransactionEnvelope::from_xdr_with_limits(&bytes, Limits::new(2, DEFAULT_LEN_LIMIT)),
        Err(XdrError::DepthLimitExceeded { .. })
    ));
    assert!(TransactionEnvelope::from_xdr_with_limits(&bytes, Limits::none()).is_ok());
}

#[test]
fn test_length_limit_applies_to_envelopes() {
    let bytes = TransactionEnvelope::Tx(TransactionV1Envelope::new(payment_transaction()))
        .to_xdr()
        .unwrap();
    let limits = Limits::new(DEFAULT_DEPTH_LIMIT, bytes.len() - 1);
    assert!(matches!(
        TransactionEnvelope::from_xdr_with_limits(&bytes, limits),
        Err(XdrError::LengthLimitExceeded { .. })
    ));
}

#[test]
fn test_rich_transaction_roundtrip() {
    let source: AccountId = SOURCE.parse().unwrap();
    let destination: AccountId = DESTINATION.parse().unwrap();
    let usd = Asset::credit("USD", destination).unwrap();
    let euro_long = Asset::credit("EUROTOKEN", destination).unwrap();

    let operations = vec![
        Operation::create_account(destination, 20_000_000),
        Operation::payment(MuxedAccount::new(*destination.ed25519(), Some(9)), usd.clone(), 5),
        Operation::new(OperationBody::PathPaymentStrictReceive(PathPaymentStrictReceiveOp {
            send_asset: Asset::Native,
            send_max: 100,
            destination: destination.into(),
            dest_asset: usd.clone(),
            dest_amount: 50,
            path: vec![euro_long.clone()],
        })),
        Operation::new(OperationBody::ManageSellOffer(ManageSellOfferOp {
            selling: usd.clone(),
            buying: Asset::Native,
            amount: 10,
            price: Price { n: 3, d: 2 },
            offer_id: 0,
        })),
        Operation::new(OperationBody::AllowTrust(AllowTrustOp {
            trustor: destination,
            asset: AssetCode::new("USD").unwrap(),
            authorize: 1,
        })),
        Operation::new(OperationBody::ClaimClaimableBalance(ClaimClaimableBalanceOp {
            balance_id: ClaimableBalanceId::V0([4u8; 32]),
        })),
        Operation::new(OperationBody::BeginSponsoringFutureReserves(
            BeginSponsoringFutureReservesOp {
                sponsored_id: destination,
            },
        )),
        Operation::new(OperationBody::EndSponsoringFutureReserves).with_source(destination.into()),
        Operation::new(OperationBody::Clawback(ClawbackOp {
            asset: usd.clone(),
            from: destination.into(),
            amount: 1,
        })),
        Operation::new(OperationBody::SetTrustLineFlags(SetTrustLineFlagsOp {
            trustor: destination,
            asset: usd,
            clear_flags: 1,
            set_flags: 2,
        })),
        Operation::new(OperationBody::ClawbackClaimableBalance(ClawbackClaimableBalanceOp {
            balance_id: ClaimableBalanceId::V0([6u8; 32]),
        })),
        Operation::new(OperationBody::LiquidityPoolDeposit(LiquidityPoolDepositOp {
            liquidity_pool_id: [7u8; 32],
            max_amount_a: 1_000,
            max_amount_b: 3_000,
            min_price: Price { n: 1, d: 4 },
            max_price: Price { n: 1, d: 2 },
        })),
        Operation::new(OperationBody::LiquidityPoolWithdraw(LiquidityPoolWithdrawOp {
            liquidity_pool_id: [7u8; 32],
            amount: 250,
            min_amount_a: 10,
            min_amount_b: 30,
        }))
        .with_source(destination.into()),
        Operation::account_merge(destination.into()),
        Operation::bump_sequence(i64::MAX),
    ];

    let tx = Transaction {
        source_account: MuxedAccount::new(*source.ed25519(), Some(u64::MAX)),
        fee: 1500,
        seq_num: 42,
        cond: Preconditions::V2(PreconditionsV2 {
            time_bounds: Some(TimeBounds {
                min_time: 1,
                max_time: 2,
            }),
            ledger_bounds: Some(LedgerBounds {
                min_ledger: 3,
                max_ledger: 0,
            }),
            min_seq_num: Some(41),
            min_seq_age: 60,
            min_seq_ledger_gap: 2,
            extra_signers: vec![SignerKey::HashX([1u8; 32])],
        }),
        memo: Memo::Hash([8u8; 32]),
        operations,
        ext: TransactionExt::V0,
    };

    let envelope = TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: vec![
            DecoratedSignature::new([1, 2, 3, 4], vec![0xAA; 64]),
            DecoratedSignature::new([5, 6, 7, 8], vec![0xBB; 64]),
        ],
    });
    let bytes = envelope.to_xdr().unwrap();
    assert_eq!(bytes.len() % 4, 0);
    assert_eq!(TransactionEnvelope::from_xdr(&bytes).unwrap(), envelope);
}

#[test]
fn test_base64_whitespace_tolerated() {
    let padded = format!("  {}\n", UNSIGNED_ENVELOPE);
    assert!(TransactionEnvelope::from_xdr_base64(&padded).is_ok());
}

#[test]
fn test_error_offsets_point_into_input() {
    let mut bytes = TransactionEnvelope::Tx(TransactionV1Envelope::new(payment_transaction()))
        .to_xdr()
        .unwrap();
    // Operation body type sits after tag(4) source(36) fee(4) seq(8) cond(4)
    // memo(4) count(4) op source flag(4)
    let op_type = 4 + 36 + 4 + 8 + 4 + 4 + 4 + 4;
    bytes[op_type + 3] = 77;
    let err = TransactionEnvelope::from_xdr(&bytes).unwrap_err();
    assert_eq!(err.offset(), Some(op_type));
}
