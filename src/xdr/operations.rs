//! Operation bodies
//!
//! Classic operations are encoded in full. Operation types that exist on
//! the network but carry smart-contract, sponsorship-revocation or claimant
//! predicate payloads are recognized and rejected as unsupported.

use serde::{Deserialize, Serialize};

use super::types::*;
use super::{ReadXdr, WriteXdr, XdrError, XdrReader, XdrResult, XdrWriter};

pub const MAX_PATH_LEN: u32 = 5;
pub const MAX_HOME_DOMAIN_LEN: u32 = 32;
pub const MAX_DATA_NAME_LEN: u32 = 64;
pub const MAX_DATA_VALUE_LEN: u32 = 64;

xdr_enum! {
    pub enum OperationType {
        CreateAccount = 0,
        Payment = 1,
        PathPaymentStrictReceive = 2,
        ManageSellOffer = 3,
        CreatePassiveSellOffer = 4,
        SetOptions = 5,
        ChangeTrust = 6,
        AllowTrust = 7,
        AccountMerge = 8,
        Inflation = 9,
        ManageData = 10,
        BumpSequence = 11,
        ManageBuyOffer = 12,
        PathPaymentStrictSend = 13,
        CreateClaimableBalance = 14,
        ClaimClaimableBalance = 15,
        BeginSponsoringFutureReserves = 16,
        EndSponsoringFutureReserves = 17,
        RevokeSponsorship = 18,
        Clawback = 19,
        ClawbackClaimableBalance = 20,
        SetTrustLineFlags = 21,
        LiquidityPoolDeposit = 22,
        LiquidityPoolWithdraw = 23,
        InvokeHostFunction = 24,
        ExtendFootprintTtl = 25,
        RestoreFootprint = 26,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CreateAccountOp {
        pub destination: AccountId,
        pub starting_balance: i64,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PaymentOp {
        pub destination: MuxedAccount,
        pub asset: Asset,
        pub amount: i64,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPaymentStrictReceiveOp {
    pub send_asset: Asset,
    pub send_max: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_amount: i64,
    pub path: Vec<Asset>,
}

impl WriteXdr for PathPaymentStrictReceiveOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.send_asset.write_xdr(w)?;
        self.send_max.write_xdr(w)?;
        self.destination.write_xdr(w)?;
        self.dest_asset.write_xdr(w)?;
        self.dest_amount.write_xdr(w)?;
        w.write_var_array(&self.path, MAX_PATH_LEN)
    }
}

impl ReadXdr for PathPaymentStrictReceiveOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            send_asset: Asset::read_xdr(r)?,
            send_max: r.read_i64()?,
            destination: MuxedAccount::read_xdr(r)?,
            dest_asset: Asset::read_xdr(r)?,
            dest_amount: r.read_i64()?,
            path: r.read_var_array(MAX_PATH_LEN)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPaymentStrictSendOp {
    pub send_asset: Asset,
    pub send_amount: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_min: i64,
    pub path: Vec<Asset>,
}

impl WriteXdr for PathPaymentStrictSendOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.send_asset.write_xdr(w)?;
        self.send_amount.write_xdr(w)?;
        self.destination.write_xdr(w)?;
        self.dest_asset.write_xdr(w)?;
        self.dest_min.write_xdr(w)?;
        w.write_var_array(&self.path, MAX_PATH_LEN)
    }
}

impl ReadXdr for PathPaymentStrictSendOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            send_asset: Asset::read_xdr(r)?,
            send_amount: r.read_i64()?,
            destination: MuxedAccount::read_xdr(r)?,
            dest_asset: Asset::read_xdr(r)?,
            dest_min: r.read_i64()?,
            path: r.read_var_array(MAX_PATH_LEN)?,
        })
    }
}

xdr_struct! {
    /// `offer_id` 0 creates a new offer; `amount` 0 deletes an existing one
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ManageSellOfferOp {
        pub selling: Asset,
        pub buying: Asset,
        pub amount: i64,
        pub price: Price,
        pub offer_id: i64,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ManageBuyOfferOp {
        pub selling: Asset,
        pub buying: Asset,
        pub buy_amount: i64,
        pub price: Price,
        pub offer_id: i64,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CreatePassiveSellOfferOp {
        pub selling: Asset,
        pub buying: Asset,
        pub amount: i64,
        pub price: Price,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetOptionsOp {
    pub inflation_dest: Option<AccountId>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub med_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<String>,
    pub signer: Option<Signer>,
}

impl WriteXdr for SetOptionsOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.inflation_dest.write_xdr(w)?;
        self.clear_flags.write_xdr(w)?;
        self.set_flags.write_xdr(w)?;
        self.master_weight.write_xdr(w)?;
        self.low_threshold.write_xdr(w)?;
        self.med_threshold.write_xdr(w)?;
        self.high_threshold.write_xdr(w)?;
        match &self.home_domain {
            Some(domain) => {
                w.write_bool(true);
                w.write_string(domain, MAX_HOME_DOMAIN_LEN)?;
            }
            None => w.write_bool(false),
        }
        self.signer.write_xdr(w)
    }
}

impl ReadXdr for SetOptionsOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            inflation_dest: r.read_option()?,
            clear_flags: r.read_option()?,
            set_flags: r.read_option()?,
            master_weight: r.read_option()?,
            low_threshold: r.read_option()?,
            med_threshold: r.read_option()?,
            high_threshold: r.read_option()?,
            home_domain: read_optional_string(r, MAX_HOME_DOMAIN_LEN)?,
            signer: r.read_option()?,
        })
    }
}

fn read_optional_string(r: &mut XdrReader<'_>, max: u32) -> XdrResult<Option<String>> {
    let offset = r.position();
    match r.read_u32()? {
        0 => Ok(None),
        1 => r.read_string(max).map(Some),
        value => Err(XdrError::InvalidOptionalFlag { offset, value }),
    }
}

xdr_struct! {
    /// A `limit` of 0 removes the trust line
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ChangeTrustOp {
        pub line: ChangeTrustAsset,
        pub limit: i64,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AllowTrustOp {
        pub trustor: AccountId,
        pub asset: AssetCode,
        pub authorize: u32,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageDataOp {
    pub data_name: String,
    #[serde(with = "crate::serde_bytes::hex_opt")]
    pub data_value: Option<Vec<u8>>,
}

impl WriteXdr for ManageDataOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_string(&self.data_name, MAX_DATA_NAME_LEN)?;
        match &self.data_value {
            Some(value) => {
                w.write_bool(true);
                w.write_var_opaque(value, MAX_DATA_VALUE_LEN)
            }
            None => {
                w.write_bool(false);
                Ok(())
            }
        }
    }
}

impl ReadXdr for ManageDataOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let data_name = r.read_string(MAX_DATA_NAME_LEN)?;
        let offset = r.position();
        let data_value = match r.read_u32()? {
            0 => None,
            1 => Some(r.read_var_opaque(MAX_DATA_VALUE_LEN)?),
            value => return Err(XdrError::InvalidOptionalFlag { offset, value }),
        };
        Ok(Self {
            data_name,
            data_value,
        })
    }
}

xdr_struct! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BumpSequenceOp {
        pub bump_to: i64,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ClaimClaimableBalanceOp {
        pub balance_id: ClaimableBalanceId,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BeginSponsoringFutureReservesOp {
        pub sponsored_id: AccountId,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ClawbackOp {
        pub asset: Asset,
        pub from: MuxedAccount,
        pub amount: i64,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ClawbackClaimableBalanceOp {
        pub balance_id: ClaimableBalanceId,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SetTrustLineFlagsOp {
        pub trustor: AccountId,
        pub asset: Asset,
        pub clear_flags: u32,
        pub set_flags: u32,
    }
}

xdr_struct! {
    /// Deposit into a pool; `min_price` and `max_price` bound the A/B ratio
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LiquidityPoolDepositOp {
        #[serde(with = "crate::serde_bytes::hex_array")]
        pub liquidity_pool_id: Hash,
        pub max_amount_a: i64,
        pub max_amount_b: i64,
        pub min_price: Price,
        pub max_price: Price,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LiquidityPoolWithdrawOp {
        #[serde(with = "crate::serde_bytes::hex_array")]
        pub liquidity_pool_id: Hash,
        /// Pool shares to redeem
        pub amount: i64,
        pub min_amount_a: i64,
        pub min_amount_b: i64,
    }
}

/// Operation payload, keyed by [`OperationType`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationBody {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    PathPaymentStrictReceive(PathPaymentStrictReceiveOp),
    ManageSellOffer(ManageSellOfferOp),
    CreatePassiveSellOffer(CreatePassiveSellOfferOp),
    SetOptions(SetOptionsOp),
    ChangeTrust(ChangeTrustOp),
    AllowTrust(AllowTrustOp),
    AccountMerge(MuxedAccount),
    Inflation,
    ManageData(ManageDataOp),
    BumpSequence(BumpSequenceOp),
    ManageBuyOffer(ManageBuyOfferOp),
    PathPaymentStrictSend(PathPaymentStrictSendOp),
    ClaimClaimableBalance(ClaimClaimableBalanceOp),
    BeginSponsoringFutureReserves(BeginSponsoringFutureReservesOp),
    EndSponsoringFutureReserves,
    Clawback(ClawbackOp),
    ClawbackClaimableBalance(ClawbackClaimableBalanceOp),
    SetTrustLineFlags(SetTrustLineFlagsOp),
    LiquidityPoolDeposit(LiquidityPoolDepositOp),
    LiquidityPoolWithdraw(LiquidityPoolWithdrawOp),
}

impl OperationBody {
    pub fn operation_type(&self) -> OperationType {
        match self {
            OperationBody::CreateAccount(_) => OperationType::CreateAccount,
            OperationBody::Payment(_) => OperationType::Payment,
            OperationBody::PathPaymentStrictReceive(_) => OperationType::PathPaymentStrictReceive,
            OperationBody::ManageSellOffer(_) => OperationType::ManageSellOffer,
            OperationBody::CreatePassiveSellOffer(_) => OperationType::CreatePassiveSellOffer,
            OperationBody::SetOptions(_) => OperationType::SetOptions,
            OperationBody::ChangeTrust(_) => OperationType::ChangeTrust,
            OperationBody::AllowTrust(_) => OperationType::AllowTrust,
            OperationBody::AccountMerge(_) => OperationType::AccountMerge,
            OperationBody::Inflation => OperationType::Inflation,
            OperationBody::ManageData(_) => OperationType::ManageData,
            OperationBody::BumpSequence(_) => OperationType::BumpSequence,
            OperationBody::ManageBuyOffer(_) => OperationType::ManageBuyOffer,
            OperationBody::PathPaymentStrictSend(_) => OperationType::PathPaymentStrictSend,
            OperationBody::ClaimClaimableBalance(_) => OperationType::ClaimClaimableBalance,
            OperationBody::BeginSponsoringFutureReserves(_) => {
                OperationType::BeginSponsoringFutureReserves
            }
            OperationBody::EndSponsoringFutureReserves => {
                OperationType::EndSponsoringFutureReserves
            }
            OperationBody::Clawback(_) => OperationType::Clawback,
            OperationBody::ClawbackClaimableBalance(_) => OperationType::ClawbackClaimableBalance,
            OperationBody::SetTrustLineFlags(_) => OperationType::SetTrustLineFlags,
            OperationBody::LiquidityPoolDeposit(_) => OperationType::LiquidityPoolDeposit,
            OperationBody::LiquidityPoolWithdraw(_) => OperationType::LiquidityPoolWithdraw,
        }
    }
}

impl WriteXdr for OperationBody {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.operation_type().write_xdr(w)?;
        match self {
            OperationBody::CreateAccount(op) => op.write_xdr(w),
            OperationBody::Payment(op) => op.write_xdr(w),
            OperationBody::PathPaymentStrictReceive(op) => op.write_xdr(w),
            OperationBody::ManageSellOffer(op) => op.write_xdr(w),
            OperationBody::CreatePassiveSellOffer(op) => op.write_xdr(w),
            OperationBody::SetOptions(op) => op.write_xdr(w),
            OperationBody::ChangeTrust(op) => op.write_xdr(w),
            OperationBody::AllowTrust(op) => op.write_xdr(w),
            OperationBody::AccountMerge(destination) => destination.write_xdr(w),
            OperationBody::Inflation | OperationBody::EndSponsoringFutureReserves => Ok(()),
            OperationBody::ManageData(op) => op.write_xdr(w),
            OperationBody::BumpSequence(op) => op.write_xdr(w),
            OperationBody::ManageBuyOffer(op) => op.write_xdr(w),
            OperationBody::PathPaymentStrictSend(op) => op.write_xdr(w),
            OperationBody::ClaimClaimableBalance(op) => op.write_xdr(w),
            OperationBody::BeginSponsoringFutureReserves(op) => op.write_xdr(w),
            OperationBody::Clawback(op) => op.write_xdr(w),
            OperationBody::ClawbackClaimableBalance(op) => op.write_xdr(w),
            OperationBody::SetTrustLineFlags(op) => op.write_xdr(w),
            OperationBody::LiquidityPoolDeposit(op) => op.write_xdr(w),
            OperationBody::LiquidityPoolWithdraw(op) => op.write_xdr(w),
        }
    }
}

impl ReadXdr for OperationBody {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let (value, offset) = r.read_discriminant()?;
        let op_type = OperationType::from_discriminant(value).ok_or(
            XdrError::UnknownDiscriminant {
                type_name: "OperationType",
                value,
                offset,
            },
        )?;
        Ok(match op_type {
            OperationType::CreateAccount => OperationBody::CreateAccount(CreateAccountOp::read_xdr(r)?),
            OperationType::Payment => OperationBody::Payment(PaymentOp::read_xdr(r)?),
            OperationType::PathPaymentStrictReceive => {
                OperationBody::PathPaymentStrictReceive(PathPaymentStrictReceiveOp::read_xdr(r)?)
            }
            OperationType::ManageSellOffer => {
                OperationBody::ManageSellOffer(ManageSellOfferOp::read_xdr(r)?)
            }
            OperationType::CreatePassiveSellOffer => {
                OperationBody::CreatePassiveSellOffer(CreatePassiveSellOfferOp::read_xdr(r)?)
            }
            OperationType::SetOptions => OperationBody::SetOptions(SetOptionsOp::read_xdr(r)?),
            OperationType::ChangeTrust => OperationBody::ChangeTrust(ChangeTrustOp::read_xdr(r)?),
            OperationType::AllowTrust => OperationBody::AllowTrust(AllowTrustOp::read_xdr(r)?),
            OperationType::AccountMerge => OperationBody::AccountMerge(MuxedAccount::read_xdr(r)?),
            OperationType::Inflation => OperationBody::Inflation,
            OperationType::ManageData => OperationBody::ManageData(ManageDataOp::read_xdr(r)?),
            OperationType::BumpSequence => {
                OperationBody::BumpSequence(BumpSequenceOp::read_xdr(r)?)
            }
            OperationType::ManageBuyOffer => {
                OperationBody::ManageBuyOffer(ManageBuyOfferOp::read_xdr(r)?)
            }
            OperationType::PathPaymentStrictSend => {
                OperationBody::PathPaymentStrictSend(PathPaymentStrictSendOp::read_xdr(r)?)
            }
            OperationType::ClaimClaimableBalance => {
                OperationBody::ClaimClaimableBalance(ClaimClaimableBalanceOp::read_xdr(r)?)
            }
            OperationType::BeginSponsoringFutureReserves => {
                OperationBody::BeginSponsoringFutureReserves(
                    BeginSponsoringFutureReservesOp::read_xdr(r)?,
                )
            }
            OperationType::EndSponsoringFutureReserves => {
                OperationBody::EndSponsoringFutureReserves
            }
            OperationType::Clawback => OperationBody::Clawback(ClawbackOp::read_xdr(r)?),
            OperationType::ClawbackClaimableBalance => OperationBody::ClawbackClaimableBalance(
                ClawbackClaimableBalanceOp::read_xdr(r)?,
            ),
            OperationType::SetTrustLineFlags => {
                OperationBody::SetTrustLineFlags(SetTrustLineFlagsOp::read_xdr(r)?)
            }
            OperationType::LiquidityPoolDeposit => {
                OperationBody::LiquidityPoolDeposit(LiquidityPoolDepositOp::read_xdr(r)?)
            }
            OperationType::LiquidityPoolWithdraw => {
                OperationBody::LiquidityPoolWithdraw(LiquidityPoolWithdrawOp::read_xdr(r)?)
            }
            OperationType::CreateClaimableBalance
            | OperationType::RevokeSponsorship
            | OperationType::InvokeHostFunction
            | OperationType::ExtendFootprintTtl
            | OperationType::RestoreFootprint => {
                return Err(XdrError::Unsupported {
                    type_name: "OperationType",
                    value,
                    offset,
                })
            }
        })
    }
}

/// A single operation, optionally overriding the transaction source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub source_account: Option<MuxedAccount>,
    pub body: OperationBody,
}

impl Operation {
    pub fn new(body: OperationBody) -> Self {
        Self {
            source_account: None,
            body,
        }
    }

    pub fn with_source(mut self, source: MuxedAccount) -> Self {
        self.source_account = Some(source);
        self
    }

    pub fn operation_type(&self) -> OperationType {
        self.body.operation_type()
    }

    pub fn create_account(destination: AccountId, starting_balance: i64) -> Self {
        Self::new(OperationBody::CreateAccount(CreateAccountOp {
            destination,
            starting_balance,
        }))
    }

    pub fn payment(destination: MuxedAccount, asset: Asset, amount: i64) -> Self {
        Self::new(OperationBody::Payment(PaymentOp {
            destination,
            asset,
            amount,
        }))
    }

    pub fn change_trust(line: impl Into<ChangeTrustAsset>, limit: i64) -> Self {
        Self::new(OperationBody::ChangeTrust(ChangeTrustOp {
            line: line.into(),
            limit,
        }))
    }

    pub fn account_merge(destination: MuxedAccount) -> Self {
        Self::new(OperationBody::AccountMerge(destination))
    }

    pub fn bump_sequence(bump_to: i64) -> Self {
        Self::new(OperationBody::BumpSequence(BumpSequenceOp { bump_to }))
    }

    /// Sets or, with `None`, deletes an account data entry
    pub fn manage_data(name: impl Into<String>, value: Option<Vec<u8>>) -> XdrResult<Self> {
        let name = name.into();
        if name.is_empty() || name.len() > MAX_DATA_NAME_LEN as usize {
            return Err(XdrError::invalid(
                "ManageDataOp",
                format!("data name must be 1..={} bytes", MAX_DATA_NAME_LEN),
            ));
        }
        if let Some(value) = &value {
            if value.len() > MAX_DATA_VALUE_LEN as usize {
                return Err(XdrError::ValueTooLong {
                    type_name: "ManageDataOp",
                    len: value.len(),
                    max: MAX_DATA_VALUE_LEN,
                });
            }
        }
        Ok(Self::new(OperationBody::ManageData(ManageDataOp {
            data_name: name,
            data_value: value,
        })))
    }
}

impl WriteXdr for Operation {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.source_account.write_xdr(w)?;
        self.body.write_xdr(w)
    }
}

impl ReadXdr for Operation {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            source_account: r.read_option()?,
            body: r.nested(OperationBody::read_xdr)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "GAYYAL2XJKSQHQ7RJG7MXHTXPZFPUWPCV46UZLBEEF7FAHIQ36FT7ATA";

    fn account() -> AccountId {
        ACCOUNT.parse().unwrap()
    }

    #[test]
    fn test_payment_layout() {
        let op = Operation::payment(account().into(), Asset::Native, 10_000_000);
        let bytes = op.to_xdr().unwrap();
        // no source | PAYMENT | ed25519 muxed | native | amount
        assert_eq!(bytes.len(), 4 + 4 + 36 + 4 + 8);
        assert_eq!(&bytes[..8], &[0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(&bytes[bytes.len() - 8..], &10_000_000i64.to_be_bytes());
        assert_eq!(Operation::from_xdr(&bytes).unwrap(), op);
    }

    #[test]
    fn test_void_operations() {
        let op = Operation::new(OperationBody::Inflation);
        assert_eq!(op.to_xdr().unwrap(), vec![0, 0, 0, 0, 0, 0, 0, 9]);
        let op = Operation::new(OperationBody::EndSponsoringFutureReserves);
        assert_eq!(op.to_xdr().unwrap(), vec![0, 0, 0, 0, 0, 0, 0, 17]);
    }

    #[test]
    fn test_unsupported_operation_type() {
        let bytes = [0, 0, 0, 0, 0, 0, 0, 24];
        assert_eq!(
            Operation::from_xdr(&bytes),
            Err(XdrError::Unsupported {
                type_name: "OperationType",
                value: 24,
                offset: 4
            })
        );
    }

    #[test]
    fn test_liquidity_pool_deposit_layout() {
        let op = Operation::new(OperationBody::LiquidityPoolDeposit(LiquidityPoolDepositOp {
            liquidity_pool_id: [0x11; 32],
            max_amount_a: 1_000,
            max_amount_b: 2_000,
            min_price: Price { n: 1, d: 3 },
            max_price: Price { n: 3, d: 1 },
        }));
        let bytes = op.to_xdr().unwrap();
        // no source | LIQUIDITY_POOL_DEPOSIT | pool id | two i64 | two prices
        assert_eq!(bytes.len(), 4 + 4 + 32 + 16 + 16);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 22]);
        assert_eq!(&bytes[8..40], &[0x11; 32]);
        assert_eq!(&bytes[bytes.len() - 8..], &[0, 0, 0, 3, 0, 0, 0, 1]);
        assert_eq!(Operation::from_xdr(&bytes).unwrap(), op);
    }

    #[test]
    fn test_liquidity_pool_withdraw_and_balance_clawback() {
        let withdraw = Operation::new(OperationBody::LiquidityPoolWithdraw(LiquidityPoolWithdrawOp {
            liquidity_pool_id: [0x22; 32],
            amount: 500,
            min_amount_a: 1,
            min_amount_b: 2,
        }));
        let bytes = withdraw.to_xdr().unwrap();
        assert_eq!(bytes.len(), 4 + 4 + 32 + 24);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 23]);
        assert_eq!(Operation::from_xdr(&bytes).unwrap(), withdraw);

        let clawback = Operation::new(OperationBody::ClawbackClaimableBalance(
            ClawbackClaimableBalanceOp {
                balance_id: ClaimableBalanceId::V0([0x33; 32]),
            },
        ));
        let bytes = clawback.to_xdr().unwrap();
        assert_eq!(bytes.len(), 4 + 4 + 4 + 32);
        assert_eq!(&bytes[4..12], &[0, 0, 0, 20, 0, 0, 0, 0]);
        assert_eq!(Operation::from_xdr(&bytes).unwrap(), clawback);
    }

    #[test]
    fn test_unknown_operation_type() {
        let bytes = [0, 0, 0, 0, 0, 0, 0, 99];
        assert!(matches!(
            Operation::from_xdr(&bytes),
            Err(XdrError::UnknownDiscriminant { value: 99, offset: 4, .. })
        ));
    }

    #[test]
    fn test_set_options_roundtrip() {
        let op = Operation::new(OperationBody::SetOptions(SetOptionsOp {
            master_weight: Some(1),
            home_domain: Some("example.com".to_string()),
            signer: Some(Signer {
                key: SignerKey::Ed25519(*account().ed25519()),
                weight: 10,
            }),
            ..Default::default()
        }))
        .with_source(account().into());
        let bytes = op.to_xdr().unwrap();
        assert_eq!(bytes.len() % 4, 0);
        assert_eq!(Operation::from_xdr(&bytes).unwrap(), op);
    }

    #[test]
    fn test_home_domain_limit() {
        let op = SetOptionsOp {
            home_domain: Some("x".repeat(33)),
            ..Default::default()
        };
        assert!(op.to_xdr().is_err());
    }

    #[test]
    fn test_manage_data_validation() {
        assert!(Operation::manage_data("", None).is_err());
        assert!(Operation::manage_data("key", Some(vec![0; 65])).is_err());
        let op = Operation::manage_data("key", Some(b"value".to_vec())).unwrap();
        let bytes = op.to_xdr().unwrap();
        assert_eq!(Operation::from_xdr(&bytes).unwrap(), op);
    }

    #[test]
    fn test_path_payment_path_limit() {
        let op = PathPaymentStrictSendOp {
            send_asset: Asset::Native,
            send_amount: 1,
            destination: account().into(),
            dest_asset: Asset::Native,
            dest_min: 1,
            path: vec![Asset::Native; 6],
        };
        assert!(matches!(op.to_xdr(), Err(XdrError::ValueTooLong { max: 5, .. })));
    }

    #[test]
    fn test_change_trust_pool_share() {
        let usd = Asset::credit("USD", account()).unwrap();
        let line = ChangeTrustAsset::PoolShare(LiquidityPoolParameters::ConstantProduct(
            LiquidityPoolConstantProductParameters {
                asset_a: Asset::Native,
                asset_b: usd,
                fee: 30,
            },
        ));
        let op = Operation::change_trust(line, i64::MAX);
        let bytes = op.to_xdr().unwrap();
        assert_eq!(Operation::from_xdr(&bytes).unwrap(), op);
    }

    #[test]
    fn test_operation_type_names() {
        assert_eq!(OperationType::VARIANTS.len(), 27);
        assert_eq!(OperationType::Payment.name(), "Payment");
        assert_eq!(OperationType::from_discriminant(26), Some(OperationType::RestoreFootprint));
    }
}
