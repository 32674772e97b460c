//! Ledger primitives shared by transactions and results
//!
//! Keys, accounts, signers, assets, memos and preconditions, with the exact
//! field order and discriminants of the network schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ReadXdr, WriteXdr, XdrError, XdrReader, XdrResult, XdrWriter};
use crate::strkey::{self, SignedPayload, StrKey, StrKeyError, VersionByte};
use crate::utils::crypto::last_four;

pub type Hash = [u8; 32];
pub type Uint256 = [u8; 32];

pub const MAX_SIGNATURE_LEN: u32 = 64;
pub const MAX_MEMO_TEXT_LEN: u32 = 28;
pub const MAX_SIGNER_PAYLOAD_LEN: u32 = 64;
pub const MAX_EXTRA_SIGNERS: u32 = 2;

/// Renders a type through its StrKey `Display`/`FromStr` in serde formats
macro_rules! strkey_serde {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fn unknown_arm(type_name: &'static str, value: i32, offset: usize) -> XdrError {
    XdrError::UnknownDiscriminant {
        type_name,
        value,
        offset,
    }
}

// MARK: - Keys

xdr_enum! {
    /// Key kinds shared by signers and muxed accounts
    pub enum CryptoKeyType {
        Ed25519 = 0,
        PreAuthTx = 1,
        HashX = 2,
        Ed25519SignedPayload = 3,
        MuxedEd25519 = 0x100,
    }
}

xdr_enum! {
    pub enum PublicKeyType {
        Ed25519 = 0,
    }
}

xdr_enum! {
    pub enum SignerKeyType {
        Ed25519 = 0,
        PreAuthTx = 1,
        HashX = 2,
        Ed25519SignedPayload = 3,
    }
}

/// An account's ed25519 public key
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PublicKey {
    Ed25519(Uint256),
}

/// Accounts are identified by their master public key
pub type AccountId = PublicKey;

impl PublicKey {
    pub fn ed25519(&self) -> &Uint256 {
        let PublicKey::Ed25519(key) = self;
        key
    }

    /// Last four key bytes, used as a signature hint
    pub fn hint(&self) -> [u8; 4] {
        last_four(self.ed25519())
    }
}

impl From<Uint256> for PublicKey {
    fn from(key: Uint256) -> Self {
        PublicKey::Ed25519(key)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&strkey::encode_account_id(self.ed25519()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl FromStr for PublicKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        strkey::decode_account_id(s).map(PublicKey::Ed25519)
    }
}

strkey_serde!(PublicKey);

impl WriteXdr for PublicKey {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        PublicKeyType::Ed25519.write_xdr(w)?;
        self.ed25519().write_xdr(w)
    }
}

impl ReadXdr for PublicKey {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match PublicKeyType::read_xdr(r)? {
            PublicKeyType::Ed25519 => Ok(PublicKey::Ed25519(r.read_fixed_opaque()?)),
        }
    }
}

xdr_struct! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MuxedAccountMed25519 {
        pub id: u64,
        #[serde(with = "crate::serde_bytes::hex_array")]
        pub ed25519: Uint256,
    }
}

/// A source or destination account, optionally multiplexed with a 64-bit id
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum MuxedAccount {
    Ed25519(Uint256),
    MuxedEd25519(MuxedAccountMed25519),
}

impl MuxedAccount {
    pub fn new(ed25519: Uint256, id: Option<u64>) -> Self {
        match id {
            Some(id) => MuxedAccount::MuxedEd25519(MuxedAccountMed25519 { id, ed25519 }),
            None => MuxedAccount::Ed25519(ed25519),
        }
    }

    pub fn ed25519(&self) -> &Uint256 {
        match self {
            MuxedAccount::Ed25519(key) => key,
            MuxedAccount::MuxedEd25519(muxed) => &muxed.ed25519,
        }
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            MuxedAccount::Ed25519(_) => None,
            MuxedAccount::MuxedEd25519(muxed) => Some(muxed.id),
        }
    }

    /// The underlying account, without the multiplexing id
    pub fn account_id(&self) -> AccountId {
        PublicKey::Ed25519(*self.ed25519())
    }
}

impl From<PublicKey> for MuxedAccount {
    fn from(key: PublicKey) -> Self {
        MuxedAccount::Ed25519(*key.ed25519())
    }
}

impl fmt::Display for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = match self {
            MuxedAccount::Ed25519(key) => strkey::encode_account_id(key),
            MuxedAccount::MuxedEd25519(muxed) => {
                strkey::encode_muxed_account(&muxed.ed25519, muxed.id)
            }
        };
        f.write_str(&encoded)
    }
}

impl fmt::Debug for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MuxedAccount({})", self)
    }
}

/// Accepts both G... and M... addresses
impl FromStr for MuxedAccount {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<StrKey>()? {
            StrKey::AccountId(key) => Ok(MuxedAccount::Ed25519(key)),
            StrKey::MuxedAccount { ed25519, id } => {
                Ok(MuxedAccount::MuxedEd25519(MuxedAccountMed25519 { id, ed25519 }))
            }
            other => Err(StrKeyError::UnexpectedVersion {
                expected: VersionByte::MuxedAccount,
                actual: other.version(),
            }),
        }
    }
}

strkey_serde!(MuxedAccount);

impl WriteXdr for MuxedAccount {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        match self {
            MuxedAccount::Ed25519(key) => {
                CryptoKeyType::Ed25519.write_xdr(w)?;
                key.write_xdr(w)
            }
            MuxedAccount::MuxedEd25519(muxed) => {
                CryptoKeyType::MuxedEd25519.write_xdr(w)?;
                muxed.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for MuxedAccount {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let (value, offset) = r.read_discriminant()?;
        match CryptoKeyType::from_discriminant(value) {
            Some(CryptoKeyType::Ed25519) => Ok(MuxedAccount::Ed25519(r.read_fixed_opaque()?)),
            Some(CryptoKeyType::MuxedEd25519) => {
                Ok(MuxedAccount::MuxedEd25519(MuxedAccountMed25519::read_xdr(r)?))
            }
            _ => Err(unknown_arm("MuxedAccount", value, offset)),
        }
    }
}

// MARK: - Signers

/// Authorization requirement attached to an account or a transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerKey {
    Ed25519(#[serde(with = "crate::serde_bytes::hex_array")] Uint256),
    PreAuthTx(#[serde(with = "crate::serde_bytes::hex_array")] Hash),
    HashX(#[serde(with = "crate::serde_bytes::hex_array")] Hash),
    Ed25519SignedPayload(SignedPayload),
}

impl SignerKey {
    pub fn key_type(&self) -> SignerKeyType {
        match self {
            SignerKey::Ed25519(_) => SignerKeyType::Ed25519,
            SignerKey::PreAuthTx(_) => SignerKeyType::PreAuthTx,
            SignerKey::HashX(_) => SignerKeyType::HashX,
            SignerKey::Ed25519SignedPayload(_) => SignerKeyType::Ed25519SignedPayload,
        }
    }

    /// StrKey form (G, T, X or P prefix)
    pub fn to_strkey(&self) -> Result<String, StrKeyError> {
        match self {
            SignerKey::Ed25519(key) => Ok(strkey::encode_account_id(key)),
            SignerKey::PreAuthTx(hash) => Ok(strkey::encode_pre_auth_tx(hash)),
            SignerKey::HashX(hash) => Ok(strkey::encode_sha256_hash(hash)),
            SignerKey::Ed25519SignedPayload(signed) => strkey::encode_signed_payload(signed),
        }
    }
}

impl FromStr for SignerKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<StrKey>()? {
            StrKey::AccountId(key) => Ok(SignerKey::Ed25519(key)),
            StrKey::PreAuthTx(hash) => Ok(SignerKey::PreAuthTx(hash)),
            StrKey::Sha256Hash(hash) => Ok(SignerKey::HashX(hash)),
            StrKey::SignedPayload(signed) => Ok(SignerKey::Ed25519SignedPayload(signed)),
            other => Err(StrKeyError::UnexpectedVersion {
                expected: VersionByte::AccountId,
                actual: other.version(),
            }),
        }
    }
}

impl WriteXdr for SignerKey {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.key_type().write_xdr(w)?;
        match self {
            SignerKey::Ed25519(key) | SignerKey::PreAuthTx(key) | SignerKey::HashX(key) => {
                key.write_xdr(w)
            }
            SignerKey::Ed25519SignedPayload(signed) => {
                signed.ed25519.write_xdr(w)?;
                w.write_var_opaque(&signed.payload, MAX_SIGNER_PAYLOAD_LEN)
            }
        }
    }
}

impl ReadXdr for SignerKey {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match SignerKeyType::read_xdr(r)? {
            SignerKeyType::Ed25519 => SignerKey::Ed25519(r.read_fixed_opaque()?),
            SignerKeyType::PreAuthTx => SignerKey::PreAuthTx(r.read_fixed_opaque()?),
            SignerKeyType::HashX => SignerKey::HashX(r.read_fixed_opaque()?),
            SignerKeyType::Ed25519SignedPayload => {
                let ed25519 = r.read_fixed_opaque()?;
                let payload = r.read_var_opaque(MAX_SIGNER_PAYLOAD_LEN)?;
                SignerKey::Ed25519SignedPayload(SignedPayload { ed25519, payload })
            }
        })
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Signer {
        pub key: SignerKey,
        pub weight: u32,
    }
}

/// A signature together with the hint identifying its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    #[serde(with = "crate::serde_bytes::hex_array")]
    pub hint: [u8; 4],
    #[serde(with = "hex")]
    pub signature: Vec<u8>,
}

impl DecoratedSignature {
    pub fn new(hint: [u8; 4], signature: Vec<u8>) -> Self {
        Self { hint, signature }
    }
}

impl WriteXdr for DecoratedSignature {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.hint.write_xdr(w)?;
        w.write_var_opaque(&self.signature, MAX_SIGNATURE_LEN)
    }
}

impl ReadXdr for DecoratedSignature {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            hint: r.read_fixed_opaque()?,
            signature: r.read_var_opaque(MAX_SIGNATURE_LEN)?,
        })
    }
}

// MARK: - Assets

xdr_enum! {
    pub enum AssetType {
        Native = 0,
        CreditAlphanum4 = 1,
        CreditAlphanum12 = 2,
        PoolShare = 3,
    }
}

/// Asset codes are rendered as text, trailing zero bytes trimmed
mod asset_code_serde {
    use super::*;

    pub fn serialize<S, const N: usize>(code: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&code_to_string(code))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        code_from_str(&s).map_err(serde::de::Error::custom)
    }
}

fn code_to_string(code: &[u8]) -> String {
    let end = code.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&code[..end]).into_owned()
}

fn code_from_str<const N: usize>(code: &str) -> XdrResult<[u8; N]> {
    if code.is_empty() || code.len() > N {
        return Err(XdrError::invalid(
            "AssetCode",
            format!("code '{}' must be 1..={} characters", code, N),
        ));
    }
    if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(XdrError::invalid(
            "AssetCode",
            format!("code '{}' must be ASCII alphanumeric", code),
        ));
    }
    let mut out = [0u8; N];
    out[..code.len()].copy_from_slice(code.as_bytes());
    Ok(out)
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AlphaNum4 {
        #[serde(with = "asset_code_serde")]
        pub asset_code: [u8; 4],
        pub issuer: AccountId,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AlphaNum12 {
        #[serde(with = "asset_code_serde")]
        pub asset_code: [u8; 12],
        pub issuer: AccountId,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
}

impl Asset {
    /// Issued asset; codes of up to 4 characters use the short form
    pub fn credit(code: &str, issuer: AccountId) -> XdrResult<Self> {
        if code.len() <= 4 {
            Ok(Asset::CreditAlphanum4(AlphaNum4 {
                asset_code: code_from_str(code)?,
                issuer,
            }))
        } else {
            Ok(Asset::CreditAlphanum12(AlphaNum12 {
                asset_code: code_from_str(code)?,
                issuer,
            }))
        }
    }

    pub fn asset_type(&self) -> AssetType {
        match self {
            Asset::Native => AssetType::Native,
            Asset::CreditAlphanum4(_) => AssetType::CreditAlphanum4,
            Asset::CreditAlphanum12(_) => AssetType::CreditAlphanum12,
        }
    }

    pub fn code(&self) -> String {
        match self {
            Asset::Native => "XLM".to_string(),
            Asset::CreditAlphanum4(a) => code_to_string(&a.asset_code),
            Asset::CreditAlphanum12(a) => code_to_string(&a.asset_code),
        }
    }

    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Asset::Native => None,
            Asset::CreditAlphanum4(a) => Some(&a.issuer),
            Asset::CreditAlphanum12(a) => Some(&a.issuer),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issuer() {
            None => f.write_str("native"),
            Some(issuer) => write!(f, "{}:{}", self.code(), issuer),
        }
    }
}

/// Parses `native`, `XLM` or `CODE:ISSUER`
impl FromStr for Asset {
    type Err = XdrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("native") || s == "XLM" {
            return Ok(Asset::Native);
        }
        let (code, issuer) = s
            .split_once(':')
            .ok_or_else(|| XdrError::invalid("Asset", "expected 'native' or 'CODE:ISSUER'"))?;
        let issuer = issuer
            .parse::<AccountId>()
            .map_err(|e| XdrError::invalid("Asset", format!("issuer: {}", e)))?;
        Asset::credit(code, issuer)
    }
}

impl WriteXdr for Asset {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.asset_type().write_xdr(w)?;
        match self {
            Asset::Native => Ok(()),
            Asset::CreditAlphanum4(a) => a.write_xdr(w),
            Asset::CreditAlphanum12(a) => a.write_xdr(w),
        }
    }
}

impl ReadXdr for Asset {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let (value, offset) = r.read_discriminant()?;
        match AssetType::from_discriminant(value) {
            Some(AssetType::Native) => Ok(Asset::Native),
            Some(AssetType::CreditAlphanum4) => Ok(Asset::CreditAlphanum4(AlphaNum4::read_xdr(r)?)),
            Some(AssetType::CreditAlphanum12) => {
                Ok(Asset::CreditAlphanum12(AlphaNum12::read_xdr(r)?))
            }
            _ => Err(unknown_arm("Asset", value, offset)),
        }
    }
}

/// Asset code without its issuer, as used by allow-trust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCode {
    CreditAlphanum4(#[serde(with = "asset_code_serde")] [u8; 4]),
    CreditAlphanum12(#[serde(with = "asset_code_serde")] [u8; 12]),
}

impl AssetCode {
    pub fn new(code: &str) -> XdrResult<Self> {
        if code.len() <= 4 {
            Ok(AssetCode::CreditAlphanum4(code_from_str(code)?))
        } else {
            Ok(AssetCode::CreditAlphanum12(code_from_str(code)?))
        }
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCode::CreditAlphanum4(code) => f.write_str(&code_to_string(code)),
            AssetCode::CreditAlphanum12(code) => f.write_str(&code_to_string(code)),
        }
    }
}

impl WriteXdr for AssetCode {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        match self {
            AssetCode::CreditAlphanum4(code) => {
                AssetType::CreditAlphanum4.write_xdr(w)?;
                code.write_xdr(w)
            }
            AssetCode::CreditAlphanum12(code) => {
                AssetType::CreditAlphanum12.write_xdr(w)?;
                code.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for AssetCode {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let (value, offset) = r.read_discriminant()?;
        match AssetType::from_discriminant(value) {
            Some(AssetType::CreditAlphanum4) => Ok(AssetCode::CreditAlphanum4(r.read_fixed_opaque()?)),
            Some(AssetType::CreditAlphanum12) => {
                Ok(AssetCode::CreditAlphanum12(r.read_fixed_opaque()?))
            }
            _ => Err(unknown_arm("AssetCode", value, offset)),
        }
    }
}

xdr_enum! {
    pub enum LiquidityPoolType {
        ConstantProduct = 0,
    }
}

xdr_struct! {
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LiquidityPoolConstantProductParameters {
        pub asset_a: Asset,
        pub asset_b: Asset,
        pub fee: i32,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityPoolParameters {
    ConstantProduct(LiquidityPoolConstantProductParameters),
}

impl WriteXdr for LiquidityPoolParameters {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        match self {
            LiquidityPoolParameters::ConstantProduct(params) => {
                LiquidityPoolType::ConstantProduct.write_xdr(w)?;
                params.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for LiquidityPoolParameters {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match LiquidityPoolType::read_xdr(r)? {
            LiquidityPoolType::ConstantProduct => Ok(LiquidityPoolParameters::ConstantProduct(
                LiquidityPoolConstantProductParameters::read_xdr(r)?,
            )),
        }
    }
}

/// Trust line target: a regular asset or a liquidity pool share
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTrustAsset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
    PoolShare(LiquidityPoolParameters),
}

impl From<Asset> for ChangeTrustAsset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => ChangeTrustAsset::Native,
            Asset::CreditAlphanum4(a) => ChangeTrustAsset::CreditAlphanum4(a),
            Asset::CreditAlphanum12(a) => ChangeTrustAsset::CreditAlphanum12(a),
        }
    }
}

impl WriteXdr for ChangeTrustAsset {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        match self {
            ChangeTrustAsset::Native => AssetType::Native.write_xdr(w),
            ChangeTrustAsset::CreditAlphanum4(a) => {
                AssetType::CreditAlphanum4.write_xdr(w)?;
                a.write_xdr(w)
            }
            ChangeTrustAsset::CreditAlphanum12(a) => {
                AssetType::CreditAlphanum12.write_xdr(w)?;
                a.write_xdr(w)
            }
            ChangeTrustAsset::PoolShare(params) => {
                AssetType::PoolShare.write_xdr(w)?;
                params.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for ChangeTrustAsset {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match AssetType::read_xdr(r)? {
            AssetType::Native => ChangeTrustAsset::Native,
            AssetType::CreditAlphanum4 => ChangeTrustAsset::CreditAlphanum4(AlphaNum4::read_xdr(r)?),
            AssetType::CreditAlphanum12 => {
                ChangeTrustAsset::CreditAlphanum12(AlphaNum12::read_xdr(r)?)
            }
            AssetType::PoolShare => {
                ChangeTrustAsset::PoolShare(r.nested(LiquidityPoolParameters::read_xdr)?)
            }
        })
    }
}

xdr_struct! {
    /// Exchange rate as a fraction `n / d`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Price {
        pub n: i32,
        pub d: i32,
    }
}

xdr_enum! {
    pub enum ClaimableBalanceIdType {
        V0 = 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimableBalanceId {
    V0(#[serde(with = "crate::serde_bytes::hex_array")] Hash),
}

impl WriteXdr for ClaimableBalanceId {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        match self {
            ClaimableBalanceId::V0(hash) => {
                ClaimableBalanceIdType::V0.write_xdr(w)?;
                hash.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for ClaimableBalanceId {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match ClaimableBalanceIdType::read_xdr(r)? {
            ClaimableBalanceIdType::V0 => Ok(ClaimableBalanceId::V0(r.read_fixed_opaque()?)),
        }
    }
}

// MARK: - Memo

xdr_enum! {
    pub enum MemoType {
        None = 0,
        Text = 1,
        Id = 2,
        Hash = 3,
        Return = 4,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Memo {
    #[default]
    None,
    Text(String),
    Id(u64),
    Hash(#[serde(with = "crate::serde_bytes::hex_array")] Hash),
    Return(#[serde(with = "crate::serde_bytes::hex_array")] Hash),
}

impl Memo {
    /// Text memo of at most 28 bytes
    pub fn text(text: impl Into<String>) -> XdrResult<Self> {
        let text = text.into();
        if text.len() > MAX_MEMO_TEXT_LEN as usize {
            return Err(XdrError::ValueTooLong {
                type_name: "Memo",
                len: text.len(),
                max: MAX_MEMO_TEXT_LEN,
            });
        }
        Ok(Memo::Text(text))
    }

    pub fn memo_type(&self) -> MemoType {
        match self {
            Memo::None => MemoType::None,
            Memo::Text(_) => MemoType::Text,
            Memo::Id(_) => MemoType::Id,
            Memo::Hash(_) => MemoType::Hash,
            Memo::Return(_) => MemoType::Return,
        }
    }
}

impl WriteXdr for Memo {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.memo_type().write_xdr(w)?;
        match self {
            Memo::None => Ok(()),
            Memo::Text(text) => w.write_string(text, MAX_MEMO_TEXT_LEN),
            Memo::Id(id) => id.write_xdr(w),
            Memo::Hash(hash) | Memo::Return(hash) => hash.write_xdr(w),
        }
    }
}

impl ReadXdr for Memo {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match MemoType::read_xdr(r)? {
            MemoType::None => Memo::None,
            MemoType::Text => Memo::Text(r.read_string(MAX_MEMO_TEXT_LEN)?),
            MemoType::Id => Memo::Id(r.read_u64()?),
            MemoType::Hash => Memo::Hash(r.read_fixed_opaque()?),
            MemoType::Return => Memo::Return(r.read_fixed_opaque()?),
        })
    }
}

// MARK: - Preconditions

xdr_struct! {
    /// Validity window in unix seconds; a zero `max_time` means unbounded
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct TimeBounds {
        pub min_time: u64,
        pub max_time: u64,
    }
}

xdr_struct! {
    /// Validity window in ledger numbers; a zero `max_ledger` means unbounded
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct LedgerBounds {
        pub min_ledger: u32,
        pub max_ledger: u32,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreconditionsV2 {
    pub time_bounds: Option<TimeBounds>,
    pub ledger_bounds: Option<LedgerBounds>,
    pub min_seq_num: Option<i64>,
    pub min_seq_age: u64,
    pub min_seq_ledger_gap: u32,
    pub extra_signers: Vec<SignerKey>,
}

impl WriteXdr for PreconditionsV2 {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.time_bounds.write_xdr(w)?;
        self.ledger_bounds.write_xdr(w)?;
        self.min_seq_num.write_xdr(w)?;
        self.min_seq_age.write_xdr(w)?;
        self.min_seq_ledger_gap.write_xdr(w)?;
        w.write_var_array(&self.extra_signers, MAX_EXTRA_SIGNERS)
    }
}

impl ReadXdr for PreconditionsV2 {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            time_bounds: r.read_option()?,
            ledger_bounds: r.read_option()?,
            min_seq_num: r.read_option()?,
            min_seq_age: r.read_u64()?,
            min_seq_ledger_gap: r.read_u32()?,
            extra_signers: r.read_var_array(MAX_EXTRA_SIGNERS)?,
        })
    }
}

xdr_enum! {
    pub enum PreconditionType {
        None = 0,
        Time = 1,
        V2 = 2,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preconditions {
    #[default]
    None,
    Time(TimeBounds),
    V2(PreconditionsV2),
}

impl Preconditions {
    pub fn precondition_type(&self) -> PreconditionType {
        match self {
            Preconditions::None => PreconditionType::None,
            Preconditions::Time(_) => PreconditionType::Time,
            Preconditions::V2(_) => PreconditionType::V2,
        }
    }

    pub fn time_bounds(&self) -> Option<&TimeBounds> {
        match self {
            Preconditions::None => None,
            Preconditions::Time(bounds) => Some(bounds),
            Preconditions::V2(v2) => v2.time_bounds.as_ref(),
        }
    }
}

impl WriteXdr for Preconditions {
    fn write_xdr(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.precondition_type().write_xdr(w)?;
        match self {
            Preconditions::None => Ok(()),
            Preconditions::Time(bounds) => bounds.write_xdr(w),
            Preconditions::V2(v2) => v2.write_xdr(w),
        }
    }
}

impl ReadXdr for Preconditions {
    fn read_xdr(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match PreconditionType::read_xdr(r)? {
            PreconditionType::None => Preconditions::None,
            PreconditionType::Time => Preconditions::Time(TimeBounds::read_xdr(r)?),
            PreconditionType::V2 => Preconditions::V2(r.nested(PreconditionsV2::read_xdr)?),
        })
    }
}
