use primitive_types::U256;
use rust_decimal::Decimal;

use crate::types::{QuoterError, Result, TokenAmount};

/// Fee scale: fees are expressed in basis points of this denominator.
pub const FEE_DENOMINATOR: u32 = 10_000;

/// 0.3%, i.e. the classic `997 / 1000` input multiplier
pub const DEFAULT_FEE_BPS: u32 = 30;

/// 10^77 is the largest power of ten that fits in 256 bits.
pub const MAX_TOKEN_DECIMALS: u8 = 77;

/// rust_decimal carries at most 28 fractional digits.
const MAX_DECIMAL_SCALE: u8 = 28;

/// `10^decimals` as a 256-bit integer
pub fn pow10(decimals: u8) -> Result<U256> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(QuoterError::ArithmeticOverflow(format!(
            "10^{} does not fit in 256 bits",
            decimals
        )));
    }
    U256::from(10u8)
        .checked_pow(U256::from(decimals))
        .ok_or_else(|| QuoterError::ArithmeticOverflow(format!("10^{}", decimals)))
}

/// Calculate constant product AMM output amount, fee taken from the input side.
///
/// ```text
/// effective_in = amount_in * (FEE_DENOMINATOR - fee_bps)
/// amount_out   = effective_in * reserve_out / (reserve_in * FEE_DENOMINATOR + effective_in)
/// ```
///
/// Everything is multiplied out before the single floor division.
pub fn get_amount_out(
    amount_in: TokenAmount,
    reserve_in: TokenAmount,
    reserve_out: TokenAmount,
    fee_bps: u32,
) -> Result<TokenAmount> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(QuoterError::DegeneratePool(format!(
            "cannot swap against reserves {}/{}",
            reserve_in, reserve_out
        )));
    }
    if fee_bps > FEE_DENOMINATOR {
        return Err(QuoterError::InvalidFee {
            fee_bps,
            max_bps: FEE_DENOMINATOR,
        });
    }

    let fee_multiplier = U256::from(FEE_DENOMINATOR - fee_bps);
    let effective_in = amount_in
        .checked_mul(fee_multiplier)
        .ok_or_else(|| overflow("amount_in * fee multiplier"))?;
    let numerator = effective_in
        .checked_mul(reserve_out)
        .ok_or_else(|| overflow("effective_in * reserve_out"))?;
    let denominator = reserve_in
        .checked_mul(U256::from(FEE_DENOMINATOR))
        .and_then(|scaled| scaled.checked_add(effective_in))
        .ok_or_else(|| overflow("reserve_in * FEE_DENOMINATOR + effective_in"))?;

    Ok(numerator / denominator)
}

/// Convert a smallest-unit amount into display units: `amount / 10^decimals`.
///
/// Whole and fractional parts are split in 256-bit arithmetic and each is
/// loaded into a `Decimal` exactly, so no float ever touches the value. The
/// result is exact up to 28 significant digits; past that `Decimal` rounds
/// the fractional tail.
pub fn to_decimal(amount: TokenAmount, decimals: u8) -> Result<Decimal> {
    let scale = pow10(decimals)?;
    let whole = u256_to_decimal(amount / scale, 0)?;
    let remainder = amount % scale;

    let fraction = if decimals <= MAX_DECIMAL_SCALE {
        u256_to_decimal(remainder, decimals as u32)?
    } else {
        let cut = pow10(decimals - MAX_DECIMAL_SCALE)?;
        u256_to_decimal(remainder / cut, MAX_DECIMAL_SCALE as u32)?
    };

    whole
        .checked_add(fraction)
        .ok_or_else(|| overflow("whole + fraction"))
}

/// Inverse of [`to_decimal`]: `floor(value * 10^decimals)`.
pub fn from_decimal(value: Decimal, decimals: u8) -> Result<TokenAmount> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(QuoterError::Parse(format!("token amount cannot be negative: {}", value)));
    }

    let mantissa = U256::from(value.mantissa().unsigned_abs());
    let scaled = mantissa
        .checked_mul(pow10(decimals)?)
        .ok_or_else(|| overflow("mantissa * 10^decimals"))?;

    // Decimal scale is at most 28, well inside pow10's range
    Ok(scaled / pow10(value.scale() as u8)?)
}

/// Raw reserve ratio in display units: output units per one input unit, no fee.
///
/// The decimal shift is applied in U256 before dividing, so reserves too small
/// to show in display units still give a price.
pub fn spot_price(
    reserve_in: TokenAmount,
    decimals_in: u8,
    reserve_out: TokenAmount,
    decimals_out: u8,
) -> Result<Decimal> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(QuoterError::DegeneratePool(format!(
            "spot price undefined for reserves {}/{}",
            reserve_in, reserve_out
        )));
    }

    let (numerator, denominator) = if decimals_in >= decimals_out {
        let shifted = reserve_out
            .checked_mul(pow10(decimals_in - decimals_out)?)
            .ok_or_else(|| overflow("reserve_out * 10^decimals"))?;
        (shifted, reserve_in)
    } else {
        let shifted = reserve_in
            .checked_mul(pow10(decimals_out - decimals_in)?)
            .ok_or_else(|| overflow("reserve_in * 10^decimals"))?;
        (reserve_out, shifted)
    };

    ratio_to_decimal(numerator, denominator)
}

/// Calculate price impact of fee and curve: `(spot - effective) / spot * 100`
pub fn price_impact_percent(spot: Decimal, effective: Decimal) -> Result<Decimal> {
    if spot.is_zero() {
        return Err(QuoterError::DegeneratePool("spot price is zero".into()));
    }

    (spot - effective)
        .checked_div(spot)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow("price impact"))
}

/// Absolute divergence of `observed` from `reference`, in percent of `reference`
pub fn divergence_percent(observed: Decimal, reference: Decimal) -> Result<Decimal> {
    if reference.is_zero() {
        return Err(QuoterError::DegeneratePool("reference price is zero".into()));
    }

    (observed - reference)
        .abs()
        .checked_div(reference)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow("divergence"))
}

fn u256_to_decimal(value: U256, scale: u32) -> Result<Decimal> {
    if value > U256::from(i128::MAX as u128) {
        return Err(overflow("value exceeds Decimal range"));
    }
    Decimal::try_from_i128_with_scale(value.low_u128() as i128, scale)
        .map_err(|e| QuoterError::ArithmeticOverflow(format!("{} (value {}, scale {})", e, value, scale)))
}

/// `numerator / denominator` with an exact whole part and up to 28 fraction digits
fn ratio_to_decimal(numerator: U256, denominator: U256) -> Result<Decimal> {
    let whole = u256_to_decimal(numerator / denominator, 0)?;
    let remainder = numerator % denominator;
    if remainder.is_zero() {
        return Ok(whole);
    }

    let mut scale = MAX_DECIMAL_SCALE;
    let scaled = loop {
        if let Some(scaled) = remainder.checked_mul(pow10(scale)?) {
            break scaled;
        }
        if scale == 0 {
            return Err(overflow("remainder * 10^scale"));
        }
        scale -= 1;
    };

    let fraction = u256_to_decimal(scaled / denominator, scale as u32)?;
    whole
        .checked_add(fraction)
        .map(|price| price.normalize())
        .ok_or_else(|| overflow("whole + fraction"))
}

fn overflow(what: &str) -> QuoterError {
    QuoterError::ArithmeticOverflow(what.to_string())
}
