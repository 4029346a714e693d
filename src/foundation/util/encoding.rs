use crate::foundation::CoordinationError;

pub fn decode_hex_prefixed(value: &str) -> Result<Vec<u8>, CoordinationError> {
    let stripped = value.trim().trim_start_matches("0x").trim_start_matches("0X");
    hex::decode(stripped).map_err(|err| CoordinationError::ParseError(format!("invalid hex: {err}")))
}

pub fn parse_hex_fixed<const N: usize>(value: &str) -> Result<[u8; N], CoordinationError> {
    let bytes = decode_hex_prefixed(value)?;
    if bytes.len() != N {
        return Err(CoordinationError::ParseError(format!("expected {N} bytes, got {}", bytes.len())));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}
