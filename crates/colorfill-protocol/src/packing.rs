//! The packed-grid encoding used by progress reports.
//!
//! Four cells share one byte, two bits each, least significant bits
//! first: cell `i+0` in bits 0–1, `i+1` in bits 2–3, `i+2` in bits 4–5
//! and `i+3` in bits 6–7. A trailing partial group is padded with
//! `Empty` cells. The byte string travels as standard (padded) base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{CellState, ProtocolError};

/// Cells per packed byte.
pub const CELLS_PER_BYTE: usize = 4;

/// Packs cells two bits apiece, padding the last byte with `Empty`.
pub fn pack_cells(cells: &[CellState]) -> Vec<u8> {
    cells
        .chunks(CELLS_PER_BYTE)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, cell)| byte | (cell.code() << (2 * i)))
        })
        .collect()
}

/// Expands packed bytes back into cells, four per byte.
///
/// The result always has `4 * bytes.len()` entries; any padding added by
/// [`pack_cells`] comes back as trailing `Empty` cells.
pub fn unpack_cells(bytes: &[u8]) -> Result<Vec<CellState>, ProtocolError> {
    let mut cells = Vec::with_capacity(bytes.len() * CELLS_PER_BYTE);
    for &byte in bytes {
        for i in 0..CELLS_PER_BYTE {
            cells.push(CellState::try_from((byte >> (2 * i)) & 0b11)?);
        }
    }
    Ok(cells)
}

/// Packs cells and base64-encodes the result.
pub fn encode_packed(cells: &[CellState]) -> String {
    STANDARD.encode(pack_cells(cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellState::{Empty as E, Filled as F, Solid as S};

    #[test]
    fn test_pack_places_cells_low_bits_first() {
        // 2 | 1<<2 | 0<<4 | 2<<6 = 2 + 4 + 128
        assert_eq!(pack_cells(&[F, S, E, F]), vec![134]);
    }

    #[test]
    fn test_pack_pads_partial_group_with_empty() {
        assert_eq!(pack_cells(&[S, S, S, S, F]), vec![0b0101_0101, 0b10]);
        assert_eq!(pack_cells(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_unpack_restores_cells() {
        let cells = vec![E, S, F, F, S, E, E, S];
        let packed = pack_cells(&cells);
        assert_eq!(packed.len(), 2);
        assert_eq!(unpack_cells(&packed).unwrap(), cells);
    }

    #[test]
    fn test_unpack_restores_whole_groups_of_any_count() {
        let pattern = [F, E, S, S, E, F, F];
        for groups in 0..6 {
            let cells: Vec<CellState> = pattern.iter().copied().cycle().take(groups * 4).collect();
            let packed = pack_cells(&cells);
            assert_eq!(packed.len(), groups);
            assert_eq!(unpack_cells(&packed).unwrap(), cells, "groups = {groups}");
        }
    }

    #[test]
    fn test_unpack_of_padded_group_yields_trailing_empty() {
        let packed = pack_cells(&[F, F, F]);
        assert_eq!(unpack_cells(&packed).unwrap(), vec![F, F, F, E]);
    }

    #[test]
    fn test_unpack_rejects_code_three() {
        let err = unpack_cells(&[0b0000_0011]).unwrap_err();
        assert_eq!(err, ProtocolError::InvalidPackedCell(3));
    }

    #[test]
    fn test_encode_packed_uses_padded_base64() {
        // One byte 0x86 → "hg=="
        assert_eq!(encode_packed(&[F, S, E, F]), "hg==");
        assert_eq!(encode_packed(&[]), "");
    }
}
