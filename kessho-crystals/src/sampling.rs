//! Kyber matrix expansion and noise sampling.
//!
//! These are the two places where the lattice algorithm consumes the XOF and
//! the PRF. They take the strategy by reference, so the same code serves
//! every [`Flavor`](crate::Flavor).

use zeroize::Zeroizing;

use crate::error::Error;
use crate::kyber::KyberSymmetricPrimitives;
use crate::xof::Xof;

/// Polynomial degree.
pub const N: usize = 256;

/// Kyber modulus.
pub const KYBER_Q: i16 = 3329;

/// XOF bytes pulled per refill: three SHAKE-128 blocks, a multiple of 3.
const XOF_REFILL_LEN: usize = 3 * 168;

/// A polynomial in coefficient form.
pub type Poly = [i16; N];

/// Expand `rho` into the `k x k` public matrix.
///
/// Entry `(i, j)` is sampled from the XOF at position `(j, i)`, or `(i, j)`
/// when `transposed` is set. A single XOF handle is reused and repositioned
/// for every entry.
pub fn expand_matrix(
    primitives: &dyn KyberSymmetricPrimitives,
    rho: &[u8],
    k: usize,
    transposed: bool,
) -> Result<Vec<Vec<Poly>>, Error> {
    if !(1..=4).contains(&k) {
        return Err(Error::InvalidParameter("matrix rank must be between 1 and 4"));
    }

    let mut xof = primitives.xof(rho)?;
    let mut matrix = Vec::with_capacity(k);
    for i in 0..k as u8 {
        let mut row = Vec::with_capacity(k);
        for j in 0..k as u8 {
            xof.set_position(if transposed { (i, j) } else { (j, i) });
            row.push(sample_uniform(&mut *xof));
        }
        matrix.push(row);
    }
    Ok(matrix)
}

/// Rejection-sample a uniform polynomial mod q from 12-bit XOF chunks.
fn sample_uniform<X: Xof + ?Sized>(xof: &mut X) -> Poly {
    let mut poly = [0i16; N];
    let mut filled = 0;
    let mut buf = [0u8; XOF_REFILL_LEN];

    while filled < N {
        xof.write_output(&mut buf);
        for chunk in buf.chunks_exact(3) {
            let d1 = u16::from(chunk[0]) | (u16::from(chunk[1] & 0x0f) << 8);
            let d2 = u16::from(chunk[1] >> 4) | (u16::from(chunk[2]) << 4);
            for d in [d1, d2] {
                if filled < N && d < KYBER_Q as u16 {
                    poly[filled] = d as i16;
                    filled += 1;
                }
            }
        }
    }
    poly
}

/// Sample a noise polynomial from the centered binomial distribution.
///
/// Uses `64 * eta` bytes of `PRF(sigma, nonce)`. Every coefficient lies in
/// `[-eta, eta]`. The result is secret and zeroized on drop.
pub fn sample_noise(
    primitives: &dyn KyberSymmetricPrimitives,
    sigma: &[u8],
    nonce: u8,
    eta: usize,
) -> Result<Zeroizing<Poly>, Error> {
    let cbd = match eta {
        2 => cbd2,
        3 => cbd3,
        _ => return Err(Error::InvalidParameter("eta must be 2 or 3")),
    };
    let bytes = primitives.prf(sigma, nonce, eta * N / 4)?;
    let mut poly = Zeroizing::new([0i16; N]);
    cbd(&bytes, &mut poly);
    Ok(poly)
}

fn cbd2(bytes: &[u8], poly: &mut Poly) {
    for (i, chunk) in bytes.chunks_exact(4).enumerate() {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
        for j in 0..8 {
            let a = ((d >> (4 * j)) & 0x3) as i16;
            let b = ((d >> (4 * j + 2)) & 0x3) as i16;
            poly[8 * i + j] = a - b;
        }
    }
}

fn cbd3(bytes: &[u8], poly: &mut Poly) {
    for (i, chunk) in bytes.chunks_exact(3).enumerate() {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], 0]);
        let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as i16;
            let b = ((d >> (6 * j + 3)) & 0x7) as i16;
            poly[4 * i + j] = a - b;
        }
    }
}
