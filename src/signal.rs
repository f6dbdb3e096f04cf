use crate::grid::{manhattan, Pos};
use crate::observation::Gem;

/// Default spread of the gem signal, in cells.
pub const DEFAULT_SIGMA: f64 = 3.0;

/// Summed Gaussian attraction at `pos` from every visible gem:
/// `exp(-d^2 / (2 sigma^2))` per gem, `d` being Manhattan distance.
///
/// Only ever used as a tie-breaking gradient when no discrete path exists;
/// goal selection never consults it.
pub fn gem_signal_at(pos: Pos, gems: &[Gem], sigma: f64) -> f64 {
    gems.iter()
        .map(|gem| {
            let d = manhattan(pos, gem.position) as f64;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .sum()
}
